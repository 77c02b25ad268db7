// graphbind - Runtime object-graph mapping for labeled property graphs
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The class registry: a catalog of definitions indexed for lookup and
//! resolution, with descriptors built lazily on first use.

use crate::entity::EntityRef;
use crate::metadata::class::{ClassDef, ClassInfo};
use crate::metadata::naming;
use crate::metadata::resolver::TypeResolver;
use once_cell::sync::OnceCell;
use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// The set of class definitions available to a mapping session.
#[derive(Debug, Clone, Default)]
pub struct ClassCatalog {
    defs: Vec<ClassDef>,
}

impl ClassCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition (builder style).
    pub fn with(mut self, def: ClassDef) -> Self {
        self.defs.push(def);
        self
    }

    /// Add a definition.
    pub fn add(&mut self, def: ClassDef) {
        self.defs.push(def);
    }

    /// All definitions, in insertion order.
    pub fn defs(&self) -> &[ClassDef] {
        &self.defs
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// True if the catalog holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl FromIterator<ClassDef> for ClassCatalog {
    fn from_iter<I: IntoIterator<Item = ClassDef>>(iter: I) -> Self {
        Self {
            defs: iter.into_iter().collect(),
        }
    }
}

impl Extend<ClassDef> for ClassCatalog {
    fn extend<I: IntoIterator<Item = ClassDef>>(&mut self, iter: I) {
        self.defs.extend(iter);
    }
}

struct Entry {
    def: ClassDef,
    info: OnceCell<Arc<ClassInfo>>,
}

/// Indexed view of the classes under a set of namespaces.
///
/// # Examples
///
/// ```
/// use graphbind_core::metadata::{ClassCatalog, ClassDef, MetaData};
///
/// #[derive(Default)]
/// struct Login;
/// #[derive(Default)]
/// struct Member;
///
/// let catalog = ClassCatalog::new()
///     .with(ClassDef::entity::<Login>("forum.Login"))
///     .with(ClassDef::entity::<Member>("forum.Member").extends("forum.Login").label("User"));
/// let meta = MetaData::new(catalog, &["forum"]);
///
/// assert_eq!(meta.class_info("User").unwrap().name(), "forum.Member");
/// assert_eq!(meta.class_info("forum.Member").unwrap().labels(), ["User", "Login"]);
/// assert_eq!(meta.resolve(&["Login", "User"]).unwrap().name(), "forum.Member");
/// ```
pub struct MetaData {
    entries: Vec<Entry>,
    by_name: HashMap<String, usize>,
    by_simple_name: HashMap<String, Vec<usize>>,
    by_label: HashMap<String, Vec<usize>>,
    by_type: HashMap<TypeId, usize>,
    resolver: TypeResolver,
}

fn in_namespace(name: &str, namespace: &str) -> bool {
    name == namespace
        || name
            .strip_prefix(namespace)
            .is_some_and(|rest| rest.starts_with('.'))
}

impl MetaData {
    /// Index every definition whose name lies in one of `namespaces`.
    pub fn new<S: AsRef<str>>(catalog: ClassCatalog, namespaces: &[S]) -> Self {
        let entries: Vec<Entry> = catalog
            .defs
            .into_iter()
            .filter(|def| {
                namespaces
                    .iter()
                    .any(|ns| in_namespace(def.name(), ns.as_ref()))
            })
            .map(|def| Entry {
                def,
                info: OnceCell::new(),
            })
            .collect();

        let mut by_name = HashMap::new();
        let mut by_simple_name: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_label: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_type = HashMap::new();

        for (slot, entry) in entries.iter().enumerate() {
            let def = &entry.def;
            by_name.insert(def.name().to_string(), slot);
            by_simple_name
                .entry(naming::simple_name(def.name()).to_string())
                .or_default()
                .push(slot);
            by_label
                .entry(def.own_label().to_string())
                .or_default()
                .push(slot);
            if let Some(type_id) = def.rust_type() {
                by_type.insert(type_id, slot);
            }
        }

        let resolver = TypeResolver::new(entries.iter().map(|e| &e.def));
        debug!(classes = entries.len(), "indexed class metadata");

        Self {
            entries,
            by_name,
            by_simple_name,
            by_label,
            by_type,
            resolver,
        }
    }

    /// Number of indexed classes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no class is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of all indexed classes, in catalog order.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.def.name())
    }

    /// The type resolver over the indexed hierarchy.
    pub fn resolver(&self) -> &TypeResolver {
        &self.resolver
    }

    fn unique(slots: Option<&Vec<usize>>) -> Option<usize> {
        match slots.map(Vec::as_slice) {
            Some([slot]) => Some(*slot),
            _ => None,
        }
    }

    fn slot(&self, name: &str) -> Option<usize> {
        self.by_name
            .get(name)
            .copied()
            .or_else(|| Self::unique(self.by_simple_name.get(name)))
            .or_else(|| Self::unique(self.by_label.get(name)))
    }

    fn labels(&self, slot: usize) -> Vec<String> {
        let mut labels = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(slot);

        while let Some(slot) = current {
            if !visited.insert(slot) {
                break;
            }
            let def = &self.entries[slot].def;
            labels.push(def.own_label().to_string());
            current = def.superclass().and_then(|name| {
                self.by_name
                    .get(name)
                    .copied()
                    .or_else(|| Self::unique(self.by_simple_name.get(name)))
            });
        }

        labels
    }

    fn info_at(&self, slot: usize) -> Arc<ClassInfo> {
        self.entries[slot]
            .info
            .get_or_init(|| {
                let def = &self.entries[slot].def;
                debug!(class = def.name(), "building class descriptor");
                Arc::new(ClassInfo::from_def(def, self.labels(slot)))
            })
            .clone()
    }

    /// Look a class up by fully-qualified name, unique simple name or
    /// unique label, in that order.
    pub fn class_info(&self, name: &str) -> Option<Arc<ClassInfo>> {
        self.slot(name).map(|slot| self.info_at(slot))
    }

    /// The descriptor of the class backing a Rust type.
    pub fn class_info_by_type(&self, type_id: TypeId) -> Option<Arc<ClassInfo>> {
        self.by_type.get(&type_id).map(|slot| self.info_at(*slot))
    }

    /// The descriptor of the class of a mapped object.
    pub fn class_info_for(&self, entity: &EntityRef) -> Option<Arc<ClassInfo>> {
        self.class_info_by_type(entity.entity_type())
    }

    /// Resolve a taxon set to the descriptor of its unique concrete leaf.
    pub fn resolve<S: AsRef<str>>(&self, taxa: &[S]) -> Option<Arc<ClassInfo>> {
        self.resolver
            .resolve(taxa)
            .and_then(|name| self.by_name.get(name).copied())
            .map(|slot| self.info_at(slot))
    }

    /// True if instances of `class` may be stored where `target` is declared.
    ///
    /// Primitive and other unindexed names are only assignable to themselves.
    pub fn is_assignable(&self, target: &str, class: &str) -> bool {
        target == class || self.resolver.is_assignable(target, class)
    }
}

impl std::fmt::Debug for MetaData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetaData")
            .field("classes", &self.entries.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Node;
    #[derive(Default)]
    struct Other;

    fn meta() -> MetaData {
        let catalog = ClassCatalog::new()
            .with(ClassDef::abstract_class("school.DomainObject"))
            .with(ClassDef::entity::<Node>("school.Student").extends("school.DomainObject"))
            .with(ClassDef::entity::<Other>("school.staff.Teacher").extends("DomainObject"))
            .with(ClassDef::entity::<Other>("schoolyard.Swing"));
        MetaData::new(catalog, &["school"])
    }

    #[test]
    fn test_namespace_filter() {
        let meta = meta();
        assert_eq!(meta.len(), 3);
        assert!(meta.class_info("schoolyard.Swing").is_none());
        assert!(meta.class_info("Swing").is_none());
    }

    #[test]
    fn test_labels_follow_superclass_chain() {
        let meta = meta();
        assert_eq!(
            meta.class_info("Student").unwrap().labels(),
            ["Student", "DomainObject"]
        );
        assert_eq!(
            meta.class_info("Teacher").unwrap().labels(),
            ["Teacher", "DomainObject"]
        );
    }

    #[test]
    fn test_descriptor_is_built_once() {
        let meta = meta();
        let a = meta.class_info("Student").unwrap();
        let b = meta.class_info("school.Student").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_lookup_by_type() {
        let meta = meta();
        let student = EntityRef::new(Node);
        assert_eq!(meta.class_info_for(&student).unwrap().name(), "school.Student");
    }

    #[test]
    fn test_primitive_assignability() {
        let meta = meta();
        assert!(meta.is_assignable("String", "String"));
        assert!(!meta.is_assignable("Long", "String"));
        assert!(meta.is_assignable("DomainObject", "school.Student"));
    }
}
