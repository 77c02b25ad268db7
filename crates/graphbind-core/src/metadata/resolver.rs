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

//! Resolution of taxon sets to concrete classes.
//!
//! A taxon is any name that classifies an object: a fully-qualified class
//! name, a simple class name, a declared label, or the name of a supertype
//! or interface. Each known taxon denotes a set of concrete classes (the
//! named classes and all of their concrete descendants). Resolving a taxon
//! set intersects those sets and returns the single most-specific class in
//! the intersection.
//!
//! | Taxa | Result |
//! |------|--------|
//! | `Login`, `User` (where `Member` is labelled `User` and extends `Login`) | `Member` |
//! | `Topic`, `Member` | none: disjoint hierarchies |
//! | `IMembership` alone | none: interface taxa never resolve alone |
//! | `Silver`, `Pewter`, `Tin` | `SilverMembership`: unknown taxa are ignored |

use crate::metadata::class::{ClassDef, ClassKind};
use crate::metadata::naming;
use std::collections::{BTreeSet, HashMap};
use tracing::trace;

/// Class hierarchy index answering taxon and assignability questions.
#[derive(Debug, Clone, Default)]
pub struct TypeResolver {
    kinds: HashMap<String, ClassKind>,
    ancestors: HashMap<String, BTreeSet<String>>,
    taxa: HashMap<String, BTreeSet<String>>,
    simple_names: HashMap<String, BTreeSet<String>>,
}

impl TypeResolver {
    pub(crate) fn new<'a>(defs: impl IntoIterator<Item = &'a ClassDef>) -> Self {
        let defs: Vec<&ClassDef> = defs.into_iter().collect();
        let mut resolver = TypeResolver::default();

        for def in &defs {
            let fqn = def.name().to_string();
            resolver.kinds.insert(fqn.clone(), def.kind());
            resolver
                .simple_names
                .entry(naming::simple_name(&fqn).to_string())
                .or_default()
                .insert(fqn.clone());
            for taxon in [def.name(), naming::simple_name(def.name()), def.own_label()] {
                resolver
                    .taxa
                    .entry(taxon.to_string())
                    .or_default()
                    .insert(fqn.clone());
            }
        }

        let direct: HashMap<String, Vec<String>> = defs
            .iter()
            .map(|def| {
                let supers = def
                    .superclass()
                    .into_iter()
                    .chain(def.interfaces().iter().map(String::as_str))
                    .flat_map(|name| resolver.canonical(name))
                    .collect();
                (def.name().to_string(), supers)
            })
            .collect();

        for def in &defs {
            let mut seen = BTreeSet::new();
            let mut stack: Vec<&String> = direct.get(def.name()).into_iter().flatten().collect();
            while let Some(next) = stack.pop() {
                if seen.insert(next.clone()) {
                    stack.extend(direct.get(next).into_iter().flatten());
                }
            }
            seen.remove(def.name());
            resolver.ancestors.insert(def.name().to_string(), seen);
        }

        resolver
    }

    /// Fully-qualified names a type name refers to: itself if it is a known
    /// FQN, else every class with that simple name.
    pub fn canonical(&self, name: &str) -> Vec<String> {
        if self.kinds.contains_key(name) {
            return vec![name.to_string()];
        }
        self.simple_names
            .get(name)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Kind of a known class.
    pub fn kind(&self, fqn: &str) -> Option<ClassKind> {
        self.kinds.get(fqn).copied()
    }

    /// All supertypes (superclasses and interfaces, transitively) of `fqn`.
    pub fn ancestors(&self, fqn: &str) -> impl Iterator<Item = &str> {
        self.ancestors
            .get(fqn)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// True if a value of class `class` may be stored where `target` is
    /// declared.
    pub fn is_assignable(&self, target: &str, class: &str) -> bool {
        let Some(ancestors) = self.ancestors.get(class) else {
            return false;
        };
        self.canonical(target)
            .iter()
            .any(|t| t == class || ancestors.contains(t))
    }

    fn is_concrete(&self, fqn: &str) -> bool {
        self.kinds.get(fqn) == Some(&ClassKind::Concrete)
    }

    fn compatible(&self, denoted: &BTreeSet<String>) -> BTreeSet<String> {
        self.kinds
            .keys()
            .filter(|c| self.is_concrete(c))
            .filter(|c| {
                denoted.contains(*c)
                    || self
                        .ancestors
                        .get(*c)
                        .is_some_and(|a| !a.is_disjoint(denoted))
            })
            .cloned()
            .collect()
    }

    /// Concrete classes compatible with a single taxon.
    pub fn compatible_classes(&self, taxon: &str) -> BTreeSet<String> {
        self.taxa
            .get(taxon)
            .map(|denoted| self.compatible(denoted))
            .unwrap_or_default()
    }

    /// Resolve a taxon set to the unique most-specific concrete class.
    ///
    /// Argument order is irrelevant and unknown taxa are ignored. Returns
    /// `None` when no taxon is known, when every known taxon names only
    /// abstract classes or interfaces, when the intersection is empty, or
    /// when it has more than one leaf.
    pub fn resolve<S: AsRef<str>>(&self, taxa: &[S]) -> Option<&str> {
        let known: Vec<&BTreeSet<String>> = taxa
            .iter()
            .filter_map(|t| self.taxa.get(t.as_ref()))
            .collect();

        if known.is_empty() {
            trace!("no known taxa among {:?}", names(taxa));
            return None;
        }

        if known
            .iter()
            .all(|denoted| denoted.iter().all(|c| !self.is_concrete(c)))
        {
            trace!("only abstract taxa among {:?}", names(taxa));
            return None;
        }

        let mut sets = known.into_iter().map(|denoted| self.compatible(denoted));
        let first = sets.next()?;
        let intersection = sets.fold(first, |acc, set| &acc & &set);

        let mut leaves = intersection.iter().filter(|c| {
            !intersection
                .iter()
                .any(|d| d != *c && self.ancestors.get(d).is_some_and(|a| a.contains(*c)))
        });

        let leaf = leaves.next()?;
        if leaves.next().is_some() {
            trace!("no unique leaf for {:?}", names(taxa));
            return None;
        }
        let (fqn, _) = self.kinds.get_key_value(leaf.as_str())?;
        Some(fqn.as_str())
    }
}

fn names<S: AsRef<str>>(taxa: &[S]) -> Vec<&str> {
    taxa.iter().map(AsRef::as_ref).collect()
}
