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

//! Class definitions (the metadata source) and class descriptors.

use crate::entity::EntityRef;
use crate::error::{Error, Result};
use crate::metadata::member::{FieldInfo, MethodInfo, MethodKind};
use crate::metadata::naming::{self, GETTER_PREFIX, SETTER_PREFIX};
use crate::metadata::types::TypeRef;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Name of the identity field when none is marked.
pub const DEFAULT_IDENTITY_FIELD: &str = "id";

/// Kind of a declared class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// Instantiable class.
    Concrete,
    /// Class that only exists as a supertype.
    Abstract,
    /// Interface-only taxon.
    Interface,
}

type Factory = Arc<dyn Fn() -> Box<dyn Any + Send + Sync> + Send + Sync>;

#[derive(Clone)]
struct RustType {
    id: TypeId,
    name: &'static str,
    factory: Factory,
}

/// Declarative description of one class, as supplied by a metadata source.
///
/// Rust types do not inherit members, so a concrete definition lists every
/// field and method of its type. Supertypes contribute labels and taxa.
///
/// # Examples
///
/// ```
/// use graphbind_core::metadata::{primitive, ClassDef, ClassKind, FieldInfo, TypeRef};
///
/// #[derive(Default)]
/// struct Topic { topic_id: Option<i64>, name: Option<String> }
///
/// let topic = ClassDef::entity::<Topic>("forum.Topic")
///     .field(
///         FieldInfo::new("topic_id", TypeRef::scalar(primitive::LONG),
///             |t: &Topic| t.topic_id, |t: &mut Topic, v| t.topic_id = v)
///         .identity(),
///     )
///     .field(FieldInfo::new("name", TypeRef::scalar(primitive::STRING),
///         |t: &Topic| t.name.clone(), |t: &mut Topic, v| t.name = v));
///
/// assert_eq!(topic.kind(), ClassKind::Concrete);
/// assert_eq!(topic.fields().len(), 2);
/// ```
#[derive(Clone)]
pub struct ClassDef {
    name: String,
    kind: ClassKind,
    superclass: Option<String>,
    interfaces: Vec<String>,
    label: Option<String>,
    fields: Vec<FieldInfo>,
    methods: Vec<MethodInfo>,
    rust_type: Option<RustType>,
}

impl ClassDef {
    fn with_kind(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            superclass: None,
            interfaces: Vec::new(),
            label: None,
            fields: Vec::new(),
            methods: Vec::new(),
            rust_type: None,
        }
    }

    /// A concrete class backed by the Rust type `T`.
    pub fn entity<T: Default + Any + Send + Sync>(name: impl Into<String>) -> Self {
        let mut def = Self::with_kind(name, ClassKind::Concrete);
        def.rust_type = Some(RustType {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            factory: Arc::new(|| Box::new(T::default()) as Box<dyn Any + Send + Sync>),
        });
        def
    }

    /// An abstract class.
    pub fn abstract_class(name: impl Into<String>) -> Self {
        Self::with_kind(name, ClassKind::Abstract)
    }

    /// An interface.
    pub fn interface(name: impl Into<String>) -> Self {
        Self::with_kind(name, ClassKind::Interface)
    }

    /// Declare the direct superclass.
    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    /// Declare an implemented interface.
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Override the label (defaults to the simple name).
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Add a field.
    pub fn field(mut self, field: FieldInfo) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a method.
    pub fn method(mut self, method: MethodInfo) -> Self {
        self.methods.push(method);
        self
    }

    /// Fully-qualified name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class kind.
    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    /// Direct superclass, if declared.
    pub fn superclass(&self) -> Option<&str> {
        self.superclass.as_deref()
    }

    /// Directly implemented interfaces.
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// The label this class contributes: the override or the simple name.
    pub fn own_label(&self) -> &str {
        self.label
            .as_deref()
            .unwrap_or_else(|| naming::simple_name(&self.name))
    }

    /// Declared fields.
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Declared methods.
    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    /// Rust type backing a concrete class.
    pub fn rust_type(&self) -> Option<TypeId> {
        self.rust_type.as_ref().map(|t| t.id)
    }
}

impl fmt::Debug for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDef")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("superclass", &self.superclass)
            .field("interfaces", &self.interfaces)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Immutable descriptor of a mapped class.
///
/// Built once per class, on first lookup, by [`MetaData`](crate::metadata::MetaData).
#[derive(Clone)]
pub struct ClassInfo {
    name: String,
    kind: ClassKind,
    superclass: Option<String>,
    interfaces: Vec<String>,
    labels: Vec<String>,
    fields: Vec<FieldInfo>,
    methods: Vec<MethodInfo>,
    identity: Option<usize>,
    rust_type: Option<RustType>,
}

impl ClassInfo {
    pub(crate) fn from_def(def: &ClassDef, labels: Vec<String>) -> Self {
        let identity = def
            .fields
            .iter()
            .position(FieldInfo::is_identity_marked)
            .or_else(|| {
                def.fields
                    .iter()
                    .position(|f| f.name() == DEFAULT_IDENTITY_FIELD)
            });

        Self {
            name: def.name.clone(),
            kind: def.kind,
            superclass: def.superclass.clone(),
            interfaces: def.interfaces.clone(),
            labels,
            fields: def.fields.clone(),
            methods: def.methods.clone(),
            identity,
            rust_type: def.rust_type.clone(),
        }
    }

    /// Fully-qualified name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last segment of the name.
    pub fn simple_name(&self) -> &str {
        naming::simple_name(&self.name)
    }

    /// Class kind.
    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    /// True for instantiable classes.
    pub fn is_concrete(&self) -> bool {
        self.kind == ClassKind::Concrete
    }

    /// Direct superclass.
    pub fn superclass(&self) -> Option<&str> {
        self.superclass.as_deref()
    }

    /// Directly implemented interfaces.
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// Node labels: this class's label followed by each superclass label.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The Rust type backing this class.
    pub fn rust_type(&self) -> Option<TypeId> {
        self.rust_type.as_ref().map(|t| t.id)
    }

    /// Create a default instance.
    pub fn instantiate(&self) -> Result<EntityRef> {
        match (&self.rust_type, self.kind) {
            (Some(rt), ClassKind::Concrete) => {
                Ok(EntityRef::from_boxed(rt.id, rt.name, (rt.factory)()))
            }
            _ => Err(Error::NotInstantiable(self.name.clone())),
        }
    }

    /// All fields, in declaration order.
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// A field by its member name.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name() == name)
    }

    fn is_identity(&self, field: &FieldInfo) -> bool {
        self.identity_field()
            .is_some_and(|id| std::ptr::eq(id, field))
    }

    /// The field holding the node id.
    pub fn identity_field(&self) -> Option<&FieldInfo> {
        self.identity.map(|i| &self.fields[i])
    }

    /// Fields mapped to node properties, in declaration order.
    pub fn property_fields(&self) -> Vec<&FieldInfo> {
        self.fields
            .iter()
            .filter(|f| !self.is_identity(f) && f.property_name().is_some())
            .collect()
    }

    /// Fields mapped to relationships, in declaration order.
    pub fn relationship_fields(&self) -> Vec<&FieldInfo> {
        self.fields
            .iter()
            .filter(|f| !self.is_identity(f) && f.relationship_type().is_some())
            .collect()
    }

    /// The property field mapped to node property `name`.
    pub fn property_field(&self, name: &str) -> Option<&FieldInfo> {
        self.property_fields()
            .into_iter()
            .find(|f| f.property_name().as_deref() == Some(name))
    }

    /// The relationship field for relationship type `name`, falling back to
    /// a relationship field whose member name is `name`.
    pub fn relationship_field(&self, name: &str) -> Option<&FieldInfo> {
        let fields = self.relationship_fields();
        fields
            .iter()
            .find(|f| f.relationship_type().as_deref() == Some(name))
            .or_else(|| fields.iter().find(|f| f.name() == name))
            .copied()
    }

    /// True if `field` holds a single value rather than a container.
    pub fn is_scalar(&self, field: &FieldInfo) -> bool {
        field.is_scalar()
    }

    /// All methods, in declaration order.
    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    /// A method by name.
    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| m.name() == name)
    }

    fn is_identity_method(&self, method: &MethodInfo) -> bool {
        if method.is_identity_marked() {
            return true;
        }
        let id = self
            .identity_field()
            .map(FieldInfo::name)
            .unwrap_or(DEFAULT_IDENTITY_FIELD);
        let conventional = match method.kind() {
            MethodKind::Getter => format!("{}{}", GETTER_PREFIX, id),
            MethodKind::Setter => format!("{}{}", SETTER_PREFIX, id),
        };
        method.name() == conventional
    }

    fn identity_method(&self, getter: bool) -> Option<&MethodInfo> {
        let candidates = || {
            self.methods
                .iter()
                .filter(move |m| m.is_getter() == getter)
        };
        candidates()
            .find(|m| m.is_identity_marked())
            .or_else(|| candidates().find(|m| self.is_identity_method(m)))
    }

    /// The identity getter: a marked getter, else `get_<identity field>`.
    pub fn identity_getter(&self) -> Option<&MethodInfo> {
        self.identity_method(true)
    }

    /// The identity setter: a marked setter, else `set_<identity field>`.
    pub fn identity_setter(&self) -> Option<&MethodInfo> {
        self.identity_method(false)
    }

    fn accessors(&self, getter: bool, property: bool) -> Vec<&MethodInfo> {
        self.methods
            .iter()
            .filter(|m| m.is_getter() == getter && !self.is_identity_method(m))
            .filter(|m| {
                if property {
                    m.property_name().is_some()
                } else {
                    m.relationship_type().is_some()
                }
            })
            .collect()
    }

    /// Getters mapped to node properties.
    pub fn property_getters(&self) -> Vec<&MethodInfo> {
        self.accessors(true, true)
    }

    /// Setters mapped to node properties.
    pub fn property_setters(&self) -> Vec<&MethodInfo> {
        self.accessors(false, true)
    }

    /// Getters mapped to relationships.
    pub fn relationship_getters(&self) -> Vec<&MethodInfo> {
        self.accessors(true, false)
    }

    /// Setters mapped to relationships.
    pub fn relationship_setters(&self) -> Vec<&MethodInfo> {
        self.accessors(false, false)
    }

    /// The getter for node property `name`.
    pub fn property_getter(&self, name: &str) -> Option<&MethodInfo> {
        self.property_getters()
            .into_iter()
            .find(|m| m.property_name().as_deref() == Some(name))
    }

    /// The setter for node property `name`.
    pub fn property_setter(&self, name: &str) -> Option<&MethodInfo> {
        self.property_setters()
            .into_iter()
            .find(|m| m.property_name().as_deref() == Some(name))
    }

    /// The getter for relationship type `rel_type`.
    pub fn relationship_getter(&self, rel_type: &str) -> Option<&MethodInfo> {
        self.relationship_getters()
            .into_iter()
            .find(|m| m.relationship_type().as_deref() == Some(rel_type))
    }

    /// The setter for relationship type `rel_type`.
    pub fn relationship_setter(&self, rel_type: &str) -> Option<&MethodInfo> {
        self.relationship_setters()
            .into_iter()
            .find(|m| m.relationship_type().as_deref() == Some(rel_type))
    }

    /// Fields declared exactly as `declared`.
    pub fn find_fields(&self, declared: &TypeRef) -> Vec<&FieldInfo> {
        self.fields
            .iter()
            .filter(|f| f.declared_type() == declared)
            .collect()
    }

    /// Setters whose parameter is declared exactly as `declared`.
    pub fn find_setters(&self, declared: &TypeRef) -> Vec<&MethodInfo> {
        self.methods
            .iter()
            .filter(|m| m.is_setter() && m.declared_type() == declared)
            .collect()
    }

    /// Non-identity fields holding iterables or arrays.
    pub fn find_iterable_fields(&self) -> Vec<&FieldInfo> {
        self.fields
            .iter()
            .filter(|f| !f.is_scalar() && !self.is_identity(f))
            .collect()
    }

    /// Setters taking an iterable or array of `element`.
    pub fn find_iterable_setters(&self, element: &str) -> Vec<&MethodInfo> {
        self.methods
            .iter()
            .filter(|m| {
                m.is_setter()
                    && !m.declared_type().is_scalar()
                    && m.declared_type().element() == element
            })
            .collect()
    }
}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("labels", &self.labels)
            .field("fields", &self.fields)
            .field("methods", &self.methods)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::types::primitive;
    use crate::value::Value;

    #[derive(Default)]
    struct Gold {
        id: Option<i64>,
        fees: Option<i64>,
        holder: Option<EntityRef>,
    }

    fn gold() -> ClassDef {
        ClassDef::entity::<Gold>("forum.GoldMembership")
            .label("Gold")
            .extends("forum.Membership")
            .field(FieldInfo::new(
                "id",
                TypeRef::scalar(primitive::LONG),
                |g: &Gold| g.id,
                |g: &mut Gold, v| g.id = v,
            ))
            .field(
                FieldInfo::new(
                    "fees",
                    TypeRef::scalar(primitive::LONG),
                    |g: &Gold| g.fees,
                    |g: &mut Gold, v| g.fees = v,
                )
                .property("annualFees"),
            )
            .field(FieldInfo::new(
                "holder",
                TypeRef::scalar("forum.Member"),
                |g: &Gold| g.holder.clone(),
                |g: &mut Gold, v| g.holder = v,
            ))
            .method(MethodInfo::getter(
                "get_id",
                TypeRef::scalar(primitive::LONG),
                |g: &mut Gold| g.id,
            ))
    }

    fn info() -> ClassInfo {
        ClassInfo::from_def(&gold(), vec!["Gold".to_string()])
    }

    #[test]
    fn test_default_identity_field() {
        let info = info();
        assert_eq!(info.identity_field().map(FieldInfo::name), Some("id"));
        assert_eq!(info.identity_getter().map(MethodInfo::name), Some("get_id"));
        assert!(info.identity_setter().is_none());
    }

    #[test]
    fn test_field_classification_excludes_identity() {
        let info = info();
        let props: Vec<_> = info.property_fields().iter().map(|f| f.name()).collect();
        assert_eq!(props, vec!["fees"]);
        let rels: Vec<_> = info.relationship_fields().iter().map(|f| f.name()).collect();
        assert_eq!(rels, vec!["holder"]);
        assert!(info.property_getters().is_empty());
    }

    #[test]
    fn test_named_lookups() {
        let info = info();
        assert_eq!(info.property_field("annualFees").map(FieldInfo::name), Some("fees"));
        assert!(info.property_field("fees").is_none());
        assert_eq!(info.relationship_field("HOLDER").map(FieldInfo::name), Some("holder"));
        assert_eq!(info.relationship_field("holder").map(FieldInfo::name), Some("holder"));
    }

    #[test]
    fn test_instantiate() {
        let info = info();
        let gold = info.instantiate().unwrap();
        assert_eq!(gold.entity_type(), TypeId::of::<Gold>());
        info.field("fees").unwrap().write(&gold, Value::Int(500)).unwrap();
        assert_eq!(gold.read(|g: &Gold| g.fees), Some(Some(500)));
    }

    #[test]
    fn test_abstract_is_not_instantiable() {
        let def = ClassDef::abstract_class("forum.Membership");
        let info = ClassInfo::from_def(&def, vec![]);
        assert_eq!(
            info.instantiate().unwrap_err(),
            Error::NotInstantiable("forum.Membership".to_string())
        );
    }

    #[test]
    fn test_own_label_defaults_to_simple_name() {
        assert_eq!(ClassDef::abstract_class("forum.Membership").own_label(), "Membership");
        assert_eq!(gold().own_label(), "Gold");
    }
}
