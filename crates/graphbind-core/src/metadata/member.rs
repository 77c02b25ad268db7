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

//! Field and method descriptors.
//!
//! A descriptor pairs declarative metadata (name, declared type, property
//! and relationship overrides, identity marker) with a type-erased accessor
//! closure over the concrete Rust type that owns the member.

use crate::entity::EntityRef;
use crate::error::AccessError;
use crate::metadata::naming;
use crate::metadata::types::TypeRef;
use crate::value::{FromValue, Value};
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

enum RawError {
    WrongTarget(&'static str),
    Rejected { expected: &'static str, value: Value },
}

type ReadFn = Arc<dyn Fn(&dyn Any) -> Result<Value, RawError> + Send + Sync>;
type GetFn = Arc<dyn Fn(&mut dyn Any) -> Result<Value, RawError> + Send + Sync>;
type SetFn = Arc<dyn Fn(&mut dyn Any, Value) -> Result<(), RawError> + Send + Sync>;

fn access_error(err: RawError, member: &str, entity: &EntityRef) -> AccessError {
    match err {
        RawError::WrongTarget(expected) => AccessError::WrongTarget {
            expected,
            found: entity.type_name(),
        },
        RawError::Rejected { expected, value } => AccessError::TypeMismatch {
            member: member.to_string(),
            expected,
            found: format!("{} {}", value.kind(), value),
        },
    }
}

fn typed_setter<T, V, S>(set: S) -> SetFn
where
    T: Any,
    V: FromValue + 'static,
    S: Fn(&mut T, V) + Send + Sync + 'static,
{
    Arc::new(move |obj: &mut dyn Any, value: Value| -> Result<(), RawError> {
        let target = obj
            .downcast_mut::<T>()
            .ok_or(RawError::WrongTarget(type_name::<T>()))?;
        let converted = V::from_value(value).map_err(|value| RawError::Rejected {
            expected: type_name::<V>(),
            value,
        })?;
        set(target, converted);
        Ok(())
    })
}

/// Annotations shared by fields and methods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Annotations {
    property: Option<String>,
    relationship: Option<String>,
    identity: bool,
}

impl Annotations {
    fn property_name(&self, base: &str, declared: &TypeRef) -> Option<String> {
        if self.identity || self.relationship.is_some() {
            return None;
        }
        match &self.property {
            Some(name) => Some(name.clone()),
            None if declared.is_primitive() => Some(base.to_string()),
            None => None,
        }
    }

    fn relationship_type(&self, member: &str, declared: &TypeRef) -> Option<String> {
        if self.identity || self.property.is_some() {
            return None;
        }
        match &self.relationship {
            Some(rel) => Some(rel.clone()),
            None if declared.is_primitive() => None,
            None => Some(naming::relationship_type(member)),
        }
    }
}

/// Descriptor of a field of a mapped class.
#[derive(Clone)]
pub struct FieldInfo {
    name: String,
    declared: TypeRef,
    annotations: Annotations,
    read: ReadFn,
    write: SetFn,
}

impl FieldInfo {
    /// Describe field `name` of `T`, declared as `declared`, with the given
    /// read and write projections.
    ///
    /// # Examples
    ///
    /// ```
    /// use graphbind_core::metadata::{primitive, FieldInfo, TypeRef};
    ///
    /// #[derive(Default)]
    /// struct Bronze { fees: Option<i64> }
    ///
    /// let fees = FieldInfo::new(
    ///     "fees",
    ///     TypeRef::scalar(primitive::LONG),
    ///     |b: &Bronze| b.fees,
    ///     |b: &mut Bronze, v| b.fees = v,
    /// )
    /// .property("annualFees");
    ///
    /// assert_eq!(fees.property_name().as_deref(), Some("annualFees"));
    /// ```
    pub fn new<T, V, G, S>(name: impl Into<String>, declared: TypeRef, get: G, set: S) -> Self
    where
        T: Any,
        V: FromValue + Into<Value> + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let read: ReadFn = Arc::new(move |obj: &dyn Any| -> Result<Value, RawError> {
            obj.downcast_ref::<T>()
                .map(|target| Into::<Value>::into(get(target)))
                .ok_or(RawError::WrongTarget(type_name::<T>()))
        });
        Self {
            name: name.into(),
            declared,
            annotations: Annotations::default(),
            read,
            write: typed_setter(set),
        }
    }

    /// Map this field to the node property `name`.
    pub fn property(mut self, name: impl Into<String>) -> Self {
        self.annotations.property = Some(name.into());
        self
    }

    /// Map this field to relationships of type `rel_type`.
    pub fn relationship(mut self, rel_type: impl Into<String>) -> Self {
        self.annotations.relationship = Some(rel_type.into());
        self
    }

    /// Mark this field as the identity field.
    pub fn identity(mut self) -> Self {
        self.annotations.identity = true;
        self
    }

    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type.
    pub fn declared_type(&self) -> &TypeRef {
        &self.declared
    }

    /// The explicitly declared property name, if any.
    pub fn declared_property(&self) -> Option<&str> {
        self.annotations.property.as_deref()
    }

    /// The explicitly declared relationship type, if any.
    pub fn declared_relationship(&self) -> Option<&str> {
        self.annotations.relationship.as_deref()
    }

    /// True when the field carries the identity marker.
    pub fn is_identity_marked(&self) -> bool {
        self.annotations.identity
    }

    /// The node property this field maps to, or `None` for relationship and
    /// identity fields.
    pub fn property_name(&self) -> Option<String> {
        self.annotations.property_name(&self.name, &self.declared)
    }

    /// The relationship type this field maps to, or `None` for property and
    /// identity fields.
    pub fn relationship_type(&self) -> Option<String> {
        self.annotations.relationship_type(&self.name, &self.declared)
    }

    /// True if the field holds a single value.
    pub fn is_scalar(&self) -> bool {
        self.declared.is_scalar()
    }

    /// Read the field directly.
    pub fn read(&self, entity: &EntityRef) -> Result<Value, AccessError> {
        entity
            .with_any(|obj| (self.read)(obj))
            .map_err(|e| access_error(e, &self.name, entity))
    }

    /// Write the field directly.
    pub fn write(&self, entity: &EntityRef, value: Value) -> Result<(), AccessError> {
        entity
            .with_any_mut(|obj| (self.write)(obj, value))
            .map_err(|e| access_error(e, &self.name, entity))
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("declared", &self.declared)
            .field("annotations", &self.annotations)
            .finish()
    }
}

/// Whether a method reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// Takes no argument and returns the declared type.
    Getter,
    /// Takes one argument of the declared type.
    Setter,
}

#[derive(Clone)]
enum Invoke {
    Get(GetFn),
    Set(SetFn),
}

/// Descriptor of an accessor method of a mapped class.
#[derive(Clone)]
pub struct MethodInfo {
    name: String,
    declared: TypeRef,
    annotations: Annotations,
    invoke: Invoke,
}

impl MethodInfo {
    /// Describe getter `name` of `T` returning `declared`.
    ///
    /// Getters receive `&mut T` because user accessors may record side
    /// effects.
    pub fn getter<T, V, G>(name: impl Into<String>, declared: TypeRef, get: G) -> Self
    where
        T: Any,
        V: Into<Value> + 'static,
        G: Fn(&mut T) -> V + Send + Sync + 'static,
    {
        let invoke: GetFn = Arc::new(move |obj: &mut dyn Any| -> Result<Value, RawError> {
            obj.downcast_mut::<T>()
                .map(|target| Into::<Value>::into(get(target)))
                .ok_or(RawError::WrongTarget(type_name::<T>()))
        });
        Self {
            name: name.into(),
            declared,
            annotations: Annotations::default(),
            invoke: Invoke::Get(invoke),
        }
    }

    /// Describe setter `name` of `T` accepting `declared`.
    pub fn setter<T, V, S>(name: impl Into<String>, declared: TypeRef, set: S) -> Self
    where
        T: Any,
        V: FromValue + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            declared,
            annotations: Annotations::default(),
            invoke: Invoke::Set(typed_setter(set)),
        }
    }

    /// Map this method to the node property `name`.
    pub fn property(mut self, name: impl Into<String>) -> Self {
        self.annotations.property = Some(name.into());
        self
    }

    /// Map this method to relationships of type `rel_type`.
    pub fn relationship(mut self, rel_type: impl Into<String>) -> Self {
        self.annotations.relationship = Some(rel_type.into());
        self
    }

    /// Mark this method as an identity accessor.
    pub fn identity(mut self) -> Self {
        self.annotations.identity = true;
        self
    }

    /// The method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Getter or setter.
    pub fn kind(&self) -> MethodKind {
        match self.invoke {
            Invoke::Get(_) => MethodKind::Getter,
            Invoke::Set(_) => MethodKind::Setter,
        }
    }

    /// True for getters.
    pub fn is_getter(&self) -> bool {
        self.kind() == MethodKind::Getter
    }

    /// True for setters.
    pub fn is_setter(&self) -> bool {
        self.kind() == MethodKind::Setter
    }

    /// The declared return (getter) or parameter (setter) type.
    pub fn declared_type(&self) -> &TypeRef {
        &self.declared
    }

    /// The explicitly declared property name, if any.
    pub fn declared_property(&self) -> Option<&str> {
        self.annotations.property.as_deref()
    }

    /// The explicitly declared relationship type, if any.
    pub fn declared_relationship(&self) -> Option<&str> {
        self.annotations.relationship.as_deref()
    }

    /// True when the method carries the identity marker.
    pub fn is_identity_marked(&self) -> bool {
        self.annotations.identity
    }

    /// The node property this method maps to.
    pub fn property_name(&self) -> Option<String> {
        self.annotations
            .property_name(naming::base_name(&self.name), &self.declared)
    }

    /// The relationship type this method maps to.
    pub fn relationship_type(&self) -> Option<String> {
        self.annotations.relationship_type(&self.name, &self.declared)
    }

    /// Call a getter.
    pub fn invoke_get(&self, entity: &EntityRef) -> Result<Value, AccessError> {
        match &self.invoke {
            Invoke::Get(get) => entity
                .with_any_mut(|obj| get(obj))
                .map_err(|e| access_error(e, &self.name, entity)),
            Invoke::Set(_) => Err(AccessError::WriteOnly(self.name.clone())),
        }
    }

    /// Call a setter.
    pub fn invoke_set(&self, entity: &EntityRef, value: Value) -> Result<(), AccessError> {
        match &self.invoke {
            Invoke::Set(set) => entity
                .with_any_mut(|obj| set(obj, value))
                .map_err(|e| access_error(e, &self.name, entity)),
            Invoke::Get(_) => Err(AccessError::ReadOnly(self.name.clone())),
        }
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("declared", &self.declared)
            .field("annotations", &self.annotations)
            .finish()
    }
}
