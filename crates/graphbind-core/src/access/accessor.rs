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

//! Bound accessors returned by the access strategy.

use crate::entity::EntityRef;
use crate::error::AccessError;
use crate::metadata::{FieldInfo, MethodInfo, TypeRef};
use crate::value::Value;
use std::fmt;

/// How an accessor reaches the member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Direct structural access to a field.
    Field,
    /// A call to a user-declared getter or setter.
    Method,
}

#[derive(Clone)]
pub(crate) enum Member {
    Field(FieldInfo),
    Method(MethodInfo),
}

impl Member {
    fn kind(&self) -> AccessKind {
        match self {
            Member::Field(_) => AccessKind::Field,
            Member::Method(_) => AccessKind::Method,
        }
    }

    fn name(&self) -> &str {
        match self {
            Member::Field(f) => f.name(),
            Member::Method(m) => m.name(),
        }
    }

    fn declared_type(&self) -> &TypeRef {
        match self {
            Member::Field(f) => f.declared_type(),
            Member::Method(m) => m.declared_type(),
        }
    }

    fn read(&self, entity: &EntityRef) -> Result<Value, AccessError> {
        match self {
            Member::Field(f) => f.read(entity),
            Member::Method(m) => m.invoke_get(entity),
        }
    }

    fn write(&self, entity: &EntityRef, value: Value) -> Result<(), AccessError> {
        match self {
            Member::Field(f) => f.write(entity, value),
            Member::Method(m) => m.invoke_set(entity, value),
        }
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind(), self.name())
    }
}

/// A bound write path into objects of one class.
#[derive(Debug, Clone)]
pub struct ObjectAccess {
    member: Member,
}

impl ObjectAccess {
    pub(crate) fn new(member: Member) -> Self {
        Self { member }
    }

    /// Field or method.
    pub fn kind(&self) -> AccessKind {
        self.member.kind()
    }

    /// Name of the underlying field or method.
    pub fn member_name(&self) -> &str {
        self.member.name()
    }

    /// Declared type of the target member.
    pub fn declared_type(&self) -> &TypeRef {
        self.member.declared_type()
    }

    /// Write `value` into `entity`.
    pub fn write(&self, entity: &EntityRef, value: Value) -> Result<(), AccessError> {
        self.member.write(entity, value)
    }
}

/// A bound read path for a node property.
#[derive(Debug, Clone)]
pub struct PropertyReader {
    member: Member,
    property_name: String,
}

impl PropertyReader {
    pub(crate) fn new(member: Member, property_name: String) -> Self {
        Self {
            member,
            property_name,
        }
    }

    /// Field or method.
    pub fn kind(&self) -> AccessKind {
        self.member.kind()
    }

    /// Name of the underlying field or method.
    pub fn member_name(&self) -> &str {
        self.member.name()
    }

    /// The node property this reader produces.
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    /// Read the value from `entity`.
    pub fn read(&self, entity: &EntityRef) -> Result<Value, AccessError> {
        self.member.read(entity)
    }
}

/// A bound read path for a relationship.
#[derive(Debug, Clone)]
pub struct RelationalReader {
    member: Member,
    relationship_type: String,
}

impl RelationalReader {
    pub(crate) fn new(member: Member, relationship_type: String) -> Self {
        Self {
            member,
            relationship_type,
        }
    }

    /// Field or method.
    pub fn kind(&self) -> AccessKind {
        self.member.kind()
    }

    /// Name of the underlying field or method.
    pub fn member_name(&self) -> &str {
        self.member.name()
    }

    /// The relationship type this reader follows.
    pub fn relationship_type(&self) -> &str {
        &self.relationship_type
    }

    /// Declared type of the member.
    pub fn declared_type(&self) -> &TypeRef {
        self.member.declared_type()
    }

    /// Read the related object(s) from `entity`.
    pub fn read(&self, entity: &EntityRef) -> Result<Value, AccessError> {
        self.member.read(entity)
    }
}
