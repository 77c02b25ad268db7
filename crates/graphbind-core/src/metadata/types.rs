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

//! Declared member types.

use std::fmt;

/// Names of the primitive element types. Members whose element type is one
/// of these map to node properties unless annotated otherwise.
pub mod primitive {
    /// Text.
    pub const STRING: &str = "String";
    /// 64-bit integer.
    pub const LONG: &str = "Long";
    /// 32-bit integer.
    pub const INTEGER: &str = "Integer";
    /// 16-bit integer.
    pub const SHORT: &str = "Short";
    /// 8-bit integer.
    pub const BYTE: &str = "Byte";
    /// 64-bit float.
    pub const DOUBLE: &str = "Double";
    /// 32-bit float.
    pub const FLOAT: &str = "Float";
    /// Boolean.
    pub const BOOLEAN: &str = "Boolean";
    /// Single character.
    pub const CHARACTER: &str = "Character";

    pub(crate) const ALL: &[&str] = &[
        STRING, LONG, INTEGER, SHORT, BYTE, DOUBLE, FLOAT, BOOLEAN, CHARACTER,
    ];
}

/// A date. Not a primitive: without a conversion layer, dates are
/// classified like any other non-primitive member.
pub const DATE: &str = "Date";

/// Whether the member holds one value or a container of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// A single value.
    Scalar,
    /// A collection (list, set, iterable).
    Iterable,
    /// A fixed array.
    Array,
}

/// The declared type of a field, or of a method's parameter/return value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    element: String,
    cardinality: Cardinality,
}

impl TypeRef {
    /// A single value of `element`.
    pub fn scalar(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            cardinality: Cardinality::Scalar,
        }
    }

    /// A collection of `element`.
    pub fn iterable(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            cardinality: Cardinality::Iterable,
        }
    }

    /// An array of `element`.
    pub fn array(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            cardinality: Cardinality::Array,
        }
    }

    /// The element type name (a primitive name or a class name).
    pub fn element(&self) -> &str {
        &self.element
    }

    /// The container classification.
    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// True for single values, false for iterables and arrays.
    pub fn is_scalar(&self) -> bool {
        self.cardinality == Cardinality::Scalar
    }

    /// True if the element type is a primitive.
    pub fn is_primitive(&self) -> bool {
        is_primitive(&self.element)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cardinality {
            Cardinality::Scalar => f.write_str(&self.element),
            Cardinality::Iterable => write!(f, "Iterable<{}>", self.element),
            Cardinality::Array => write!(f, "{}[]", self.element),
        }
    }
}

/// True if `name` is one of the primitive element types.
pub fn is_primitive(name: &str) -> bool {
    primitive::ALL.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality() {
        assert!(TypeRef::scalar(primitive::STRING).is_scalar());
        assert!(!TypeRef::iterable("Member").is_scalar());
        assert!(!TypeRef::array(primitive::STRING).is_scalar());
    }

    #[test]
    fn test_primitive_classification() {
        assert!(TypeRef::array(primitive::STRING).is_primitive());
        assert!(!TypeRef::scalar(DATE).is_primitive());
        assert!(!TypeRef::iterable("forum.Member").is_primitive());
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeRef::iterable("Post").to_string(), "Iterable<Post>");
        assert_eq!(TypeRef::array("String").to_string(), "String[]");
    }
}
