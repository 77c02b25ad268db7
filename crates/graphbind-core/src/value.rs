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

//! Dynamic values exchanged between accessors and the graph.

use crate::entity::EntityRef;
use std::fmt;

/// A value read from or written to a mapped member.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    String(String),
    /// Ordered collection, used for arrays and iterables.
    List(Vec<Value>),
    /// Another mapped object.
    Entity(EntityRef),
}

impl Value {
    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as an entity handle.
    pub fn as_entity(&self) -> Option<&EntityRef> {
        match self {
            Value::Entity(e) => Some(e),
            _ => None,
        }
    }

    /// All entity handles held by this value: itself, or the entity
    /// elements of a list.
    pub fn entities(&self) -> Vec<EntityRef> {
        match self {
            Value::Entity(e) => vec![e.clone()],
            Value::List(items) => items
                .iter()
                .filter_map(|v| v.as_entity().cloned())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Short description of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Entity(_) => "entity",
        }
    }
}

/// The string form of a value. Lists render as `[a, b]`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Entity(e) => write!(f, "{}", e),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<EntityRef> for Value {
    fn from(v: EntityRef) -> Self {
        Value::Entity(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(x) => x.into(),
            None => Value::Null,
        }
    }
}

/// Conversion from a dynamic [`Value`] into a typed member value.
///
/// Returns the rejected value on failure so callers can describe it.
pub trait FromValue: Sized {
    /// Convert, or hand the value back.
    fn from_value(value: Value) -> std::result::Result<Self, Value>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        Ok(value)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(other),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Int(i) => i32::try_from(i).map_err(|_| Value::Int(i)),
            other => Err(other),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Float(x) => Ok(x),
            // graph stores frequently hand back whole-number doubles as integers
            Value::Int(i) => Ok(i as f64),
            other => Err(other),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl FromValue for EntityRef {
    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Entity(e) => Ok(e),
            other => Err(other),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Null => Ok(Vec::new()),
            Value::List(items) => {
                let snapshot = items.clone();
                items
                    .into_iter()
                    .map(T::from_value)
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|_| Value::List(snapshot))
            }
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_string_forms() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Float(8.14).to_string(), "8.14");
        assert_eq!(Value::String("abc".into()).to_string(), "abc");
        assert_eq!(
            Value::from(vec!["a", "b"]).to_string(),
            "[a, b]"
        );
    }

    #[test]
    fn test_from_value_scalars() {
        assert_eq!(i64::from_value(Value::Int(7)), Ok(7));
        assert_eq!(f64::from_value(Value::Int(7)), Ok(7.0));
        assert_eq!(i32::from_value(Value::Int(i64::MAX)), Err(Value::Int(i64::MAX)));
        assert_eq!(
            String::from_value(Value::Int(1)),
            Err(Value::Int(1))
        );
    }

    #[test]
    fn test_from_value_option_and_vec() {
        assert_eq!(Option::<String>::from_value(Value::Null), Ok(None));
        assert_eq!(
            Vec::<String>::from_value(Value::from(vec!["x", "y"])),
            Ok(vec!["x".to_string(), "y".to_string()])
        );
        assert!(Vec::<i64>::from_value(Value::from(vec!["x"])).is_err());
        assert_eq!(Vec::<i64>::from_value(Value::Null), Ok(vec![]));
    }

    #[test]
    fn test_entities_of_list() {
        let a = EntityRef::new(1u8);
        let b = EntityRef::new(2u8);
        let list = Value::List(vec![a.clone().into(), Value::Int(3), b.clone().into()]);
        assert_eq!(list.entities(), vec![a, b]);
        assert!(Value::Int(1).entities().is_empty());
    }
}
