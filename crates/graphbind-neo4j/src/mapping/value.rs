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

//! Conversion between member values and Cypher values.

use crate::cypher::CypherValue;
use crate::error::{MappingError, Result};
use graphbind_core::Value;

/// Convert a property value read from the graph into a member value.
///
/// Maps have no member representation; nested lists are kept.
pub fn cypher_to_value(value: &CypherValue) -> Result<Value> {
    Ok(match value {
        CypherValue::Null => Value::Null,
        CypherValue::Bool(b) => Value::Bool(*b),
        CypherValue::Int(i) => Value::Int(*i),
        CypherValue::Float(f) => Value::Float(*f),
        CypherValue::String(s) => Value::String(s.clone()),
        CypherValue::List(items) => Value::List(
            items
                .iter()
                .map(cypher_to_value)
                .collect::<Result<Vec<_>>>()?,
        ),
        CypherValue::Map(_) => {
            return Err(MappingError::UnsupportedValue(
                "map values cannot be stored in a property".to_string(),
            ))
        }
    })
}

/// Convert a member value into a property value for a statement.
///
/// Entities are relationships, not properties, and are rejected.
pub fn value_to_cypher(value: &Value) -> Result<CypherValue> {
    Ok(match value {
        Value::Null => CypherValue::Null,
        Value::Bool(b) => CypherValue::Bool(*b),
        Value::Int(i) => CypherValue::Int(*i),
        Value::Float(f) => CypherValue::Float(*f),
        Value::String(s) => CypherValue::String(s.clone()),
        Value::List(items) => CypherValue::List(
            items
                .iter()
                .map(value_to_cypher)
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::Entity(e) => {
            return Err(MappingError::UnsupportedValue(format!(
                "entity {} is not a property value",
                e.type_name()
            )))
        }
    })
}
