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

//! Statement and parameter types handed to the execution boundary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A Cypher parameter or property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CypherValue {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    String(String),
    /// List value.
    List(Vec<CypherValue>),
    /// Map value; used for property parameter maps.
    Map(BTreeMap<String, CypherValue>),
}

impl From<bool> for CypherValue {
    fn from(v: bool) -> Self {
        CypherValue::Bool(v)
    }
}

impl From<i64> for CypherValue {
    fn from(v: i64) -> Self {
        CypherValue::Int(v)
    }
}

impl From<f64> for CypherValue {
    fn from(v: f64) -> Self {
        CypherValue::Float(v)
    }
}

impl From<String> for CypherValue {
    fn from(v: String) -> Self {
        CypherValue::String(v)
    }
}

impl From<&str> for CypherValue {
    fn from(v: &str) -> Self {
        CypherValue::String(v.to_string())
    }
}

impl<T: Into<CypherValue>> From<Vec<T>> for CypherValue {
    fn from(v: Vec<T>) -> Self {
        CypherValue::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, CypherValue>> for CypherValue {
    fn from(v: BTreeMap<String, CypherValue>) -> Self {
        CypherValue::Map(v)
    }
}

impl CypherValue {
    /// Render as a Cypher literal.
    pub fn to_cypher_literal(&self) -> String {
        match self {
            CypherValue::Null => "null".to_string(),
            CypherValue::Bool(b) => b.to_string(),
            CypherValue::Int(i) => i.to_string(),
            CypherValue::Float(f) if f.is_nan() => "0.0/0.0".to_string(),
            CypherValue::Float(f) if f.is_infinite() => {
                let literal = if *f > 0.0 { "1.0/0.0" } else { "-1.0/0.0" };
                literal.to_string()
            }
            CypherValue::Float(f) => {
                let s = f.to_string();
                if s.contains(['.', 'e', 'E']) {
                    s
                } else {
                    format!("{}.0", s)
                }
            }
            CypherValue::String(s) => super::escape::quote_string(s),
            CypherValue::List(items) => {
                let inner: Vec<String> = items.iter().map(CypherValue::to_cypher_literal).collect();
                format!("[{}]", inner.join(", "))
            }
            CypherValue::Map(map) => {
                let pairs: Vec<String> = map
                    .iter()
                    .map(|(k, v)| {
                        format!(
                            "{}: {}",
                            super::escape::escape_identifier(k),
                            v.to_cypher_literal()
                        )
                    })
                    .collect();
                format!("{{{}}}", pairs.join(", "))
            }
        }
    }

    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, CypherValue::Null)
    }

    /// Try to get as a map.
    pub fn as_map(&self) -> Option<&BTreeMap<String, CypherValue>> {
        match self {
            CypherValue::Map(m) => Some(m),
            _ => None,
        }
    }
}

/// A compiled statement: query text plus the parameters it references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CypherStatement {
    /// The Cypher query text.
    pub query: String,
    /// Parameters, keyed by the names used in the query text.
    pub parameters: BTreeMap<String, CypherValue>,
}

impl CypherStatement {
    /// Create a statement without parameters.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Add a parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<CypherValue>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// True if the statement has no query text.
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
    }

    /// Render with each `{name}` placeholder replaced by its literal.
    ///
    /// For logging and inspection; executors should send the parameters.
    pub fn render_inline(&self) -> String {
        self.parameters
            .iter()
            .fold(self.query.clone(), |query, (name, value)| {
                query.replace(&format!("{{{}}}", name), &value.to_cypher_literal())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cypher_value_literals() {
        assert_eq!(CypherValue::Null.to_cypher_literal(), "null");
        assert_eq!(CypherValue::Bool(false).to_cypher_literal(), "false");
        assert_eq!(CypherValue::Int(42).to_cypher_literal(), "42");
        assert_eq!(CypherValue::Float(3.0).to_cypher_literal(), "3.0");
        assert_eq!(CypherValue::Float(3.25).to_cypher_literal(), "3.25");
        assert_eq!(CypherValue::from("it's").to_cypher_literal(), "'it\\'s'");
    }

    #[test]
    fn test_cypher_map_literal() {
        let mut map = BTreeMap::new();
        map.insert("name".to_string(), CypherValue::from("Rust"));
        map.insert("inActive".to_string(), CypherValue::Bool(true));
        assert_eq!(
            CypherValue::Map(map).to_cypher_literal(),
            "{inActive: true, name: 'Rust'}"
        );
    }

    #[test]
    fn test_untagged_deserialization() {
        let v: CypherValue = serde_json::from_str(r#"[1, 2.5, "x", null, true]"#).unwrap();
        assert_eq!(
            v,
            CypherValue::List(vec![
                CypherValue::Int(1),
                CypherValue::Float(2.5),
                CypherValue::from("x"),
                CypherValue::Null,
                CypherValue::Bool(true),
            ])
        );
    }

    #[test]
    fn test_render_inline() {
        let mut props = BTreeMap::new();
        props.insert("name".to_string(), CypherValue::from("Rust"));
        let statement = CypherStatement::new("CREATE (_0:Topic {_0_props})")
            .with_param("_0_props", props);
        assert_eq!(statement.render_inline(), "CREATE (_0:Topic {name: 'Rust'})");
    }
}
