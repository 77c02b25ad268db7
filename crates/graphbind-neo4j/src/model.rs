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

//! The inbound graph result consumed by hydration.
//!
//! The JSON form matches the graph result format of the HTTP endpoint:
//!
//! ```json
//! {
//!   "nodes": [{"id": 1, "labels": ["User", "Login"], "properties": {"userName": "alice"}}],
//!   "relationships": [{"id": 9, "type": "FOLLOWS", "startNode": 1, "endNode": 2, "properties": {}}]
//! }
//! ```

use crate::cypher::CypherValue;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node of a graph result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeModel {
    /// Internal node id.
    pub id: i64,
    /// Labels, in any order.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Property map.
    #[serde(default)]
    pub properties: BTreeMap<String, CypherValue>,
}

impl NodeModel {
    /// A node with no labels or properties.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            labels: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    /// Add labels.
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self
    }

    /// Add a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<CypherValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A relationship of a graph result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipModel {
    /// Internal relationship id.
    pub id: i64,
    /// Relationship type.
    #[serde(rename = "type")]
    pub rel_type: String,
    /// Id of the start node.
    pub start_node: i64,
    /// Id of the end node.
    pub end_node: i64,
    /// Property map.
    #[serde(default)]
    pub properties: BTreeMap<String, CypherValue>,
}

impl RelationshipModel {
    /// Relationship `id` of type `rel_type` from `start_node` to `end_node`.
    pub fn new(id: i64, rel_type: impl Into<String>, start_node: i64, end_node: i64) -> Self {
        Self {
            id,
            rel_type: rel_type.into(),
            start_node,
            end_node,
            properties: BTreeMap::new(),
        }
    }
}

/// Nodes and relationships returned by one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphModel {
    /// Nodes.
    #[serde(default)]
    pub nodes: Vec<NodeModel>,
    /// Relationships.
    #[serde(default)]
    pub relationships: Vec<RelationshipModel>,
}

impl GraphModel {
    /// An empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a node.
    pub fn with_node(mut self, node: NodeModel) -> Self {
        self.nodes.push(node);
        self
    }

    /// Add a relationship.
    pub fn with_relationship(mut self, relationship: RelationshipModel) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// True if the result holds nothing.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relationships.is_empty()
    }
}
