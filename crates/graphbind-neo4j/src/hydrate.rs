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

//! Hydration of a graph result into the object graph.
//!
//! Nodes are mapped first: each label set is resolved to a class, the
//! object for the node id is reused or created and registered, and every
//! property is written through the access strategy.
//!
//! Relationships are then bound in two passes. The first pass writes each
//! edge's end object directly into the start object. Edges whose target
//! member cannot take a single object (typically a collection) are
//! deferred and grouped by start node and relationship type. The second
//! pass resolves a collection writer for each end class of a group and
//! makes one write per distinct writer, so a collection declared over a
//! supertype receives every end object it accepts. Writers are cached per
//! parent class, type and end class.

use crate::config::HydrationConfig;
use crate::context::{MappedRelationship, MappingContext};
use crate::error::{MappingError, Result};
use crate::mapping::cypher_to_value;
use crate::model::{GraphModel, NodeModel, RelationshipModel};
use graphbind_core::access::{AccessKind, DefaultAccessStrategy, ObjectAccess, Resolution};
use graphbind_core::metadata::ClassInfo;
use graphbind_core::{EntityRef, Value};
use std::any::TypeId;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// What hydration did with each part of the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydrationReport {
    /// Nodes mapped onto objects.
    pub nodes_mapped: usize,
    /// Ids of nodes whose labels resolve to no unique class.
    pub unresolved_nodes: Vec<i64>,
    /// Properties with no writer, or whose value the writer rejected.
    pub unmapped_properties: usize,
    /// Relationships bound into the object graph.
    pub relationships_mapped: usize,
    /// Relationships bound through a collection write.
    pub relationships_deferred: usize,
    /// Ids of relationships no member accepts.
    pub unmapped_relationships: Vec<i64>,
    /// Ids of relationships with an endpoint that was not mapped.
    pub dangling_relationships: Vec<i64>,
}

impl HydrationReport {
    /// True if every node, property and relationship was mapped.
    pub fn is_complete(&self) -> bool {
        self.unresolved_nodes.is_empty()
            && self.unmapped_properties == 0
            && self.unmapped_relationships.is_empty()
            && self.dangling_relationships.is_empty()
    }
}

/// The objects of one graph result.
#[derive(Debug, Clone)]
pub struct Hydrated {
    /// One object per mapped node, in node order.
    pub objects: Vec<EntityRef>,
    /// Details of what was and was not mapped.
    pub report: HydrationReport,
}

impl Hydrated {
    /// Mapped objects of type `T`.
    pub fn of_type<T: 'static>(&self) -> impl Iterator<Item = &EntityRef> {
        self.objects
            .iter()
            .filter(|e| e.entity_type() == TypeId::of::<T>())
    }
}

struct DeferredEdge {
    id: i64,
    end_id: i64,
    child_type: TypeId,
    child_class: String,
}

struct WriterGroup {
    writer: ObjectAccess,
    child_types: BTreeSet<TypeId>,
    end_ids: BTreeSet<i64>,
    edges: Vec<i64>,
}

impl WriterGroup {
    fn key(&self) -> (AccessKind, String) {
        (self.writer.kind(), self.writer.member_name().to_string())
    }
}

type GroupKey = (i64, String);
type WriterKey = (String, String, String);

/// Maps graph results onto objects registered in a [`MappingContext`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use graphbind_neo4j::{GraphMapper, GraphModel, MappingContext, NodeModel, RelationshipModel};
/// use graphbind_test::fixtures::{self, forum::{self, Topic}};
///
/// let context = Arc::new(MappingContext::new(fixtures::metadata(&[forum::NAMESPACE])));
/// let mut mapper = GraphMapper::new(context.clone());
///
/// let model = GraphModel::new()
///     .with_node(NodeModel::new(1).with_labels(["Topic"]).with_property("name", "Rust"))
///     .with_node(NodeModel::new(2).with_labels(["Post"]))
///     .with_relationship(RelationshipModel::new(7, "HAS_POSTS", 1, 2));
/// let hydrated = mapper.map(&model).unwrap();
///
/// assert_eq!(hydrated.objects.len(), 2);
/// let topic = context.get(1).unwrap();
/// assert_eq!(topic.read(|t: &Topic| t.posts.len()), Some(1));
/// ```
pub struct GraphMapper {
    context: Arc<MappingContext>,
    strategy: DefaultAccessStrategy,
    config: HydrationConfig,
    iterable_writers: HashMap<WriterKey, Option<ObjectAccess>>,
}

impl GraphMapper {
    /// Create a mapper with the default configuration.
    pub fn new(context: Arc<MappingContext>) -> Self {
        Self::with_config(context, HydrationConfig::default())
    }

    /// Create a mapper with the given configuration.
    pub fn with_config(context: Arc<MappingContext>, config: HydrationConfig) -> Self {
        let strategy = DefaultAccessStrategy::new(context.metadata().clone());
        Self {
            context,
            strategy,
            config,
            iterable_writers: HashMap::new(),
        }
    }

    /// The context objects are registered in.
    pub fn context(&self) -> &Arc<MappingContext> {
        &self.context
    }

    /// The configuration in use.
    pub fn config(&self) -> &HydrationConfig {
        &self.config
    }

    /// Map a graph result.
    pub fn map(&mut self, model: &GraphModel) -> Result<Hydrated> {
        if let Some(max_count) = self.config.max_nodes {
            if model.nodes.len() > max_count {
                return Err(MappingError::NodeCountExceeded {
                    count: model.nodes.len(),
                    max_count,
                });
            }
        }

        let mut report = HydrationReport::default();
        let mut objects = Vec::with_capacity(model.nodes.len());
        let mut seen = HashSet::new();

        for node in &model.nodes {
            if !seen.insert(node.id) {
                continue;
            }
            if let Some(entity) = self.map_node(node, &mut report)? {
                objects.push(entity);
            }
        }

        let mut deferred = BTreeMap::new();
        for relationship in &model.relationships {
            self.map_relationship(relationship, &mut deferred, &mut report)?;
        }
        for ((start_id, rel_type), edges) in deferred {
            self.bind_group(start_id, &rel_type, edges, &mut report)?;
        }

        if self.config.remember_loaded {
            for entity in &objects {
                self.context.remember(entity)?;
            }
        }

        debug!(
            nodes = report.nodes_mapped,
            relationships = report.relationships_mapped,
            complete = report.is_complete(),
            "hydrated graph result"
        );
        Ok(Hydrated { objects, report })
    }

    fn map_node(&self, node: &NodeModel, report: &mut HydrationReport) -> Result<Option<EntityRef>> {
        let metadata = self.context.metadata();
        let Some(resolved) = metadata.resolve(&node.labels) else {
            if self.config.strict_types {
                return Err(MappingError::UnresolvableNode {
                    id: node.id,
                    labels: node.labels.clone(),
                });
            }
            warn!(id = node.id, labels = ?node.labels, "skipping node with unresolvable labels");
            report.unresolved_nodes.push(node.id);
            return Ok(None);
        };

        let entity = match self.context.get(node.id) {
            Some(existing) => existing,
            None => self.context.register(resolved.instantiate()?, node.id),
        };
        let class = metadata.class_info_for(&entity).unwrap_or(resolved);

        if let Some(writer) = self.strategy.identity_writer(&class) {
            writer.write(&entity, Value::Int(node.id))?;
        }

        for (key, value) in &node.properties {
            let Some(writer) = self.strategy.property_writer(&class, key) else {
                trace!(class = class.name(), property = %key, "no writer for property");
                report.unmapped_properties += 1;
                continue;
            };
            let written = cypher_to_value(value).and_then(|v| Ok(writer.write(&entity, v)?));
            if let Err(err) = written {
                if self.config.strict_types {
                    return Err(err);
                }
                warn!(class = class.name(), property = %key, error = %err, "property value rejected");
                report.unmapped_properties += 1;
            }
        }

        report.nodes_mapped += 1;
        Ok(Some(entity))
    }

    fn map_relationship(
        &self,
        relationship: &RelationshipModel,
        deferred: &mut BTreeMap<GroupKey, Vec<DeferredEdge>>,
        report: &mut HydrationReport,
    ) -> Result<()> {
        let metadata = self.context.metadata();
        let endpoints = (
            self.context.get(relationship.start_node),
            self.context.get(relationship.end_node),
        );
        let (Some(parent), Some(child)) = endpoints else {
            warn!(id = relationship.id, "skipping relationship with unmapped endpoint");
            report.dangling_relationships.push(relationship.id);
            return Ok(());
        };
        let (Some(parent_class), Some(child_class)) =
            (metadata.class_info_for(&parent), metadata.class_info_for(&child))
        else {
            report.dangling_relationships.push(relationship.id);
            return Ok(());
        };

        let mapped = MappedRelationship::new(
            relationship.start_node,
            relationship.rel_type.clone(),
            relationship.end_node,
        );
        let value = Value::Entity(child.clone());

        match self
            .strategy
            .relational_writer(&parent_class, &relationship.rel_type, &value)
        {
            Resolution::Found(writer) => {
                writer.write(&parent, value)?;
                self.context.register_relationship(mapped);
                report.relationships_mapped += 1;
            }
            Resolution::Incompatible => {
                trace!(%mapped, "deferring relationship to collection binding");
                deferred
                    .entry((relationship.start_node, relationship.rel_type.clone()))
                    .or_default()
                    .push(DeferredEdge {
                        id: relationship.id,
                        end_id: relationship.end_node,
                        child_type: child.entity_type(),
                        child_class: child_class.name().to_string(),
                    });
            }
            Resolution::NotFound => {
                trace!(%mapped, "no member accepts relationship");
                report.unmapped_relationships.push(relationship.id);
            }
        }
        Ok(())
    }

    fn iterable_writer(
        &mut self,
        parent_class: &ClassInfo,
        rel_type: &str,
        child_class: &str,
    ) -> Option<ObjectAccess> {
        let key = (
            parent_class.name().to_string(),
            rel_type.to_string(),
            child_class.to_string(),
        );
        let strategy = &self.strategy;
        self.iterable_writers
            .entry(key)
            .or_insert_with(|| strategy.iterable_writer(parent_class, Some(rel_type), child_class))
            .clone()
    }

    fn accepts(&self, writer: &ObjectAccess, entity: &EntityRef) -> bool {
        let metadata = self.context.metadata();
        metadata
            .class_info_for(entity)
            .is_some_and(|class| metadata.is_assignable(writer.declared_type().element(), class.name()))
    }

    fn bind_group(
        &mut self,
        start_id: i64,
        rel_type: &str,
        edges: Vec<DeferredEdge>,
        report: &mut HydrationReport,
    ) -> Result<()> {
        let metadata = self.context.metadata().clone();
        let parent = self.context.get(start_id);
        let Some((parent, parent_class)) =
            parent.and_then(|p| metadata.class_info_for(&p).map(|class| (p, class)))
        else {
            report.dangling_relationships.extend(edges.iter().map(|e| e.id));
            return Ok(());
        };

        let mut groups: Vec<WriterGroup> = Vec::new();
        for edge in edges {
            let Some(writer) = self.iterable_writer(&parent_class, rel_type, &edge.child_class) else {
                warn!(
                    start_id,
                    rel_type,
                    child_class = %edge.child_class,
                    "no collection member accepts relationship"
                );
                report.unmapped_relationships.push(edge.id);
                continue;
            };
            let key = (writer.kind(), writer.member_name().to_string());
            let position = match groups.iter().position(|g| g.key() == key) {
                Some(position) => position,
                None => {
                    groups.push(WriterGroup {
                        writer,
                        child_types: BTreeSet::new(),
                        end_ids: BTreeSet::new(),
                        edges: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
            let group = &mut groups[position];
            group.child_types.insert(edge.child_type);
            group.end_ids.insert(edge.end_id);
            group.edges.push(edge.id);
        }

        let registered: Vec<i64> = self
            .context
            .mapped_relationships()
            .into_iter()
            .filter(|r| r.start_id == start_id && r.rel_type == rel_type)
            .map(|r| r.end_id)
            .collect();

        for group in groups {
            let member = group.writer.member_name().to_string();
            let mut children: BTreeMap<i64, EntityRef> = BTreeMap::new();
            for child_type in &group.child_types {
                children.extend(
                    self.context
                        .indexed(*child_type)
                        .into_iter()
                        .filter(|(id, _)| group.end_ids.contains(id)),
                );
            }
            for end_id in &registered {
                if children.contains_key(end_id) {
                    continue;
                }
                if let Some(child) = self.context.get(*end_id) {
                    if self.accepts(&group.writer, &child) {
                        children.insert(*end_id, child);
                    }
                }
            }

            if children.is_empty() {
                warn!(start_id, rel_type, member = %member, "deferred relationships have no indexed children");
                report.dangling_relationships.extend(group.edges);
                continue;
            }

            let value = Value::List(children.values().cloned().map(Value::Entity).collect());
            group.writer.write(&parent, value)?;

            for end_id in children.keys() {
                self.context
                    .register_relationship(MappedRelationship::new(start_id, rel_type, *end_id));
            }
            report.relationships_mapped += group.edges.len();
            report.relationships_deferred += group.edges.len();
            debug!(start_id, rel_type, member = %member, children = children.len(), "bound collection");
        }
        Ok(())
    }
}

impl std::fmt::Debug for GraphMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphMapper")
            .field("context", &self.context)
            .field("config", &self.config)
            .field("cached_writers", &self.iterable_writers.len())
            .finish_non_exhaustive()
    }
}
