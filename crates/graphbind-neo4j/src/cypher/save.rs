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

//! Compilation of an object graph into one save statement.
//!
//! The graph reachable from a root object is walked through its
//! relationship readers. Objects without an identity become `CREATE`
//! clauses; persisted objects whose content changed since they were last
//! remembered become `SET` clauses. Every edge not yet in the relationship
//! registry becomes a `MERGE`. The ids of created nodes are returned under
//! their variable names so they can be written back with
//! [`CompiledSave::apply_generated_ids`].

use crate::config::CompilerConfig;
use crate::context::{MappedRelationship, MappingContext};
use crate::cypher::compiler::{
    ExistingNodeBuilder, NewNodeBuilder, NewRelationshipBuilder, StatementCompiler,
};
use crate::cypher::statements::{CypherStatement, CypherValue};
use crate::error::{MappingError, Result};
use crate::mapping::value_to_cypher;
use graphbind_core::access::DefaultAccessStrategy;
use graphbind_core::metadata::ClassInfo;
use graphbind_core::{EntityRef, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, trace};

/// An object the statement creates.
#[derive(Debug, Clone)]
pub struct NewNode {
    /// Variable the node is bound to and its id is returned under.
    pub var: String,
    /// The object.
    pub entity: EntityRef,
}

/// A relationship the statement merges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRelationship {
    /// Variable of the start node.
    pub start: String,
    /// Relationship type.
    pub rel_type: String,
    /// Variable of the end node.
    pub end: String,
}

/// Output of [`SaveCompiler::compile`].
#[derive(Debug, Clone)]
pub struct CompiledSave {
    /// The statement to run.
    pub statement: CypherStatement,
    /// Objects created by the statement, in variable order.
    pub new_nodes: Vec<NewNode>,
    /// Persisted objects reached by the walk, with their node ids.
    pub existing_nodes: Vec<(i64, EntityRef)>,
    /// Relationships merged by the statement.
    pub new_relationships: Vec<PendingRelationship>,
    existing_vars: BTreeMap<String, i64>,
}

impl CompiledSave {
    /// True if running the statement would change nothing.
    pub fn is_empty(&self) -> bool {
        self.statement.is_empty()
    }

    /// Write the ids the statement returned back into the created objects.
    ///
    /// `ids` maps each new node variable to its generated id. Created
    /// objects are registered in `context`, every object the save touched
    /// is remembered as clean, and the merged relationships are recorded.
    pub fn apply_generated_ids(
        &self,
        context: &MappingContext,
        ids: &BTreeMap<String, i64>,
    ) -> Result<()> {
        let strategy = DefaultAccessStrategy::new(context.metadata().clone());

        for node in &self.new_nodes {
            let id = *ids
                .get(&node.var)
                .ok_or_else(|| MappingError::UnknownVariable(node.var.clone()))?;
            let class = class_of(context, &node.entity)?;
            let writer = strategy
                .identity_writer(&class)
                .ok_or_else(|| MappingError::MissingIdentity(class.name().to_string()))?;
            writer.write(&node.entity, Value::Int(id))?;
            let registered = context.register(node.entity.clone(), id);
            context.remember(&registered)?;
        }

        for (_, entity) in &self.existing_nodes {
            context.remember(entity)?;
        }

        let id_of = |var: &str| {
            ids.get(var)
                .or_else(|| self.existing_vars.get(var))
                .copied()
                .ok_or_else(|| MappingError::UnknownVariable(var.to_string()))
        };
        for pending in &self.new_relationships {
            let relationship = MappedRelationship::new(
                id_of(&pending.start)?,
                pending.rel_type.clone(),
                id_of(&pending.end)?,
            );
            context.register_relationship(relationship);
        }

        debug!(
            created = self.new_nodes.len(),
            relationships = self.new_relationships.len(),
            "applied generated ids"
        );
        Ok(())
    }
}

fn class_of(context: &MappingContext, entity: &EntityRef) -> Result<Arc<ClassInfo>> {
    context.metadata().class_info_for(entity).ok_or_else(|| {
        MappingError::Core(graphbind_core::Error::UnknownClass(
            entity.type_name().to_string(),
        ))
    })
}

struct Visited {
    entity: EntityRef,
    class: Arc<ClassInfo>,
    id: Option<i64>,
}

/// Compiles object graphs against the state recorded in a
/// [`MappingContext`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use graphbind_core::EntityRef;
/// use graphbind_neo4j::cypher::SaveCompiler;
/// use graphbind_neo4j::MappingContext;
/// use graphbind_test::fixtures::{self, satellites::{self, Location}};
///
/// let context = Arc::new(MappingContext::new(fixtures::metadata(&[satellites::NAMESPACE])));
/// let location = EntityRef::new(Location { id: None, name: Some("LEO".into()) });
///
/// let compiled = SaveCompiler::new(context).compile(&location).unwrap();
/// assert_eq!(
///     compiled.statement.query,
///     "CREATE (_0:Location {_0_props}) RETURN id(_0) AS _0"
/// );
/// ```
#[derive(Debug)]
pub struct SaveCompiler {
    context: Arc<MappingContext>,
    strategy: DefaultAccessStrategy,
    config: CompilerConfig,
}

impl SaveCompiler {
    /// Create a compiler with the default configuration.
    pub fn new(context: Arc<MappingContext>) -> Self {
        Self::with_config(context, CompilerConfig::default())
    }

    /// Create a compiler with the given configuration.
    pub fn with_config(context: Arc<MappingContext>, config: CompilerConfig) -> Self {
        let strategy = DefaultAccessStrategy::new(context.metadata().clone());
        Self {
            context,
            strategy,
            config,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    fn identity(&self, class: &ClassInfo, entity: &EntityRef) -> Result<Option<i64>> {
        let reader = self
            .strategy
            .identity_reader(class)
            .ok_or_else(|| MappingError::MissingIdentity(class.name().to_string()))?;
        match reader.read(entity)? {
            Value::Int(id) => Ok(Some(id)),
            _ => Ok(None),
        }
    }

    fn properties(
        &self,
        class: &ClassInfo,
        entity: &EntityRef,
    ) -> Result<BTreeMap<String, CypherValue>> {
        let mut properties = BTreeMap::new();
        for field in class.property_fields() {
            let Some(name) = field.property_name() else {
                continue;
            };
            let Some(reader) = self.strategy.property_reader(class, &name) else {
                trace!(class = class.name(), property = %name, "no reader for property");
                continue;
            };
            let value = reader.read(entity)?;
            if !value.is_null() {
                properties.insert(name, value_to_cypher(&value)?);
            }
        }
        Ok(properties)
    }

    /// Walk the graph reachable from `root` and compile its save statement.
    pub fn compile(&self, root: &EntityRef) -> Result<CompiledSave> {
        let mut visited: Vec<Visited> = Vec::new();
        let mut slots: HashMap<EntityRef, usize> = HashMap::new();
        let mut edges: Vec<(usize, String, usize)> = Vec::new();

        let root_class = class_of(&self.context, root)?;
        let root_id = self.identity(&root_class, root)?;
        slots.insert(root.clone(), 0);
        visited.push(Visited {
            entity: root.clone(),
            class: root_class,
            id: root_id,
        });

        let mut cursor = 0;
        while cursor < visited.len() {
            let (entity, class) = (visited[cursor].entity.clone(), visited[cursor].class.clone());
            for reader in self.strategy.relational_readers(&class) {
                for child in reader.read(&entity)?.entities() {
                    let slot = match slots.get(&child) {
                        Some(slot) => *slot,
                        None => {
                            let child_class = class_of(&self.context, &child)?;
                            let id = self.identity(&child_class, &child)?;
                            slots.insert(child.clone(), visited.len());
                            visited.push(Visited {
                                entity: child,
                                class: child_class,
                                id,
                            });
                            visited.len() - 1
                        }
                    };
                    edges.push((cursor, reader.relationship_type().to_string(), slot));
                }
            }
            cursor += 1;
        }

        let mut compiler = StatementCompiler::new(self.config.clone());
        let mut vars = Vec::with_capacity(visited.len());
        let mut new_nodes = Vec::new();
        let mut existing_nodes = Vec::new();
        let mut existing_vars = BTreeMap::new();

        for node in &visited {
            match node.id {
                None => {
                    let var = compiler.new_node_var();
                    let builder = NewNodeBuilder::new(var.clone())
                        .with_labels(node.class.labels().iter().cloned())
                        .with_properties(self.properties(&node.class, &node.entity)?)
                        .with_config(&self.config);
                    compiler.emit(&builder)?;
                    new_nodes.push(NewNode {
                        var: var.clone(),
                        entity: node.entity.clone(),
                    });
                    vars.push(var);
                }
                Some(id) => {
                    let var = compiler.existing_node_var(id);
                    if self.context.is_dirty(&node.entity)? {
                        let builder = ExistingNodeBuilder::new(var.clone())
                            .with_properties(self.properties(&node.class, &node.entity)?)
                            .with_config(&self.config);
                        compiler.emit(&builder)?;
                    } else {
                        trace!(id, "skipping unchanged node");
                    }
                    existing_nodes.push((id, node.entity.clone()));
                    existing_vars.insert(var.clone(), id);
                    vars.push(var);
                }
            }
        }

        let mut seen = HashSet::new();
        let mut new_relationships = Vec::new();
        for (start, rel_type, end) in edges {
            if !seen.insert((start, rel_type.clone(), end)) {
                continue;
            }
            if let (Some(start_id), Some(end_id)) = (visited[start].id, visited[end].id) {
                let known = MappedRelationship::new(start_id, rel_type.clone(), end_id);
                if self.context.is_registered_relationship(&known) {
                    trace!(relationship = %known, "skipping registered relationship");
                    continue;
                }
            }
            let builder = NewRelationshipBuilder::new(rel_type.clone(), vars[start].clone(), vars[end].clone())
                .with_config(&self.config);
            compiler.emit(&builder)?;
            new_relationships.push(PendingRelationship {
                start: vars[start].clone(),
                rel_type,
                end: vars[end].clone(),
            });
        }

        if self.config.include_return {
            let returned: Vec<&str> = new_nodes.iter().map(|n| n.var.as_str()).collect();
            compiler.return_ids(&returned)?;
        }

        let statement = compiler.finish();
        debug!(
            objects = visited.len(),
            created = new_nodes.len(),
            relationships = new_relationships.len(),
            "compiled save statement"
        );
        trace!(statement = %statement.render_inline(), "save statement text");
        Ok(CompiledSave {
            statement,
            new_nodes,
            existing_nodes,
            new_relationships,
            existing_vars,
        })
    }
}
