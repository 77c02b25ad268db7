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

//! Session state shared by hydration and save compilation.
//!
//! | State | Cleared by [`MappingContext::clear`] |
//! |-------|----------------------------------------|
//! | identity map (node id to object) | no |
//! | type index (Rust type to objects) | no |
//! | change memo (object to content hash) | yes |
//! | relationship registry | yes |
//!
//! The identity map is an arena of objects addressed by slot, plus a
//! concurrent map from node id to slot. Registering an id holds that id's
//! map entry while the object is pushed into the arena, so concurrent
//! registrations of one id always agree on a single instance.

use crate::error::{MappingError, Result};
use crate::memo::ObjectMemo;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use graphbind_core::metadata::MetaData;
use graphbind_core::EntityRef;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// A relationship already reflected in the object graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MappedRelationship {
    /// Id of the start node.
    pub start_id: i64,
    /// Relationship type.
    pub rel_type: String,
    /// Id of the end node.
    pub end_id: i64,
}

impl MappedRelationship {
    /// Relationship `rel_type` from `start_id` to `end_id`.
    pub fn new(start_id: i64, rel_type: impl Into<String>, end_id: i64) -> Self {
        Self {
            start_id,
            rel_type: rel_type.into(),
            end_id,
        }
    }
}

impl fmt::Display for MappedRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})-[:{}]->({})", self.start_id, self.rel_type, self.end_id)
    }
}

#[derive(Debug, Default)]
struct RelationshipRegistry {
    ordered: Vec<MappedRelationship>,
    index: HashSet<MappedRelationship>,
}

type Slots = Arc<RwLock<BTreeSet<usize>>>;

/// Identity map, type index, change memo and relationship registry of one
/// session.
///
/// # Examples
///
/// ```
/// use graphbind_neo4j::MappingContext;
/// use graphbind_test::fixtures::{self, forum::Topic};
/// use graphbind_core::EntityRef;
///
/// let context = MappingContext::new(fixtures::all_metadata());
/// let first = context.register(EntityRef::new(Topic::default()), 3);
/// let second = context.register(EntityRef::new(Topic::default()), 3);
/// assert_eq!(first, second);
/// assert_eq!(context.get_all_of::<Topic>().len(), 1);
/// ```
pub struct MappingContext {
    metadata: Arc<MetaData>,
    arena: RwLock<Vec<(i64, EntityRef)>>,
    ids: DashMap<i64, usize>,
    types: DashMap<TypeId, Slots>,
    memo: ObjectMemo,
    relationships: RwLock<RelationshipRegistry>,
}

impl MappingContext {
    /// Create an empty context over `metadata`.
    pub fn new(metadata: Arc<MetaData>) -> Self {
        Self {
            metadata,
            arena: RwLock::new(Vec::new()),
            ids: DashMap::new(),
            types: DashMap::new(),
            memo: ObjectMemo::new(),
            relationships: RwLock::new(RelationshipRegistry::default()),
        }
    }

    /// The metadata this context consults.
    pub fn metadata(&self) -> &Arc<MetaData> {
        &self.metadata
    }

    fn slots(&self, type_id: TypeId) -> Slots {
        self.types.entry(type_id).or_insert_with(Slots::default).value().clone()
    }

    fn at(&self, slot: usize) -> Option<(i64, EntityRef)> {
        self.arena.read().get(slot).cloned()
    }

    /// Bind `id` to `entity` unless it is already bound, and return the
    /// instance bound to `id`.
    ///
    /// A second registration of an id discards the offered object.
    pub fn register(&self, entity: EntityRef, id: i64) -> EntityRef {
        let (slot, registered) = match self.ids.entry(id) {
            Entry::Occupied(occupied) => {
                let slot = *occupied.get();
                drop(occupied);
                let registered = self.at(slot).map_or(entity, |(_, existing)| existing);
                (slot, registered)
            }
            Entry::Vacant(vacant) => {
                let slot = {
                    let mut arena = self.arena.write();
                    arena.push((id, entity.clone()));
                    arena.len() - 1
                };
                vacant.insert(slot);
                trace!(id, slot, "registered object");
                (slot, entity)
            }
        };
        self.slots(registered.entity_type()).write().insert(slot);
        registered
    }

    /// The object bound to `id`.
    pub fn get(&self, id: i64) -> Option<EntityRef> {
        let slot = *self.ids.get(&id)?;
        self.at(slot).map(|(_, entity)| entity)
    }

    /// True if `id` is bound.
    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains_key(&id)
    }

    /// Number of bound ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True if no id is bound.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Objects of the Rust type `type_id`, with their node ids, in
    /// registration order.
    pub fn indexed(&self, type_id: TypeId) -> Vec<(i64, EntityRef)> {
        let slots = self.slots(type_id);
        let slots = slots.read();
        let arena = self.arena.read();
        slots.iter().filter_map(|slot| arena.get(*slot).cloned()).collect()
    }

    /// Objects of the Rust type `type_id`, in registration order.
    pub fn get_all(&self, type_id: TypeId) -> Vec<EntityRef> {
        self.indexed(type_id).into_iter().map(|(_, e)| e).collect()
    }

    /// Objects of type `T`, in registration order.
    pub fn get_all_of<T: Any>(&self) -> Vec<EntityRef> {
        self.get_all(TypeId::of::<T>())
    }

    /// The node id `entity` is registered under.
    pub fn id_of(&self, entity: &EntityRef) -> Option<i64> {
        let slots = self.types.get(&entity.entity_type())?.value().clone();
        let slots = slots.read();
        let arena = self.arena.read();
        slots
            .iter()
            .filter_map(|slot| arena.get(*slot))
            .find(|(_, e)| e == entity)
            .map(|(id, _)| *id)
    }

    fn class_of(&self, entity: &EntityRef) -> Result<Arc<graphbind_core::metadata::ClassInfo>> {
        self.metadata.class_info_for(entity).ok_or_else(|| {
            MappingError::Core(graphbind_core::Error::UnknownClass(
                entity.type_name().to_string(),
            ))
        })
    }

    /// Store the current content hash of `entity`.
    pub fn remember(&self, entity: &EntityRef) -> Result<()> {
        let class = self.class_of(entity)?;
        Ok(self.memo.remember(&class, entity)?)
    }

    /// True if `entity` was never remembered or has changed since.
    pub fn is_dirty(&self, entity: &EntityRef) -> Result<bool> {
        let class = self.class_of(entity)?;
        Ok(!self.memo.remembered(&class, entity)?)
    }

    /// Record a relationship. Returns false if it was already recorded.
    pub fn register_relationship(&self, relationship: MappedRelationship) -> bool {
        let mut registry = self.relationships.write();
        if !registry.index.insert(relationship.clone()) {
            return false;
        }
        trace!(%relationship, "registered relationship");
        registry.ordered.push(relationship);
        true
    }

    /// True if exactly this relationship was recorded.
    pub fn is_registered_relationship(&self, relationship: &MappedRelationship) -> bool {
        self.relationships.read().index.contains(relationship)
    }

    /// Recorded relationships, in registration order.
    pub fn mapped_relationships(&self) -> Vec<MappedRelationship> {
        self.relationships.read().ordered.clone()
    }

    /// Drop the change memo and the relationship registry. The identity map
    /// and type index are kept.
    pub fn clear(&self) {
        self.memo.clear();
        let mut registry = self.relationships.write();
        registry.ordered.clear();
        registry.index.clear();
    }
}

impl fmt::Debug for MappingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingContext")
            .field("objects", &self.ids.len())
            .field("types", &self.types.len())
            .field("remembered", &self.memo.len())
            .field("relationships", &self.relationships.read().ordered.len())
            .finish()
    }
}
