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

//! Hydration, change tracking and Cypher write compilation on top of
//! `graphbind-core`.
//!
//! # Data flow
//!
//! | Direction | Input | Output | Entry point |
//! |-----------|-------|--------|-------------|
//! | Read | [`GraphModel`] (nodes and relationships of a result) | registered objects | [`GraphMapper::map`] |
//! | Write | a root object | [`CypherStatement`] plus new-node variables | [`cypher::SaveCompiler::compile`] |
//! | Write-back | ids returned by the statement | registered, clean objects | [`cypher::CompiledSave::apply_generated_ids`] |
//!
//! All state shared between reads and writes lives in a
//! [`MappingContext`]: the identity map, the type index, the content
//! hashes used for dirty tracking, and the relationships known to be
//! persisted.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use graphbind_neo4j::cypher::SaveCompiler;
//! use graphbind_neo4j::{GraphMapper, GraphModel, MappingContext, NodeModel};
//! use graphbind_test::fixtures::{self, satellites::{self, Satellite}};
//!
//! let context = Arc::new(MappingContext::new(fixtures::metadata(&[satellites::NAMESPACE])));
//! let model = GraphModel::new()
//!     .with_node(NodeModel::new(5).with_labels(["Satellite"]).with_property("name", "Sputnik"));
//! GraphMapper::new(context.clone()).map(&model).unwrap();
//!
//! let sputnik = context.get(5).unwrap();
//! assert!(SaveCompiler::new(context.clone()).compile(&sputnik).unwrap().is_empty());
//!
//! sputnik.write(|s: &mut Satellite| s.manned = Some(false));
//! let compiled = SaveCompiler::new(context).compile(&sputnik).unwrap();
//! assert_eq!(compiled.statement.query, "MATCH ($5) WHERE id($5)=5 SET $5+={$5_props}");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod config;
mod context;
pub mod cypher;
mod error;
mod hydrate;
pub mod mapping;
pub mod memo;
mod model;

pub use config::{
    CompilerConfig, CompilerConfigBuilder, HydrationConfig, HydrationConfigBuilder,
    DEFAULT_EXISTING_SIGIL, DEFAULT_NEW_SIGIL,
};
pub use context::{MappedRelationship, MappingContext};
pub use error::{MappingError, Result};
pub use hydrate::{GraphMapper, Hydrated, HydrationReport};
pub use model::{GraphModel, NodeModel, RelationshipModel};
pub use cypher::{CypherStatement, CypherValue};
