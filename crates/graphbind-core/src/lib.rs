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

//! Metadata model, type resolution and entity access for mapping in-memory
//! object graphs onto labeled property graphs.
//!
//! Mapping rules are derived at runtime from a declarative catalog of class
//! definitions; no code generation is involved.
//!
//! # Concepts
//!
//! | Concept | Type |
//! |---------|------|
//! | Mapped object | [`EntityRef`], a shared handle compared by identity |
//! | Member value | [`Value`] |
//! | Class definition | [`metadata::ClassDef`], collected in a [`metadata::ClassCatalog`] |
//! | Class descriptor | [`metadata::ClassInfo`], built lazily by [`metadata::MetaData`] |
//! | Label set to class | [`metadata::TypeResolver`] |
//! | Member accessors | [`access::DefaultAccessStrategy`] |
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use graphbind_core::access::DefaultAccessStrategy;
//! use graphbind_core::metadata::{primitive, ClassCatalog, ClassDef, FieldInfo, MetaData, TypeRef};
//! use graphbind_core::Value;
//!
//! #[derive(Default)]
//! struct Topic { id: Option<i64>, name: Option<String> }
//!
//! let catalog = ClassCatalog::new().with(
//!     ClassDef::entity::<Topic>("forum.Topic")
//!         .field(FieldInfo::new("id", TypeRef::scalar(primitive::LONG),
//!             |t: &Topic| t.id, |t: &mut Topic, v| t.id = v))
//!         .field(FieldInfo::new("name", TypeRef::scalar(primitive::STRING),
//!             |t: &Topic| t.name.clone(), |t: &mut Topic, v| t.name = v)),
//! );
//! let metadata = Arc::new(MetaData::new(catalog, &["forum"]));
//! let strategy = DefaultAccessStrategy::new(metadata.clone());
//!
//! let info = metadata.resolve(&["Topic"]).unwrap();
//! let topic = info.instantiate().unwrap();
//! strategy
//!     .property_writer(&info, "name")
//!     .unwrap()
//!     .write(&topic, Value::from("Rust"))
//!     .unwrap();
//! assert_eq!(topic.read(|t: &Topic| t.name.clone()).flatten().as_deref(), Some("Rust"));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod access;
mod entity;
mod error;
pub mod metadata;
mod value;

pub use entity::EntityRef;
pub use error::{AccessError, Error, Result};
pub use value::{FromValue, Value};
