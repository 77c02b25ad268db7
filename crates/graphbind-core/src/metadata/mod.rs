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

//! Class metadata: definitions, descriptors, naming rules and type
//! resolution.

mod class;
mod member;
pub mod naming;
mod registry;
mod resolver;
mod types;

pub use class::{ClassDef, ClassInfo, ClassKind, DEFAULT_IDENTITY_FIELD};
pub use member::{FieldInfo, MethodInfo, MethodKind};
pub use registry::{ClassCatalog, MetaData};
pub use resolver::TypeResolver;
pub use types::{is_primitive, primitive, Cardinality, TypeRef, DATE};
