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

//! Domain fixtures.
//!
//! | Module | Namespace | Exercises |
//! |--------|-----------|-----------|
//! | [`forum`] | `forum` | labels, interfaces, abstract taxa, annotated identity |
//! | [`satellites`] | `satellites` | conventional accessors, one-to-many edges |
//! | [`education`] | `education` | unannotated hierarchies |
//! | [`dummy`] | `entityaccess` | accessor precedence |

pub mod dummy;
pub mod education;
pub mod forum;
pub mod satellites;

use graphbind_core::metadata::{ClassCatalog, MetaData};
use std::sync::Arc;

/// Every fixture class in one catalog.
pub fn catalog() -> ClassCatalog {
    forum::classes()
        .into_iter()
        .chain(satellites::classes())
        .chain(education::classes())
        .chain(std::iter::once(dummy::class()))
        .collect()
}

/// Metadata over the fixture classes under `namespaces`.
pub fn metadata(namespaces: &[&str]) -> Arc<MetaData> {
    Arc::new(MetaData::new(catalog(), namespaces))
}

/// Metadata over every fixture domain.
pub fn all_metadata() -> Arc<MetaData> {
    metadata(&[
        forum::NAMESPACE,
        satellites::NAMESPACE,
        education::NAMESPACE,
        dummy::NAMESPACE,
    ])
}
