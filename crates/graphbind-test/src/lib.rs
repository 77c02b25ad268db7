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

//! Shared domain fixtures for graphbind tests.
//!
//! Each fixture module declares plain Rust structs and the class
//! definitions describing them, grouped by namespace so tests can scan
//! exactly the domains they need.
//!
//! ```rust
//! use graphbind_test::fixtures::{self, forum};
//!
//! let metadata = fixtures::metadata(&[forum::NAMESPACE]);
//! assert_eq!(metadata.class_info("User").unwrap().name(), forum::names::MEMBER);
//! ```

pub mod fixtures;

pub use fixtures::{all_metadata, catalog, metadata};
