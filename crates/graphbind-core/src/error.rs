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

//! Error types for metadata lookups and entity access.

use thiserror::Error;

/// Failure raised while reading or writing a member of an entity.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccessError {
    /// The value could not be converted to the member's declared type.
    #[error("type mismatch on '{member}': expected {expected}, got {found}")]
    TypeMismatch {
        /// Field or method name.
        member: String,
        /// The Rust type the member expects.
        expected: &'static str,
        /// Description of the offending value.
        found: String,
    },

    /// The accessor was applied to an entity of a different Rust type.
    #[error("accessor for {expected} applied to an instance of {found}")]
    WrongTarget {
        /// Type the accessor was built for.
        expected: &'static str,
        /// Type of the entity it was applied to.
        found: &'static str,
    },

    /// The member has no write path.
    #[error("member '{0}' is read-only")]
    ReadOnly(String),

    /// The member has no read path.
    #[error("member '{0}' is write-only")]
    WriteOnly(String),
}

/// Error type for metadata and entity operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// No class with this name, simple name or label is known.
    #[error("unknown class '{0}'")]
    UnknownClass(String),

    /// Abstract classes and interfaces cannot be instantiated.
    #[error("class '{0}' cannot be instantiated")]
    NotInstantiable(String),

    /// The class declares no identity field.
    #[error("class '{0}' has no identity field")]
    MissingIdentity(String),

    /// A member access failed.
    #[error(transparent)]
    Access(#[from] AccessError),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
