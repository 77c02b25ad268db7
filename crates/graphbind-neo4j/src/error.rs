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

//! Error types for hydration and statement compilation.

use graphbind_core::AccessError;
use thiserror::Error;

/// Error type for mapping operations.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Metadata lookup or instantiation failed.
    #[error(transparent)]
    Core(#[from] graphbind_core::Error),

    /// Reading or writing an object member failed.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// No unique concrete class matches the node's labels.
    #[error("cannot resolve a class for node {id} with labels {labels:?}")]
    UnresolvableNode {
        /// Internal id of the node.
        id: i64,
        /// The node's labels.
        labels: Vec<String>,
    },

    /// The object's class declares no identity field, or the field holds a
    /// non-integer value.
    #[error("no usable identity for an instance of '{0}'")]
    MissingIdentity(String),

    /// A label, relationship type or property key is not a plain identifier.
    #[error("invalid Cypher identifier: '{0}'")]
    InvalidIdentifier(String),

    /// A statement variable is neither bound nor an existing-node reference.
    #[error("unknown statement variable '{0}'")]
    UnknownVariable(String),

    /// A value has no Cypher or member representation.
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// The graph model holds more nodes than allowed.
    #[error("node count {count} exceeds maximum allowed count {max_count}")]
    NodeCountExceeded {
        /// Number of nodes in the model.
        count: usize,
        /// Configured maximum.
        max_count: usize,
    },

    /// Serialization error from serde_json.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unresolvable_node() {
        let err = MappingError::UnresolvableNode {
            id: 7,
            labels: vec!["Topic".to_string(), "User".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains("Topic"));
        assert!(msg.contains("User"));
    }

    #[test]
    fn test_error_from_core_error() {
        let err: MappingError = graphbind_core::Error::UnknownClass("Knight".to_string()).into();
        assert!(matches!(err, MappingError::Core(_)));
        assert_eq!(err.to_string(), "unknown class 'Knight'");
    }

    #[test]
    fn test_error_from_access_error() {
        let err: MappingError = AccessError::ReadOnly("name".to_string()).into();
        assert!(matches!(err, MappingError::Access(_)));
    }

    #[test]
    fn test_error_from_json_error() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: MappingError = json_err.into();
        assert!(matches!(err, MappingError::Json(_)));
    }

    #[test]
    fn test_node_count_display() {
        let err = MappingError::NodeCountExceeded {
            count: 12,
            max_count: 10,
        };
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains("10"));
    }
}
