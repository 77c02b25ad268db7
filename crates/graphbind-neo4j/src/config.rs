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

//! Configuration for hydration and statement compilation.

use serde::{Deserialize, Serialize};

/// Default prefix of variables naming persisted nodes (`$12`).
pub const DEFAULT_EXISTING_SIGIL: char = '$';

/// Default prefix of variables naming nodes created in the statement (`_0`).
pub const DEFAULT_NEW_SIGIL: char = '_';

/// Configuration for mapping a graph result onto objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HydrationConfig {
    /// Fail the whole call on an unresolvable node or a rejected property
    /// value, instead of skipping and reporting it (default: false).
    pub strict_types: bool,

    /// Remember the content hash of every hydrated object, so it starts
    /// out clean (default: true).
    pub remember_loaded: bool,

    /// Maximum number of nodes accepted in one result (default: None = unlimited).
    pub max_nodes: Option<usize>,
}

impl Default for HydrationConfig {
    fn default() -> Self {
        Self {
            strict_types: false,
            remember_loaded: true,
            max_nodes: None,
        }
    }
}

/// Builder for [`HydrationConfig`].
///
/// # Examples
///
/// ```
/// # use graphbind_neo4j::HydrationConfig;
/// let config = HydrationConfig::builder()
///     .strict_types(true)
///     .max_nodes(10_000)
///     .build();
/// assert!(config.strict_types);
/// assert!(config.remember_loaded);
/// ```
#[derive(Debug, Default)]
pub struct HydrationConfigBuilder {
    strict_types: Option<bool>,
    remember_loaded: Option<bool>,
    max_nodes: Option<Option<usize>>,
}

impl HydrationConfigBuilder {
    /// Create a new builder with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether resolution and conversion failures abort hydration.
    pub fn strict_types(mut self, strict: bool) -> Self {
        self.strict_types = Some(strict);
        self
    }

    /// Set whether hydrated objects are remembered as clean.
    pub fn remember_loaded(mut self, remember: bool) -> Self {
        self.remember_loaded = Some(remember);
        self
    }

    /// Set the maximum number of nodes per result.
    pub fn max_nodes(mut self, max: usize) -> Self {
        self.max_nodes = Some(Some(max));
        self
    }

    /// Build the configuration. Unset fields use their defaults.
    pub fn build(self) -> HydrationConfig {
        let defaults = HydrationConfig::default();
        HydrationConfig {
            strict_types: self.strict_types.unwrap_or(defaults.strict_types),
            remember_loaded: self.remember_loaded.unwrap_or(defaults.remember_loaded),
            max_nodes: self.max_nodes.unwrap_or(defaults.max_nodes),
        }
    }
}

impl HydrationConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for HydrationConfig.
    pub fn builder() -> HydrationConfigBuilder {
        HydrationConfigBuilder::default()
    }

    /// Fail on unresolvable nodes and rejected values.
    pub fn with_strict_types(mut self) -> Self {
        self.strict_types = true;
        self
    }

    /// Do not remember hydrated objects; they start out dirty.
    pub fn without_remembering(mut self) -> Self {
        self.remember_loaded = false;
        self
    }

    /// Set the maximum number of nodes per result.
    pub fn with_max_nodes(mut self, max: usize) -> Self {
        self.max_nodes = Some(max);
        self
    }
}

/// Configuration for compiling write statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Prefix of variables that denote persisted nodes, followed by the
    /// node id (default: `$`).
    pub existing_sigil: char,

    /// Prefix of variables that denote nodes created by the statement,
    /// followed by a counter (default: `_`).
    pub new_sigil: char,

    /// Append `RETURN id(v) AS v` for every created node (default: true).
    pub include_return: bool,

    /// Reject labels, relationship types and property keys that are not
    /// plain identifiers instead of quoting them (default: false).
    pub validate_identifiers: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            existing_sigil: DEFAULT_EXISTING_SIGIL,
            new_sigil: DEFAULT_NEW_SIGIL,
            include_return: true,
            validate_identifiers: false,
        }
    }
}

/// Builder for [`CompilerConfig`].
///
/// # Examples
///
/// ```
/// # use graphbind_neo4j::CompilerConfig;
/// let config = CompilerConfig::builder()
///     .include_return(false)
///     .validate_identifiers(true)
///     .build();
/// assert_eq!(config.existing_sigil, '$');
/// assert!(!config.include_return);
/// ```
#[derive(Debug, Default)]
pub struct CompilerConfigBuilder {
    existing_sigil: Option<char>,
    new_sigil: Option<char>,
    include_return: Option<bool>,
    validate_identifiers: Option<bool>,
}

impl CompilerConfigBuilder {
    /// Create a new builder with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prefix of existing-node variables.
    pub fn existing_sigil(mut self, sigil: char) -> Self {
        self.existing_sigil = Some(sigil);
        self
    }

    /// Set the prefix of new-node variables.
    pub fn new_sigil(mut self, sigil: char) -> Self {
        self.new_sigil = Some(sigil);
        self
    }

    /// Set whether created node ids are returned.
    pub fn include_return(mut self, include: bool) -> Self {
        self.include_return = Some(include);
        self
    }

    /// Set whether non-identifier names are rejected.
    pub fn validate_identifiers(mut self, validate: bool) -> Self {
        self.validate_identifiers = Some(validate);
        self
    }

    /// Build the configuration. Unset fields use their defaults.
    pub fn build(self) -> CompilerConfig {
        let defaults = CompilerConfig::default();
        CompilerConfig {
            existing_sigil: self.existing_sigil.unwrap_or(defaults.existing_sigil),
            new_sigil: self.new_sigil.unwrap_or(defaults.new_sigil),
            include_return: self.include_return.unwrap_or(defaults.include_return),
            validate_identifiers: self
                .validate_identifiers
                .unwrap_or(defaults.validate_identifiers),
        }
    }
}

impl CompilerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for CompilerConfig.
    pub fn builder() -> CompilerConfigBuilder {
        CompilerConfigBuilder::default()
    }

    /// Omit the trailing `RETURN` clause.
    pub fn without_return(mut self) -> Self {
        self.include_return = false;
        self
    }

    /// Reject non-identifier names.
    pub fn with_identifier_validation(mut self) -> Self {
        self.validate_identifiers = true;
        self
    }

    /// Set both variable prefixes.
    pub fn with_sigils(mut self, existing: char, new: char) -> Self {
        self.existing_sigil = existing;
        self.new_sigil = new;
        self
    }
}
