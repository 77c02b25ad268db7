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

//! Statement fragments with bound-variable tracking.
//!
//! A statement is compiled by appending fragments in order. Each fragment
//! sees the set of variables bound by earlier fragments, so a node matched
//! or created once is never declared again.
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `$12` | persisted node with internal id 12, matched on first use |
//! | `_0` | node created earlier in the same statement |
//!
//! ```
//! use graphbind_neo4j::cypher::{NewRelationshipBuilder, StatementCompiler};
//!
//! let mut compiler = StatementCompiler::default();
//! compiler.emit(&NewRelationshipBuilder::new("LIKES", "$12", "$45")).unwrap();
//! assert_eq!(
//!     compiler.query(),
//!     " MATCH ($12) WHERE id($12)=12 MATCH ($45) WHERE id($45)=45 MERGE ($12)-[:LIKES]->($45)"
//! );
//! ```

use crate::config::{CompilerConfig, DEFAULT_EXISTING_SIGIL};
use crate::cypher::escape::{escape_label, escape_relationship_type, validate_identifier};
use crate::cypher::statements::{CypherStatement, CypherValue};
use crate::error::{MappingError, Result};
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

/// Parameters of the statement being compiled.
pub type Parameters = BTreeMap<String, CypherValue>;

/// A fragment that appends itself to a statement.
pub trait CypherEmitter {
    /// Append to `query`, adding any parameters and every variable this
    /// fragment declares to `bound`. Returns whether anything was emitted.
    fn emit(
        &self,
        query: &mut String,
        parameters: &mut Parameters,
        bound: &mut BTreeSet<String>,
    ) -> Result<bool>;
}

fn carry_forward(query: &mut String, bound: &BTreeSet<String>) {
    if !bound.is_empty() {
        query.push_str(" WITH ");
        query.push_str(&bound.iter().map(String::as_str).collect::<Vec<_>>().join(","));
    }
}

fn existing_id(var: &str, sigil: char) -> Result<&str> {
    var.strip_prefix(sigil)
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| MappingError::UnknownVariable(var.to_string()))
}

fn match_existing(
    query: &mut String,
    var: &str,
    sigil: char,
    bound: &mut BTreeSet<String>,
) -> Result<()> {
    if bound.contains(var) {
        return Ok(());
    }
    let id = existing_id(var, sigil)?;
    query.push_str(&format!(" MATCH ({var}) WHERE id({var})={id}"));
    bound.insert(var.to_string());
    Ok(())
}

fn checked_name(name: &str, validate: bool) -> Result<()> {
    if validate {
        validate_identifier(name)?;
    }
    Ok(())
}

fn props_param(var: &str) -> String {
    format!("{}_props", var)
}

fn property_map(properties: &BTreeMap<String, CypherValue>) -> CypherValue {
    CypherValue::Map(properties.clone())
}

/// Merges a relationship between two nodes, matching unbound endpoints by
/// internal id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelationshipBuilder {
    rel_type: String,
    src: String,
    tgt: String,
    existing_sigil: char,
    validate: bool,
}

impl NewRelationshipBuilder {
    /// Relationship `rel_type` from variable `src` to variable `tgt`.
    pub fn new(rel_type: impl Into<String>, src: impl Into<String>, tgt: impl Into<String>) -> Self {
        Self {
            rel_type: rel_type.into(),
            src: src.into(),
            tgt: tgt.into(),
            existing_sigil: DEFAULT_EXISTING_SIGIL,
            validate: false,
        }
    }

    /// Use the sigils and validation policy of `config`.
    pub fn with_config(mut self, config: &CompilerConfig) -> Self {
        self.existing_sigil = config.existing_sigil;
        self.validate = config.validate_identifiers;
        self
    }

    /// The relationship type.
    pub fn rel_type(&self) -> &str {
        &self.rel_type
    }
}

impl CypherEmitter for NewRelationshipBuilder {
    fn emit(
        &self,
        query: &mut String,
        _parameters: &mut Parameters,
        bound: &mut BTreeSet<String>,
    ) -> Result<bool> {
        checked_name(&self.rel_type, self.validate)?;
        for endpoint in [&self.src, &self.tgt] {
            if !bound.contains(endpoint) {
                existing_id(endpoint, self.existing_sigil)?;
            }
        }
        carry_forward(query, bound);
        match_existing(query, &self.src, self.existing_sigil, bound)?;
        match_existing(query, &self.tgt, self.existing_sigil, bound)?;
        query.push_str(&format!(
            " MERGE ({})-[{}]->({})",
            self.src,
            escape_relationship_type(&self.rel_type),
            self.tgt
        ));
        Ok(true)
    }
}

/// Creates a node with labels and a property parameter map.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNodeBuilder {
    var: String,
    labels: Vec<String>,
    properties: BTreeMap<String, CypherValue>,
    validate: bool,
}

impl NewNodeBuilder {
    /// A node bound to `var`.
    pub fn new(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            labels: Vec::new(),
            properties: BTreeMap::new(),
            validate: false,
        }
    }

    /// Add labels.
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self
    }

    /// Add a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<CypherValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Replace all properties.
    pub fn with_properties(mut self, properties: BTreeMap<String, CypherValue>) -> Self {
        self.properties = properties;
        self
    }

    /// Use the validation policy of `config`.
    pub fn with_config(mut self, config: &CompilerConfig) -> Self {
        self.validate = config.validate_identifiers;
        self
    }
}

impl CypherEmitter for NewNodeBuilder {
    fn emit(
        &self,
        query: &mut String,
        parameters: &mut Parameters,
        bound: &mut BTreeSet<String>,
    ) -> Result<bool> {
        if bound.contains(&self.var) {
            return Ok(false);
        }
        for name in self.labels.iter().chain(self.properties.keys()) {
            checked_name(name, self.validate)?;
        }
        let labels: String = self.labels.iter().map(|l| escape_label(l)).collect();
        let param = props_param(&self.var);
        query.push_str(&format!(" CREATE ({}{} {{{}}})", self.var, labels, param));
        parameters.insert(param, property_map(&self.properties));
        bound.insert(self.var.clone());
        Ok(true)
    }
}

/// Updates the properties of a persisted node.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistingNodeBuilder {
    var: String,
    properties: BTreeMap<String, CypherValue>,
    existing_sigil: char,
    validate: bool,
}

impl ExistingNodeBuilder {
    /// A persisted node referenced by `var` (`$<id>`).
    pub fn new(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            properties: BTreeMap::new(),
            existing_sigil: DEFAULT_EXISTING_SIGIL,
            validate: false,
        }
    }

    /// Add a property. Null removes the property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<CypherValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Replace all properties.
    pub fn with_properties(mut self, properties: BTreeMap<String, CypherValue>) -> Self {
        self.properties = properties;
        self
    }

    /// Use the sigils and validation policy of `config`.
    pub fn with_config(mut self, config: &CompilerConfig) -> Self {
        self.existing_sigil = config.existing_sigil;
        self.validate = config.validate_identifiers;
        self
    }
}

impl CypherEmitter for ExistingNodeBuilder {
    fn emit(
        &self,
        query: &mut String,
        parameters: &mut Parameters,
        bound: &mut BTreeSet<String>,
    ) -> Result<bool> {
        for name in self.properties.keys() {
            checked_name(name, self.validate)?;
        }
        if !bound.contains(&self.var) {
            existing_id(&self.var, self.existing_sigil)?;
            carry_forward(query, bound);
            match_existing(query, &self.var, self.existing_sigil, bound)?;
        }
        let param = props_param(&self.var);
        query.push_str(&format!(" SET {}+={{{}}}", self.var, param));
        parameters.insert(param, property_map(&self.properties));
        Ok(true)
    }
}

/// Owns the text, parameters and bound variables of one statement.
#[derive(Debug, Clone, Default)]
pub struct StatementCompiler {
    config: CompilerConfig,
    query: String,
    parameters: Parameters,
    bound: BTreeSet<String>,
    next_new: usize,
}

impl StatementCompiler {
    /// Create a compiler with the given configuration.
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// A fresh variable for a node created by this statement.
    pub fn new_node_var(&mut self) -> String {
        let var = format!("{}{}", self.config.new_sigil, self.next_new);
        self.next_new += 1;
        var
    }

    /// The variable naming persisted node `id`.
    pub fn existing_node_var(&self, id: i64) -> String {
        format!("{}{}", self.config.existing_sigil, id)
    }

    /// Append a fragment.
    pub fn emit(&mut self, emitter: &dyn CypherEmitter) -> Result<bool> {
        let emitted = emitter.emit(&mut self.query, &mut self.parameters, &mut self.bound)?;
        trace!(emitted, bound = self.bound.len(), "emitted statement fragment");
        Ok(emitted)
    }

    /// Append `RETURN id(v) AS v, ...` for the given variables.
    pub fn return_ids<S: AsRef<str>>(&mut self, vars: &[S]) -> Result<()> {
        if vars.is_empty() {
            return Ok(());
        }
        let mut items = Vec::with_capacity(vars.len());
        for var in vars {
            let var = var.as_ref();
            if !self.bound.contains(var) {
                return Err(MappingError::UnknownVariable(var.to_string()));
            }
            items.push(format!("id({var}) AS {var}"));
        }
        self.query.push_str(" RETURN ");
        self.query.push_str(&items.join(", "));
        Ok(())
    }

    /// The query text compiled so far.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The parameters collected so far.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Variables bound so far.
    pub fn bound(&self) -> &BTreeSet<String> {
        &self.bound
    }

    /// True if `var` is bound.
    pub fn is_bound(&self, var: &str) -> bool {
        self.bound.contains(var)
    }

    /// Finish the statement.
    pub fn finish(self) -> CypherStatement {
        CypherStatement {
            query: self.query.trim_start().to_string(),
            parameters: self.parameters,
        }
    }
}
