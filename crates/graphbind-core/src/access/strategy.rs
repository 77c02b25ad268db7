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

//! Ordered rule chains selecting how to read or write a member.
//!
//! Each chain is a list of rules tried in order. A rule yields the set of
//! candidates it matches: exactly one candidate wins the chain, none passes
//! to the next rule, and more than one stops the chain with no result.
//!
//! | Purpose | Rules, in order |
//! |---------|-----------------|
//! | property `P` | annotated method, annotated field, `set_p`/`get_p`, field `p` |
//! | relationship write `R` | annotated setter, annotated field, `set_r`, field `r`, unique compatible setter, unique compatible field |
//! | relationship read `R` | annotated getter, annotated field, `get_r`, field `r` |
//! | identity | the identity field, always |

use crate::access::accessor::{Member, ObjectAccess, PropertyReader, RelationalReader};
use crate::entity::EntityRef;
use crate::metadata::{is_primitive, naming, primitive, ClassInfo, MetaData, TypeRef};
use crate::value::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::trace;

/// Result of a relationship write lookup.
#[derive(Debug, Clone)]
pub enum Resolution<T> {
    /// A unique accessor accepts the value.
    Found(T),
    /// No rule applies, or the best rule is ambiguous.
    NotFound,
    /// Members named for the relationship exist but none accepts the value.
    Incompatible,
}

impl<T> Resolution<T> {
    /// The accessor, if found.
    pub fn found(self) -> Option<T> {
        match self {
            Resolution::Found(t) => Some(t),
            _ => None,
        }
    }

    /// True for [`Resolution::Found`].
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    /// True for [`Resolution::Incompatible`].
    pub fn is_incompatible(&self) -> bool {
        matches!(self, Resolution::Incompatible)
    }
}

enum Outcome {
    Found(Member),
    NotFound,
    Ambiguous,
}

fn pick(purpose: &str, rule: &str, mut candidates: Vec<Member>) -> Outcome {
    match candidates.len() {
        0 => Outcome::NotFound,
        1 => candidates.pop().map_or(Outcome::NotFound, Outcome::Found),
        n => {
            trace!(purpose, rule, candidates = n, "ambiguous accessor candidates");
            Outcome::Ambiguous
        }
    }
}

type Rule<'a> = (&'static str, Box<dyn Fn() -> Vec<Member> + 'a>);

fn rule<'a>(name: &'static str, candidates: impl Fn() -> Vec<Member> + 'a) -> Rule<'a> {
    (name, Box::new(candidates))
}

fn run_chain(purpose: &str, rules: Vec<Rule<'_>>) -> Option<Member> {
    for (name, rule) in rules {
        match pick(purpose, name, rule()) {
            Outcome::Found(member) => return Some(member),
            Outcome::Ambiguous => return None,
            Outcome::NotFound => {}
        }
    }
    trace!(purpose, "no accessor found");
    None
}

/// The runtime shape of a value offered to a relationship writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueShape {
    /// A single value of the named class, or null.
    Scalar(Option<String>),
    /// A collection whose elements have the named classes.
    Iterable(Vec<String>),
}

fn integral(name: &str) -> bool {
    [primitive::LONG, primitive::INTEGER, primitive::SHORT, primitive::BYTE].contains(&name)
}

fn floating(name: &str) -> bool {
    [primitive::DOUBLE, primitive::FLOAT].contains(&name)
}

/// Resolves accessors for properties, relationships and identity.
#[derive(Debug, Clone)]
pub struct DefaultAccessStrategy {
    metadata: Arc<MetaData>,
}

impl DefaultAccessStrategy {
    /// Create a strategy over the given metadata.
    pub fn new(metadata: Arc<MetaData>) -> Self {
        Self { metadata }
    }

    /// The metadata this strategy consults.
    pub fn metadata(&self) -> &Arc<MetaData> {
        &self.metadata
    }

    fn class_name_of(&self, entity: &EntityRef) -> String {
        self.metadata
            .class_info_for(entity)
            .map(|info| info.name().to_string())
            .unwrap_or_else(|| entity.type_name().to_string())
    }

    fn element_class(&self, value: &Value) -> Option<String> {
        let name = match value {
            Value::Null | Value::List(_) => return None,
            Value::Bool(_) => primitive::BOOLEAN,
            Value::Int(_) => primitive::LONG,
            Value::Float(_) => primitive::DOUBLE,
            Value::String(_) => primitive::STRING,
            Value::Entity(e) => return Some(self.class_name_of(e)),
        };
        Some(name.to_string())
    }

    /// Classify a value for relationship write compatibility.
    pub fn shape_of(&self, value: &Value) -> ValueShape {
        match value {
            Value::List(items) => ValueShape::Iterable(
                items.iter().filter_map(|v| self.element_class(v)).collect(),
            ),
            other => ValueShape::Scalar(self.element_class(other)),
        }
    }

    fn accepts(&self, target: &str, class: &str) -> bool {
        if is_primitive(target) && is_primitive(class) {
            return target == class
                || (integral(target) && integral(class))
                || (floating(target) && (floating(class) || integral(class)));
        }
        self.metadata.is_assignable(target, class)
    }

    fn compatible(&self, declared: &TypeRef, shape: &ValueShape) -> bool {
        match shape {
            ValueShape::Scalar(None) => declared.is_scalar(),
            ValueShape::Scalar(Some(class)) => {
                declared.is_scalar() && self.accepts(declared.element(), class)
            }
            ValueShape::Iterable(classes) => {
                !declared.is_scalar()
                    && classes.iter().all(|c| self.accepts(declared.element(), c))
            }
        }
    }

    fn member_type(member: &Member) -> &TypeRef {
        match member {
            Member::Field(f) => f.declared_type(),
            Member::Method(m) => m.declared_type(),
        }
    }

    fn setters_named(class: &ClassInfo, name: &str) -> Vec<Member> {
        let identity = class.identity_setter().map(|m| m.name());
        class
            .methods()
            .iter()
            .filter(|m| m.is_setter() && m.name() == name && Some(m.name()) != identity)
            .cloned()
            .map(Member::Method)
            .collect()
    }

    fn getters_named(class: &ClassInfo, name: &str) -> Vec<Member> {
        let identity = class.identity_getter().map(|m| m.name());
        class
            .methods()
            .iter()
            .filter(|m| m.is_getter() && m.name() == name && Some(m.name()) != identity)
            .cloned()
            .map(Member::Method)
            .collect()
    }

    fn fields_named(class: &ClassInfo, name: &str) -> Vec<Member> {
        let identity = class.identity_field().map(|f| f.name());
        class
            .fields()
            .iter()
            .filter(|f| f.name() == name && Some(f.name()) != identity)
            .cloned()
            .map(Member::Field)
            .collect()
    }

    fn property_chain(&self, class: &ClassInfo, property: &str, write: bool) -> Option<Member> {
        let rules: Vec<Rule<'_>> = vec![
            rule(
                "annotated method",
                move || {
                    let methods = if write {
                        class.property_setters()
                    } else {
                        class.property_getters()
                    };
                    methods
                        .into_iter()
                        .filter(|m| m.declared_property() == Some(property))
                        .cloned()
                        .map(Member::Method)
                        .collect()
                },
            ),
            rule(
                "annotated field",
                move || {
                    class
                        .property_fields()
                        .into_iter()
                        .filter(|f| f.declared_property() == Some(property))
                        .cloned()
                        .map(Member::Field)
                        .collect()
                },
            ),
            rule(
                "conventional method",
                move || {
                    if write {
                        Self::setters_named(class, &naming::setter_name(property))
                    } else {
                        Self::getters_named(class, &naming::getter_name(property))
                    }
                },
            ),
            rule(
                "conventional field",
                move || Self::fields_named(class, &naming::field_name(property)),
            ),
        ];
        run_chain(if write { "property write" } else { "property read" }, rules)
    }

    /// Accessor for writing node property `property`.
    pub fn property_writer(&self, class: &ClassInfo, property: &str) -> Option<ObjectAccess> {
        self.property_chain(class, property, true)
            .map(ObjectAccess::new)
    }

    /// Accessor for reading node property `property`.
    pub fn property_reader(&self, class: &ClassInfo, property: &str) -> Option<PropertyReader> {
        self.property_chain(class, property, false)
            .map(|member| PropertyReader::new(member, property.to_string()))
    }

    fn relational_write_chain(
        &self,
        class: &ClassInfo,
        rel_type: Option<&str>,
        shape: &ValueShape,
    ) -> Resolution<ObjectAccess> {
        let mut incompatible = false;

        if let Some(rel) = rel_type {
            let named: [(&str, Vec<Member>); 4] = [
                (
                    "annotated setter",
                    class
                        .relationship_setters()
                        .into_iter()
                        .filter(|m| m.declared_relationship() == Some(rel))
                        .cloned()
                        .map(Member::Method)
                        .collect(),
                ),
                (
                    "annotated field",
                    class
                        .relationship_fields()
                        .into_iter()
                        .filter(|f| f.declared_relationship() == Some(rel))
                        .cloned()
                        .map(Member::Field)
                        .collect(),
                ),
                (
                    "conventional setter",
                    Self::setters_named(class, &naming::setter_name(rel)),
                ),
                (
                    "conventional field",
                    Self::fields_named(class, &naming::field_name(rel)),
                ),
            ];

            for (rule, candidates) in named {
                let before = candidates.len();
                let accepted: Vec<Member> = candidates
                    .into_iter()
                    .filter(|m| self.compatible(Self::member_type(m), shape))
                    .collect();
                if accepted.len() < before {
                    trace!(rule, relationship = rel, "skipping type-incompatible candidates");
                    incompatible = true;
                }
                match pick("relationship write", rule, accepted) {
                    Outcome::Found(member) => return Resolution::Found(ObjectAccess::new(member)),
                    Outcome::Ambiguous => return Resolution::NotFound,
                    Outcome::NotFound => {}
                }
            }
        }

        let identity_setter = class.identity_setter().map(|m| m.name());
        let identity_field = class.identity_field().map(|f| f.name());
        let typed: [(&str, Vec<Member>); 2] = [
            (
                "type-matched setter",
                class
                    .methods()
                    .iter()
                    .filter(|m| m.is_setter() && Some(m.name()) != identity_setter)
                    .filter(|m| self.compatible(m.declared_type(), shape))
                    .cloned()
                    .map(Member::Method)
                    .collect(),
            ),
            (
                "type-matched field",
                class
                    .fields()
                    .iter()
                    .filter(|f| Some(f.name()) != identity_field)
                    .filter(|f| self.compatible(f.declared_type(), shape))
                    .cloned()
                    .map(Member::Field)
                    .collect(),
            ),
        ];

        for (rule, candidates) in typed {
            match pick("relationship write", rule, candidates) {
                Outcome::Found(member) => return Resolution::Found(ObjectAccess::new(member)),
                Outcome::Ambiguous => return Resolution::NotFound,
                Outcome::NotFound => {}
            }
        }

        if incompatible {
            Resolution::Incompatible
        } else {
            trace!(class = class.name(), relationship = ?rel_type, "no relationship writer");
            Resolution::NotFound
        }
    }

    /// Accessor for storing `value` as the end of relationship `rel_type`.
    ///
    /// Candidates named for the relationship that cannot accept the value
    /// are skipped; if nothing else matches, the result is
    /// [`Resolution::Incompatible`] so the caller can retry with an
    /// iterable write.
    pub fn relational_writer(
        &self,
        class: &ClassInfo,
        rel_type: &str,
        value: &Value,
    ) -> Resolution<ObjectAccess> {
        let shape = self.shape_of(value);
        self.relational_write_chain(class, Some(rel_type), &shape)
    }

    /// Accessor for storing a collection of `element_class` instances,
    /// optionally under relationship `rel_type`.
    pub fn iterable_writer(
        &self,
        class: &ClassInfo,
        rel_type: Option<&str>,
        element_class: &str,
    ) -> Option<ObjectAccess> {
        let shape = ValueShape::Iterable(vec![element_class.to_string()]);
        self.relational_write_chain(class, rel_type, &shape).found()
    }

    /// Accessor for reading the end(s) of relationship `rel_type`.
    pub fn relational_reader(&self, class: &ClassInfo, rel_type: &str) -> Option<RelationalReader> {
        let rules: Vec<Rule<'_>> = vec![
            rule(
                "annotated getter",
                move || {
                    class
                        .relationship_getters()
                        .into_iter()
                        .filter(|m| m.declared_relationship() == Some(rel_type))
                        .cloned()
                        .map(Member::Method)
                        .collect()
                },
            ),
            rule(
                "annotated field",
                move || {
                    class
                        .relationship_fields()
                        .into_iter()
                        .filter(|f| f.declared_relationship() == Some(rel_type))
                        .cloned()
                        .map(Member::Field)
                        .collect()
                },
            ),
            rule(
                "conventional getter",
                move || Self::getters_named(class, &naming::getter_name(rel_type)),
            ),
            rule(
                "conventional field",
                move || Self::fields_named(class, &naming::field_name(rel_type)),
            ),
        ];

        run_chain("relationship read", rules).map(|member| {
            let resolved = match &member {
                Member::Field(f) => f.relationship_type(),
                Member::Method(m) => m.relationship_type(),
            };
            RelationalReader::new(member, resolved.unwrap_or_else(|| rel_type.to_string()))
        })
    }

    /// One reader per relationship type of the class.
    ///
    /// Annotated relationship getters come first; each remaining
    /// relationship field contributes the best reader for its type, unless
    /// an annotated getter already covers that field.
    pub fn relational_readers(&self, class: &ClassInfo) -> Vec<RelationalReader> {
        let mut readers = Vec::new();
        let mut types = HashSet::new();
        let mut covered = HashSet::new();

        for getter in class.relationship_getters() {
            if getter.declared_relationship().is_none() {
                continue;
            }
            let Some(rel) = getter.relationship_type() else {
                continue;
            };
            covered.insert(naming::base_name(getter.name()).to_string());
            if types.insert(rel.clone()) {
                readers.push(RelationalReader::new(Member::Method(getter.clone()), rel));
            }
        }

        for field in class.relationship_fields() {
            if covered.contains(field.name()) {
                continue;
            }
            let Some(rel) = field.relationship_type() else {
                continue;
            };
            if types.contains(&rel) {
                continue;
            }
            if let Some(reader) = self.relational_reader(class, &rel) {
                if types.insert(reader.relationship_type().to_string()) {
                    readers.push(reader);
                }
            }
        }

        readers
    }

    /// Reader for the identity field. Never goes through a method.
    pub fn identity_reader(&self, class: &ClassInfo) -> Option<PropertyReader> {
        class.identity_field().map(|field| {
            PropertyReader::new(Member::Field(field.clone()), field.name().to_string())
        })
    }

    /// Writer for the identity field. Never goes through a method.
    pub fn identity_writer(&self, class: &ClassInfo) -> Option<ObjectAccess> {
        class
            .identity_field()
            .map(|field| ObjectAccess::new(Member::Field(field.clone())))
    }
}
