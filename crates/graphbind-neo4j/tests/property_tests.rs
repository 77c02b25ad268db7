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

//! Property-based tests for change tracking and statement compilation.

use graphbind_core::EntityRef;
use graphbind_neo4j::cypher::{NewRelationshipBuilder, SaveCompiler, StatementCompiler};
use graphbind_neo4j::memo::{content_hash, string_hash, EMPTY_HASH};
use graphbind_neo4j::MappingContext;
use graphbind_test::fixtures::education::{self, Course, Student, Teacher};
use graphbind_test::fixtures;
use proptest::prelude::*;
use std::sync::Arc;

fn context() -> Arc<MappingContext> {
    Arc::new(MappingContext::new(fixtures::metadata(&[education::NAMESPACE])))
}

fn student(name: Option<String>) -> EntityRef {
    EntityRef::new(Student { id: None, name })
}

proptest! {
    // ========================================================================
    // Change tracking
    // ========================================================================

    #[test]
    fn prop_remembered_object_is_clean(name in proptest::option::of("[a-zA-Z ]{0,20}")) {
        let context = context();
        let entity = student(name);
        prop_assert!(context.is_dirty(&entity).unwrap());
        context.remember(&entity).unwrap();
        prop_assert!(!context.is_dirty(&entity).unwrap());
    }

    #[test]
    fn prop_setting_property_makes_object_dirty(name in "[a-zA-Z]{1,20}") {
        let context = context();
        let entity = student(None);
        context.remember(&entity).unwrap();
        entity.write(|s: &mut Student| s.name = Some(name));
        prop_assert!(context.is_dirty(&entity).unwrap());
    }

    #[test]
    fn prop_identity_does_not_affect_hash(id in any::<i64>()) {
        let metadata = fixtures::metadata(&[education::NAMESPACE]);
        let class = metadata.class_info(education::names::STUDENT).unwrap();
        let entity = EntityRef::new(Student { id: Some(id), name: None });
        prop_assert_eq!(content_hash(&class, &entity).unwrap(), EMPTY_HASH);
    }

    #[test]
    fn prop_string_hash_is_polynomial(prefix in "[a-z]{0,10}", c in proptest::char::range('a', 'z')) {
        let extended = format!("{prefix}{c}");
        prop_assert_eq!(
            string_hash(&extended),
            string_hash(&prefix).wrapping_mul(31).wrapping_add(c as i64)
        );
    }

    // ========================================================================
    // Identity map
    // ========================================================================

    #[test]
    fn prop_register_keeps_first_object(id in any::<i64>()) {
        let context = context();
        let first = context.register(student(None), id);
        let second = context.register(student(None), id);
        prop_assert!(first.ptr_eq(&second));
        prop_assert_eq!(context.len(), 1);
        prop_assert_eq!(context.id_of(&first), Some(id));
    }

    // ========================================================================
    // Statement compilation
    // ========================================================================

    #[test]
    fn prop_relationship_between_existing_nodes(
        start in 0_i64..1_000_000,
        end in 0_i64..1_000_000,
        rel_type in "[A-Z][A-Z_]{0,12}",
    ) {
        prop_assume!(start != end);
        let mut compiler = StatementCompiler::default();
        let builder = NewRelationshipBuilder::new(
            rel_type.clone(),
            compiler.existing_node_var(start),
            compiler.existing_node_var(end),
        );
        prop_assert!(compiler.emit(&builder).unwrap());
        prop_assert_eq!(
            compiler.finish().query,
            format!(
                "MATCH (${start}) WHERE id(${start})={start} MATCH (${end}) WHERE id(${end})={end} \
                 MERGE (${start})-[:{rel_type}]->(${end})"
            )
        );
    }

    #[test]
    fn prop_new_nodes_are_numbered_and_returned(courses in 0_usize..6) {
        let teacher = EntityRef::new(Teacher {
            id: None,
            name: Some("T".to_string()),
            courses: (0..courses)
                .map(|i| EntityRef::new(Course { id: None, name: Some(format!("C{i}")), students: Vec::new() }))
                .collect(),
        });
        let compiled = SaveCompiler::new(context()).compile(&teacher).unwrap();

        let vars: Vec<String> = (0..=courses).map(|i| format!("_{i}")).collect();
        let returned: Vec<String> = vars.iter().map(|v| format!("id({v}) AS {v}")).collect();
        prop_assert_eq!(compiled.new_nodes.len(), courses + 1);
        prop_assert_eq!(compiled.new_relationships.len(), courses);
        prop_assert_eq!(
            compiled.new_nodes.iter().map(|n| n.var.clone()).collect::<Vec<_>>(),
            vars
        );
        let expected_return = format!("RETURN {}", returned.join(", "));
        prop_assert!(compiled.statement.query.ends_with(&expected_return));
    }

    #[test]
    fn prop_compilation_is_deterministic(courses in 0_usize..6) {
        let context = context();
        let teacher = EntityRef::new(Teacher {
            id: None,
            name: None,
            courses: (0..courses).map(|_| EntityRef::new(Course::default())).collect(),
        });
        let compiler = SaveCompiler::new(context);
        let first = compiler.compile(&teacher).unwrap();
        let second = compiler.compile(&teacher).unwrap();
        prop_assert_eq!(first.statement, second.statement);
    }
}
