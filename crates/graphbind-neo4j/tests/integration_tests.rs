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

//! End-to-end hydration and save compilation over the fixture domains.

use graphbind_core::EntityRef;
use graphbind_neo4j::cypher::SaveCompiler;
use graphbind_neo4j::{
    CypherValue, GraphMapper, GraphModel, HydrationConfig, MappedRelationship, MappingContext,
    MappingError, NodeModel, RelationshipModel,
};
use graphbind_test::fixtures::education::{self, Course, Student, Teacher};
use graphbind_test::fixtures::forum::{self, Comment, GoldMembership, Member, Post, Topic};
use graphbind_test::fixtures::satellites::{self, Location, Program, Satellite};
use graphbind_test::fixtures;
use std::collections::BTreeMap;
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn context(namespace: &str) -> Arc<MappingContext> {
    init_tracing();
    Arc::new(MappingContext::new(fixtures::metadata(&[namespace])))
}

fn node(id: i64, label: &str) -> NodeModel {
    NodeModel::new(id).with_labels([label])
}

fn school() -> GraphModel {
    GraphModel::new()
        .with_node(node(1, "Teacher").with_property("name", "Mrs Kapoor"))
        .with_node(node(2, "Course").with_property("name", "Maths"))
        .with_node(node(3, "Course").with_property("name", "Physics"))
        .with_node(node(4, "Student").with_property("name", "Sheila"))
        .with_node(node(5, "Student").with_property("name", "Gary"))
        .with_relationship(RelationshipModel::new(10, "COURSES", 1, 2))
        .with_relationship(RelationshipModel::new(11, "COURSES", 1, 3))
        .with_relationship(RelationshipModel::new(12, "STUDENTS", 2, 4))
        .with_relationship(RelationshipModel::new(13, "STUDENTS", 2, 5))
        .with_relationship(RelationshipModel::new(14, "STUDENTS", 3, 4))
}

fn ids_of(entities: &[EntityRef], context: &MappingContext) -> Vec<i64> {
    let mut ids: Vec<i64> = entities.iter().filter_map(|e| context.id_of(e)).collect();
    ids.sort_unstable();
    ids
}

// ============================================================================
// Hydration
// ============================================================================

#[test]
fn test_hydrate_one_to_many_collections() {
    let context = context(education::NAMESPACE);
    let hydrated = GraphMapper::new(context.clone()).map(&school()).unwrap();

    assert_eq!(hydrated.objects.len(), 5);
    assert!(hydrated.report.is_complete());
    assert_eq!(hydrated.report.relationships_mapped, 5);
    assert_eq!(hydrated.report.relationships_deferred, 5);

    let teacher = context.get(1).unwrap();
    let courses = teacher.read(|t: &Teacher| t.courses.clone()).unwrap();
    assert_eq!(ids_of(&courses, &context), vec![2, 3]);
    assert_eq!(teacher.read(|t: &Teacher| t.id), Some(Some(1)));

    let maths = context.get(2).unwrap();
    let students = maths.read(|c: &Course| c.students.clone()).unwrap();
    assert_eq!(ids_of(&students, &context), vec![4, 5]);

    let physics = context.get(3).unwrap();
    let students = physics.read(|c: &Course| c.students.clone()).unwrap();
    assert_eq!(ids_of(&students, &context), vec![4]);
    assert_eq!(
        students[0].read(|s: &Student| s.name.clone()).flatten().as_deref(),
        Some("Sheila")
    );
}

#[test]
fn test_hydrated_objects_by_type() {
    let context = context(education::NAMESPACE);
    let hydrated = GraphMapper::new(context.clone()).map(&school()).unwrap();
    assert_eq!(hydrated.of_type::<Student>().count(), 2);
    assert_eq!(hydrated.of_type::<Course>().count(), 2);
    assert_eq!(context.get_all_of::<Teacher>().len(), 1);
}

#[test]
fn test_scalar_relationship_uses_setter() {
    let context = context(satellites::NAMESPACE);
    let model = GraphModel::new()
        .with_node(node(1, "Satellite").with_property("name", "Vostok"))
        .with_node(node(2, "Location").with_property("name", "LEO"))
        .with_relationship(RelationshipModel::new(7, "LOCATION", 1, 2));
    GraphMapper::new(context.clone()).map(&model).unwrap();

    let satellite = context.get(1).unwrap();
    assert_eq!(satellite.read(|s: &Satellite| s.location_setter_calls), Some(1));
    let location = satellite.read(|s: &Satellite| s.location.clone()).flatten().unwrap();
    assert_eq!(location, context.get(2).unwrap());
    assert_eq!(
        location.read(|l: &Location| l.name.clone()).flatten().as_deref(),
        Some("LEO")
    );
    assert!(context.is_registered_relationship(&MappedRelationship::new(1, "LOCATION", 2)));
}

#[test]
fn test_program_satellites_are_bound_as_collection() {
    let context = context(satellites::NAMESPACE);
    let model = GraphModel::new()
        .with_node(node(1, "Program").with_property("name", "Sputnik"))
        .with_node(node(2, "Satellite").with_property("manned", false))
        .with_node(node(3, "Satellite").with_property("manned", false))
        .with_relationship(RelationshipModel::new(20, "SATELLITES", 1, 2))
        .with_relationship(RelationshipModel::new(21, "SATELLITES", 1, 3));
    let hydrated = GraphMapper::new(context.clone()).map(&model).unwrap();
    assert_eq!(hydrated.report.relationships_deferred, 2);

    let program = context.get(1).unwrap();
    let satellites = program.read(|p: &Program| p.satellites.clone()).unwrap();
    assert_eq!(ids_of(&satellites, &context), vec![2, 3]);
}

#[test]
fn test_later_results_extend_collections() {
    let context = context(satellites::NAMESPACE);
    let mut mapper = GraphMapper::new(context.clone());

    let first = GraphModel::new()
        .with_node(node(1, "Program"))
        .with_node(node(2, "Satellite"))
        .with_relationship(RelationshipModel::new(20, "SATELLITES", 1, 2));
    let second = GraphModel::new()
        .with_node(node(1, "Program"))
        .with_node(node(3, "Satellite"))
        .with_relationship(RelationshipModel::new(21, "SATELLITES", 1, 3));
    mapper.map(&first).unwrap();
    mapper.map(&second).unwrap();

    let program = context.get(1).unwrap();
    let satellites = program.read(|p: &Program| p.satellites.clone()).unwrap();
    assert_eq!(ids_of(&satellites, &context), vec![2, 3]);
}

#[test]
fn test_abstract_collection_collects_every_concrete_child() {
    let context = context(forum::NAMESPACE);
    let model = GraphModel::new()
        .with_node(NodeModel::new(1).with_labels(["User", "Login"]))
        .with_node(node(2, "Post"))
        .with_node(node(3, "Comment"))
        .with_relationship(RelationshipModel::new(30, "HAS_ACTIVITY", 1, 2))
        .with_relationship(RelationshipModel::new(31, "HAS_ACTIVITY", 1, 3));
    let hydrated = GraphMapper::new(context.clone()).map(&model).unwrap();
    assert!(hydrated.report.is_complete());
    assert_eq!(hydrated.report.relationships_mapped, 2);

    let member = context.get(1).unwrap();
    let activities = member.read(|m: &Member| m.activity_list.clone()).unwrap();
    assert_eq!(activities.len(), 2);
    assert_eq!(ids_of(&activities, &context), vec![2, 3]);
    assert!(activities[0].read(|_: &Post| ()).is_some());
    assert!(activities[1].read(|_: &Comment| ()).is_some());
}

#[test]
fn test_later_results_keep_children_of_other_classes() {
    let context = context(forum::NAMESPACE);
    let mut mapper = GraphMapper::new(context.clone());

    let first = GraphModel::new()
        .with_node(NodeModel::new(1).with_labels(["User", "Login"]))
        .with_node(node(2, "Post"))
        .with_relationship(RelationshipModel::new(30, "HAS_ACTIVITY", 1, 2));
    let second = GraphModel::new()
        .with_node(NodeModel::new(1).with_labels(["User", "Login"]))
        .with_node(node(3, "Comment"))
        .with_relationship(RelationshipModel::new(31, "HAS_ACTIVITY", 1, 3));
    mapper.map(&first).unwrap();
    mapper.map(&second).unwrap();

    let member = context.get(1).unwrap();
    let activities = member.read(|m: &Member| m.activity_list.clone()).unwrap();
    assert_eq!(ids_of(&activities, &context), vec![2, 3]);
    assert!(context.is_registered_relationship(&MappedRelationship::new(1, "HAS_ACTIVITY", 2)));
    assert!(context.is_registered_relationship(&MappedRelationship::new(1, "HAS_ACTIVITY", 3)));
}

#[test]
fn test_rehydration_reuses_objects() {
    let context = context(education::NAMESPACE);
    let mut mapper = GraphMapper::new(context.clone());
    mapper.map(&school()).unwrap();
    let teacher = context.get(1).unwrap();

    mapper.map(&school()).unwrap();
    assert_eq!(context.len(), 5);
    assert!(teacher.ptr_eq(&context.get(1).unwrap()));
    assert_eq!(teacher.read(|t: &Teacher| t.courses.len()), Some(2));
}

#[test]
fn test_labels_resolve_through_hierarchy() {
    let context = context(forum::NAMESPACE);
    let model = GraphModel::new()
        .with_node(
            NodeModel::new(1)
                .with_labels(["User", "Login"])
                .with_property("userName", "alice"),
        )
        .with_node(
            NodeModel::new(2)
                .with_labels(["Gold", "Membership"])
                .with_property("annualFees", 150_i64),
        )
        .with_relationship(RelationshipModel::new(3, "MEMBER_SHIP", 1, 2));
    let hydrated = GraphMapper::new(context.clone()).map(&model).unwrap();
    assert!(hydrated.report.is_complete());

    let member = context.get(1).unwrap();
    assert_eq!(
        member.read(|m: &Member| m.user_name.clone()).flatten().as_deref(),
        Some("alice")
    );
    let gold = member.read(|m: &Member| m.member_ship.clone()).flatten().unwrap();
    assert_eq!(gold.read(|g: &GoldMembership| g.0.fees), Some(Some(150)));
}

#[test]
fn test_unresolvable_node_is_reported() {
    let context = context(forum::NAMESPACE);
    let model = GraphModel::new()
        .with_node(node(1, "Unicorn"))
        .with_node(node(2, "Topic"));
    let hydrated = GraphMapper::new(context).map(&model).unwrap();
    assert_eq!(hydrated.objects.len(), 1);
    assert_eq!(hydrated.report.unresolved_nodes, vec![1]);
    assert!(!hydrated.report.is_complete());
}

#[test]
fn test_unresolvable_node_fails_in_strict_mode() {
    let context = context(forum::NAMESPACE);
    let mut mapper = GraphMapper::with_config(context, HydrationConfig::new().with_strict_types());
    let err = mapper.map(&GraphModel::new().with_node(node(1, "Unicorn"))).unwrap_err();
    assert!(matches!(err, MappingError::UnresolvableNode { id: 1, .. }));
}

#[test]
fn test_abstract_labels_alone_do_not_resolve() {
    let context = context(forum::NAMESPACE);
    let model = GraphModel::new().with_node(node(1, "Membership"));
    let hydrated = GraphMapper::new(context).map(&model).unwrap();
    assert_eq!(hydrated.report.unresolved_nodes, vec![1]);
}

#[test]
fn test_node_limit() {
    let context = context(forum::NAMESPACE);
    let mut mapper = GraphMapper::with_config(context, HydrationConfig::new().with_max_nodes(1));
    let model = GraphModel::new().with_node(node(1, "Topic")).with_node(node(2, "Topic"));
    let err = mapper.map(&model).unwrap_err();
    assert!(matches!(err, MappingError::NodeCountExceeded { count: 2, max_count: 1 }));
}

#[test]
fn test_unmapped_property_is_counted() {
    let context = context(forum::NAMESPACE);
    let model = GraphModel::new().with_node(
        node(1, "Topic")
            .with_property("name", "Rust")
            .with_property("colour", "red"),
    );
    let hydrated = GraphMapper::new(context.clone()).map(&model).unwrap();
    assert_eq!(hydrated.report.unmapped_properties, 1);
    let topic = context.get(1).unwrap();
    assert_eq!(topic.read(|t: &Topic| t.name.clone()).flatten().as_deref(), Some("Rust"));
    assert_eq!(topic.read(|t: &Topic| t.topic_id), Some(Some(1)));
}

#[test]
fn test_dangling_and_unmapped_relationships_are_reported() {
    let context = context(forum::NAMESPACE);
    let model = GraphModel::new()
        .with_node(node(1, "Topic"))
        .with_node(node(2, "Post"))
        .with_relationship(RelationshipModel::new(30, "HAS_POSTS", 1, 99))
        .with_relationship(RelationshipModel::new(31, "HATES", 1, 2))
        .with_relationship(RelationshipModel::new(32, "HAS_POSTS", 1, 2));
    let hydrated = GraphMapper::new(context.clone()).map(&model).unwrap();

    assert_eq!(hydrated.report.dangling_relationships, vec![30]);
    assert_eq!(hydrated.report.unmapped_relationships, vec![31]);
    assert_eq!(hydrated.report.relationships_mapped, 1);

    let topic = context.get(1).unwrap();
    let posts = topic.read(|t: &Topic| t.posts.clone()).unwrap();
    assert_eq!(posts.len(), 1);
    assert!(posts[0].read(|_: &Post| ()).is_some());
}

#[test]
fn test_hydrate_from_json() {
    let json = r#"{
        "nodes": [
            {"id": 1, "labels": ["Topic"], "properties": {"name": "Graphs", "in_active": false}},
            {"id": 2, "labels": ["Post"], "properties": {"content": "hello"}}
        ],
        "relationships": [
            {"id": 5, "type": "HAS_POSTS", "startNode": 1, "endNode": 2}
        ]
    }"#;
    let context = context(forum::NAMESPACE);
    let model = GraphModel::from_json(json).unwrap();
    let hydrated = GraphMapper::new(context.clone()).map(&model).unwrap();
    assert!(hydrated.report.is_complete());

    let topic = context.get(1).unwrap();
    assert_eq!(topic.read(|t: &Topic| t.in_active), Some(Some(false)));
    assert_eq!(topic.read(|t: &Topic| t.posts.len()), Some(1));
}

// ============================================================================
// Save compilation
// ============================================================================

#[test]
fn test_hydrated_graph_is_clean() {
    let context = context(education::NAMESPACE);
    GraphMapper::new(context.clone()).map(&school()).unwrap();
    let teacher = context.get(1).unwrap();
    let compiled = SaveCompiler::new(context).compile(&teacher).unwrap();
    assert!(compiled.is_empty());
    assert_eq!(compiled.existing_nodes.len(), 5);
}

#[test]
fn test_hydration_without_remembering_leaves_objects_dirty() {
    let context = context(education::NAMESPACE);
    let config = HydrationConfig::new().without_remembering();
    GraphMapper::with_config(context.clone(), config).map(&school()).unwrap();
    assert!(context.is_dirty(&context.get(4).unwrap()).unwrap());
}

#[test]
fn test_save_new_student_in_existing_course() {
    let context = context(education::NAMESPACE);
    GraphMapper::new(context.clone()).map(&school()).unwrap();

    let maths = context.get(2).unwrap();
    let newcomer = EntityRef::new(Student {
        id: None,
        name: Some("Priya".to_string()),
    });
    maths.write(|c: &mut Course| c.students.push(newcomer.clone()));

    let compiled = SaveCompiler::new(context.clone()).compile(&maths).unwrap();
    assert_eq!(
        compiled.statement.query,
        "CREATE (_0:Student:DomainObject {_0_props}) WITH _0 MATCH ($2) WHERE id($2)=2 \
         MERGE ($2)-[:STUDENTS]->(_0) RETURN id(_0) AS _0"
    );
    assert_eq!(compiled.new_nodes.len(), 1);
    assert_eq!(compiled.new_relationships.len(), 1);

    let ids = BTreeMap::from([("_0".to_string(), 6)]);
    compiled.apply_generated_ids(&context, &ids).unwrap();
    assert_eq!(newcomer.read(|s: &Student| s.id), Some(Some(6)));
    assert!(context.get(6).unwrap().ptr_eq(&newcomer));
    assert!(context.is_registered_relationship(&MappedRelationship::new(2, "STUDENTS", 6)));
    assert!(SaveCompiler::new(context).compile(&maths).unwrap().is_empty());
}

#[test]
fn test_save_changed_property() {
    let context = context(education::NAMESPACE);
    GraphMapper::new(context.clone()).map(&school()).unwrap();

    let gary = context.get(5).unwrap();
    gary.write(|s: &mut Student| s.name = Some("Gareth".to_string()));
    let compiled = SaveCompiler::new(context).compile(&gary).unwrap();
    assert_eq!(compiled.statement.query, "MATCH ($5) WHERE id($5)=5 SET $5+={$5_props}");
    let props = compiled.statement.parameters["$5_props"].as_map().unwrap();
    assert_eq!(props["name"], CypherValue::from("Gareth"));
}
