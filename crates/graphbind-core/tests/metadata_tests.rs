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

//! Class descriptor lookups and classification over the forum domain.

use graphbind_core::metadata::{primitive, FieldInfo, MetaData, MethodInfo, TypeRef, DATE};
use graphbind_test::fixtures::{self, education, forum};
use std::sync::Arc;

fn forum_metadata() -> Arc<MetaData> {
    fixtures::metadata(&[forum::NAMESPACE])
}

fn field_names(fields: Vec<&FieldInfo>) -> Vec<&str> {
    fields.into_iter().map(FieldInfo::name).collect()
}

fn method_names(methods: Vec<&MethodInfo>) -> Vec<&str> {
    methods.into_iter().map(MethodInfo::name).collect()
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_class_info_by_unique_simple_name() {
    let meta = forum_metadata();
    assert_eq!(meta.class_info("Topic").unwrap().name(), forum::names::TOPIC);
}

#[test]
fn test_class_info_by_label() {
    let meta = forum_metadata();
    assert_eq!(meta.class_info("User").unwrap().name(), forum::names::MEMBER);
    assert_eq!(meta.class_info("Bronze").unwrap().name(), forum::names::BRONZE);
}

#[test]
fn test_class_info_by_fqn() {
    let meta = forum_metadata();
    assert_eq!(
        meta.class_info(forum::names::TOPIC).unwrap().name(),
        forum::names::TOPIC
    );
}

#[test]
fn test_unknown_class() {
    let meta = forum_metadata();
    assert!(meta.class_info("Knight").is_none());
}

// ============================================================================
// Identity
// ============================================================================

#[test]
fn test_default_identity_field() {
    let meta = forum_metadata();
    assert_eq!(meta.class_info("Login").unwrap().identity_field().unwrap().name(), "id");
    assert_eq!(meta.class_info("Bronze").unwrap().identity_field().unwrap().name(), "id");
}

#[test]
fn test_annotated_identity_field() {
    let meta = forum_metadata();
    assert_eq!(
        meta.class_info("Topic").unwrap().identity_field().unwrap().name(),
        "topic_id"
    );
}

#[test]
fn test_default_identity_accessors() {
    let meta = forum_metadata();
    let member = meta.class_info("Member").unwrap();
    assert_eq!(member.identity_getter().unwrap().name(), "get_id");
    assert_eq!(member.identity_setter().unwrap().name(), "set_id");
}

#[test]
fn test_annotated_identity_accessors() {
    let meta = forum_metadata();
    let activity = meta.class_info("Activity").unwrap();
    assert_eq!(activity.identity_getter().unwrap().name(), "get_activity_id");
    assert_eq!(activity.identity_setter().unwrap().name(), "set_activity_id");
}

// ============================================================================
// Fields
// ============================================================================

#[test]
fn test_property_fields() {
    let meta = forum_metadata();
    let bronze = meta.class_info("Bronze").unwrap();
    let fields = bronze.property_fields();
    assert_eq!(field_names(fields.clone()), vec!["fees"]);
    assert_eq!(fields[0].property_name().as_deref(), Some("annualFees"));
    assert_eq!(fields[0].relationship_type(), None);
}

#[test]
fn test_relationship_fields() {
    let meta = forum_metadata();
    let member = meta.class_info("Member").unwrap();
    let fields = member.relationship_fields();
    assert_eq!(
        field_names(fields.clone()),
        vec!["renewal_date", "activity_list", "followees", "followers", "member_ship"]
    );
    assert!(fields.iter().all(|f| f.property_name().is_none()));
}

#[test]
fn test_annotated_relationship_field() {
    let meta = forum_metadata();
    let topic = meta.class_info("Topic").unwrap();
    let posts = topic.relationship_field("HAS_POSTS").unwrap();
    assert_eq!(posts.name(), "posts");
    assert_eq!(posts.relationship_type().as_deref(), Some("HAS_POSTS"));
}

#[test]
fn test_named_property_field() {
    let meta = forum_metadata();
    let gold = meta.class_info("Gold").unwrap();
    assert_eq!(gold.property_field("annualFees").unwrap().name(), "fees");
}

#[test]
fn test_scalar_classification() {
    let meta = forum_metadata();
    let member = meta.class_info("Member").unwrap();
    assert!(!member.is_scalar(member.relationship_field("followers").unwrap()));
    assert!(!member.is_scalar(member.field("nicknames").unwrap()));
    assert!(member.is_scalar(member.field("user_name").unwrap()));
}

#[test]
fn test_find_fields_by_type() {
    let meta = forum_metadata();
    let member = meta.class_info("User").unwrap();
    assert_eq!(
        field_names(member.find_fields(&TypeRef::scalar(DATE))),
        vec!["renewal_date"]
    );
    assert_eq!(
        field_names(member.find_fields(&TypeRef::iterable(forum::names::MEMBER))),
        vec!["followees", "followers"]
    );
}

#[test]
fn test_find_iterable_fields() {
    let meta = forum_metadata();
    let member = meta.class_info("User").unwrap();
    let mut names = field_names(member.find_iterable_fields());
    names.sort_unstable();
    assert_eq!(names, vec!["activity_list", "followees", "followers", "nicknames"]);
}

// ============================================================================
// Methods
// ============================================================================

#[test]
fn test_relationship_getters_and_setters() {
    let meta = forum_metadata();
    let member = meta.class_info("User").unwrap();
    assert_eq!(
        method_names(member.relationship_getters()),
        vec![
            "get_renewal_date",
            "get_activity_list",
            "get_followees",
            "get_followers",
            "get_member_ship"
        ]
    );
    assert_eq!(member.relationship_setters().len(), 5);
}

#[test]
fn test_property_getters_and_setters() {
    let meta = forum_metadata();
    let member = meta.class_info("User").unwrap();
    assert_eq!(
        method_names(member.property_getters()),
        vec![
            "get_user_name",
            "get_password",
            "get_membership_number",
            "get_nicknames"
        ]
    );
    assert_eq!(
        method_names(member.property_setters()),
        vec![
            "set_user_name",
            "set_password",
            "set_membership_number",
            "set_nicknames"
        ]
    );
}

#[test]
fn test_named_property_accessors() {
    let meta = forum_metadata();
    let comment = meta.class_info("Comment").unwrap();
    assert_eq!(comment.property_getter("remark").unwrap().name(), "get_comment");
    assert_eq!(comment.property_setter("remark").unwrap().name(), "set_comment");
}

#[test]
fn test_named_relationship_accessors() {
    let meta = forum_metadata();
    let member = meta.class_info("Member").unwrap();
    assert_eq!(
        member.relationship_getter("HAS_ACTIVITY").unwrap().name(),
        "get_activity_list"
    );
    assert_eq!(
        member.relationship_setter("HAS_ACTIVITY").unwrap().name(),
        "set_activity_list"
    );
}

#[test]
fn test_find_setters_by_type() {
    let meta = forum_metadata();
    let member = meta.class_info("Member").unwrap();
    assert_eq!(
        method_names(member.find_setters(&TypeRef::scalar(DATE))),
        vec!["set_renewal_date"]
    );
    assert!(member
        .find_setters(&TypeRef::scalar(primitive::DOUBLE))
        .is_empty());
}

#[test]
fn test_find_iterable_setters_by_element() {
    let meta = forum_metadata();
    let member = meta.class_info("User").unwrap();
    assert_eq!(
        method_names(member.find_iterable_setters(forum::names::MEMBER)),
        vec!["set_followees", "set_followers"]
    );
    assert_eq!(
        method_names(member.find_iterable_setters(forum::names::ACTIVITY)),
        vec!["set_activity_list"]
    );
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_resolve_class_hierarchy() {
    let meta = forum_metadata();
    assert_eq!(meta.resolve(&["Login", "User"]).unwrap().name(), forum::names::MEMBER);
    assert!(meta.resolve(&["Login", "Topic"]).is_none());
}

#[test]
fn test_interface_and_abstract_taxa_alone() {
    let meta = forum_metadata();
    assert!(meta.resolve(&["IMembership"]).is_none());
    assert!(meta.resolve(&["Membership"]).is_none());
}

#[test]
fn test_no_common_leaf() {
    let meta = forum_metadata();
    assert!(meta.resolve(&["Topic", "Member"]).is_none());
}

#[test]
fn test_taxa_order_is_irrelevant() {
    let meta = forum_metadata();
    let orders = [
        ["Bronze", "Membership", "IMembership"],
        ["Bronze", "IMembership", "Membership"],
        ["Membership", "IMembership", "Bronze"],
        ["Membership", "Bronze", "IMembership"],
        ["IMembership", "Bronze", "Membership"],
        ["IMembership", "Membership", "Bronze"],
    ];
    for taxa in orders {
        assert_eq!(meta.resolve(&taxa).unwrap().name(), forum::names::BRONZE);
    }
}

#[test]
fn test_unique_leaf_below_superclass() {
    let meta = forum_metadata();
    assert_eq!(meta.resolve(&["Login"]).unwrap().name(), forum::names::MEMBER);
    assert_eq!(meta.resolve(&["Login", "Member"]).unwrap().name(), forum::names::MEMBER);
}

#[test]
fn test_unknown_taxa() {
    let meta = forum_metadata();
    assert!(meta.resolve(&["Knight", "Baronet"]).is_none());
    assert_eq!(
        meta.resolve(&["Silver", "Pewter", "Tin"]).unwrap().name(),
        forum::names::SILVER
    );
}

// ============================================================================
// Labels
// ============================================================================

#[test]
fn test_labels() {
    let meta = forum_metadata();
    assert_eq!(meta.class_info("Member").unwrap().labels(), ["User", "Login"]);
    assert_eq!(meta.class_info("Topic").unwrap().labels(), ["Topic"]);

    let education = fixtures::metadata(&[education::NAMESPACE]);
    assert_eq!(
        education.class_info("Student").unwrap().labels(),
        ["Student", "DomainObject"]
    );
}

#[test]
fn test_namespaces_limit_the_scan() {
    let meta = forum_metadata();
    assert!(meta.class_info("Student").is_none());
    assert!(meta.class_info("Satellite").is_none());
}

#[test]
fn test_abstract_classes_are_not_instantiable() {
    let meta = forum_metadata();
    let activity = meta.class_info("Activity").unwrap();
    assert!(!activity.is_concrete());
    assert!(activity.instantiate().is_err());
    assert!(meta.class_info("Comment").unwrap().instantiate().is_ok());
}
