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

//! A class exhibiting every combination of annotations and accessors the
//! access strategy distinguishes.
//!
//! Accessors that must never be chosen panic when called. Accessors that
//! may be chosen record the call in a flag.

use super::forum;
use graphbind_core::metadata::{primitive, ClassDef, FieldInfo, MethodInfo, TypeRef};
use graphbind_core::EntityRef;

/// Namespace of the dummy class.
pub const NAMESPACE: &str = "entityaccess";

/// Fully-qualified name of [`DummyDomainObject`].
pub const DUMMY: &str = "entityaccess.DummyDomainObject";

/// The annotated test object.
#[derive(Debug, Default)]
pub struct DummyDomainObject {
    pub id: Option<i64>,
    pub annotated_test_property: Option<String>,
    pub non_annotated_test_property: Option<f64>,
    pub non_annotated_test_property_accessor_was_called: bool,
    pub fully_annotated_property: Option<String>,
    pub fully_annotated_property_accessor_was_called: bool,
    pub property_without_accessor_methods: i32,
    pub member: Option<EntityRef>,
    pub favourite_topic: Option<EntityRef>,
    pub topic_accessor_was_called: bool,
    pub post_without_accessor_methods: Option<EntityRef>,
    pub read_only_comment: Option<EntityRef>,
}

type D = DummyDomainObject;

/// The class definition of [`DummyDomainObject`].
pub fn class() -> ClassDef {
    let member = TypeRef::scalar(forum::names::MEMBER);
    let topic = TypeRef::scalar(forum::names::TOPIC);
    let text = || TypeRef::scalar(primitive::STRING);
    let double = || TypeRef::scalar(primitive::DOUBLE);

    ClassDef::entity::<D>(DUMMY)
        .field(FieldInfo::new("id", TypeRef::scalar(primitive::LONG),
            |d: &D| d.id, |d: &mut D, v| d.id = v))
        .field(
            FieldInfo::new("annotated_test_property", text(),
                |d: &D| d.annotated_test_property.clone(),
                |d: &mut D, v| d.annotated_test_property = v)
            .property("testProp"),
        )
        .field(FieldInfo::new("non_annotated_test_property", double(),
            |d: &D| d.non_annotated_test_property,
            |d: &mut D, v| d.non_annotated_test_property = v))
        .field(
            FieldInfo::new("fully_annotated_property", text(),
                |d: &D| d.fully_annotated_property.clone(),
                |d: &mut D, v| d.fully_annotated_property = v)
            .property("testAnnoProp"),
        )
        .field(FieldInfo::new("property_without_accessor_methods", TypeRef::scalar(primitive::INTEGER),
            |d: &D| d.property_without_accessor_methods,
            |d: &mut D, v| d.property_without_accessor_methods = v))
        .field(
            FieldInfo::new("member", member.clone(),
                |d: &D| d.member.clone(), |d: &mut D, v| d.member = v)
            .relationship("CONTAINS"),
        )
        .field(FieldInfo::new("favourite_topic", topic.clone(),
            |d: &D| d.favourite_topic.clone(), |d: &mut D, v| d.favourite_topic = v))
        .field(FieldInfo::new("post_without_accessor_methods", TypeRef::scalar(forum::names::POST),
            |d: &D| d.post_without_accessor_methods.clone(),
            |d: &mut D, v| d.post_without_accessor_methods = v))
        .field(FieldInfo::new("read_only_comment", TypeRef::scalar(forum::names::COMMENT),
            |d: &D| d.read_only_comment.clone(), |d: &mut D, v| d.read_only_comment = v))
        .method(MethodInfo::getter("get_id", TypeRef::scalar(primitive::LONG),
            |_: &mut D| -> Option<i64> { panic!("the identity getter must not be called") }))
        .method(MethodInfo::setter("set_id", TypeRef::scalar(primitive::LONG),
            |d: &mut D, v: Option<i64>| d.id = v))
        .method(MethodInfo::setter("set_test_prop", text(),
            |_: &mut D, v: Option<String>| panic!("set_test_prop must not be called with {:?}", v)))
        .method(MethodInfo::getter("get_test_prop", text(),
            |_: &mut D| -> Option<String> { panic!("get_test_prop must not be called") }))
        .method(MethodInfo::setter("set_non_annotated_test_property", double(),
            |d: &mut D, v: Option<f64>| {
                d.non_annotated_test_property_accessor_was_called = true;
                d.non_annotated_test_property = v;
            }))
        .method(MethodInfo::getter("get_non_annotated_test_property", double(),
            |d: &mut D| {
                d.non_annotated_test_property_accessor_was_called = true;
                d.non_annotated_test_property
            }))
        .method(
            MethodInfo::getter("get_fully_annotated_property", text(),
                |d: &mut D| {
                    d.fully_annotated_property_accessor_was_called = true;
                    d.fully_annotated_property.clone()
                })
            .property("testAnnoProp"),
        )
        .method(
            MethodInfo::setter("set_fully_annotated_property", text(),
                |d: &mut D, v: Option<String>| {
                    d.fully_annotated_property_accessor_was_called = true;
                    d.fully_annotated_property = v;
                })
            .property("testAnnoProp"),
        )
        .method(MethodInfo::getter("get_contains", member.clone(),
            |_: &mut D| -> Option<EntityRef> { panic!("get_contains must not be called") }))
        .method(MethodInfo::setter("set_contains", member,
            |_: &mut D, v: Option<EntityRef>| panic!("set_contains must not be called with {:?}", v)))
        .method(MethodInfo::getter("get_topic", topic.clone(),
            |d: &mut D| {
                d.topic_accessor_was_called = true;
                d.favourite_topic.clone()
            }))
        .method(MethodInfo::setter("set_topic", topic,
            |d: &mut D, v: Option<EntityRef>| {
                d.topic_accessor_was_called = true;
                d.favourite_topic = v;
            }))
        .method(
            MethodInfo::getter("get_read_only_comment", TypeRef::scalar(forum::names::COMMENT),
                |d: &mut D| d.read_only_comment.clone())
            .relationship("COMMENT"),
        )
}
