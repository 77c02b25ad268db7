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

//! A small forum: members, memberships, topics and activities.
//!
//! ```text
//! Login <- Member (label User)
//! IMembership <- Membership (abstract) <- Bronze | Silver | Gold
//! Activity (abstract) <- Comment | Post
//! Topic
//! ```

use graphbind_core::metadata::{primitive, ClassDef, FieldInfo, MethodInfo, TypeRef, DATE};
use graphbind_core::{EntityRef, Value};

/// Namespace of the forum domain.
pub const NAMESPACE: &str = "forum";

/// Fully-qualified class names.
pub mod names {
    /// `Login`.
    pub const LOGIN: &str = "forum.Login";
    /// `Member`, labelled `User`.
    pub const MEMBER: &str = "forum.Member";
    /// `Topic`.
    pub const TOPIC: &str = "forum.Topic";
    /// The membership interface.
    pub const IMEMBERSHIP: &str = "forum.IMembership";
    /// The abstract membership class.
    pub const MEMBERSHIP: &str = "forum.Membership";
    /// `BronzeMembership`, labelled `Bronze`.
    pub const BRONZE: &str = "forum.BronzeMembership";
    /// `SilverMembership`, labelled `Silver`.
    pub const SILVER: &str = "forum.SilverMembership";
    /// `GoldMembership`, labelled `Gold`.
    pub const GOLD: &str = "forum.GoldMembership";
    /// The abstract activity class.
    pub const ACTIVITY: &str = "forum.activity.Activity";
    /// `Comment`.
    pub const COMMENT: &str = "forum.activity.Comment";
    /// `Post`.
    pub const POST: &str = "forum.activity.Post";
}

/// A login account.
#[derive(Debug, Default)]
pub struct Login {
    pub id: Option<i64>,
    pub user_name: Option<String>,
    pub password: Option<String>,
}

/// A forum member.
#[derive(Debug, Default)]
pub struct Member {
    pub id: Option<i64>,
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub membership_number: Option<i32>,
    pub nicknames: Vec<String>,
    pub renewal_date: Value,
    pub activity_list: Vec<EntityRef>,
    pub followees: Vec<EntityRef>,
    pub followers: Vec<EntityRef>,
    pub member_ship: Option<EntityRef>,
}

/// A discussion topic.
#[derive(Debug, Default)]
pub struct Topic {
    pub topic_id: Option<i64>,
    pub name: Option<String>,
    pub in_active: Option<bool>,
    pub posts: Vec<EntityRef>,
}

/// Fields shared by every membership level.
#[derive(Debug, Default)]
pub struct Membership {
    pub id: Option<i64>,
    pub fees: Option<i64>,
}

/// Bronze level.
#[derive(Debug, Default)]
pub struct BronzeMembership(pub Membership);

/// Silver level.
#[derive(Debug, Default)]
pub struct SilverMembership(pub Membership);

/// Gold level.
#[derive(Debug, Default)]
pub struct GoldMembership(pub Membership);

/// Fields shared by every activity.
#[derive(Debug, Default)]
pub struct Activity {
    pub activity_id: Option<i64>,
    pub date: Value,
}

/// A comment on a post.
#[derive(Debug, Default)]
pub struct Comment {
    pub activity: Activity,
    pub comment: Option<String>,
}

/// A post in a topic.
#[derive(Debug, Default)]
pub struct Post {
    pub activity: Activity,
    pub content: Option<String>,
    pub comments: Vec<EntityRef>,
}

fn login() -> ClassDef {
    ClassDef::entity::<Login>(names::LOGIN)
        .field(FieldInfo::new("id", TypeRef::scalar(primitive::LONG),
            |l: &Login| l.id, |l: &mut Login, v| l.id = v))
        .field(FieldInfo::new("user_name", TypeRef::scalar(primitive::STRING),
            |l: &Login| l.user_name.clone(), |l: &mut Login, v| l.user_name = v))
        .field(FieldInfo::new("password", TypeRef::scalar(primitive::STRING),
            |l: &Login| l.password.clone(), |l: &mut Login, v| l.password = v))
        .method(MethodInfo::getter("get_id", TypeRef::scalar(primitive::LONG), |l: &mut Login| l.id))
        .method(MethodInfo::setter("set_id", TypeRef::scalar(primitive::LONG),
            |l: &mut Login, v: Option<i64>| l.id = v))
        .method(MethodInfo::getter("get_user_name", TypeRef::scalar(primitive::STRING),
            |l: &mut Login| l.user_name.clone()))
        .method(MethodInfo::setter("set_user_name", TypeRef::scalar(primitive::STRING),
            |l: &mut Login, v: Option<String>| l.user_name = v))
}

fn member() -> ClassDef {
    let members = TypeRef::iterable(names::MEMBER);
    let activities = TypeRef::iterable(names::ACTIVITY);
    ClassDef::entity::<Member>(names::MEMBER)
        .extends(names::LOGIN)
        .label("User")
        .field(FieldInfo::new("id", TypeRef::scalar(primitive::LONG),
            |m: &Member| m.id, |m: &mut Member, v| m.id = v))
        .field(FieldInfo::new("user_name", TypeRef::scalar(primitive::STRING),
            |m: &Member| m.user_name.clone(), |m: &mut Member, v| m.user_name = v))
        .field(FieldInfo::new("password", TypeRef::scalar(primitive::STRING),
            |m: &Member| m.password.clone(), |m: &mut Member, v| m.password = v))
        .field(FieldInfo::new("membership_number", TypeRef::scalar(primitive::INTEGER),
            |m: &Member| m.membership_number, |m: &mut Member, v| m.membership_number = v))
        .field(FieldInfo::new("nicknames", TypeRef::array(primitive::STRING),
            |m: &Member| m.nicknames.clone(), |m: &mut Member, v| m.nicknames = v))
        .field(FieldInfo::new("renewal_date", TypeRef::scalar(DATE),
            |m: &Member| m.renewal_date.clone(), |m: &mut Member, v| m.renewal_date = v))
        .field(FieldInfo::new("activity_list", activities.clone(),
            |m: &Member| m.activity_list.clone(), |m: &mut Member, v| m.activity_list = v))
        .field(FieldInfo::new("followees", members.clone(),
            |m: &Member| m.followees.clone(), |m: &mut Member, v| m.followees = v))
        .field(FieldInfo::new("followers", members.clone(),
            |m: &Member| m.followers.clone(), |m: &mut Member, v| m.followers = v))
        .field(FieldInfo::new("member_ship", TypeRef::scalar(names::IMEMBERSHIP),
            |m: &Member| m.member_ship.clone(), |m: &mut Member, v| m.member_ship = v))
        .method(MethodInfo::getter("get_id", TypeRef::scalar(primitive::LONG), |m: &mut Member| m.id))
        .method(MethodInfo::setter("set_id", TypeRef::scalar(primitive::LONG),
            |m: &mut Member, v: Option<i64>| m.id = v))
        .method(MethodInfo::getter("get_user_name", TypeRef::scalar(primitive::STRING),
            |m: &mut Member| m.user_name.clone()))
        .method(MethodInfo::setter("set_user_name", TypeRef::scalar(primitive::STRING),
            |m: &mut Member, v: Option<String>| m.user_name = v))
        .method(MethodInfo::getter("get_password", TypeRef::scalar(primitive::STRING),
            |m: &mut Member| m.password.clone()))
        .method(MethodInfo::setter("set_password", TypeRef::scalar(primitive::STRING),
            |m: &mut Member, v: Option<String>| m.password = v))
        .method(MethodInfo::getter("get_membership_number", TypeRef::scalar(primitive::INTEGER),
            |m: &mut Member| m.membership_number))
        .method(MethodInfo::setter("set_membership_number", TypeRef::scalar(primitive::INTEGER),
            |m: &mut Member, v: Option<i32>| m.membership_number = v))
        .method(MethodInfo::getter("get_nicknames", TypeRef::array(primitive::STRING),
            |m: &mut Member| m.nicknames.clone()))
        .method(MethodInfo::setter("set_nicknames", TypeRef::array(primitive::STRING),
            |m: &mut Member, v: Vec<String>| m.nicknames = v))
        .method(MethodInfo::getter("get_renewal_date", TypeRef::scalar(DATE),
            |m: &mut Member| m.renewal_date.clone()))
        .method(MethodInfo::setter("set_renewal_date", TypeRef::scalar(DATE),
            |m: &mut Member, v: Value| m.renewal_date = v))
        .method(
            MethodInfo::getter("get_activity_list", activities.clone(),
                |m: &mut Member| m.activity_list.clone())
            .relationship("HAS_ACTIVITY"),
        )
        .method(
            MethodInfo::setter("set_activity_list", activities,
                |m: &mut Member, v: Vec<EntityRef>| m.activity_list = v)
            .relationship("HAS_ACTIVITY"),
        )
        .method(MethodInfo::getter("get_followees", members.clone(),
            |m: &mut Member| m.followees.clone()))
        .method(MethodInfo::setter("set_followees", members.clone(),
            |m: &mut Member, v: Vec<EntityRef>| m.followees = v))
        .method(MethodInfo::getter("get_followers", members.clone(),
            |m: &mut Member| m.followers.clone()))
        .method(MethodInfo::setter("set_followers", members,
            |m: &mut Member, v: Vec<EntityRef>| m.followers = v))
        .method(MethodInfo::getter("get_member_ship", TypeRef::scalar(names::IMEMBERSHIP),
            |m: &mut Member| m.member_ship.clone()))
        .method(MethodInfo::setter("set_member_ship", TypeRef::scalar(names::IMEMBERSHIP),
            |m: &mut Member, v: Option<EntityRef>| m.member_ship = v))
}

fn topic() -> ClassDef {
    ClassDef::entity::<Topic>(names::TOPIC)
        .field(
            FieldInfo::new("topic_id", TypeRef::scalar(primitive::LONG),
                |t: &Topic| t.topic_id, |t: &mut Topic, v| t.topic_id = v)
            .identity(),
        )
        .field(FieldInfo::new("name", TypeRef::scalar(primitive::STRING),
            |t: &Topic| t.name.clone(), |t: &mut Topic, v| t.name = v))
        .field(FieldInfo::new("in_active", TypeRef::scalar(primitive::BOOLEAN),
            |t: &Topic| t.in_active, |t: &mut Topic, v| t.in_active = v))
        .field(
            FieldInfo::new("posts", TypeRef::iterable(names::POST),
                |t: &Topic| t.posts.clone(), |t: &mut Topic, v| t.posts = v)
            .relationship("HAS_POSTS"),
        )
}

macro_rules! membership_level {
    ($fn_name:ident, $ty:ident, $name:expr, $label:expr) => {
        fn $fn_name() -> ClassDef {
            ClassDef::entity::<$ty>($name)
                .extends(names::MEMBERSHIP)
                .label($label)
                .field(FieldInfo::new("id", TypeRef::scalar(primitive::LONG),
                    |m: &$ty| m.0.id, |m: &mut $ty, v| m.0.id = v))
                .field(
                    FieldInfo::new("fees", TypeRef::scalar(primitive::LONG),
                        |m: &$ty| m.0.fees, |m: &mut $ty, v| m.0.fees = v)
                    .property("annualFees"),
                )
        }
    };
}

membership_level!(bronze, BronzeMembership, names::BRONZE, "Bronze");
membership_level!(silver, SilverMembership, names::SILVER, "Silver");
membership_level!(gold, GoldMembership, names::GOLD, "Gold");

fn activity() -> ClassDef {
    ClassDef::abstract_class(names::ACTIVITY)
        .field(FieldInfo::new("activity_id", TypeRef::scalar(primitive::LONG),
            |a: &Activity| a.activity_id, |a: &mut Activity, v| a.activity_id = v))
        .field(FieldInfo::new("date", TypeRef::scalar(DATE),
            |a: &Activity| a.date.clone(), |a: &mut Activity, v| a.date = v))
        .method(
            MethodInfo::getter("get_activity_id", TypeRef::scalar(primitive::LONG),
                |a: &mut Activity| a.activity_id)
            .identity(),
        )
        .method(
            MethodInfo::setter("set_activity_id", TypeRef::scalar(primitive::LONG),
                |a: &mut Activity, v: Option<i64>| a.activity_id = v)
            .identity(),
        )
}

fn comment() -> ClassDef {
    ClassDef::entity::<Comment>(names::COMMENT)
        .extends(names::ACTIVITY)
        .field(
            FieldInfo::new("activity_id", TypeRef::scalar(primitive::LONG),
                |c: &Comment| c.activity.activity_id, |c: &mut Comment, v| c.activity.activity_id = v)
            .identity(),
        )
        .field(FieldInfo::new("comment", TypeRef::scalar(primitive::STRING),
            |c: &Comment| c.comment.clone(), |c: &mut Comment, v| c.comment = v))
        .method(
            MethodInfo::getter("get_comment", TypeRef::scalar(primitive::STRING),
                |c: &mut Comment| c.comment.clone())
            .property("remark"),
        )
        .method(
            MethodInfo::setter("set_comment", TypeRef::scalar(primitive::STRING),
                |c: &mut Comment, v: Option<String>| c.comment = v)
            .property("remark"),
        )
}

fn post() -> ClassDef {
    ClassDef::entity::<Post>(names::POST)
        .extends(names::ACTIVITY)
        .field(
            FieldInfo::new("activity_id", TypeRef::scalar(primitive::LONG),
                |p: &Post| p.activity.activity_id, |p: &mut Post, v| p.activity.activity_id = v)
            .identity(),
        )
        .field(FieldInfo::new("content", TypeRef::scalar(primitive::STRING),
            |p: &Post| p.content.clone(), |p: &mut Post, v| p.content = v))
        .field(FieldInfo::new("comments", TypeRef::iterable(names::COMMENT),
            |p: &Post| p.comments.clone(), |p: &mut Post, v| p.comments = v))
}

/// Every class of the forum domain.
pub fn classes() -> Vec<ClassDef> {
    vec![
        login(),
        member(),
        topic(),
        ClassDef::interface(names::IMEMBERSHIP),
        ClassDef::abstract_class(names::MEMBERSHIP).implements(names::IMEMBERSHIP),
        bronze(),
        silver(),
        gold(),
        activity(),
        comment(),
        post(),
    ]
}
