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

//! Schools without any annotations: every name is derived by convention.

use graphbind_core::metadata::{primitive, ClassDef, FieldInfo, TypeRef};
use graphbind_core::EntityRef;

/// Namespace of the education domain.
pub const NAMESPACE: &str = "education";

/// Fully-qualified class names.
pub mod names {
    /// The abstract base of every education class.
    pub const DOMAIN_OBJECT: &str = "education.DomainObject";
    /// `Student`.
    pub const STUDENT: &str = "education.Student";
    /// `Teacher`.
    pub const TEACHER: &str = "education.Teacher";
    /// `Course`.
    pub const COURSE: &str = "education.Course";
}

/// A student.
#[derive(Debug, Default)]
pub struct Student {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// A teacher and the courses they teach.
#[derive(Debug, Default)]
pub struct Teacher {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub courses: Vec<EntityRef>,
}

/// A course and its enrolled students.
#[derive(Debug, Default)]
pub struct Course {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub students: Vec<EntityRef>,
}

fn student() -> ClassDef {
    ClassDef::entity::<Student>(names::STUDENT)
        .extends(names::DOMAIN_OBJECT)
        .field(FieldInfo::new("id", TypeRef::scalar(primitive::LONG),
            |s: &Student| s.id, |s: &mut Student, v| s.id = v))
        .field(FieldInfo::new("name", TypeRef::scalar(primitive::STRING),
            |s: &Student| s.name.clone(), |s: &mut Student, v| s.name = v))
}

fn teacher() -> ClassDef {
    ClassDef::entity::<Teacher>(names::TEACHER)
        .extends(names::DOMAIN_OBJECT)
        .field(FieldInfo::new("id", TypeRef::scalar(primitive::LONG),
            |t: &Teacher| t.id, |t: &mut Teacher, v| t.id = v))
        .field(FieldInfo::new("name", TypeRef::scalar(primitive::STRING),
            |t: &Teacher| t.name.clone(), |t: &mut Teacher, v| t.name = v))
        .field(FieldInfo::new("courses", TypeRef::iterable(names::COURSE),
            |t: &Teacher| t.courses.clone(), |t: &mut Teacher, v| t.courses = v))
}

fn course() -> ClassDef {
    ClassDef::entity::<Course>(names::COURSE)
        .extends(names::DOMAIN_OBJECT)
        .field(FieldInfo::new("id", TypeRef::scalar(primitive::LONG),
            |c: &Course| c.id, |c: &mut Course, v| c.id = v))
        .field(FieldInfo::new("name", TypeRef::scalar(primitive::STRING),
            |c: &Course| c.name.clone(), |c: &mut Course, v| c.name = v))
        .field(FieldInfo::new("students", TypeRef::iterable(names::STUDENT),
            |c: &Course| c.students.clone(), |c: &mut Course, v| c.students = v))
}

/// Every class of the education domain.
pub fn classes() -> Vec<ClassDef> {
    vec![
        ClassDef::abstract_class(names::DOMAIN_OBJECT),
        student(),
        teacher(),
        course(),
    ]
}
