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

//! Space programs, their satellites and where those satellites are.

use graphbind_core::metadata::{primitive, ClassDef, FieldInfo, MethodInfo, TypeRef};
use graphbind_core::EntityRef;

/// Namespace of the satellites domain.
pub const NAMESPACE: &str = "satellites";

/// Fully-qualified class names.
pub mod names {
    /// `Location`.
    pub const LOCATION: &str = "satellites.Location";
    /// `Program`.
    pub const PROGRAM: &str = "satellites.Program";
    /// `Satellite`.
    pub const SATELLITE: &str = "satellites.Satellite";
}

/// An orbit or other place.
#[derive(Debug, Default)]
pub struct Location {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// A space program owning satellites.
#[derive(Debug, Default)]
pub struct Program {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub satellites: Vec<EntityRef>,
}

/// A satellite.
#[derive(Debug, Default)]
pub struct Satellite {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub manned: Option<bool>,
    pub location: Option<EntityRef>,
    pub location_setter_calls: u32,
}

fn location() -> ClassDef {
    ClassDef::entity::<Location>(names::LOCATION)
        .field(FieldInfo::new("id", TypeRef::scalar(primitive::LONG),
            |l: &Location| l.id, |l: &mut Location, v| l.id = v))
        .field(FieldInfo::new("name", TypeRef::scalar(primitive::STRING),
            |l: &Location| l.name.clone(), |l: &mut Location, v| l.name = v))
}

fn program() -> ClassDef {
    let satellites = TypeRef::iterable(names::SATELLITE);
    ClassDef::entity::<Program>(names::PROGRAM)
        .field(FieldInfo::new("id", TypeRef::scalar(primitive::LONG),
            |p: &Program| p.id, |p: &mut Program, v| p.id = v))
        .field(FieldInfo::new("name", TypeRef::scalar(primitive::STRING),
            |p: &Program| p.name.clone(), |p: &mut Program, v| p.name = v))
        .field(FieldInfo::new("satellites", satellites.clone(),
            |p: &Program| p.satellites.clone(), |p: &mut Program, v| p.satellites = v))
        .method(MethodInfo::getter("get_satellites", satellites.clone(),
            |p: &mut Program| p.satellites.clone()))
        .method(MethodInfo::setter("set_satellites", satellites,
            |p: &mut Program, v: Vec<EntityRef>| p.satellites = v))
}

fn satellite() -> ClassDef {
    let location = TypeRef::scalar(names::LOCATION);
    ClassDef::entity::<Satellite>(names::SATELLITE)
        .field(FieldInfo::new("id", TypeRef::scalar(primitive::LONG),
            |s: &Satellite| s.id, |s: &mut Satellite, v| s.id = v))
        .field(FieldInfo::new("name", TypeRef::scalar(primitive::STRING),
            |s: &Satellite| s.name.clone(), |s: &mut Satellite, v| s.name = v))
        .field(FieldInfo::new("manned", TypeRef::scalar(primitive::BOOLEAN),
            |s: &Satellite| s.manned, |s: &mut Satellite, v| s.manned = v))
        .field(FieldInfo::new("location", location.clone(),
            |s: &Satellite| s.location.clone(), |s: &mut Satellite, v| s.location = v))
        .method(MethodInfo::getter("get_location", location.clone(),
            |s: &mut Satellite| s.location.clone()))
        .method(MethodInfo::setter("set_location", location,
            |s: &mut Satellite, v: Option<EntityRef>| {
                s.location_setter_calls += 1;
                s.location = v;
            }))
}

/// Every class of the satellites domain.
pub fn classes() -> Vec<ClassDef> {
    vec![location(), program(), satellite()]
}
