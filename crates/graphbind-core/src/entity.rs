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

//! Shared, type-erased handles to mapped objects.

use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

struct EntityCell {
    type_id: TypeId,
    type_name: &'static str,
    state: RwLock<Box<dyn Any + Send + Sync>>,
}

/// A shared handle to one object of the in-memory graph.
///
/// Handles compare and hash by identity: two handles are equal only when
/// they point at the same allocation, regardless of the object's contents.
/// This is what the identity map, the type index and the change memo key on.
///
/// # Examples
///
/// ```
/// use graphbind_core::EntityRef;
///
/// #[derive(Default)]
/// struct Topic { name: Option<String> }
///
/// let topic = EntityRef::new(Topic::default());
/// topic.write(|t: &mut Topic| t.name = Some("Rust".into()));
/// assert_eq!(topic.read(|t: &Topic| t.name.clone()).flatten().as_deref(), Some("Rust"));
///
/// let same = topic.clone();
/// assert_eq!(topic, same);
/// assert_ne!(topic, EntityRef::new(Topic::default()));
/// ```
#[derive(Clone)]
pub struct EntityRef(Arc<EntityCell>);

impl EntityRef {
    /// Wrap a value in a new handle.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(EntityCell {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            state: RwLock::new(Box::new(value)),
        }))
    }

    pub(crate) fn from_boxed(
        type_id: TypeId,
        type_name: &'static str,
        value: Box<dyn Any + Send + Sync>,
    ) -> Self {
        Self(Arc::new(EntityCell {
            type_id,
            type_name,
            state: RwLock::new(value),
        }))
    }

    /// The Rust type of the wrapped object.
    pub fn entity_type(&self) -> TypeId {
        self.0.type_id
    }

    /// The Rust type name of the wrapped object, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.0.type_name
    }

    /// Read the object as `T`. Returns `None` if it is not a `T`.
    pub fn read<T: Any, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let guard = self.0.state.read();
        guard.downcast_ref::<T>().map(f)
    }

    /// Mutate the object as `T`. Returns `None` if it is not a `T`.
    pub fn write<T: Any, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut guard = self.0.state.write();
        guard.downcast_mut::<T>().map(f)
    }

    pub(crate) fn with_any<R>(&self, f: impl FnOnce(&dyn Any) -> R) -> R {
        let guard = self.0.state.read();
        f(&**guard)
    }

    pub(crate) fn with_any_mut<R>(&self, f: impl FnOnce(&mut dyn Any) -> R) -> R {
        let mut guard = self.0.state.write();
        f(&mut **guard)
    }

    /// True when both handles point at the same object.
    pub fn ptr_eq(&self, other: &EntityRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared cell; stable for the lifetime of the object.
    pub fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl PartialEq for EntityRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for EntityRef {}

impl Hash for EntityRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityRef({}@{:#x})", self.0.type_name, self.addr())
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = self.0.type_name.rsplit("::").next().unwrap_or(self.0.type_name);
        write!(f, "{}@{:x}", short, self.addr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Debug, Default, PartialEq)]
    struct Location {
        name: String,
    }

    #[test]
    fn test_identity_equality_ignores_contents() {
        let a = EntityRef::new(Location::default());
        let b = EntityRef::new(Location::default());
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_identity_hashing() {
        let a = EntityRef::new(Location::default());
        let mut set = HashSet::new();
        set.insert(a.clone());
        set.insert(a.clone());
        set.insert(EntityRef::new(Location::default()));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_typed_access() {
        let loc = EntityRef::new(Location::default());
        loc.write(|l: &mut Location| l.name = "Outer Space".to_string());
        assert_eq!(
            loc.read(|l: &Location| l.name.clone()),
            Some("Outer Space".to_string())
        );
        assert_eq!(loc.read(|_: &String| ()), None);
        assert_eq!(loc.entity_type(), TypeId::of::<Location>());
    }

    #[test]
    fn test_display_uses_short_type_name() {
        let loc = EntityRef::new(Location::default());
        assert!(loc.to_string().starts_with("Location@"));
    }
}
