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

//! Content hashing for dirty tracking.
//!
//! The hash folds the string form of every non-null property field, in
//! declaration order, into a 64-bit polynomial hash. Two values with the
//! same string form hash identically, so this detects changes, not
//! equality; collisions are accepted.

use graphbind_core::metadata::ClassInfo;
use graphbind_core::{EntityRef, Result};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Hash of an object with no non-null properties: `0xDEADBEEF / (11 * 257)`
/// in 32-bit signed arithmetic.
pub const EMPTY_HASH: i64 = (0xDEAD_BEEF_u32 as i32 / (11 * 257)) as i64;

const STRING_SEED: i64 = 1_125_899_906_842_597;

/// Polynomial hash, base 31, over the UTF-16 code units of `s`.
pub fn string_hash(s: &str) -> i64 {
    s.encode_utf16()
        .fold(STRING_SEED, |h, unit| h.wrapping_mul(31).wrapping_add(i64::from(unit)))
}

/// Hash of the current property state of `entity`.
pub fn content_hash(class: &ClassInfo, entity: &EntityRef) -> Result<i64> {
    let mut hash = EMPTY_HASH;
    for field in class.property_fields() {
        let value = field.read(entity)?;
        if !value.is_null() {
            hash = hash
                .wrapping_mul(31)
                .wrapping_add(string_hash(&value.to_string()));
        }
    }
    Ok(hash)
}

/// Remembered content hashes, keyed by object identity.
#[derive(Debug, Default)]
pub struct ObjectMemo {
    hashes: RwLock<HashMap<EntityRef, i64>>,
}

impl ObjectMemo {
    /// Create an empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the current hash of `entity`.
    pub fn remember(&self, class: &ClassInfo, entity: &EntityRef) -> Result<()> {
        let hash = content_hash(class, entity)?;
        self.hashes.write().insert(entity.clone(), hash);
        Ok(())
    }

    /// True if `entity` was remembered and its hash is unchanged.
    pub fn remembered(&self, class: &ClassInfo, entity: &EntityRef) -> Result<bool> {
        let Some(stored) = self.hashes.read().get(entity).copied() else {
            return Ok(false);
        };
        Ok(content_hash(class, entity)? == stored)
    }

    /// True if `entity` has a memo entry.
    pub fn contains(&self, entity: &EntityRef) -> bool {
        self.hashes.read().contains_key(entity)
    }

    /// Number of remembered objects.
    pub fn len(&self) -> usize {
        self.hashes.read().len()
    }

    /// True if nothing is remembered.
    pub fn is_empty(&self) -> bool {
        self.hashes.read().is_empty()
    }

    /// Forget everything.
    pub fn clear(&self) {
        self.hashes.write().clear();
    }
}
