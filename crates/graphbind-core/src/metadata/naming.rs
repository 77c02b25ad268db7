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

//! Naming conventions linking graph names to member names.
//!
//! | Graph name | Field | Setter | Getter |
//! |------------|-------|--------|--------|
//! | `FAVOURITE_TOPIC` | `favourite_topic` | `set_favourite_topic` | `get_favourite_topic` |
//! | `nonAnnotatedTestProperty` | `non_annotated_test_property` | `set_non_annotated_test_property` | `get_non_annotated_test_property` |

/// Prefix of conventional getters.
pub const GETTER_PREFIX: &str = "get_";

/// Prefix of conventional setters.
pub const SETTER_PREFIX: &str = "set_";

/// Convert camelCase, PascalCase or UPPER_SNAKE_CASE to snake_case.
pub fn snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;

    for c in s.chars() {
        if c.is_uppercase() && prev_lower {
            result.push('_');
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        result.extend(c.to_lowercase());
    }

    result
}

/// Field name conventionally associated with a graph name.
pub fn field_name(graph_name: &str) -> String {
    snake_case(graph_name)
}

/// Setter name conventionally associated with a graph name.
pub fn setter_name(graph_name: &str) -> String {
    format!("{}{}", SETTER_PREFIX, snake_case(graph_name))
}

/// Getter name conventionally associated with a graph name.
pub fn getter_name(graph_name: &str) -> String {
    format!("{}{}", GETTER_PREFIX, snake_case(graph_name))
}

/// Member name with any accessor prefix removed.
pub fn base_name(member: &str) -> &str {
    member
        .strip_prefix(GETTER_PREFIX)
        .or_else(|| member.strip_prefix(SETTER_PREFIX))
        .unwrap_or(member)
}

/// Relationship type derived from a member name (`get_location` -> `LOCATION`).
pub fn relationship_type(member: &str) -> String {
    snake_case(base_name(member)).to_uppercase()
}

/// Last segment of a dotted class name.
pub fn simple_name(fqn: &str) -> &str {
    fqn.rsplit('.').next().unwrap_or(fqn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("nonAnnotatedTestProperty"), "non_annotated_test_property");
        assert_eq!(snake_case("FAVOURITE_TOPIC"), "favourite_topic");
        assert_eq!(snake_case("LOCATION"), "location");
        assert_eq!(snake_case("already_snake"), "already_snake");
        assert_eq!(snake_case("testProp"), "test_prop");
    }

    #[test]
    fn test_accessor_names() {
        assert_eq!(setter_name("LOCATION"), "set_location");
        assert_eq!(getter_name("location"), "get_location");
        assert_eq!(field_name("FAVOURITE_TOPIC"), "favourite_topic");
    }

    #[test]
    fn test_relationship_type_from_member() {
        assert_eq!(relationship_type("get_location"), "LOCATION");
        assert_eq!(
            relationship_type("post_without_accessor_methods"),
            "POST_WITHOUT_ACCESSOR_METHODS"
        );
        assert_eq!(relationship_type("set_activity_list"), "ACTIVITY_LIST");
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name("domain.forum.Member"), "Member");
        assert_eq!(simple_name("Member"), "Member");
    }
}
