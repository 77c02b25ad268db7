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

//! Escaping and validation of names and literals embedded in statements.
//!
//! Labels and relationship types come from class metadata, not from user
//! input, but they are still normalised and quoted: class labels may carry
//! characters a bare Cypher name cannot.

use crate::error::{MappingError, Result};
use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

#[inline]
fn needs_escaping(s: &str) -> bool {
    s.chars()
        .any(|ch| matches!(ch, '\\' | '\'' | '"' | '\n' | '\r' | '\t' | '\x00'))
}

/// Escape a string for use inside a single-quoted Cypher literal.
///
/// Clean strings are returned borrowed.
///
/// ```
/// # use graphbind_neo4j::cypher::escape_string;
/// assert!(matches!(escape_string("plain"), std::borrow::Cow::Borrowed(_)));
/// assert_eq!(escape_string("it's"), "it\\'s");
/// ```
pub fn escape_string(s: &str) -> Cow<'_, str> {
    if !needs_escaping(s) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\x00' => escaped.push_str("\\u0000"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Quote a string as a single-quoted Cypher literal.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", escape_string(s))
}

/// True if `s` is a letter or underscore followed by letters, digits and
/// underscores.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Return `s` if it is a plain identifier.
pub fn validate_identifier(s: &str) -> Result<&str> {
    if is_valid_identifier(s) {
        Ok(s)
    } else {
        Err(MappingError::InvalidIdentifier(s.to_string()))
    }
}

/// Normalize a string to NFC form.
///
/// ```
/// # use graphbind_neo4j::cypher::normalize_unicode;
/// assert_eq!(normalize_unicode("cafe\u{301}"), "caf\u{e9}");
/// ```
pub fn normalize_unicode(s: &str) -> String {
    s.nfc().collect()
}

fn is_invisible(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{200B}'..='\u{200D}'
                | '\u{FEFF}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2066}'..='\u{2069}'
                | '\u{00AD}'
                | '\u{061C}'
                | '\u{180E}'
        )
}

fn sanitize(s: &str) -> String {
    normalize_unicode(s)
        .chars()
        .filter(|c| !is_invisible(*c))
        .collect()
}

fn backtick(s: &str) -> String {
    format!("`{}`", s.replace('`', "``"))
}

/// Escape a property key or variable-like name.
///
/// Names that are not plain identifiers, or that are reserved words, are
/// wrapped in backticks.
///
/// ```
/// # use graphbind_neo4j::cypher::escape_identifier;
/// assert_eq!(escape_identifier("annualFees"), "annualFees");
/// assert_eq!(escape_identifier("MATCH"), "`MATCH`");
/// assert_eq!(escape_identifier("first name"), "`first name`");
/// ```
pub fn escape_identifier(s: &str) -> String {
    let sanitized = sanitize(s);
    if is_valid_identifier(&sanitized) && !is_cypher_keyword(&sanitized) {
        sanitized
    } else {
        backtick(&sanitized)
    }
}

/// Escape a label, including its leading colon.
///
/// Reserved words are legal after a colon and are left bare.
///
/// ```
/// # use graphbind_neo4j::cypher::escape_label;
/// assert_eq!(escape_label("User"), ":User");
/// assert_eq!(escape_label("Gold Member"), ":`Gold Member`");
/// ```
pub fn escape_label(s: &str) -> String {
    let sanitized = sanitize(s);
    if is_valid_identifier(&sanitized) {
        format!(":{}", sanitized)
    } else {
        format!(":{}", backtick(&sanitized))
    }
}

/// Escape a relationship type, including its leading colon.
///
/// ```
/// # use graphbind_neo4j::cypher::escape_relationship_type;
/// assert_eq!(escape_relationship_type("CONTAINS"), ":CONTAINS");
/// assert_eq!(escape_relationship_type("HAS-POSTS"), ":`HAS-POSTS`");
/// ```
pub fn escape_relationship_type(s: &str) -> String {
    escape_label(s)
}

fn is_cypher_keyword(s: &str) -> bool {
    matches!(
        s.to_uppercase().as_str(),
        "ALL" | "AND" | "ANY" | "AS" | "ASC" | "ASCENDING" | "BY" | "CALL" | "CASE"
            | "CONTAINS" | "CREATE" | "DELETE" | "DESC" | "DESCENDING" | "DETACH"
            | "DISTINCT" | "ELSE" | "END" | "ENDS" | "EXISTS" | "FALSE" | "FOREACH"
            | "IN" | "IS" | "LIMIT" | "MATCH" | "MERGE" | "NOT" | "NULL" | "ON"
            | "OPTIONAL" | "OR" | "ORDER" | "REMOVE" | "RETURN" | "SET" | "SKIP"
            | "STARTS" | "THEN" | "TRUE" | "UNION" | "UNWIND" | "WHEN" | "WHERE"
            | "WITH" | "XOR" | "YIELD"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_string_special_chars() {
        assert_eq!(escape_string("a\\b"), "a\\\\b");
        assert_eq!(escape_string("line\nbreak"), "line\\nbreak");
        assert_eq!(escape_string("nul\x00"), "nul\\u0000");
    }

    #[test]
    fn test_quote_string() {
        assert_eq!(quote_string("Rust"), "'Rust'");
        assert_eq!(quote_string("o'clock"), "'o\\'clock'");
    }

    #[test]
    fn test_valid_identifiers() {
        assert!(is_valid_identifier("name"));
        assert!(is_valid_identifier("_0"));
        assert!(is_valid_identifier("HAS_POSTS"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("$12"));
        assert!(!is_valid_identifier("12"));
        assert!(!is_valid_identifier("a-b"));
    }

    #[test]
    fn test_validate_identifier_error() {
        let err = validate_identifier("bad label").unwrap_err();
        assert!(matches!(err, MappingError::InvalidIdentifier(s) if s == "bad label"));
    }

    #[test]
    fn test_invisible_characters_are_stripped() {
        assert_eq!(escape_label("Us\u{200B}er"), ":User");
        assert_eq!(escape_identifier("na\u{202E}me"), "name");
    }

    #[test]
    fn test_backticks_are_doubled() {
        assert_eq!(escape_identifier("a`b"), "`a``b`");
    }

    #[test]
    fn test_keywords_only_quoted_as_identifiers() {
        assert_eq!(escape_identifier("where"), "`where`");
        assert_eq!(escape_label("Match"), ":Match");
    }
}
