//! Canonical spelling of TM1 object names.
//!
//! TM1 matches names case- and space-insensitively, so two spellings of the
//! same element would otherwise compare unequal and defeat tuple
//! deduplication. Every constructor funnels raw names through [normalize];
//! rendered queries only ever contain canonical tokens.

use crate::error::{Error, Result};

/// Attribute cubes live in control dimensions named with this prefix.
pub const ELEMENT_ATTRIBUTE_PREFIX: &str = "}ELEMENTATTRIBUTES_";

/// Lowercases, strips ASCII spaces and escapes `]` as `]]`.
///
/// Apply exactly once, to raw names only. Normalizing an already
/// normalized name that contains `]` would double the escape.
pub fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            ' ' => {}
            ']' => out.push_str("]]"),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Splits `[dim].[elem]` or `[dim].[hier].[elem]` into its raw segments.
/// The two-segment form has no hierarchy and yields `None` for it.
pub(crate) fn split_unique_name(unique_name: &str) -> Result<(&str, Option<&str>, &str)> {
    let err = || {
        Error::format(
            "a unique name of the form [dimension].[hierarchy].[element]",
            unique_name,
        )
    };

    if !unique_name.starts_with('[') || !unique_name.ends_with(']') {
        return Err(err());
    }

    let first = unique_name.find("].[");
    let last = unique_name.rfind("].[");
    match (first, last) {
        (Some(first), Some(last)) if first == last => {
            // [dimension].[element]
            let dimension = &unique_name[1..first];
            let element = &unique_name[first + 3..unique_name.len() - 1];
            Ok((dimension, None, element))
        }
        (Some(first), Some(last)) if unique_name.matches("].[").count() == 2 => {
            let dimension = &unique_name[1..first];
            let hierarchy = &unique_name[first + 3..last];
            let element = &unique_name[last + 3..unique_name.len() - 1];
            Ok((dimension, Some(hierarchy), element))
        }
        _ => Err(err()),
    }
}
