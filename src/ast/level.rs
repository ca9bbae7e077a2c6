use serde::{Deserialize, Serialize};

use super::ident::normalize;
use super::member::Member;

/// A hierarchy level, addressed by number, by name, or relative to a
/// member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdxLevelExpression {
    pub(crate) kind: LevelKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) enum LevelKind {
    Number {
        dimension: String,
        hierarchy: String,
        level: u32,
    },
    /// Named levels are passed to TM1 verbatim.
    Name {
        dimension: String,
        hierarchy: String,
        name: String,
    },
    OfMember(Member),
}

impl MdxLevelExpression {
    pub fn number(dimension: &str, hierarchy: Option<&str>, level: u32) -> Self {
        let dimension = normalize(dimension);
        let hierarchy = hierarchy.map(normalize).unwrap_or_else(|| dimension.clone());
        MdxLevelExpression {
            kind: LevelKind::Number {
                dimension,
                hierarchy,
                level,
            },
        }
    }

    pub fn named(dimension: &str, hierarchy: Option<&str>, name: &str) -> Self {
        let dimension = normalize(dimension);
        let hierarchy = hierarchy.map(normalize).unwrap_or_else(|| dimension.clone());
        MdxLevelExpression {
            kind: LevelKind::Name {
                dimension,
                hierarchy,
                name: name.to_string(),
            },
        }
    }

    pub fn of_member(member: Member) -> Self {
        MdxLevelExpression {
            kind: LevelKind::OfMember(member),
        }
    }
}
