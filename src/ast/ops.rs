//! Closed keyword vocabularies of the MDX grammar.
//!
//! Each enum renders to exactly the token TM1 expects and parses leniently:
//! matching is case-insensitive and ignores ASCII spaces, so `"B Asc"` and
//! `"basc"` both resolve to [Order::Basc]. Anything outside the vocabulary
//! is a format error rather than a silent passthrough.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::VariantNames;

use crate::error::{Error, Result};

fn parse_keyword<T>(text: &str) -> Result<T>
where
    T: FromStr + VariantNames,
{
    let condensed: String = text.chars().filter(|c| *c != ' ').collect();
    T::from_str(&condensed).map_err(|_| Error::format(format!("one of {}", T::VARIANTS.join(", ")), text))
}

/// Sort direction for `ORDER`. The `B` variants break the hierarchy
/// before sorting.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumVariantNames,
)]
#[strum(ascii_case_insensitive)]
pub enum Order {
    #[strum(serialize = "ASC")]
    Asc,
    #[strum(serialize = "DESC")]
    Desc,
    #[strum(serialize = "BASC")]
    Basc,
    #[strum(serialize = "BDESC")]
    Bdesc,
}

impl Order {
    pub fn parse(text: &str) -> Result<Self> {
        parse_keyword(text)
    }
}

/// TM1 element types, rendered by their numeric code in `ELEMENT_TYPE`
/// comparisons.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumVariantNames,
)]
#[strum(ascii_case_insensitive)]
pub enum ElementType {
    #[strum(serialize = "NUMERIC")]
    Numeric,
    #[strum(serialize = "STRING")]
    String,
    #[strum(serialize = "CONSOLIDATED")]
    Consolidated,
}

impl ElementType {
    pub fn parse(text: &str) -> Result<Self> {
        parse_keyword(text)
    }

    pub fn code(&self) -> u8 {
        match self {
            ElementType::Numeric => 1,
            ElementType::String => 2,
            ElementType::Consolidated => 3,
        }
    }
}

/// Scope flag for `DESCENDANTS`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumVariantNames,
)]
#[strum(ascii_case_insensitive)]
pub enum DescFlag {
    #[strum(serialize = "SELF")]
    Self_,
    #[strum(serialize = "AFTER")]
    After,
    #[strum(serialize = "BEFORE")]
    Before,
    #[strum(serialize = "BEFORE_AND_AFTER")]
    BeforeAndAfter,
    #[strum(serialize = "SELF_AND_AFTER")]
    SelfAndAfter,
    #[strum(serialize = "SELF_AND_BEFORE")]
    SelfAndBefore,
    #[strum(serialize = "SELF_BEFORE_AFTER")]
    SelfBeforeAfter,
    #[strum(serialize = "LEAVES")]
    Leaves,
}

impl DescFlag {
    pub fn parse(text: &str) -> Result<Self> {
        parse_keyword(text)
    }
}

/// Comparison written between a filter's left-hand expression and a
/// [Literal](super::Literal).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumVariantNames,
)]
pub enum ComparisonOperator {
    #[default]
    #[strum(serialize = "=")]
    Eq,
    #[strum(to_string = "<>", serialize = "!=")]
    Ne,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = ">=")]
    Ge,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = "<=")]
    Le,
}

impl ComparisonOperator {
    pub fn parse(text: &str) -> Result<Self> {
        parse_keyword(text)
    }
}
