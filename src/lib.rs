//! Composable MDX query builder for TM1.
//!
//! Queries are assembled as an immutable expression tree and only turned
//! into text at the very end:
//!
//! - [ast] holds the nodes: members, tuples, hierarchy sets, axes and
//!   calculated members. Constructors normalize names once; combinators
//!   wrap existing nodes instead of mutating them.
//! - [MdxBuilder] collects axes, a `WITH` block and a slicer for one cube.
//! - `codegen` renders the finished tree to a single statement, the only
//!   place that knows MDX spelling.
//!
//! ## Example
//!
//! ```
//! use mdx_builder::{MdxBuilder, MdxHierarchySet};
//!
//! # fn main() -> mdx_builder::Result<()> {
//! let mdx = MdxBuilder::from_cube("Sales")
//!     .add_hierarchy_set_to_row_axis(MdxHierarchySet::all_leaves("Product", None))?
//!     .add_hierarchy_set_to_column_axis(MdxHierarchySet::member(
//!         "[Measure].[Revenue]".parse()?,
//!     ))?
//!     .to_mdx();
//! assert!(mdx.starts_with("SELECT"));
//! # Ok(())
//! # }
//! ```

pub mod ast;
mod builder;
pub(crate) mod codegen;
mod error;
mod utils;

use once_cell::sync::Lazy;
use semver::Version;
use serde::{Deserialize, Serialize};

pub use ast::{
    CalculatedMember, ComparisonOperator, DescFlag, DimensionProperty, ElementType, Literal,
    MdxAxis, MdxHierarchySet, MdxLevelExpression, MdxPropertiesTuple, MdxSet, MdxTuple, Member,
    MemberElement, Order,
};
pub use builder::{MdxBuilder, COLUMNS, ROWS};
pub use error::{Error, Reason, Result, WithErrorInfo};
pub use utils::{IntoMember, IntoProperty};

pub static MDX_BUILDER_VERSION: Lazy<Version> = Lazy::new(|| {
    Version::parse(env!("CARGO_PKG_VERSION")).expect("Invalid mdx-builder version number")
});

/// How member unique names are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Notation {
    /// Always `[dimension].[hierarchy].[element]`.
    #[default]
    Full,
    /// `[dimension].[element]` wherever the hierarchy is the default one.
    Short,
}

/// Render knobs applied to a whole statement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Leave the `DIMENSION PROPERTIES` clause off every axis.
    pub skip_dimension_properties: bool,

    /// Wrap the column axis in `HEAD(..)` / `TAIL(..)`.
    pub head_columns: Option<u32>,
    pub tail_columns: Option<u32>,

    /// Same for the row axis.
    pub head_rows: Option<u32>,
    pub tail_rows: Option<u32>,

    pub notation: Notation,
}

impl RenderOptions {
    pub fn no_dimension_properties(mut self) -> Self {
        self.skip_dimension_properties = true;
        self
    }

    pub fn with_head_columns(mut self, count: u32) -> Self {
        self.head_columns = Some(count);
        self
    }

    pub fn with_tail_columns(mut self, count: u32) -> Self {
        self.tail_columns = Some(count);
        self
    }

    pub fn with_head_rows(mut self, count: u32) -> Self {
        self.head_rows = Some(count);
        self
    }

    pub fn with_tail_rows(mut self, count: u32) -> Self {
        self.tail_rows = Some(count);
        self
    }

    pub fn short_notation(mut self) -> Self {
        self.notation = Notation::Short;
        self
    }
}

/// JSON serialization of queries and their parts.
pub mod json {
    use super::*;

    pub fn from_query(builder: &MdxBuilder) -> Result<String> {
        serde_json::to_string(builder).map_err(conversion_error)
    }

    pub fn to_query(json: &str) -> Result<MdxBuilder> {
        serde_json::from_str(json).map_err(conversion_error)
    }

    pub fn from_set(set: &MdxHierarchySet) -> Result<String> {
        serde_json::to_string(set).map_err(conversion_error)
    }

    pub fn to_set(json: &str) -> Result<MdxHierarchySet> {
        serde_json::from_str(json).map_err(conversion_error)
    }

    fn conversion_error(error: serde_json::Error) -> Error {
        Error::format("a JSON query representation", error.to_string())
    }
}
