use serde::{Deserialize, Serialize};

use super::ident::{normalize, split_unique_name};
use super::set::MdxHierarchySet;
use super::tuple::MdxTuple;
use crate::error::{Error, Result};

/// A single element reference, pinned to a dimension and hierarchy.
///
/// All names are stored normalized, so equality between two members is
/// exactly equality of their unique names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    dimension: String,
    hierarchy: String,
    element: MemberElement,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberElement {
    Name(String),
    /// Renders as the `CURRENTMEMBER` keyword instead of a bracketed name.
    CurrentMember,
}

impl Member {
    /// A member of the default hierarchy, which TM1 names after the
    /// dimension itself.
    pub fn of(dimension: &str, element: &str) -> Self {
        Member::of_hierarchy(dimension, dimension, element)
    }

    pub fn of_hierarchy(dimension: &str, hierarchy: &str, element: &str) -> Self {
        Member {
            dimension: normalize(dimension),
            hierarchy: normalize(hierarchy),
            element: MemberElement::Name(normalize(element)),
        }
    }

    /// The `CURRENTMEMBER` of a dimension's default hierarchy.
    pub fn current(dimension: &str) -> Self {
        Member::current_of_hierarchy(dimension, dimension)
    }

    pub fn current_of_hierarchy(dimension: &str, hierarchy: &str) -> Self {
        Member {
            dimension: normalize(dimension),
            hierarchy: normalize(hierarchy),
            element: MemberElement::CurrentMember,
        }
    }

    /// Parses a unique name in two-segment (`[dim].[elem]`) or
    /// three-segment (`[dim].[hier].[elem]`) form. The two-segment form
    /// resolves the hierarchy to the dimension. A trailing
    /// `.CurrentMember` yields the keyword member instead of a named one.
    pub fn parse(unique_name: &str) -> Result<Self> {
        if let Some(prefix) = strip_current_member(unique_name) {
            let (dimension, hierarchy) = parse_hierarchy_prefix(prefix, unique_name)?;
            return Ok(Member::current_of_hierarchy(dimension, hierarchy));
        }

        let (dimension, hierarchy, element) = split_unique_name(unique_name)?;
        Ok(Member::of_hierarchy(
            dimension,
            hierarchy.unwrap_or(dimension),
            element,
        ))
    }

    pub fn dimension(&self) -> &str {
        &self.dimension
    }

    pub fn hierarchy(&self) -> &str {
        &self.hierarchy
    }

    pub fn element(&self) -> &MemberElement {
        &self.element
    }
}

impl std::str::FromStr for Member {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Member::parse(s)
    }
}

/// Case-insensitively strips a `.CurrentMember` suffix, returning the
/// bracketed prefix in front of it.
fn strip_current_member(unique_name: &str) -> Option<&str> {
    const SUFFIX: &str = ".currentmember";
    let lowered = unique_name.to_ascii_lowercase();
    lowered
        .ends_with(SUFFIX)
        .then(|| &unique_name[..unique_name.len() - SUFFIX.len()])
}

/// Parses `[dim]` or `[dim].[hier]` in front of a keyword suffix.
fn parse_hierarchy_prefix<'a>(prefix: &'a str, original: &str) -> Result<(&'a str, &'a str)> {
    let err = || {
        Error::format(
            "a unique name of the form [dimension].CurrentMember or [dimension].[hierarchy].CurrentMember",
            original,
        )
    };

    if !prefix.starts_with('[') || !prefix.ends_with(']') {
        return Err(err());
    }
    match prefix.matches("].[").count() {
        0 => {
            let dimension = &prefix[1..prefix.len() - 1];
            Ok((dimension, dimension))
        }
        1 => {
            let sep = prefix.find("].[").ok_or_else(err)?;
            Ok((&prefix[1..sep], &prefix[sep + 3..prefix.len() - 1]))
        }
        _ => Err(err()),
    }
}

/// An element attribute carried alongside an axis as a
/// `DIMENSION PROPERTIES` entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DimensionProperty {
    dimension: String,
    hierarchy: String,
    attribute: String,
}

impl DimensionProperty {
    pub fn of(dimension: &str, attribute: &str) -> Self {
        DimensionProperty::of_hierarchy(dimension, dimension, attribute)
    }

    pub fn of_hierarchy(dimension: &str, hierarchy: &str, attribute: &str) -> Self {
        DimensionProperty {
            dimension: normalize(dimension),
            hierarchy: normalize(hierarchy),
            attribute: normalize(attribute),
        }
    }

    pub fn parse(unique_name: &str) -> Result<Self> {
        let (dimension, hierarchy, attribute) = split_unique_name(unique_name)?;
        Ok(DimensionProperty::of_hierarchy(
            dimension,
            hierarchy.unwrap_or(dimension),
            attribute,
        ))
    }

    pub fn dimension(&self) -> &str {
        &self.dimension
    }

    pub fn hierarchy(&self) -> &str {
        &self.hierarchy
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }
}

/// A query-scoped `WITH MEMBER` definition: a member plus the expression
/// that computes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedMember {
    pub(crate) member: Member,
    pub(crate) calculation: Calculation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) enum Calculation {
    Aggregate {
        function: AggregateFunction,
        cube: String,
        set: MdxHierarchySet,
        tuple: MdxTuple,
    },
    /// Reads a cell from another (or the same) cube.
    CellLookup { cube: String, tuple: MdxTuple },
    /// Reads an attribute value through the dimension's attribute cube.
    AttributeLookup { dimension: String, attribute: String },
    /// Reads a member property via `PROPERTIES(...)`.
    PropertyLookup {
        member: Member,
        property: String,
        typed: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub(crate) enum AggregateFunction {
    #[strum(serialize = "AVG")]
    Avg,
    #[strum(serialize = "SUM")]
    Sum,
}

impl CalculatedMember {
    fn aggregate(
        function: AggregateFunction,
        dimension: &str,
        hierarchy: Option<&str>,
        element: &str,
        cube: &str,
        set: MdxHierarchySet,
        tuple: MdxTuple,
    ) -> Self {
        CalculatedMember {
            member: member_of(dimension, hierarchy, element),
            calculation: Calculation::Aggregate {
                function,
                cube: normalize(cube),
                set,
                tuple,
            },
        }
    }

    /// Averages a cube view spanned by `set` and `tuple`.
    pub fn avg(
        dimension: &str,
        hierarchy: Option<&str>,
        element: &str,
        cube: &str,
        set: MdxHierarchySet,
        tuple: MdxTuple,
    ) -> Self {
        Self::aggregate(AggregateFunction::Avg, dimension, hierarchy, element, cube, set, tuple)
    }

    /// Sums a cube view spanned by `set` and `tuple`.
    pub fn sum(
        dimension: &str,
        hierarchy: Option<&str>,
        element: &str,
        cube: &str,
        set: MdxHierarchySet,
        tuple: MdxTuple,
    ) -> Self {
        Self::aggregate(AggregateFunction::Sum, dimension, hierarchy, element, cube, set, tuple)
    }

    /// Reads the cell addressed by `tuple` in `cube`.
    pub fn lookup(
        dimension: &str,
        hierarchy: Option<&str>,
        element: &str,
        cube: &str,
        tuple: MdxTuple,
    ) -> Self {
        CalculatedMember {
            member: member_of(dimension, hierarchy, element),
            calculation: Calculation::CellLookup {
                cube: normalize(cube),
                tuple,
            },
        }
    }

    /// Reads an element attribute of `attribute_dimension`'s current
    /// member through its attribute cube.
    pub fn lookup_attribute(
        dimension: &str,
        hierarchy: Option<&str>,
        element: &str,
        attribute_dimension: &str,
        attribute: &str,
    ) -> Self {
        CalculatedMember {
            member: member_of(dimension, hierarchy, element),
            calculation: Calculation::AttributeLookup {
                dimension: normalize(attribute_dimension),
                attribute: normalize(attribute),
            },
        }
    }

    /// Reads a member property, for example `MEMBER_NAME`. The property
    /// name is passed to TM1 verbatim. `typed` asks for the raw value
    /// instead of its string form.
    pub fn lookup_property(
        dimension: &str,
        hierarchy: Option<&str>,
        element: &str,
        of: Member,
        property: &str,
        typed: bool,
    ) -> Self {
        CalculatedMember {
            member: member_of(dimension, hierarchy, element),
            calculation: Calculation::PropertyLookup {
                member: of,
                property: property.to_string(),
                typed,
            },
        }
    }

    pub fn member(&self) -> &Member {
        &self.member
    }
}

fn member_of(dimension: &str, hierarchy: Option<&str>, element: &str) -> Member {
    Member::of_hierarchy(dimension, hierarchy.unwrap_or(dimension), element)
}
