//! Assembles axes, calculated members and a slicer into a statement.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ast::{normalize, CalculatedMember, MdxAxis, MdxHierarchySet, MdxTuple};
use crate::codegen;
use crate::error::Result;
use crate::utils::{IntoMember, IntoProperty};
use crate::RenderOptions;

pub const COLUMNS: u32 = 0;
pub const ROWS: u32 = 1;

/// Builds a complete `SELECT` statement against one cube.
///
/// Axes are addressed by ordinal; `0` is columns and `1` is rows, but any
/// number of higher axes can be populated. Axes that never receive
/// content are skipped when rendering. The fallible methods return the
/// builder again, so construction chains with `?`:
///
/// ```
/// use mdx_builder::{MdxBuilder, MdxHierarchySet};
///
/// # fn main() -> mdx_builder::Result<()> {
/// let mdx = MdxBuilder::from_cube("Sales")
///     .rows_non_empty()
///     .add_hierarchy_set_to_row_axis(MdxHierarchySet::all_leaves("Product", None))?
///     .add_hierarchy_set_to_column_axis(MdxHierarchySet::member(
///         "[Measure].[Revenue]".parse()?,
///     ))?
///     .add_member_to_where("[Period].[2023]")?
///     .to_mdx();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdxBuilder {
    pub(crate) cube: String,
    pub(crate) axes: BTreeMap<u32, MdxAxis>,
    pub(crate) calculated_members: Vec<CalculatedMember>,
    pub(crate) where_tuple: MdxTuple,
    pub(crate) tm1_ignore_bad_tuples: bool,
}

impl MdxBuilder {
    pub fn from_cube(cube: &str) -> Self {
        MdxBuilder {
            cube: normalize(cube),
            // the columns axis always exists; it stays unset until it
            // receives content and is skipped when rendering
            axes: BTreeMap::from([(COLUMNS, MdxAxis::empty())]),
            calculated_members: Vec::new(),
            where_tuple: MdxTuple::empty(),
            tm1_ignore_bad_tuples: false,
        }
    }

    fn axis_mut(&mut self, position: u32) -> &mut MdxAxis {
        self.axes.entry(position).or_default()
    }

    /// Registers a `WITH MEMBER` definition, in order.
    pub fn with_member(mut self, member: CalculatedMember) -> Self {
        self.calculated_members.push(member);
        self
    }

    /// Marks an axis `NON EMPTY`.
    pub fn non_empty(mut self, axis: u32) -> Self {
        self.axis_mut(axis).set_non_empty(true);
        self
    }

    pub fn columns_non_empty(self) -> Self {
        self.non_empty(COLUMNS)
    }

    pub fn rows_non_empty(self) -> Self {
        self.non_empty(ROWS)
    }

    /// Prefixes every rendered axis with `TM1IGNORE_BADTUPLES`.
    pub fn tm1_ignore_bad_tuples(mut self) -> Self {
        self.tm1_ignore_bad_tuples = true;
        self
    }

    pub fn add_tuple_to_axis(mut self, axis: u32, tuple: MdxTuple) -> Result<Self> {
        self.axis_mut(axis).add_tuple(tuple)?;
        Ok(self)
    }

    pub fn add_tuple_to_columns(self, tuple: MdxTuple) -> Result<Self> {
        self.add_tuple_to_axis(COLUMNS, tuple)
    }

    pub fn add_tuple_to_rows(self, tuple: MdxTuple) -> Result<Self> {
        self.add_tuple_to_axis(ROWS, tuple)
    }

    /// Forms one tuple from the given members and adds it to the axis.
    pub fn add_member_tuple_to_axis<I, M>(self, axis: u32, members: I) -> Result<Self>
    where
        I: IntoIterator<Item = M>,
        M: IntoMember,
    {
        let tuple = MdxTuple::of(members)?;
        self.add_tuple_to_axis(axis, tuple)
    }

    pub fn add_member_tuple_to_columns<I, M>(self, members: I) -> Result<Self>
    where
        I: IntoIterator<Item = M>,
        M: IntoMember,
    {
        self.add_member_tuple_to_axis(COLUMNS, members)
    }

    pub fn add_member_tuple_to_rows<I, M>(self, members: I) -> Result<Self>
    where
        I: IntoIterator<Item = M>,
        M: IntoMember,
    {
        self.add_member_tuple_to_axis(ROWS, members)
    }

    pub fn add_hierarchy_set_to_axis(mut self, axis: u32, set: MdxHierarchySet) -> Result<Self> {
        self.axis_mut(axis).add_set(set)?;
        Ok(self)
    }

    pub fn add_hierarchy_set_to_column_axis(self, set: MdxHierarchySet) -> Result<Self> {
        self.add_hierarchy_set_to_axis(COLUMNS, set)
    }

    pub fn add_hierarchy_set_to_row_axis(self, set: MdxHierarchySet) -> Result<Self> {
        self.add_hierarchy_set_to_axis(ROWS, set)
    }

    /// Forces an axis to render as the `{}` placeholder.
    pub fn add_empty_set_to_axis(mut self, axis: u32) -> Result<Self> {
        self.axis_mut(axis).force_empty()?;
        Ok(self)
    }

    /// Adds an entry to the axis' `DIMENSION PROPERTIES` clause.
    pub fn add_properties_to_axis<P: IntoProperty>(
        mut self,
        axis: u32,
        property: P,
    ) -> Result<Self> {
        let property = property.into_property()?;
        self.axis_mut(axis).add_property(property);
        Ok(self)
    }

    pub fn add_properties_to_columns<P: IntoProperty>(self, property: P) -> Result<Self> {
        self.add_properties_to_axis(COLUMNS, property)
    }

    pub fn add_properties_to_rows<P: IntoProperty>(self, property: P) -> Result<Self> {
        self.add_properties_to_axis(ROWS, property)
    }

    /// Adds one coordinate to the slicer tuple.
    pub fn add_member_to_where<M: IntoMember>(self, member: M) -> Result<Self> {
        self.where_members([member])
    }

    pub fn where_members<I, M>(mut self, members: I) -> Result<Self>
    where
        I: IntoIterator<Item = M>,
        M: IntoMember,
    {
        for member in members {
            self.where_tuple.add_member(member.into_member()?);
        }
        Ok(self)
    }

    /// Renders the statement with default options.
    pub fn to_mdx(&self) -> String {
        self.to_mdx_with(&RenderOptions::default())
    }

    pub fn to_mdx_with(&self, options: &RenderOptions) -> String {
        let mdx = codegen::write_query(self, options);
        log::debug!("rendered MDX for cube [{}]: {mdx}", self.cube);
        mdx
    }

    /// Renders one statement per named subset: each query gets a
    /// `TM1SUBSETTOSET` set prepended to the given axis. Useful for
    /// paging one large query through server-side subsets.
    pub fn to_mdx_per_subset(
        &self,
        dimension: &str,
        hierarchy: Option<&str>,
        subsets: &[&str],
        axis: u32,
        options: &RenderOptions,
    ) -> Result<Vec<String>> {
        let mut queries = Vec::with_capacity(subsets.len());
        for subset in subsets {
            let set = MdxHierarchySet::tm1_subset_to_set(dimension, hierarchy, subset);
            let mut builder = self.clone();
            builder.axis_mut(axis).prepend_set(set)?;
            queries.push(builder.to_mdx_with(options));
        }
        Ok(queries)
    }
}

#[cfg(test)]
mod test {
    use similar_asserts::assert_eq;

    use super::*;
    use crate::ast::{Literal, Member};

    #[test]
    fn new_builder_carries_an_unset_columns_axis() {
        let builder = MdxBuilder::from_cube("Cube");

        let json = crate::json::from_query(&builder).unwrap();
        assert!(json.contains("\"0\""));

        // unset, so it does not render
        let mdx = builder
            .add_hierarchy_set_to_row_axis(MdxHierarchySet::tm1_subset_all("d", None))
            .unwrap()
            .to_mdx();
        assert!(!mdx.contains("ON 0"));
        assert!(mdx.contains("ON 1"));
    }

    #[test]
    fn skips_axes_without_content() {
        let mdx = MdxBuilder::from_cube("Cube")
            .add_hierarchy_set_to_axis(2, MdxHierarchySet::tm1_subset_all("d", None))
            .unwrap()
            .to_mdx();

        assert_eq!(
            mdx,
            "SELECT\r\n\
             {TM1SUBSETALL([d].[d])} DIMENSION PROPERTIES MEMBER_NAME ON 2\r\n\
             FROM [cube]"
        );
    }

    #[test]
    fn renders_with_clause_in_order() {
        let lookup = CalculatedMember::lookup(
            "Period",
            None,
            "Lookup",
            "Other Cube",
            MdxTuple::of([Member::of("Measure", "Value")]).unwrap(),
        );
        let mdx = MdxBuilder::from_cube("Cube")
            .with_member(lookup.clone())
            .add_hierarchy_set_to_column_axis(MdxHierarchySet::member(lookup.member().clone()))
            .unwrap()
            .to_mdx();

        assert_eq!(
            mdx,
            "WITH\r\n\
             MEMBER [period].[period].[lookup] AS [othercube].([measure].[measure].[value])\r\n\
             SELECT\r\n\
             {[period].[period].[lookup]} DIMENSION PROPERTIES MEMBER_NAME ON 0\r\n\
             FROM [cube]"
        );
    }

    #[test]
    fn where_tuple_collects_and_deduplicates() {
        let mdx = MdxBuilder::from_cube("Cube")
            .add_hierarchy_set_to_column_axis(MdxHierarchySet::tm1_subset_all("d", None))
            .unwrap()
            .add_member_to_where("[Period].[2023]")
            .unwrap()
            .add_member_to_where(Member::of("Period", "2023"))
            .unwrap()
            .to_mdx();

        assert!(mdx.ends_with("\r\nWHERE ([period].[period].[2023])"));
    }

    #[test]
    fn per_subset_rendering_prepends_the_subset_set() {
        let builder = MdxBuilder::from_cube("Cube")
            .add_hierarchy_set_to_column_axis(MdxHierarchySet::all_leaves("d", None))
            .unwrap();

        let queries = builder
            .to_mdx_per_subset("d", None, &["s1", "s2"], COLUMNS, &RenderOptions::default())
            .unwrap();

        assert_eq!(queries.len(), 2);
        assert!(queries[0].contains(
            "{TM1SUBSETTOSET([d].[d],\"s1\")} * {TM1FILTERBYLEVEL({TM1SUBSETALL([d].[d])},0)}"
        ));
        assert!(queries[1].contains("\"s2\""));
    }

    #[test]
    fn tuple_and_set_content_stay_exclusive() {
        let result = MdxBuilder::from_cube("Cube")
            .add_member_tuple_to_columns(["[d].[e]"])
            .unwrap()
            .add_hierarchy_set_to_column_axis(MdxHierarchySet::tm1_subset_all("d", None));

        assert!(result.is_err());
    }

    #[test]
    fn attribute_filter_values_mix_types() {
        let mdx = MdxBuilder::from_cube("Cube")
            .add_hierarchy_set_to_column_axis(
                MdxHierarchySet::tm1_subset_all("d", None).filter_by_attribute(
                    "Attr",
                    vec![Literal::from("A"), Literal::from(1)],
                    Default::default(),
                ),
            )
            .unwrap()
            .to_mdx();

        assert!(mdx.contains("=\"A\" OR "));
        assert!(mdx.contains("=1)"));
    }
}
