//! Renders the expression tree to MDX text.
//!
//! All spelling decisions live here: keyword casing, quoting, separator
//! placement. The tree itself stays free of query text, so the same tree
//! can be rendered in full or short notation.

use itertools::Itertools;

use crate::ast::{
    AxisContent, CalculatedMember, Calculation, DimensionProperty, LevelKind,
    Literal, MdxAxis, MdxHierarchySet, MdxLevelExpression, MdxPropertiesTuple, MdxTuple, Member,
    MemberElement, SetKind, ELEMENT_ATTRIBUTE_PREFIX,
};
use crate::builder::MdxBuilder;
use crate::{Notation, RenderOptions};

const CRLF: &str = "\r\n";

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Context {
    pub notation: Notation,
}

pub(crate) fn write_member(member: &Member, ctx: &Context) -> String {
    let element = match member.element() {
        MemberElement::Name(name) => format!("[{name}]"),
        MemberElement::CurrentMember => "CURRENTMEMBER".to_string(),
    };
    let (dimension, hierarchy) = (member.dimension(), member.hierarchy());
    match ctx.notation {
        Notation::Short if dimension == hierarchy => format!("[{dimension}].{element}"),
        _ => format!("[{dimension}].[{hierarchy}].{element}"),
    }
}

pub(crate) fn write_property(property: &DimensionProperty, ctx: &Context) -> String {
    let (dimension, hierarchy) = (property.dimension(), property.hierarchy());
    let attribute = property.attribute();
    match ctx.notation {
        Notation::Short if dimension == hierarchy => format!("[{dimension}].[{attribute}]"),
        _ => format!("[{dimension}].[{hierarchy}].[{attribute}]"),
    }
}

pub(crate) fn write_tuple(tuple: &MdxTuple, ctx: &Context) -> String {
    format!(
        "({})",
        tuple.members().map(|m| write_member(m, ctx)).join(",")
    )
}

fn write_properties_tuple(properties: &MdxPropertiesTuple, ctx: &Context) -> String {
    properties
        .properties()
        .map(|p| write_property(p, ctx))
        .join(",")
}

pub(crate) fn write_level(level: &MdxLevelExpression, ctx: &Context) -> String {
    match &level.kind {
        LevelKind::Number {
            dimension,
            hierarchy,
            level,
        } => format!("[{dimension}].[{hierarchy}].LEVELS({level})"),
        LevelKind::Name {
            dimension,
            hierarchy,
            name,
        } => format!("[{dimension}].[{hierarchy}].LEVELS('{name}')"),
        LevelKind::OfMember(member) => format!("{}.LEVEL", write_member(member, ctx)),
    }
}

pub(crate) fn write_calculated_member(member: &CalculatedMember, ctx: &Context) -> String {
    let name = write_member(&member.member, ctx);
    let calculation = match &member.calculation {
        Calculation::Aggregate {
            function,
            cube,
            set,
            tuple,
        } => format!(
            "{function}({},[{cube}].{})",
            write_set(set, ctx),
            write_tuple(tuple, ctx)
        ),
        Calculation::CellLookup { cube, tuple } => {
            format!("[{cube}].{}", write_tuple(tuple, ctx))
        }
        Calculation::AttributeLookup {
            dimension,
            attribute,
        } => {
            let cube = format!("{ELEMENT_ATTRIBUTE_PREFIX}{dimension}");
            format!("[{cube}].([{cube}].[{attribute}])")
        }
        Calculation::PropertyLookup {
            member,
            property,
            typed,
        } => {
            let typed = if *typed { ", TYPED" } else { "" };
            format!(
                "{}.PROPERTIES('{property}'{typed})",
                write_member(member, ctx)
            )
        }
    };
    format!("MEMBER {name} AS {calculation}")
}

/// Literal in a double-quoted position (attribute and property filters).
fn write_literal_dq(literal: &Literal) -> String {
    match literal {
        Literal::String(s) => format!("\"{s}\""),
        other => other.to_string(),
    }
}

/// Literal in a single-quoted position (cell value filters).
fn write_literal_sq(literal: &Literal) -> String {
    match literal {
        Literal::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}

pub(crate) fn write_set(set: &MdxHierarchySet, ctx: &Context) -> String {
    let (dimension, hierarchy) = (set.dimension(), set.hierarchy());
    match &set.kind {
        SetKind::Tm1SubsetAll => format!("{{TM1SUBSETALL([{dimension}].[{hierarchy}])}}"),
        SetKind::AllMembers => format!("{{[{dimension}].[{hierarchy}].MEMBERS}}"),
        SetKind::AllConsolidations => format!(
            "{{EXCEPT({{TM1SUBSETALL([{dimension}].[{hierarchy}])}},{{TM1FILTERBYLEVEL({{TM1SUBSETALL([{dimension}].[{hierarchy}])}},0)}})}}"
        ),
        SetKind::AllLeaves => format!(
            "{{TM1FILTERBYLEVEL({{TM1SUBSETALL([{dimension}].[{hierarchy}])}},0)}}"
        ),
        SetKind::DefaultMember => format!("{{[{dimension}].[{hierarchy}].DEFAULTMEMBER}}"),
        SetKind::Members(members) => format!(
            "{{{}}}",
            members.iter().map(|m| write_member(m, ctx)).join(",")
        ),
        SetKind::Tm1SubsetToSet { subset } => format!(
            "{{TM1SUBSETTOSET([{dimension}].[{hierarchy}],\"{subset}\")}}"
        ),
        SetKind::Raw { mdx } => mdx.clone(),
        SetKind::Parent(member) => format!("{{{}.PARENT}}", write_member(member, ctx)),
        SetKind::FirstChild(member) => format!("{{{}.FIRSTCHILD}}", write_member(member, ctx)),
        SetKind::LastChild(member) => format!("{{{}.LASTCHILD}}", write_member(member, ctx)),
        SetKind::Children(member) => format!("{{{}.CHILDREN}}", write_member(member, ctx)),
        SetKind::Ancestors(member) => format!("{{{}.ANCESTORS}}", write_member(member, ctx)),
        SetKind::Ancestor { member, distance } => {
            format!("{{ANCESTOR({},{distance})}}", write_member(member, ctx))
        }
        SetKind::DrillDownLevel { member, level } => {
            let mut mdx = String::from("{");
            for _ in 0..*level {
                mdx.push_str("DRILLDOWNLEVEL(");
            }
            mdx.push('{');
            mdx.push_str(&write_member(member, ctx));
            mdx.push('}');
            for _ in 0..*level {
                mdx.push(')');
            }
            mdx.push('}');
            mdx
        }
        SetKind::Descendants { member, level, flag } => {
            let mut arguments = vec![write_member(member, ctx)];
            if let Some(level) = level {
                arguments.push(write_level(level, ctx));
            }
            if let Some(flag) = flag {
                arguments.push(flag.to_string());
            }
            format!("{{DESCENDANTS({})}}", arguments.join(", "))
        }
        SetKind::Range { first, last } => format!(
            "{{{}:{}}}",
            write_member(first, ctx),
            write_member(last, ctx)
        ),
        SetKind::Tm1DrillDownMember {
            set,
            other,
            recursive,
        } => {
            let other = match other {
                Some(other) => write_set(other, ctx),
                None => "ALL".to_string(),
            };
            let recursive = if *recursive { ", RECURSIVE" } else { "" };
            format!(
                "{{TM1DRILLDOWNMEMBER({}, {other}{recursive})}}",
                write_set(set, ctx)
            )
        }
        SetKind::FilterByAttribute {
            set,
            attribute,
            values,
            operator,
        } => {
            let cube = format!("{ELEMENT_ATTRIBUTE_PREFIX}{dimension}");
            let conditions = values
                .iter()
                .map(|value| {
                    format!(
                        "[{cube}].([{cube}].[{attribute}]){operator}{}",
                        write_literal_dq(value)
                    )
                })
                .join(" OR ");
            format!("{{FILTER({},{conditions})}}", write_set(set, ctx))
        }
        SetKind::FilterByProperty {
            set,
            property,
            values,
            operator,
        } => {
            let conditions = values
                .iter()
                .map(|value| {
                    format!(
                        "[{dimension}].[{hierarchy}].CURRENTMEMBER.PROPERTIES('{property}'){operator}{}",
                        write_literal_dq(value)
                    )
                })
                .join(" OR ");
            format!("{{FILTER({},{conditions})}}", write_set(set, ctx))
        }
        SetKind::FilterByPattern { set, wildcard } => format!(
            "{{TM1FILTERBYPATTERN({},'{wildcard}')}}",
            write_set(set, ctx)
        ),
        SetKind::FilterByLevel { set, level } => {
            format!("{{TM1FILTERBYLEVEL({},{level})}}", write_set(set, ctx))
        }
        SetKind::FilterByElementType { set, element_type } => format!(
            "{{FILTER({},[{dimension}].[{hierarchy}].CURRENTMEMBER.PROPERTIES('ELEMENT_TYPE')='{}')}}",
            write_set(set, ctx),
            element_type.code()
        ),
        SetKind::FilterByCellValue {
            set,
            cube,
            tuple,
            operator,
            value,
        } => format!(
            "{{FILTER({},[{cube}].{}{operator}{})}}",
            write_set(set, ctx),
            write_tuple(tuple, ctx),
            write_literal_sq(value)
        ),
        SetKind::FilterByInstr {
            set,
            cube,
            tuple,
            substring,
            operator,
            position,
            case_insensitive,
        } => {
            let cell = format!("[{cube}].{}", write_tuple(tuple, ctx));
            let cell = if *case_insensitive {
                format!("LCASE({cell})")
            } else {
                cell
            };
            format!(
                "{{FILTER({},INSTR({cell},'{substring}'){operator}{position})}}",
                write_set(set, ctx)
            )
        }
        SetKind::Tm1Sort { set, ascending } => format!(
            "{{TM1SORT({},{})}}",
            write_set(set, ctx),
            if *ascending { "ASC" } else { "DESC" }
        ),
        SetKind::OrderByCellValue {
            set,
            cube,
            tuple,
            order,
        } => format!(
            "{{ORDER({},[{cube}].{},{order})}}",
            write_set(set, ctx),
            write_tuple(tuple, ctx)
        ),
        SetKind::OrderByAttribute {
            set,
            attribute,
            order,
        } => format!(
            "{{ORDER({},[{dimension}].[{hierarchy}].CURRENTMEMBER.PROPERTIES(\"{attribute}\"), {order})}}",
            write_set(set, ctx)
        ),
        SetKind::Hierarchize { set } => format!("{{HIERARCHIZE({})}}", write_set(set, ctx)),
        SetKind::Head { set, count } => format!("{{HEAD({},{count})}}", write_set(set, ctx)),
        SetKind::Tail { set, count } => format!("{{TAIL({},{count})}}", write_set(set, ctx)),
        SetKind::Subset { set, start, length } => {
            format!("{{SUBSET({},{start},{length})}}", write_set(set, ctx))
        }
        SetKind::TopCount {
            set,
            cube,
            tuple,
            count,
        } => format!(
            "{{TOPCOUNT({},{count},[{cube}].{})}}",
            write_set(set, ctx),
            write_tuple(tuple, ctx)
        ),
        SetKind::BottomCount {
            set,
            cube,
            tuple,
            count,
        } => format!(
            "{{BOTTOMCOUNT({},{count},[{cube}].{})}}",
            write_set(set, ctx),
            write_tuple(tuple, ctx)
        ),
        SetKind::Union {
            left,
            right,
            allow_duplicates,
        } => {
            let all = if *allow_duplicates { ", ALL" } else { "" };
            format!(
                "{{UNION({},{}{all})}}",
                write_set(left, ctx),
                write_set(right, ctx)
            )
        }
        SetKind::Intersect { left, right } => format!(
            "{{INTERSECT({},{})}}",
            write_set(left, ctx),
            write_set(right, ctx)
        ),
        SetKind::Except { left, right } => format!(
            "{{EXCEPT({},{})}}",
            write_set(left, ctx),
            write_set(right, ctx)
        ),
        SetKind::Unions {
            sets,
            allow_duplicates,
        } => {
            let separator = if *allow_duplicates { "," } else { " + " };
            format!(
                "{{{}}}",
                sets.iter().map(|s| write_set(s, ctx)).join(separator)
            )
        }
        SetKind::CrossJoins { sets } => format!(
            "{{{}}}",
            sets.iter().map(|s| write_set(s, ctx)).join(" * ")
        ),
        SetKind::Tuples { tuples } => format!(
            "{{ {} }}",
            tuples.iter().map(|t| write_tuple(t, ctx)).join(",")
        ),
        SetKind::GenerateAttributeToMember { set, attribute } => {
            let source = format!(
                "[{}].[{}].CURRENTMEMBER.PROPERTIES(\"{attribute}\")",
                set.dimension(),
                set.hierarchy()
            );
            format!(
                "{{GENERATE({},{{STRTOMEMBER('[{dimension}].[{hierarchy}].[' + {source} + ']')}})}}",
                write_set(set, ctx)
            )
        }
    }
}

/// Per-axis render knobs taken from [RenderOptions].
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct AxisWindow {
    pub head: Option<u32>,
    pub tail: Option<u32>,
}

impl RenderOptions {
    pub(crate) fn axis_window(&self, position: u32) -> AxisWindow {
        match position {
            crate::builder::COLUMNS => AxisWindow {
                head: self.head_columns,
                tail: self.tail_columns,
            },
            crate::builder::ROWS => AxisWindow {
                head: self.head_rows,
                tail: self.tail_rows,
            },
            _ => AxisWindow::default(),
        }
    }
}

/// Renders the axis body. `None` means the axis was never populated and
/// the builder should skip it entirely.
pub(crate) fn write_axis(
    axis: &MdxAxis,
    ignore_bad_tuples: bool,
    window: AxisWindow,
    ctx: &Context,
) -> Option<String> {
    let body = match axis.content() {
        AxisContent::Unset => return None,
        AxisContent::EmptySet => return Some("{}".to_string()),
        AxisContent::Tuples(tuples) => format!(
            "{{{}}}",
            tuples.iter().map(|t| write_tuple(t, ctx)).join(",")
        ),
        AxisContent::Sets(sets) => sets.iter().map(|s| write_set(s, ctx)).join(" * "),
    };

    let body = match window.head {
        Some(head) => format!("{{HEAD({body}, {head})}}"),
        None => body,
    };
    let body = match window.tail {
        Some(tail) => format!("{{TAIL({body}, {tail})}}"),
        None => body,
    };

    let non_empty = if axis.non_empty() { "NON EMPTY " } else { "" };
    let bad_tuples = if ignore_bad_tuples {
        "TM1IGNORE_BADTUPLES "
    } else {
        ""
    };
    Some(format!("{non_empty}{bad_tuples}{body}"))
}

/// Renders the complete statement.
pub(crate) fn write_query(builder: &MdxBuilder, options: &RenderOptions) -> String {
    let ctx = Context {
        notation: options.notation,
    };

    let mut mdx = String::new();

    if !builder.calculated_members.is_empty() {
        mdx.push_str("WITH");
        mdx.push_str(CRLF);
        mdx.push_str(
            &builder
                .calculated_members
                .iter()
                .map(|m| write_calculated_member(m, &ctx))
                .join(CRLF),
        );
        mdx.push_str(CRLF);
    }

    mdx.push_str("SELECT");
    mdx.push_str(CRLF);

    let axes = builder
        .axes
        .iter()
        .filter_map(|(position, axis)| {
            let window = options.axis_window(*position);
            let body = write_axis(axis, builder.tm1_ignore_bad_tuples, window, &ctx)?;
            let properties = if options.skip_dimension_properties {
                String::new()
            } else if axis.properties().is_empty() {
                " DIMENSION PROPERTIES MEMBER_NAME".to_string()
            } else {
                format!(
                    " DIMENSION PROPERTIES {}",
                    write_properties_tuple(axis.properties(), &ctx)
                )
            };
            Some(format!("{body}{properties} ON {position}"))
        })
        .join(&format!(",{CRLF}"));
    mdx.push_str(&axes);

    mdx.push_str(CRLF);
    mdx.push_str(&format!("FROM [{}]", builder.cube));

    if !builder.where_tuple.is_empty() {
        mdx.push_str(CRLF);
        mdx.push_str(&format!("WHERE {}", write_tuple(&builder.where_tuple, &ctx)));
    }

    mdx
}

impl Member {
    /// The member's canonical unique name.
    pub fn unique_name(&self) -> String {
        write_member(self, &Context::default())
    }

    /// The unique name under a given notation.
    pub fn unique_name_with(&self, notation: Notation) -> String {
        write_member(self, &Context { notation })
    }
}

impl DimensionProperty {
    pub fn unique_name(&self) -> String {
        write_property(self, &Context::default())
    }
}

impl MdxTuple {
    pub fn to_mdx(&self) -> String {
        write_tuple(self, &Context::default())
    }
}

impl MdxHierarchySet {
    pub fn to_mdx(&self) -> String {
        write_set(self, &Context::default())
    }

    pub fn to_mdx_with(&self, notation: Notation) -> String {
        write_set(self, &Context { notation })
    }
}

impl MdxLevelExpression {
    pub fn to_mdx(&self) -> String {
        write_level(self, &Context::default())
    }
}

impl CalculatedMember {
    pub fn to_mdx(&self) -> String {
        write_calculated_member(self, &Context::default())
    }
}

impl std::fmt::Display for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.unique_name())
    }
}

impl std::fmt::Display for MdxTuple {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.to_mdx())
    }
}

impl std::fmt::Display for MdxHierarchySet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.to_mdx())
    }
}

#[cfg(test)]
mod test {
    use insta::assert_snapshot;

    use crate::ast::*;
    use crate::Notation;

    fn member(element: &str) -> Member {
        Member::of("Dimension", element)
    }

    fn base() -> MdxHierarchySet {
        MdxHierarchySet::tm1_subset_all("Dimension", None)
    }

    #[test]
    fn member_unique_names() {
        assert_snapshot!(
            member("Element 1").unique_name(),
            @"[dimension].[dimension].[element1]"
        );
        assert_snapshot!(
            Member::of_hierarchy("Dim", "Leaves", "Elem").unique_name(),
            @"[dim].[leaves].[elem]"
        );
        assert_snapshot!(
            Member::current("Dimension").unique_name(),
            @"[dimension].[dimension].CURRENTMEMBER"
        );
    }

    #[test]
    fn short_notation_elides_default_hierarchies() {
        assert_snapshot!(
            member("Element 1").unique_name_with(Notation::Short),
            @"[dimension].[element1]"
        );
        // explicit hierarchies always stay
        assert_snapshot!(
            Member::of_hierarchy("Dim", "Leaves", "Elem").unique_name_with(Notation::Short),
            @"[dim].[leaves].[elem]"
        );
    }

    #[test]
    fn tuples() {
        assert_snapshot!(MdxTuple::empty().to_mdx(), @"()");
        let tuple = MdxTuple::of([member("e1"), member("e2")]).unwrap();
        assert_snapshot!(
            tuple.to_mdx(),
            @"([dimension].[dimension].[e1],[dimension].[dimension].[e2])"
        );
    }

    #[test]
    fn leaf_sets() {
        assert_snapshot!(base().to_mdx(), @"{TM1SUBSETALL([dimension].[dimension])}");
        assert_snapshot!(
            MdxHierarchySet::all_members("Dimension", None).to_mdx(),
            @"{[dimension].[dimension].MEMBERS}"
        );
        assert_snapshot!(
            MdxHierarchySet::all_consolidations("Dimension", None).to_mdx(),
            @"{EXCEPT({TM1SUBSETALL([dimension].[dimension])},{TM1FILTERBYLEVEL({TM1SUBSETALL([dimension].[dimension])},0)})}"
        );
        assert_snapshot!(
            MdxHierarchySet::all_leaves("Dimension", None).to_mdx(),
            @"{TM1FILTERBYLEVEL({TM1SUBSETALL([dimension].[dimension])},0)}"
        );
        assert_snapshot!(
            MdxHierarchySet::default_member("Dimension", None).to_mdx(),
            @"{[dimension].[dimension].DEFAULTMEMBER}"
        );
        assert_snapshot!(
            MdxHierarchySet::tm1_subset_to_set("Dimension", None, "Default").to_mdx(),
            @r#"{TM1SUBSETTOSET([dimension].[dimension],"Default")}"#
        );
        assert_snapshot!(
            MdxHierarchySet::raw("Dimension", None, "{[dimension].[dimension].[element1]}").to_mdx(),
            @"{[dimension].[dimension].[element1]}"
        );
    }

    #[test]
    fn member_sets() {
        assert_snapshot!(
            MdxHierarchySet::member(member("Element 1")).to_mdx(),
            @"{[dimension].[dimension].[element1]}"
        );
        assert_snapshot!(
            MdxHierarchySet::members(vec![member("e1"), member("e2")]).unwrap().to_mdx(),
            @"{[dimension].[dimension].[e1],[dimension].[dimension].[e2]}"
        );
    }

    #[test]
    fn navigation_sets() {
        let m = member("Element 1");
        assert_snapshot!(
            MdxHierarchySet::parent(m.clone()).to_mdx(),
            @"{[dimension].[dimension].[element1].PARENT}"
        );
        assert_snapshot!(
            MdxHierarchySet::first_child(m.clone()).to_mdx(),
            @"{[dimension].[dimension].[element1].FIRSTCHILD}"
        );
        assert_snapshot!(
            MdxHierarchySet::last_child(m.clone()).to_mdx(),
            @"{[dimension].[dimension].[element1].LASTCHILD}"
        );
        assert_snapshot!(
            MdxHierarchySet::children(m.clone()).to_mdx(),
            @"{[dimension].[dimension].[element1].CHILDREN}"
        );
        assert_snapshot!(
            MdxHierarchySet::ancestors(m.clone()).to_mdx(),
            @"{[dimension].[dimension].[element1].ANCESTORS}"
        );
        assert_snapshot!(
            MdxHierarchySet::ancestor(m.clone(), 1).to_mdx(),
            @"{ANCESTOR([dimension].[dimension].[element1],1)}"
        );
        assert_snapshot!(
            MdxHierarchySet::range(member("e1"), member("e5")).to_mdx(),
            @"{[dimension].[dimension].[e1]:[dimension].[dimension].[e5]}"
        );
    }

    #[test]
    fn drill_down_level_nests_per_level() {
        assert_snapshot!(
            MdxHierarchySet::drill_down_level(member("e1"), 1).to_mdx(),
            @"{DRILLDOWNLEVEL({[dimension].[dimension].[e1]})}"
        );
        assert_snapshot!(
            MdxHierarchySet::drill_down_level(member("e1"), 3).to_mdx(),
            @"{DRILLDOWNLEVEL(DRILLDOWNLEVEL(DRILLDOWNLEVEL({[dimension].[dimension].[e1]})))}"
        );
    }

    #[test]
    fn descendants_with_optional_arguments() {
        let m = member("e1");
        assert_snapshot!(
            MdxHierarchySet::descendants(m.clone(), None, None).to_mdx(),
            @"{DESCENDANTS([dimension].[dimension].[e1])}"
        );
        assert_snapshot!(
            MdxHierarchySet::descendants(m.clone(), None, Some(DescFlag::SelfAndBefore)).to_mdx(),
            @"{DESCENDANTS([dimension].[dimension].[e1], SELF_AND_BEFORE)}"
        );
        let level = MdxLevelExpression::number("Dimension", None, 2);
        assert_snapshot!(
            MdxHierarchySet::descendants(m, Some(level), Some(DescFlag::SelfAndBefore)).to_mdx(),
            @"{DESCENDANTS([dimension].[dimension].[e1], [dimension].[dimension].LEVELS(2), SELF_AND_BEFORE)}"
        );
    }

    #[test]
    fn drill_down_member() {
        assert_snapshot!(
            base().tm1_drill_down_member(None, true).to_mdx(),
            @"{TM1DRILLDOWNMEMBER({TM1SUBSETALL([dimension].[dimension])}, ALL, RECURSIVE)}"
        );
        let other = MdxHierarchySet::member(member("e1"));
        assert_snapshot!(
            base().tm1_drill_down_member(Some(other), false).to_mdx(),
            @"{TM1DRILLDOWNMEMBER({TM1SUBSETALL([dimension].[dimension])}, {[dimension].[dimension].[e1]})}"
        );
    }

    #[test]
    fn attribute_filter() {
        let set = base().filter_by_attribute(
            "Attribute 1",
            vec![Literal::from("V 1"), Literal::from(2.0)],
            ComparisonOperator::Eq,
        );
        assert_snapshot!(
            set.to_mdx(),
            @r#"{FILTER({TM1SUBSETALL([dimension].[dimension])},[}ELEMENTATTRIBUTES_dimension].([}ELEMENTATTRIBUTES_dimension].[attribute1])="V 1" OR [}ELEMENTATTRIBUTES_dimension].([}ELEMENTATTRIBUTES_dimension].[attribute1])=2.0)}"#
        );
    }

    #[test]
    fn property_filter() {
        let set = base().filter_by_property(
            "WEIGHT",
            vec![Literal::from(1), Literal::from(-1)],
            ComparisonOperator::Eq,
        );
        assert_snapshot!(
            set.to_mdx(),
            @"{FILTER({TM1SUBSETALL([dimension].[dimension])},[dimension].[dimension].CURRENTMEMBER.PROPERTIES('WEIGHT')=1 OR [dimension].[dimension].CURRENTMEMBER.PROPERTIES('WEIGHT')=-1)}"
        );
    }

    #[test]
    fn pattern_level_and_type_filters() {
        assert_snapshot!(
            base().filter_by_pattern("2011*").to_mdx(),
            @"{TM1FILTERBYPATTERN({TM1SUBSETALL([dimension].[dimension])},'2011*')}"
        );
        assert_snapshot!(
            base().filter_by_level(0).to_mdx(),
            @"{TM1FILTERBYLEVEL({TM1SUBSETALL([dimension].[dimension])},0)}"
        );
        assert_snapshot!(
            base().filter_by_element_type(ElementType::Numeric).to_mdx(),
            @"{FILTER({TM1SUBSETALL([dimension].[dimension])},[dimension].[dimension].CURRENTMEMBER.PROPERTIES('ELEMENT_TYPE')='1')}"
        );
    }

    #[test]
    fn cell_value_filter_quotes_strings_singly() {
        let tuple = MdxTuple::of([Member::of("d2", "e2")]).unwrap();
        assert_snapshot!(
            base()
                .filter_by_cell_value("Cube", tuple.clone(), ComparisonOperator::Eq, Literal::from(1))
                .to_mdx(),
            @"{FILTER({TM1SUBSETALL([dimension].[dimension])},[cube].([d2].[d2].[e2])=1)}"
        );
        assert_snapshot!(
            base()
                .filter_by_cell_value("Cube", tuple, ComparisonOperator::Ne, Literal::from("ABC"))
                .to_mdx(),
            @"{FILTER({TM1SUBSETALL([dimension].[dimension])},[cube].([d2].[d2].[e2])<>'ABC')}"
        );
    }

    #[test]
    fn instr_filter() {
        let tuple = MdxTuple::of([Member::of("d2", "e2")]).unwrap();
        assert_snapshot!(
            base()
                .filter_by_instr("Cube", tuple.clone(), "SubString", ComparisonOperator::Gt, 0, true)
                .to_mdx(),
            @"{FILTER({TM1SUBSETALL([dimension].[dimension])},INSTR(LCASE([cube].([d2].[d2].[e2])),'substring')>0)}"
        );
        assert_snapshot!(
            base()
                .filter_by_instr("Cube", tuple, "SubString", ComparisonOperator::Gt, 0, false)
                .to_mdx(),
            @"{FILTER({TM1SUBSETALL([dimension].[dimension])},INSTR([cube].([d2].[d2].[e2]),'SubString')>0)}"
        );
    }

    #[test]
    fn sorting_and_ordering() {
        assert_snapshot!(
            base().tm1_sort(true).to_mdx(),
            @"{TM1SORT({TM1SUBSETALL([dimension].[dimension])},ASC)}"
        );
        let tuple = MdxTuple::of([Member::of("d2", "e2")]).unwrap();
        assert_snapshot!(
            base().order("Cube", tuple, Order::Basc).to_mdx(),
            @"{ORDER({TM1SUBSETALL([dimension].[dimension])},[cube].([d2].[d2].[e2]),BASC)}"
        );
        assert_snapshot!(
            base().order_by_attribute("Attribute 1", Order::Asc).to_mdx(),
            @r#"{ORDER({TM1SUBSETALL([dimension].[dimension])},[dimension].[dimension].CURRENTMEMBER.PROPERTIES("attribute1"), ASC)}"#
        );
        assert_snapshot!(
            base().hierarchize().to_mdx(),
            @"{HIERARCHIZE({TM1SUBSETALL([dimension].[dimension])})}"
        );
    }

    #[test]
    fn paging() {
        assert_snapshot!(base().head(10).to_mdx(), @"{HEAD({TM1SUBSETALL([dimension].[dimension])},10)}");
        assert_snapshot!(base().tail(10).to_mdx(), @"{TAIL({TM1SUBSETALL([dimension].[dimension])},10)}");
        assert_snapshot!(
            base().subset(1, 3).to_mdx(),
            @"{SUBSET({TM1SUBSETALL([dimension].[dimension])},1,3)}"
        );
        let tuple = MdxTuple::of([Member::of("d2", "e2")]).unwrap();
        assert_snapshot!(
            base().top_count("Cube", tuple.clone(), 10).to_mdx(),
            @"{TOPCOUNT({TM1SUBSETALL([dimension].[dimension])},10,[cube].([d2].[d2].[e2]))}"
        );
        assert_snapshot!(
            base().bottom_count("Cube", tuple, 10).to_mdx(),
            @"{BOTTOMCOUNT({TM1SUBSETALL([dimension].[dimension])},10,[cube].([d2].[d2].[e2]))}"
        );
    }

    #[test]
    fn set_algebra() {
        let leaves = MdxHierarchySet::all_leaves("Dimension", None);
        assert_snapshot!(
            base().union(leaves.clone(), false).to_mdx(),
            @"{UNION({TM1SUBSETALL([dimension].[dimension])},{TM1FILTERBYLEVEL({TM1SUBSETALL([dimension].[dimension])},0)})}"
        );
        assert_snapshot!(
            base().union(leaves.clone(), true).to_mdx(),
            @"{UNION({TM1SUBSETALL([dimension].[dimension])},{TM1FILTERBYLEVEL({TM1SUBSETALL([dimension].[dimension])},0)}, ALL)}"
        );
        assert_snapshot!(
            base().intersect(leaves.clone()).to_mdx(),
            @"{INTERSECT({TM1SUBSETALL([dimension].[dimension])},{TM1FILTERBYLEVEL({TM1SUBSETALL([dimension].[dimension])},0)})}"
        );
        assert_snapshot!(
            base().except(leaves).to_mdx(),
            @"{EXCEPT({TM1SUBSETALL([dimension].[dimension])},{TM1FILTERBYLEVEL({TM1SUBSETALL([dimension].[dimension])},0)})}"
        );
    }

    #[test]
    fn n_ary_combinators() {
        let sets = vec![
            MdxSet::member(member("e1")),
            MdxSet::member(member("e2")),
        ];
        assert_snapshot!(
            MdxSet::unions(sets.clone(), false).unwrap().to_mdx(),
            @"{{[dimension].[dimension].[e1]} + {[dimension].[dimension].[e2]}}"
        );
        assert_snapshot!(
            MdxSet::unions(sets, true).unwrap().to_mdx(),
            @"{{[dimension].[dimension].[e1]},{[dimension].[dimension].[e2]}}"
        );

        let joined = vec![
            MdxSet::member(Member::of("d1", "e1")),
            MdxSet::member(Member::of("d2", "e2")),
        ];
        assert_snapshot!(
            MdxSet::cross_joins(joined).unwrap().to_mdx(),
            @"{{[d1].[d1].[e1]} * {[d2].[d2].[e2]}}"
        );

        let tuples = vec![
            MdxTuple::of([Member::of("d1", "e1"), Member::of("d2", "e2")]).unwrap(),
            MdxTuple::of([Member::of("d1", "e2"), Member::of("d2", "e1")]).unwrap(),
        ];
        assert_snapshot!(
            MdxSet::tuples(tuples).unwrap().to_mdx(),
            @"{ ([d1].[d1].[e1],[d2].[d2].[e2]),([d1].[d1].[e2],[d2].[d2].[e1]) }"
        );
    }

    #[test]
    fn generate_attribute_to_member() {
        let set = MdxHierarchySet::tm1_subset_all("Store", None)
            .generate_attribute_to_member("Manager", "Manager", None);
        assert_snapshot!(
            set.to_mdx(),
            @r#"{GENERATE({TM1SUBSETALL([store].[store])},{STRTOMEMBER('[manager].[manager].[' + [store].[store].CURRENTMEMBER.PROPERTIES("Manager") + ']')})}"#
        );
    }

    #[test]
    fn level_expressions() {
        assert_snapshot!(
            MdxLevelExpression::number("Dimension", None, 8).to_mdx(),
            @"[dimension].[dimension].LEVELS(8)"
        );
        assert_snapshot!(
            MdxLevelExpression::named("Dimension", None, "NamedLevel").to_mdx(),
            @"[dimension].[dimension].LEVELS('NamedLevel')"
        );
        assert_snapshot!(
            MdxLevelExpression::of_member(member("e1")).to_mdx(),
            @"[dimension].[dimension].[e1].LEVEL"
        );
    }

    #[test]
    fn calculated_members() {
        let set = MdxHierarchySet::tm1_subset_all("Period", None);
        let tuple = MdxTuple::of([Member::of("Measure", "Value")]).unwrap();
        assert_snapshot!(
            CalculatedMember::avg("Period", None, "AVG 2016", "Cube", set.clone(), tuple.clone()).to_mdx(),
            @"MEMBER [period].[period].[avg2016] AS AVG({TM1SUBSETALL([period].[period])},[cube].([measure].[measure].[value]))"
        );
        assert_snapshot!(
            CalculatedMember::sum("Period", None, "SUM 2016", "Cube", set, tuple.clone()).to_mdx(),
            @"MEMBER [period].[period].[sum2016] AS SUM({TM1SUBSETALL([period].[period])},[cube].([measure].[measure].[value]))"
        );
        assert_snapshot!(
            CalculatedMember::lookup("Period", None, "Lookup", "Other Cube", tuple).to_mdx(),
            @"MEMBER [period].[period].[lookup] AS [othercube].([measure].[measure].[value])"
        );
        assert_snapshot!(
            CalculatedMember::lookup_attribute("Period", None, "Attr", "Store", "Manager").to_mdx(),
            @"MEMBER [period].[period].[attr] AS [}ELEMENTATTRIBUTES_store].([}ELEMENTATTRIBUTES_store].[manager])"
        );
        assert_snapshot!(
            CalculatedMember::lookup_property(
                "Period", None, "Name", Member::current("Period"), "MEMBER_NAME", false
            ).to_mdx(),
            @"MEMBER [period].[period].[name] AS [period].[period].CURRENTMEMBER.PROPERTIES('MEMBER_NAME')"
        );
        assert_snapshot!(
            CalculatedMember::lookup_property(
                "Period", None, "Name", Member::current("Period"), "MEMBER_NAME", true
            ).to_mdx(),
            @"MEMBER [period].[period].[name] AS [period].[period].CURRENTMEMBER.PROPERTIES('MEMBER_NAME', TYPED)"
        );
    }

    #[test]
    fn short_notation_threads_through_composites() {
        let set = MdxHierarchySet::member(member("e1"))
            .union(MdxHierarchySet::member(Member::of_hierarchy("d", "h", "e2")), false);
        assert_snapshot!(
            set.to_mdx_with(Notation::Short),
            @"{UNION({[dimension].[e1]},{[d].[h].[e2]})}"
        );
    }
}
