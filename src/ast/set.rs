use serde::{Deserialize, Serialize};

use super::ident::normalize;
use super::level::MdxLevelExpression;
use super::literal::Literal;
use super::member::Member;
use super::ops::{ComparisonOperator, DescFlag, ElementType, Order};
use super::tuple::MdxTuple;
use crate::error::{Error, Result};

/// A set expression over one hierarchy.
///
/// Sets are immutable: the chaining methods consume `self` and return a
/// new node wrapping it, so the same base set can be reused to derive
/// several different queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdxHierarchySet {
    dimension: String,
    hierarchy: String,
    pub(crate) kind: SetKind,
}

/// Alias for contexts that deal in whole sets rather than a single
/// hierarchy, such as the n-ary combinators `unions`, `cross_joins` and
/// `tuples`.
pub type MdxSet = MdxHierarchySet;

/// The closed vocabulary of set expressions. Leaf variants carry their
/// operands, composite variants wrap the set(s) they transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) enum SetKind {
    Tm1SubsetAll,
    AllMembers,
    AllConsolidations,
    AllLeaves,
    DefaultMember,
    Members(Vec<Member>),
    Tm1SubsetToSet {
        subset: String,
    },
    /// Caller-supplied MDX passed through verbatim.
    Raw {
        mdx: String,
    },
    Parent(Member),
    FirstChild(Member),
    LastChild(Member),
    Children(Member),
    Ancestors(Member),
    Ancestor {
        member: Member,
        distance: u32,
    },
    DrillDownLevel {
        member: Member,
        level: u32,
    },
    Descendants {
        member: Member,
        level: Option<MdxLevelExpression>,
        flag: Option<DescFlag>,
    },
    Range {
        first: Member,
        last: Member,
    },
    Tm1DrillDownMember {
        set: Box<MdxHierarchySet>,
        other: Option<Box<MdxHierarchySet>>,
        recursive: bool,
    },
    FilterByAttribute {
        set: Box<MdxHierarchySet>,
        attribute: String,
        values: Vec<Literal>,
        operator: ComparisonOperator,
    },
    FilterByProperty {
        set: Box<MdxHierarchySet>,
        property: String,
        values: Vec<Literal>,
        operator: ComparisonOperator,
    },
    FilterByPattern {
        set: Box<MdxHierarchySet>,
        wildcard: String,
    },
    FilterByLevel {
        set: Box<MdxHierarchySet>,
        level: u32,
    },
    FilterByElementType {
        set: Box<MdxHierarchySet>,
        element_type: ElementType,
    },
    FilterByCellValue {
        set: Box<MdxHierarchySet>,
        cube: String,
        tuple: MdxTuple,
        operator: ComparisonOperator,
        value: Literal,
    },
    FilterByInstr {
        set: Box<MdxHierarchySet>,
        cube: String,
        tuple: MdxTuple,
        substring: String,
        operator: ComparisonOperator,
        position: u32,
        case_insensitive: bool,
    },
    Tm1Sort {
        set: Box<MdxHierarchySet>,
        ascending: bool,
    },
    OrderByCellValue {
        set: Box<MdxHierarchySet>,
        cube: String,
        tuple: MdxTuple,
        order: Order,
    },
    OrderByAttribute {
        set: Box<MdxHierarchySet>,
        attribute: String,
        order: Order,
    },
    Hierarchize {
        set: Box<MdxHierarchySet>,
    },
    Head {
        set: Box<MdxHierarchySet>,
        count: u32,
    },
    Tail {
        set: Box<MdxHierarchySet>,
        count: u32,
    },
    Subset {
        set: Box<MdxHierarchySet>,
        start: u32,
        length: u32,
    },
    TopCount {
        set: Box<MdxHierarchySet>,
        cube: String,
        tuple: MdxTuple,
        count: u32,
    },
    BottomCount {
        set: Box<MdxHierarchySet>,
        cube: String,
        tuple: MdxTuple,
        count: u32,
    },
    Union {
        left: Box<MdxHierarchySet>,
        right: Box<MdxHierarchySet>,
        allow_duplicates: bool,
    },
    Intersect {
        left: Box<MdxHierarchySet>,
        right: Box<MdxHierarchySet>,
    },
    Except {
        left: Box<MdxHierarchySet>,
        right: Box<MdxHierarchySet>,
    },
    Unions {
        sets: Vec<MdxHierarchySet>,
        allow_duplicates: bool,
    },
    CrossJoins {
        sets: Vec<MdxHierarchySet>,
    },
    Tuples {
        tuples: Vec<MdxTuple>,
    },
    /// Maps every member of the wrapped set to a member of another
    /// dimension through an attribute value.
    GenerateAttributeToMember {
        set: Box<MdxHierarchySet>,
        attribute: String,
    },
}

fn hierarchy_or_dimension(dimension: &str, hierarchy: Option<&str>) -> (String, String) {
    let dimension = normalize(dimension);
    let hierarchy = hierarchy.map(normalize).unwrap_or_else(|| dimension.clone());
    (dimension, hierarchy)
}

impl MdxHierarchySet {
    fn of_hierarchy(dimension: &str, hierarchy: Option<&str>, kind: SetKind) -> Self {
        let (dimension, hierarchy) = hierarchy_or_dimension(dimension, hierarchy);
        MdxHierarchySet {
            dimension,
            hierarchy,
            kind,
        }
    }

    fn of_member(member: Member, kind: SetKind) -> Self {
        MdxHierarchySet {
            dimension: member.dimension().to_string(),
            hierarchy: member.hierarchy().to_string(),
            kind,
        }
    }

    /// Wraps `self` into a composite node that keeps its hierarchy tag.
    fn wrap(self, kind: impl FnOnce(Box<MdxHierarchySet>) -> SetKind) -> Self {
        MdxHierarchySet {
            dimension: self.dimension.clone(),
            hierarchy: self.hierarchy.clone(),
            kind: kind(Box::new(self)),
        }
    }

    pub fn dimension(&self) -> &str {
        &self.dimension
    }

    pub fn hierarchy(&self) -> &str {
        &self.hierarchy
    }

    // --- leaf constructors -------------------------------------------------

    /// Every member of the hierarchy, including consolidations.
    pub fn tm1_subset_all(dimension: &str, hierarchy: Option<&str>) -> Self {
        Self::of_hierarchy(dimension, hierarchy, SetKind::Tm1SubsetAll)
    }

    pub fn all_members(dimension: &str, hierarchy: Option<&str>) -> Self {
        Self::of_hierarchy(dimension, hierarchy, SetKind::AllMembers)
    }

    pub fn all_consolidations(dimension: &str, hierarchy: Option<&str>) -> Self {
        Self::of_hierarchy(dimension, hierarchy, SetKind::AllConsolidations)
    }

    pub fn all_leaves(dimension: &str, hierarchy: Option<&str>) -> Self {
        Self::of_hierarchy(dimension, hierarchy, SetKind::AllLeaves)
    }

    pub fn default_member(dimension: &str, hierarchy: Option<&str>) -> Self {
        Self::of_hierarchy(dimension, hierarchy, SetKind::DefaultMember)
    }

    /// A server-side named subset. The subset name is passed verbatim.
    pub fn tm1_subset_to_set(dimension: &str, hierarchy: Option<&str>, subset: &str) -> Self {
        Self::of_hierarchy(
            dimension,
            hierarchy,
            SetKind::Tm1SubsetToSet {
                subset: subset.to_string(),
            },
        )
    }

    /// A hand-written set expression adopted verbatim, tagged with the
    /// hierarchy it ranges over.
    pub fn raw(dimension: &str, hierarchy: Option<&str>, mdx: &str) -> Self {
        Self::of_hierarchy(
            dimension,
            hierarchy,
            SetKind::Raw {
                mdx: mdx.to_string(),
            },
        )
    }

    pub fn member(member: Member) -> Self {
        Self::of_member(member.clone(), SetKind::Members(vec![member]))
    }

    pub fn members(members: Vec<Member>) -> Result<Self> {
        let first = members
            .first()
            .ok_or_else(|| Error::invalid_argument("a member set needs at least one member"))?
            .clone();
        Ok(Self::of_member(first, SetKind::Members(members)))
    }

    pub fn parent(member: Member) -> Self {
        Self::of_member(member.clone(), SetKind::Parent(member))
    }

    pub fn first_child(member: Member) -> Self {
        Self::of_member(member.clone(), SetKind::FirstChild(member))
    }

    pub fn last_child(member: Member) -> Self {
        Self::of_member(member.clone(), SetKind::LastChild(member))
    }

    pub fn children(member: Member) -> Self {
        Self::of_member(member.clone(), SetKind::Children(member))
    }

    pub fn ancestors(member: Member) -> Self {
        Self::of_member(member.clone(), SetKind::Ancestors(member))
    }

    pub fn ancestor(member: Member, distance: u32) -> Self {
        Self::of_member(member.clone(), SetKind::Ancestor { member, distance })
    }

    /// Drills `level` levels down from `member`. Level zero is treated
    /// as one.
    pub fn drill_down_level(member: Member, level: u32) -> Self {
        Self::of_member(
            member.clone(),
            SetKind::DrillDownLevel {
                member,
                level: level.max(1),
            },
        )
    }

    pub fn descendants(
        member: Member,
        level: Option<MdxLevelExpression>,
        flag: Option<DescFlag>,
    ) -> Self {
        Self::of_member(member.clone(), SetKind::Descendants { member, level, flag })
    }

    /// All members between `first` and `last` in hierarchy order.
    pub fn range(first: Member, last: Member) -> Self {
        Self::of_member(first.clone(), SetKind::Range { first, last })
    }

    // --- n-ary combinators -------------------------------------------------

    /// Folds several sets into one. Without duplicates the sets are
    /// joined with `+`, with duplicates they are simply concatenated.
    pub fn unions(sets: Vec<MdxHierarchySet>, allow_duplicates: bool) -> Result<Self> {
        let first = sets
            .first()
            .ok_or_else(|| Error::invalid_argument("a union needs at least one set"))?;
        Ok(MdxHierarchySet {
            dimension: first.dimension.clone(),
            hierarchy: first.hierarchy.clone(),
            kind: SetKind::Unions {
                sets,
                allow_duplicates,
            },
        })
    }

    /// The cartesian product of sets over distinct hierarchies.
    pub fn cross_joins(sets: Vec<MdxHierarchySet>) -> Result<Self> {
        let first = sets
            .first()
            .ok_or_else(|| Error::invalid_argument("a cross join needs at least one set"))?;
        Ok(MdxHierarchySet {
            dimension: first.dimension.clone(),
            hierarchy: first.hierarchy.clone(),
            kind: SetKind::CrossJoins { sets },
        })
    }

    /// An explicit list of tuples as a set.
    pub fn tuples(tuples: Vec<MdxTuple>) -> Result<Self> {
        let first = tuples
            .iter()
            .find_map(|t| t.first())
            .ok_or_else(|| Error::invalid_argument("a tuple set needs at least one member"))?;
        let (dimension, hierarchy) = (first.dimension().to_string(), first.hierarchy().to_string());
        Ok(MdxHierarchySet {
            dimension,
            hierarchy,
            kind: SetKind::Tuples { tuples },
        })
    }

    // --- chaining transformations ------------------------------------------

    /// Keeps members whose element attribute matches one of `values`.
    pub fn filter_by_attribute(
        self,
        attribute: &str,
        values: Vec<Literal>,
        operator: ComparisonOperator,
    ) -> Self {
        let attribute = normalize(attribute);
        self.wrap(|set| SetKind::FilterByAttribute {
            set,
            attribute,
            values,
            operator,
        })
    }

    /// Keeps members whose property (for example `Member_Name` or
    /// `WEIGHT`) matches one of `values`. The property name is passed
    /// verbatim.
    pub fn filter_by_property(
        self,
        property: &str,
        values: Vec<Literal>,
        operator: ComparisonOperator,
    ) -> Self {
        let property = property.to_string();
        self.wrap(|set| SetKind::FilterByProperty {
            set,
            property,
            values,
            operator,
        })
    }

    /// Keeps members whose name matches a wildcard pattern such as
    /// `2011*`.
    pub fn filter_by_pattern(self, wildcard: &str) -> Self {
        let wildcard = wildcard.to_string();
        self.wrap(|set| SetKind::FilterByPattern { set, wildcard })
    }

    pub fn filter_by_level(self, level: u32) -> Self {
        self.wrap(|set| SetKind::FilterByLevel { set, level })
    }

    pub fn filter_by_element_type(self, element_type: ElementType) -> Self {
        self.wrap(|set| SetKind::FilterByElementType { set, element_type })
    }

    /// Keeps members for which the cell addressed by `tuple` in `cube`
    /// compares as requested against `value`.
    pub fn filter_by_cell_value(
        self,
        cube: &str,
        tuple: MdxTuple,
        operator: ComparisonOperator,
        value: Literal,
    ) -> Self {
        let cube = normalize(cube);
        self.wrap(|set| SetKind::FilterByCellValue {
            set,
            cube,
            tuple,
            operator,
            value,
        })
    }

    /// Keeps members whose cell value contains `substring`, via `INSTR`.
    /// With `case_insensitive` both sides are lowercased.
    pub fn filter_by_instr(
        self,
        cube: &str,
        tuple: MdxTuple,
        substring: &str,
        operator: ComparisonOperator,
        position: u32,
        case_insensitive: bool,
    ) -> Self {
        let cube = normalize(cube);
        let substring = if case_insensitive {
            substring.to_lowercase()
        } else {
            substring.to_string()
        };
        self.wrap(|set| SetKind::FilterByInstr {
            set,
            cube,
            tuple,
            substring,
            operator,
            position,
            case_insensitive,
        })
    }

    pub fn tm1_sort(self, ascending: bool) -> Self {
        self.wrap(|set| SetKind::Tm1Sort { set, ascending })
    }

    pub fn order(self, cube: &str, tuple: MdxTuple, order: Order) -> Self {
        let cube = normalize(cube);
        self.wrap(|set| SetKind::OrderByCellValue {
            set,
            cube,
            tuple,
            order,
        })
    }

    pub fn order_by_attribute(self, attribute: &str, order: Order) -> Self {
        let attribute = normalize(attribute);
        self.wrap(|set| SetKind::OrderByAttribute {
            set,
            attribute,
            order,
        })
    }

    pub fn hierarchize(self) -> Self {
        self.wrap(|set| SetKind::Hierarchize { set })
    }

    pub fn head(self, count: u32) -> Self {
        self.wrap(|set| SetKind::Head { set, count })
    }

    pub fn tail(self, count: u32) -> Self {
        self.wrap(|set| SetKind::Tail { set, count })
    }

    /// `length` members starting at zero-based `start`.
    pub fn subset(self, start: u32, length: u32) -> Self {
        self.wrap(|set| SetKind::Subset { set, start, length })
    }

    pub fn top_count(self, cube: &str, tuple: MdxTuple, count: u32) -> Self {
        let cube = normalize(cube);
        self.wrap(|set| SetKind::TopCount {
            set,
            cube,
            tuple,
            count,
        })
    }

    pub fn bottom_count(self, cube: &str, tuple: MdxTuple, count: u32) -> Self {
        let cube = normalize(cube);
        self.wrap(|set| SetKind::BottomCount {
            set,
            cube,
            tuple,
            count,
        })
    }

    pub fn union(self, other: MdxHierarchySet, allow_duplicates: bool) -> Self {
        self.wrap(|left| SetKind::Union {
            left,
            right: Box::new(other),
            allow_duplicates,
        })
    }

    pub fn intersect(self, other: MdxHierarchySet) -> Self {
        self.wrap(|left| SetKind::Intersect {
            left,
            right: Box::new(other),
        })
    }

    pub fn except(self, other: MdxHierarchySet) -> Self {
        self.wrap(|left| SetKind::Except {
            left,
            right: Box::new(other),
        })
    }

    /// Expands consolidated members of the set, optionally against a
    /// second set and recursively.
    pub fn tm1_drill_down_member(self, other: Option<MdxHierarchySet>, recursive: bool) -> Self {
        self.wrap(|set| SetKind::Tm1DrillDownMember {
            set,
            other: other.map(Box::new),
            recursive,
        })
    }

    /// Maps each member to the member of `dimension` named by its
    /// `attribute` value. The resulting set ranges over the target
    /// hierarchy, not over `self`'s.
    pub fn generate_attribute_to_member(
        self,
        attribute: &str,
        dimension: &str,
        hierarchy: Option<&str>,
    ) -> Self {
        let (dimension, hierarchy) = hierarchy_or_dimension(dimension, hierarchy);
        MdxHierarchySet {
            dimension,
            hierarchy,
            kind: SetKind::GenerateAttributeToMember {
                set: Box::new(self),
                attribute: attribute.to_string(),
            },
        }
    }
}
