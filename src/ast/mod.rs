//! The expression tree that queries are assembled from.
//!
//! Every node type here is a plain immutable value: constructors
//! normalize names once, combinators build new nodes around existing
//! ones, and nothing renders text until `codegen` walks the finished
//! tree.

mod axis;
pub mod ident;
mod level;
mod literal;
mod member;
mod ops;
mod set;
mod tuple;

pub use axis::MdxAxis;
pub(crate) use axis::AxisContent;
pub use ident::{normalize, ELEMENT_ATTRIBUTE_PREFIX};
pub use level::MdxLevelExpression;
pub(crate) use level::LevelKind;
pub use literal::Literal;
pub use member::{CalculatedMember, DimensionProperty, Member, MemberElement};
pub(crate) use member::Calculation;
pub use ops::{ComparisonOperator, DescFlag, ElementType, Order};
pub use set::{MdxHierarchySet, MdxSet};
pub(crate) use set::SetKind;
pub use tuple::{MdxPropertiesTuple, MdxTuple};
