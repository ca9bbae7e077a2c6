use crate::ast::{DimensionProperty, Member};
use crate::error::Result;

/// Anything that can stand in for a [Member] in an argument position:
/// a constructed node, or a unique name that still needs parsing.
pub trait IntoMember {
    fn into_member(self) -> Result<Member>;
}

impl IntoMember for Member {
    fn into_member(self) -> Result<Member> {
        Ok(self)
    }
}

impl IntoMember for &Member {
    fn into_member(self) -> Result<Member> {
        Ok(self.clone())
    }
}

impl IntoMember for &str {
    fn into_member(self) -> Result<Member> {
        Member::parse(self)
    }
}

impl IntoMember for String {
    fn into_member(self) -> Result<Member> {
        Member::parse(&self)
    }
}

/// The same convenience for [DimensionProperty] argument positions.
pub trait IntoProperty {
    fn into_property(self) -> Result<DimensionProperty>;
}

impl IntoProperty for DimensionProperty {
    fn into_property(self) -> Result<DimensionProperty> {
        Ok(self)
    }
}

impl IntoProperty for &str {
    fn into_property(self) -> Result<DimensionProperty> {
        DimensionProperty::parse(self)
    }
}

impl IntoProperty for String {
    fn into_property(self) -> Result<DimensionProperty> {
        DimensionProperty::parse(&self)
    }
}
