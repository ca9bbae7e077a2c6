use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::member::{DimensionProperty, Member};
use crate::error::Result;
use crate::utils::{IntoMember, IntoProperty};

/// An ordered collection of members, one coordinate per hierarchy.
///
/// Members are kept in insertion order and deduplicated by unique name;
/// adding a member that is already present is a no-op. The empty tuple is
/// valid and renders as `()`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MdxTuple {
    members: IndexSet<Member>,
}

impl MdxTuple {
    pub fn empty() -> Self {
        MdxTuple::default()
    }

    /// Builds a tuple from members or unique names, in order.
    pub fn of<I, M>(members: I) -> Result<Self>
    where
        I: IntoIterator<Item = M>,
        M: IntoMember,
    {
        let mut tuple = MdxTuple::empty();
        for member in members {
            tuple.add_member(member.into_member()?);
        }
        Ok(tuple)
    }

    pub fn add_member(&mut self, member: Member) {
        self.members.insert(member);
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    pub fn first(&self) -> Option<&Member> {
        self.members.first()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// The `DIMENSION PROPERTIES` clause of one axis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MdxPropertiesTuple {
    properties: Vec<DimensionProperty>,
}

impl MdxPropertiesTuple {
    pub fn empty() -> Self {
        MdxPropertiesTuple::default()
    }

    pub fn of<I, P>(properties: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: IntoProperty,
    {
        let mut tuple = MdxPropertiesTuple::empty();
        for property in properties {
            tuple.add_property(property.into_property()?);
        }
        Ok(tuple)
    }

    pub fn add_property(&mut self, property: DimensionProperty) {
        self.properties.push(property);
    }

    pub fn properties(&self) -> impl Iterator<Item = &DimensionProperty> {
        self.properties.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn members_deduplicate_by_unique_name() {
        let mut tuple = MdxTuple::of(["[d1].[e1]", "[d2].[e2]"]).unwrap();
        tuple.add_member(Member::of("D 1", "E 1"));

        assert_eq!(tuple.len(), 2);
        assert_eq!(tuple.first(), Some(&Member::of("d1", "e1")));
    }

    #[test]
    fn of_rejects_malformed_unique_names() {
        assert!(MdxTuple::of(["not a unique name"]).is_err());
    }
}
