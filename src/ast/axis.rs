use serde::{Deserialize, Serialize};

use super::member::DimensionProperty;
use super::set::MdxHierarchySet;
use super::tuple::{MdxPropertiesTuple, MdxTuple};
use crate::error::{Error, Result};

/// One projection axis of a query.
///
/// An axis holds either tuples or sets, never both. Mixing the two, or
/// adding content to an axis forced empty, is an invalid-state error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MdxAxis {
    content: AxisContent,
    non_empty: bool,
    properties: MdxPropertiesTuple,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub(crate) enum AxisContent {
    /// Nothing added yet. An unset axis is skipped when rendering.
    #[default]
    Unset,
    /// Renders as the `{}` placeholder.
    EmptySet,
    Tuples(Vec<MdxTuple>),
    Sets(Vec<MdxHierarchySet>),
}

impl MdxAxis {
    pub fn empty() -> Self {
        MdxAxis::default()
    }

    pub fn add_tuple(&mut self, tuple: MdxTuple) -> Result<()> {
        match &mut self.content {
            AxisContent::Unset => {
                self.content = AxisContent::Tuples(vec![tuple]);
                Ok(())
            }
            AxisContent::Tuples(tuples) => {
                tuples.push(tuple);
                Ok(())
            }
            AxisContent::Sets(_) => Err(Error::invalid_state(
                "cannot add tuples to an axis that already holds sets",
            )),
            AxisContent::EmptySet => Err(Error::invalid_state(
                "cannot add tuples to an axis forced empty",
            )),
        }
    }

    pub fn add_set(&mut self, set: MdxHierarchySet) -> Result<()> {
        match &mut self.content {
            AxisContent::Unset => {
                self.content = AxisContent::Sets(vec![set]);
                Ok(())
            }
            AxisContent::Sets(sets) => {
                sets.push(set);
                Ok(())
            }
            AxisContent::Tuples(_) => Err(Error::invalid_state(
                "cannot add sets to an axis that already holds tuples",
            )),
            AxisContent::EmptySet => Err(Error::invalid_state(
                "cannot add sets to an axis forced empty",
            )),
        }
    }

    /// Inserts a set in front of the ones already present.
    pub fn prepend_set(&mut self, set: MdxHierarchySet) -> Result<()> {
        match &mut self.content {
            AxisContent::Unset => {
                self.content = AxisContent::Sets(vec![set]);
                Ok(())
            }
            AxisContent::Sets(sets) => {
                sets.insert(0, set);
                Ok(())
            }
            AxisContent::Tuples(_) => Err(Error::invalid_state(
                "cannot add sets to an axis that already holds tuples",
            )),
            AxisContent::EmptySet => Err(Error::invalid_state(
                "cannot add sets to an axis forced empty",
            )),
        }
    }

    /// Forces the axis to render as the `{}` placeholder. Only valid on
    /// an axis without content.
    pub fn force_empty(&mut self) -> Result<()> {
        match self.content {
            AxisContent::Unset | AxisContent::EmptySet => {
                self.content = AxisContent::EmptySet;
                Ok(())
            }
            _ => Err(Error::invalid_state(
                "cannot force an axis empty once it holds tuples or sets",
            )),
        }
    }

    pub fn set_non_empty(&mut self, non_empty: bool) {
        self.non_empty = non_empty;
    }

    pub fn non_empty(&self) -> bool {
        self.non_empty
    }

    pub fn add_property(&mut self, property: DimensionProperty) {
        self.properties.add_property(property);
    }

    pub fn properties(&self) -> &MdxPropertiesTuple {
        &self.properties
    }

    /// True while nothing has been added. Such axes are silently skipped
    /// by the builder; a forced-empty axis on the other hand does render.
    pub fn is_unset(&self) -> bool {
        matches!(self.content, AxisContent::Unset)
    }

    pub(crate) fn content(&self) -> &AxisContent {
        &self.content
    }
}
