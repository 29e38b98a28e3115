//! Closed tag sets shared across the dimensional model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of axis a dimension represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DimensionType {
    DataX,
    Period,
    OrganisationUnit,
    CategoryOptionCombo,
    DataElementGroupSet,
    OrganisationUnitGroupSet,
    Category,
    CategoryOptionGroupSet,
    ProgramAttribute,
    ProgramDataElement,
    ProgramIndicator,
    Static,
}

/// The kind of a single dimension item.
///
/// The tag determines composite-identifier arity: one identifier for plain
/// items, three for operands (third optional), two for reporting rates and
/// program-scoped items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DimensionItemType {
    DataElement,
    DataElementOperand,
    Indicator,
    ReportingRate,
    ProgramDataElement,
    ProgramAttribute,
    ProgramIndicator,
    TrackedEntityAttribute,
    Period,
    OrganisationUnit,
    CategoryOptionCombo,
}

impl DimensionItemType {
    /// Number of identifier slots the composite grammar expects for this kind.
    pub fn identifier_count(&self) -> usize {
        match self {
            Self::DataElementOperand => 3,
            Self::ReportingRate | Self::ProgramDataElement | Self::ProgramAttribute => 2,
            _ => 1,
        }
    }

    /// True for kinds whose dimension-item string is a dotted composite.
    pub fn is_composite(&self) -> bool {
        self.identifier_count() > 1
    }
}

/// How values are aggregated along a dimension, when overridden per item or
/// per dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregationType {
    Sum,
    Average,
    Count,
    Stddev,
    Variance,
    Min,
    Max,
    First,
    Last,
    None,
    Custom,
    Default,
}

impl fmt::Display for AggregationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sum => "SUM",
            Self::Average => "AVERAGE",
            Self::Count => "COUNT",
            Self::Stddev => "STDDEV",
            Self::Variance => "VARIANCE",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::First => "FIRST",
            Self::Last => "LAST",
            Self::None => "NONE",
            Self::Custom => "CUSTOM",
            Self::Default => "DEFAULT",
        };
        write!(f, "{name}")
    }
}
