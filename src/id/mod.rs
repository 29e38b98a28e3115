//! Identifier grammar and id-scheme resolution.

pub mod composite;
pub mod scheme;

pub use composite::{
    parse_composite, DimensionalItemId, ParseError, ParseResult, ReportingRateMetric,
    COMPOSITE_SEP, SYMBOL_WILDCARD,
};
pub use scheme::{resolve_property_value, IdScheme, UID_LENGTH};
