//! Composite dimension-item identifier grammar.
//!
//! Dimension items arrive as compact dotted tokens: a bare `uid` for plain
//! items, `deUid.cocUid[.aocUid]` for data element operands,
//! `programUid.itemUid` for program-scoped items and
//! `dataSetUid.REPORTING_RATE` for reporting rates. This module parses those
//! tokens into typed identifiers and validates identifier arity per item
//! kind. Malformed tokens are reported as structured errors, never coerced.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::item::QueryModifiers;
use crate::model::types::DimensionItemType;

/// Separator between identifiers in a composite token.
pub const COMPOSITE_SEP: &str = ".";

/// Wildcard identifier, meaning "total" for the slot it occupies.
pub const SYMBOL_WILDCARD: &str = "*";

/// Matches data element operands, program data elements, program attributes
/// and data set reporting rate metrics, e.g. `IpHINAT79UW.uODmvdTEeMr`.
static COMPOSITE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<id1>\w+)\.(?P<id2>\w+|\*)(\.(?P<id3>\w+|\*))?$").unwrap()
});

static PLAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w+$").unwrap());

/// Errors produced by the identifier grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed dimension item token: {0}")]
    MalformedToken(String),

    #[error("wrong identifier count for {item_type:?}: {token}")]
    ArityMismatch {
        item_type: DimensionItemType,
        token: String,
    },

    #[error("unknown reporting rate metric: {0}")]
    UnknownMetric(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Metrics available for the reporting rate item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportingRateMetric {
    ReportingRate,
    ReportingRateOnTime,
    ActualReports,
    ActualReportsOnTime,
    ExpectedReports,
}

impl ReportingRateMetric {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "REPORTING_RATE" => Some(Self::ReportingRate),
            "REPORTING_RATE_ON_TIME" => Some(Self::ReportingRateOnTime),
            "ACTUAL_REPORTS" => Some(Self::ActualReports),
            "ACTUAL_REPORTS_ON_TIME" => Some(Self::ActualReportsOnTime),
            "EXPECTED_REPORTS" => Some(Self::ExpectedReports),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReportingRate => "REPORTING_RATE",
            Self::ReportingRateOnTime => "REPORTING_RATE_ON_TIME",
            Self::ActualReports => "ACTUAL_REPORTS",
            Self::ActualReportsOnTime => "ACTUAL_REPORTS_ON_TIME",
            Self::ExpectedReports => "EXPECTED_REPORTS",
        }
    }
}

impl fmt::Display for ReportingRateMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed composite identifier for a dimension item: one to three
/// sub-identifiers plus the item kind that fixes their meaning.
///
/// Equality and hashing are structural over the type tag and all identifier
/// slots, so ids can key de-duplication maps directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DimensionalItemId {
    item_type: DimensionItemType,
    id0: String,
    id1: Option<String>,
    id2: Option<String>,
    #[serde(default, skip_serializing_if = "QueryModifiers::is_default")]
    query_mods: QueryModifiers,
}

impl DimensionalItemId {
    /// Builds an id from explicit parts, validating arity for the given type.
    pub fn new(
        item_type: DimensionItemType,
        id0: impl Into<String>,
        id1: Option<String>,
        id2: Option<String>,
    ) -> ParseResult<Self> {
        let id = Self {
            item_type,
            id0: id0.into(),
            id1,
            id2,
            query_mods: QueryModifiers::default(),
        };
        id.validate()
    }

    /// Re-tags this id with the caller's expected type, revalidating arity.
    /// Used to settle two-part candidates (program data element vs program
    /// attribute) once the referenced objects are known.
    pub fn with_type(mut self, item_type: DimensionItemType) -> ParseResult<Self> {
        self.item_type = item_type;
        self.validate()
    }

    /// Attaches expression-level modifiers to this id.
    pub fn with_query_mods(mut self, query_mods: QueryModifiers) -> Self {
        self.query_mods = query_mods;
        self
    }

    pub fn item_type(&self) -> DimensionItemType {
        self.item_type
    }

    pub fn id0(&self) -> &str {
        &self.id0
    }

    pub fn id1(&self) -> Option<&str> {
        self.id1.as_deref()
    }

    pub fn id2(&self) -> Option<&str> {
        self.id2.as_deref()
    }

    pub fn query_mods(&self) -> &QueryModifiers {
        &self.query_mods
    }

    /// The canonical dotted token for this id. A trailing absent slot is
    /// omitted, so `deUid.cocUid.*` renders as `deUid.cocUid`, but an absent
    /// middle slot renders as the wildcard so the third identifier keeps its
    /// position: `deUid.*.aocUid`. Without the wildcard an attribute-option
    /// combo would be indistinguishable from a category-option combo.
    pub fn item(&self) -> String {
        match (&self.id1, &self.id2) {
            (None, None) => self.id0.clone(),
            (Some(id1), None) => format!("{}{COMPOSITE_SEP}{id1}", self.id0),
            (id1, Some(id2)) => {
                let id1 = id1.as_deref().unwrap_or(SYMBOL_WILDCARD);
                format!("{}{COMPOSITE_SEP}{id1}{COMPOSITE_SEP}{id2}", self.id0)
            }
        }
    }

    /// Validates arity and per-type semantic constraints.
    ///
    /// Plain kinds require exactly one identifier; operands require only the
    /// first (second and third may be absent, meaning totals); reporting
    /// rates require a data set plus a known metric name; program-scoped
    /// kinds require both identifiers.
    pub fn has_valid_ids(&self) -> bool {
        if self.id0.is_empty() {
            return false;
        }
        match self.item_type {
            DimensionItemType::DataElementOperand => true,
            DimensionItemType::ReportingRate => self
                .id1
                .as_deref()
                .is_some_and(|m| ReportingRateMetric::parse(m).is_some()),
            DimensionItemType::ProgramDataElement | DimensionItemType::ProgramAttribute => {
                self.id1.is_some() && self.id2.is_none()
            }
            _ => self.id1.is_none() && self.id2.is_none(),
        }
    }

    /// The reporting rate metric named by the second identifier, if this is
    /// a valid reporting rate id.
    pub fn reporting_rate_metric(&self) -> Option<ReportingRateMetric> {
        if self.item_type != DimensionItemType::ReportingRate {
            return None;
        }
        self.id1.as_deref().and_then(ReportingRateMetric::parse)
    }

    fn validate(self) -> ParseResult<Self> {
        if self.item_type == DimensionItemType::ReportingRate {
            if let Some(metric) = self.id1.as_deref() {
                if ReportingRateMetric::parse(metric).is_none() {
                    return Err(ParseError::UnknownMetric(metric.to_string()));
                }
            }
        }
        if !self.has_valid_ids() {
            return Err(ParseError::ArityMismatch {
                item_type: self.item_type,
                token: self.item(),
            });
        }
        Ok(self)
    }
}

impl fmt::Display for DimensionalItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.item())
    }
}

/// Parses a dimension-item token into a typed candidate id.
///
/// A bare identifier yields a plain data element candidate; one dot yields a
/// reporting rate when the second identifier names a known metric, otherwise
/// a program data element candidate (the caller re-tags with
/// [`DimensionalItemId::with_type`] once the referenced objects are known);
/// two dots yield a data element operand, where a wildcard or absent slot
/// means "total".
pub fn parse_composite(token: &str) -> ParseResult<DimensionalItemId> {
    if PLAIN_PATTERN.is_match(token) {
        return DimensionalItemId::new(DimensionItemType::DataElement, token, None, None);
    }

    let caps = COMPOSITE_PATTERN
        .captures(token)
        .ok_or_else(|| ParseError::MalformedToken(token.to_string()))?;

    let id1 = caps.name("id1").map(|m| m.as_str().to_string());
    let id2 = caps.name("id2").map(|m| m.as_str().to_string());
    let id3 = caps.name("id3").map(|m| m.as_str().to_string());

    let id1 = id1.ok_or_else(|| ParseError::MalformedToken(token.to_string()))?;
    let id2 = id2.filter(|s| !is_wildcard(s));
    let id3 = id3.filter(|s| !is_wildcard(s));

    if caps.name("id3").is_some() {
        return DimensionalItemId::new(DimensionItemType::DataElementOperand, id1, id2, id3);
    }

    match id2.as_deref().and_then(ReportingRateMetric::parse) {
        Some(_) => DimensionalItemId::new(DimensionItemType::ReportingRate, id1, id2, None),
        None if id2.is_some() => {
            DimensionalItemId::new(DimensionItemType::ProgramDataElement, id1, id2, None)
        }
        // Wildcard second slot: an operand total across the category combo.
        None => DimensionalItemId::new(DimensionItemType::DataElementOperand, id1, None, None),
    }
}

/// Whether the given expression is a composite dimension-item token.
pub fn is_composite(expression: &str) -> bool {
    COMPOSITE_PATTERN.is_match(expression)
}

/// Whether the given identifier is the wildcard symbol.
pub fn is_wildcard(identifier: &str) -> bool {
    identifier == SYMBOL_WILDCARD
}

/// The first identifier of a composite token, or `None` if not composite.
pub fn first_identifier(token: &str) -> Option<&str> {
    COMPOSITE_PATTERN
        .captures(token)
        .and_then(|c| c.name("id1"))
        .map(|m| m.as_str())
}

/// The second identifier of a composite token, or `None` if not composite.
pub fn second_identifier(token: &str) -> Option<&str> {
    COMPOSITE_PATTERN
        .captures(token)
        .and_then(|c| c.name("id2"))
        .map(|m| m.as_str())
}

/// The third identifier of a composite token, or `None` if absent.
pub fn third_identifier(token: &str) -> Option<&str> {
    COMPOSITE_PATTERN
        .captures(token)
        .and_then(|c| c.name("id3"))
        .map(|m| m.as_str())
}
