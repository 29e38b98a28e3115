//! Time-field qualified period filters.
//!
//! A period token in the `pe` dimension may carry a time-field qualifier,
//! `LAST_WEEK:EVENT_DATE`, restricting which date column the period applies
//! to. This module splits such tokens and merges externally supplied
//! per-field date filters into a dimension parameter list so that exactly
//! one `pe` parameter remains.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::key::{dimension_from_param, DIMENSION_NAME_SEP, OPTION_SEP};
use crate::model::dimension::PERIOD_DIM_ID;

/// The date column a qualified period filter applies to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeField {
    EventDate,
    EnrollmentDate,
    ScheduledDate,
    CompletedDate,
    Created,
    LastUpdated,
    OccurredDate,
    /// Deprecated alias for [`TimeField::OccurredDate`].
    IncidentDate,
    /// Deprecated alias for [`TimeField::ScheduledDate`].
    DueDate,
}

impl TimeField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "EVENT_DATE" => Some(Self::EventDate),
            "ENROLLMENT_DATE" => Some(Self::EnrollmentDate),
            "SCHEDULED_DATE" => Some(Self::ScheduledDate),
            "COMPLETED_DATE" => Some(Self::CompletedDate),
            "CREATED" => Some(Self::Created),
            "LAST_UPDATED" => Some(Self::LastUpdated),
            "OCCURRED_DATE" => Some(Self::OccurredDate),
            "INCIDENT_DATE" => Some(Self::IncidentDate),
            "DUE_DATE" => Some(Self::DueDate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EventDate => "EVENT_DATE",
            Self::EnrollmentDate => "ENROLLMENT_DATE",
            Self::ScheduledDate => "SCHEDULED_DATE",
            Self::CompletedDate => "COMPLETED_DATE",
            Self::Created => "CREATED",
            Self::LastUpdated => "LAST_UPDATED",
            Self::OccurredDate => "OCCURRED_DATE",
            Self::IncidentDate => "INCIDENT_DATE",
            Self::DueDate => "DUE_DATE",
        }
    }

    pub fn is_deprecated(&self) -> bool {
        matches!(self, Self::IncidentDate | Self::DueDate)
    }

    /// The current name of a possibly deprecated field.
    pub fn canonical(&self) -> Self {
        match self {
            Self::IncidentDate => Self::OccurredDate,
            Self::DueDate => Self::ScheduledDate,
            other => *other,
        }
    }
}

impl std::fmt::Display for TimeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field date filters: each field maps to a `;`-separated list of period
/// tokens.
pub type DateFilters = BTreeMap<TimeField, String>;

/// Splits a period token into the period and its time-field qualifier. A
/// trailing `:SUFFIX` is a qualifier only when the suffix names a time
/// field; otherwise the whole token is the period.
pub fn split_date_filter(token: &str) -> (&str, Option<TimeField>) {
    if let Some((period, suffix)) = token.rsplit_once(DIMENSION_NAME_SEP) {
        if let Some(field) = TimeField::parse(suffix) {
            return (period, Some(field));
        }
    }
    (token, None)
}

/// Merges per-field date filters into a dimension parameter list.
///
/// Each filter value is a `;`-separated list of period tokens; each token is
/// qualified with its field, `LAST_WEEK:EVENT_DATE`. The qualified tokens
/// join the first `pe` parameter; any further `pe` parameters are collapsed
/// into it. Without an existing `pe` parameter one is synthesized at the
/// end. Empty filters leave the parameters untouched.
pub fn merge_date_filters(filters: &DateFilters, dimensions: &[String]) -> Vec<String> {
    if filters.is_empty() {
        return dimensions.to_vec();
    }

    let encoded = filters
        .iter()
        .flat_map(|(field, periods)| {
            periods
                .split(OPTION_SEP)
                .filter(|period| !period.is_empty())
                .map(move |period| format!("{period}{DIMENSION_NAME_SEP}{field}"))
        })
        .collect::<Vec<_>>()
        .join(OPTION_SEP);

    let mut merged: Vec<String> = Vec::with_capacity(dimensions.len() + 1);
    let mut period_at: Option<usize> = None;

    for param in dimensions {
        if dimension_from_param(param) == PERIOD_DIM_ID {
            match period_at {
                None => {
                    period_at = Some(merged.len());
                    merged.push(param.clone());
                }
                Some(index) => {
                    // Collapse extra pe params into the first one.
                    if let Some((_, items)) = param.split_once(DIMENSION_NAME_SEP) {
                        if !items.is_empty() {
                            append_items(&mut merged[index], items);
                        }
                    }
                }
            }
        } else {
            merged.push(param.clone());
        }
    }

    match period_at {
        Some(index) => append_items(&mut merged[index], &encoded),
        None => merged.push(format!("{PERIOD_DIM_ID}{DIMENSION_NAME_SEP}{encoded}")),
    }

    merged
}

/// Appends item tokens to a dimension param with the right separator: `;`
/// after existing items, `:` after a bare key, nothing after a degenerate
/// `pe:` with an empty item list.
fn append_items(param: &mut String, items: &str) {
    let has_items = param
        .split_once(DIMENSION_NAME_SEP)
        .is_some_and(|(_, existing)| !existing.is_empty());
    if has_items {
        param.push_str(OPTION_SEP);
    } else if !param.contains(DIMENSION_NAME_SEP) {
        param.push_str(DIMENSION_NAME_SEP);
    }
    param.push_str(items);
}
