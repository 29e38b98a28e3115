//! Periods: fixed ISO periods, relative periods and calendar expansion.

use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// A concrete calendar period with inclusive start and end dates.
///
/// `date_field` optionally overrides which analytics time column the period
/// applies to, carried over from an encoded `<period>:<timeField>` token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub iso: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub date_field: Option<String>,
}

impl Period {
    pub fn new(iso: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            iso: iso.into(),
            start_date,
            end_date,
            date_field: None,
        }
    }

    pub fn with_date_field(mut self, date_field: impl Into<String>) -> Self {
        self.date_field = Some(date_field.into());
        self
    }

    /// Parses an ISO period token. Supported shapes: yearly `2024`, monthly
    /// `202401`, daily `20240115`, weekly `2024W5`, quarterly `2024Q1`,
    /// six-monthly `2024S1`, and explicit ranges `20240101_20240201` or
    /// `2024-01-01_2024-02-01`.
    pub fn from_iso(iso: &str) -> Option<Self> {
        if let Some((start, end)) = iso.split_once('_') {
            let start = parse_date(start)?;
            let end = parse_date(end)?;
            if end < start {
                return None;
            }
            return Some(Self::new(iso, start, end));
        }

        if iso.chars().all(|c| c.is_ascii_digit()) {
            return match iso.len() {
                4 => {
                    let year: i32 = iso.parse().ok()?;
                    Some(Self::new(
                        iso,
                        NaiveDate::from_ymd_opt(year, 1, 1)?,
                        NaiveDate::from_ymd_opt(year, 12, 31)?,
                    ))
                }
                6 => {
                    let year: i32 = iso[..4].parse().ok()?;
                    let month: u32 = iso[4..].parse().ok()?;
                    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
                    Some(Self::new(iso, start, last_day_of_month(start)?))
                }
                8 => {
                    let date = parse_date(iso)?;
                    Some(Self::new(iso, date, date))
                }
                _ => None,
            };
        }

        if let Some((year, quarter)) = split_infix(iso, 'Q') {
            if !(1..=4).contains(&quarter) {
                return None;
            }
            let month = (quarter - 1) * 3 + 1;
            let start = NaiveDate::from_ymd_opt(year, month, 1)?;
            let end = last_day_of_month(start.checked_add_months(Months::new(2))?)?;
            return Some(Self::new(iso, start, end));
        }

        if let Some((year, half)) = split_infix(iso, 'S') {
            if !(1..=2).contains(&half) {
                return None;
            }
            let month = (half - 1) * 6 + 1;
            let start = NaiveDate::from_ymd_opt(year, month, 1)?;
            let end = last_day_of_month(start.checked_add_months(Months::new(5))?)?;
            return Some(Self::new(iso, start, end));
        }

        if let Some((year, week)) = split_infix(iso, 'W') {
            if !(1..=53).contains(&week) {
                return None;
            }
            // Week 1 is the week containing January 4th, weeks start Monday.
            let jan4 = NaiveDate::from_ymd_opt(year, 1, 4)?;
            let week1_monday = monday_of(jan4);
            let start = week1_monday + Duration::days(7 * (week as i64 - 1));
            return Some(Self::new(iso, start, start + Duration::days(6)));
        }

        None
    }

    /// Ascending ordering over start date, then end date. Used to emit
    /// periods in chronological order once relative periods are expanded.
    pub fn cmp_ascending(&self, other: &Self) -> Ordering {
        self.start_date
            .cmp(&other.start_date)
            .then(self.end_date.cmp(&other.end_date))
            .then_with(|| self.iso.cmp(&other.iso))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso)
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

fn split_infix(iso: &str, sep: char) -> Option<(i32, u32)> {
    let (year, ordinal) = iso.split_once(sep)?;
    if year.len() != 4 {
        return None;
    }
    Some((year.parse().ok()?, ordinal.parse().ok()?))
}

fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?;
    first
        .checked_add_months(Months::new(1))?
        .checked_sub_days(chrono::Days::new(1))
}

fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// A symbolic period resolved relative to an "as of" date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RelativePeriod {
    #[serde(rename = "TODAY")]
    Today,
    #[serde(rename = "YESTERDAY")]
    Yesterday,
    #[serde(rename = "LAST_3_DAYS")]
    Last3Days,
    #[serde(rename = "LAST_7_DAYS")]
    Last7Days,
    #[serde(rename = "LAST_14_DAYS")]
    Last14Days,
    #[serde(rename = "LAST_30_DAYS")]
    Last30Days,
    #[serde(rename = "THIS_WEEK")]
    ThisWeek,
    #[serde(rename = "LAST_WEEK")]
    LastWeek,
    #[serde(rename = "LAST_4_WEEKS")]
    Last4Weeks,
    #[serde(rename = "LAST_12_WEEKS")]
    Last12Weeks,
    #[serde(rename = "THIS_MONTH")]
    ThisMonth,
    #[serde(rename = "LAST_MONTH")]
    LastMonth,
    #[serde(rename = "LAST_3_MONTHS")]
    Last3Months,
    #[serde(rename = "LAST_6_MONTHS")]
    Last6Months,
    #[serde(rename = "LAST_12_MONTHS")]
    Last12Months,
    #[serde(rename = "THIS_QUARTER")]
    ThisQuarter,
    #[serde(rename = "LAST_QUARTER")]
    LastQuarter,
    #[serde(rename = "LAST_4_QUARTERS")]
    Last4Quarters,
    #[serde(rename = "THIS_YEAR")]
    ThisYear,
    #[serde(rename = "LAST_YEAR")]
    LastYear,
    #[serde(rename = "LAST_5_YEARS")]
    Last5Years,
}

impl RelativePeriod {
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|rp| rp.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "TODAY",
            Self::Yesterday => "YESTERDAY",
            Self::Last3Days => "LAST_3_DAYS",
            Self::Last7Days => "LAST_7_DAYS",
            Self::Last14Days => "LAST_14_DAYS",
            Self::Last30Days => "LAST_30_DAYS",
            Self::ThisWeek => "THIS_WEEK",
            Self::LastWeek => "LAST_WEEK",
            Self::Last4Weeks => "LAST_4_WEEKS",
            Self::Last12Weeks => "LAST_12_WEEKS",
            Self::ThisMonth => "THIS_MONTH",
            Self::LastMonth => "LAST_MONTH",
            Self::Last3Months => "LAST_3_MONTHS",
            Self::Last6Months => "LAST_6_MONTHS",
            Self::Last12Months => "LAST_12_MONTHS",
            Self::ThisQuarter => "THIS_QUARTER",
            Self::LastQuarter => "LAST_QUARTER",
            Self::Last4Quarters => "LAST_4_QUARTERS",
            Self::ThisYear => "THIS_YEAR",
            Self::LastYear => "LAST_YEAR",
            Self::Last5Years => "LAST_5_YEARS",
        }
    }

    pub const ALL: [Self; 21] = [
        Self::Today,
        Self::Yesterday,
        Self::Last3Days,
        Self::Last7Days,
        Self::Last14Days,
        Self::Last30Days,
        Self::ThisWeek,
        Self::LastWeek,
        Self::Last4Weeks,
        Self::Last12Weeks,
        Self::ThisMonth,
        Self::LastMonth,
        Self::Last3Months,
        Self::Last6Months,
        Self::Last12Months,
        Self::ThisQuarter,
        Self::LastQuarter,
        Self::Last4Quarters,
        Self::ThisYear,
        Self::LastYear,
        Self::Last5Years,
    ];
}

impl fmt::Display for RelativePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expands relative periods into concrete periods as of a given date.
///
/// Implementations are expected to be pure: the same enum and date always
/// yield the same periods.
pub trait PeriodProvider {
    fn expand(&self, relative: RelativePeriod, as_of: NaiveDate) -> Vec<Period>;
}

/// Gregorian-calendar implementation of [`PeriodProvider`]. "Last N" spans
/// end with the most recently completed unit: last N days end yesterday,
/// last N months end with the previous month, and so on.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarPeriodProvider;

impl PeriodProvider for CalendarPeriodProvider {
    fn expand(&self, relative: RelativePeriod, as_of: NaiveDate) -> Vec<Period> {
        match relative {
            RelativePeriod::Today => vec![day_period(as_of)],
            RelativePeriod::Yesterday => vec![day_period(as_of - Duration::days(1))],
            RelativePeriod::Last3Days => last_days(as_of, 3),
            RelativePeriod::Last7Days => last_days(as_of, 7),
            RelativePeriod::Last14Days => last_days(as_of, 14),
            RelativePeriod::Last30Days => last_days(as_of, 30),
            RelativePeriod::ThisWeek => vec![week_period(as_of)],
            RelativePeriod::LastWeek => vec![week_period(as_of - Duration::days(7))],
            RelativePeriod::Last4Weeks => last_weeks(as_of, 4),
            RelativePeriod::Last12Weeks => last_weeks(as_of, 12),
            RelativePeriod::ThisMonth => vec![month_period(as_of)],
            RelativePeriod::LastMonth => last_months(as_of, 1),
            RelativePeriod::Last3Months => last_months(as_of, 3),
            RelativePeriod::Last6Months => last_months(as_of, 6),
            RelativePeriod::Last12Months => last_months(as_of, 12),
            RelativePeriod::ThisQuarter => vec![quarter_period(as_of)],
            RelativePeriod::LastQuarter => last_quarters(as_of, 1),
            RelativePeriod::Last4Quarters => last_quarters(as_of, 4),
            RelativePeriod::ThisYear => vec![year_period(as_of.year())],
            RelativePeriod::LastYear => vec![year_period(as_of.year() - 1)],
            RelativePeriod::Last5Years => (1..=5)
                .rev()
                .map(|back| year_period(as_of.year() - back))
                .collect(),
        }
    }
}

fn day_period(date: NaiveDate) -> Period {
    Period::new(date.format("%Y%m%d").to_string(), date, date)
}

fn last_days(as_of: NaiveDate, count: i64) -> Vec<Period> {
    (1..=count)
        .rev()
        .map(|back| day_period(as_of - Duration::days(back)))
        .collect()
}

fn week_period(date: NaiveDate) -> Period {
    let monday = monday_of(date);
    let week = date.iso_week();
    Period::new(
        format!("{}W{}", week.year(), week.week()),
        monday,
        monday + Duration::days(6),
    )
}

fn last_weeks(as_of: NaiveDate, count: i64) -> Vec<Period> {
    (1..=count)
        .rev()
        .map(|back| week_period(as_of - Duration::days(7 * back)))
        .collect()
}

fn month_period(date: NaiveDate) -> Period {
    let start = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .unwrap_or(date);
    let end = last_day_of_month(start).unwrap_or(start);
    Period::new(format!("{:04}{:02}", start.year(), start.month()), start, end)
}

fn last_months(as_of: NaiveDate, count: u32) -> Vec<Period> {
    (1..=count)
        .rev()
        .filter_map(|back| as_of.checked_sub_months(Months::new(back)))
        .map(|date| month_period(date))
        .collect()
}

fn quarter_period(date: NaiveDate) -> Period {
    let quarter = (date.month() - 1) / 3 + 1;
    let start_month = (quarter - 1) * 3 + 1;
    let start = NaiveDate::from_ymd_opt(date.year(), start_month, 1).unwrap_or(date);
    let end = start
        .checked_add_months(Months::new(2))
        .and_then(last_day_of_month)
        .unwrap_or(start);
    Period::new(format!("{}Q{}", date.year(), quarter), start, end)
}

fn last_quarters(as_of: NaiveDate, count: u32) -> Vec<Period> {
    (1..=count)
        .rev()
        .filter_map(|back| as_of.checked_sub_months(Months::new(3 * back)))
        .map(|date| quarter_period(date))
        .collect()
}

fn year_period(year: i32) -> Period {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
    let end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX);
    Period::new(format!("{year}"), start, end)
}
