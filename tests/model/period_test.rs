use axial::model::{CalendarPeriodProvider, Period, PeriodProvider, RelativePeriod};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_iso_shapes() {
    let year = Period::from_iso("2024").unwrap();
    assert_eq!(year.start_date, date(2024, 1, 1));
    assert_eq!(year.end_date, date(2024, 12, 31));

    let month = Period::from_iso("202402").unwrap();
    assert_eq!(month.start_date, date(2024, 2, 1));
    assert_eq!(month.end_date, date(2024, 2, 29));

    let day = Period::from_iso("20240115").unwrap();
    assert_eq!(day.start_date, date(2024, 1, 15));
    assert_eq!(day.end_date, date(2024, 1, 15));

    let week = Period::from_iso("2024W1").unwrap();
    assert_eq!(week.start_date, date(2024, 1, 1));
    assert_eq!(week.end_date, date(2024, 1, 7));

    let quarter = Period::from_iso("2024Q4").unwrap();
    assert_eq!(quarter.start_date, date(2024, 10, 1));
    assert_eq!(quarter.end_date, date(2024, 12, 31));
}

#[test]
fn test_iso_rejects_out_of_range_ordinals() {
    assert!(Period::from_iso("2024Q5").is_none());
    assert!(Period::from_iso("2024S3").is_none());
    assert!(Period::from_iso("2024W54").is_none());
    assert!(Period::from_iso("202400").is_none());
}

#[test]
fn test_range_rejects_inverted_bounds() {
    assert!(Period::from_iso("20240201_20240101").is_none());
    assert!(Period::from_iso("20240101_20240101").is_some());
}

#[test]
fn test_ascending_order() {
    let jan = Period::from_iso("202401").unwrap();
    let feb = Period::from_iso("202402").unwrap();
    let q1 = Period::from_iso("2024Q1").unwrap();

    let mut periods = vec![feb.clone(), q1.clone(), jan.clone()];
    periods.sort_by(Period::cmp_ascending);
    // Same start date sorts by end date, so the month precedes the quarter.
    assert_eq!(periods, vec![jan, q1, feb]);
}

#[test]
fn test_today_and_yesterday() {
    let provider = CalendarPeriodProvider;
    let as_of = date(2024, 2, 15);

    let today = provider.expand(RelativePeriod::Today, as_of);
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].iso, "20240215");

    let yesterday = provider.expand(RelativePeriod::Yesterday, as_of);
    assert_eq!(yesterday[0].iso, "20240214");
}

#[test]
fn test_last_spans_end_with_the_completed_unit() {
    let provider = CalendarPeriodProvider;
    let as_of = date(2024, 2, 15);

    let days = provider.expand(RelativePeriod::Last3Days, as_of);
    assert_eq!(
        days.iter().map(|p| p.iso.as_str()).collect::<Vec<_>>(),
        vec!["20240212", "20240213", "20240214"]
    );

    let months = provider.expand(RelativePeriod::Last3Months, as_of);
    assert_eq!(
        months.iter().map(|p| p.iso.as_str()).collect::<Vec<_>>(),
        vec!["202311", "202312", "202401"]
    );

    let years = provider.expand(RelativePeriod::Last5Years, as_of);
    assert_eq!(
        years.iter().map(|p| p.iso.as_str()).collect::<Vec<_>>(),
        vec!["2019", "2020", "2021", "2022", "2023"]
    );
}

#[test]
fn test_this_quarter_and_last_quarter() {
    let provider = CalendarPeriodProvider;
    let as_of = date(2024, 2, 15);

    let this_quarter = provider.expand(RelativePeriod::ThisQuarter, as_of);
    assert_eq!(this_quarter[0].iso, "2024Q1");

    let last_quarter = provider.expand(RelativePeriod::LastQuarter, as_of);
    assert_eq!(last_quarter[0].iso, "2023Q4");
    assert_eq!(last_quarter[0].start_date, date(2023, 10, 1));
    assert_eq!(last_quarter[0].end_date, date(2023, 12, 31));
}

#[test]
fn test_weekly_expansion_matches_iso_weeks() {
    let provider = CalendarPeriodProvider;
    // 2024-02-15 is a Thursday in ISO week 7.
    let as_of = date(2024, 2, 15);

    let this_week = provider.expand(RelativePeriod::ThisWeek, as_of);
    assert_eq!(this_week[0].iso, "2024W7");
    assert_eq!(this_week[0].start_date, date(2024, 2, 12));
    assert_eq!(this_week[0].end_date, date(2024, 2, 18));

    let last_week = provider.expand(RelativePeriod::LastWeek, as_of);
    assert_eq!(last_week[0].iso, "2024W6");
}

#[test]
fn test_expansion_is_deterministic() {
    let provider = CalendarPeriodProvider;
    let as_of = date(2024, 2, 15);
    assert_eq!(
        provider.expand(RelativePeriod::Last12Months, as_of),
        provider.expand(RelativePeriod::Last12Months, as_of)
    );
}
