use axial::timefilter::{merge_date_filters, split_date_filter, DateFilters, TimeField};

#[test]
fn test_split_qualified_and_bare_tokens() {
    assert_eq!(
        split_date_filter("LAST_WEEK:EVENT_DATE"),
        ("LAST_WEEK", Some(TimeField::EventDate))
    );
    assert_eq!(
        split_date_filter("TODAY:LAST_UPDATED"),
        ("TODAY", Some(TimeField::LastUpdated))
    );
    assert_eq!(split_date_filter("202401"), ("202401", None));
    assert_eq!(split_date_filter("YESTERDAY"), ("YESTERDAY", None));
    // A colon followed by something that is not a time field belongs to the
    // period token.
    assert_eq!(
        split_date_filter("20240101_20240201:NOPE"),
        ("20240101_20240201:NOPE", None)
    );
}

#[test]
fn test_merge_synthesizes_pe_when_absent() {
    let mut filters = DateFilters::new();
    filters.insert(TimeField::EventDate, "LAST_WEEK;TODAY".to_string());

    let merged = merge_date_filters(&filters, &["dx:fbfJHSPpUQD".to_string()]);
    assert_eq!(
        merged,
        vec!["dx:fbfJHSPpUQD", "pe:LAST_WEEK:EVENT_DATE;TODAY:EVENT_DATE"]
    );
}

#[test]
fn test_merge_encodes_multiple_fields() {
    let mut filters = DateFilters::new();
    filters.insert(TimeField::EventDate, "LAST_WEEK".to_string());
    filters.insert(TimeField::LastUpdated, "TODAY".to_string());

    let merged = merge_date_filters(&filters, &[]);
    assert_eq!(merged.len(), 1);
    // BTreeMap field order keeps the encoding stable.
    insta::assert_snapshot!(
        merged[0].as_str(),
        @"pe:LAST_WEEK:EVENT_DATE;TODAY:LAST_UPDATED"
    );
}

#[test]
fn test_merge_appends_to_existing_pe_param() {
    let mut filters = DateFilters::new();
    filters.insert(TimeField::IncidentDate, "LAST_WEEK".to_string());

    let dimensions = vec![
        "pe:202401;202402".to_string(),
        "ou:USER_ORGUNIT".to_string(),
    ];
    let merged = merge_date_filters(&filters, &dimensions);
    assert_eq!(
        merged,
        vec!["pe:202401;202402;LAST_WEEK:INCIDENT_DATE", "ou:USER_ORGUNIT"]
    );
}

#[test]
fn test_merge_collapses_duplicate_pe_params() {
    let mut filters = DateFilters::new();
    filters.insert(TimeField::EventDate, "YESTERDAY".to_string());

    let dimensions = vec![
        "dx:fbfJHSPpUQD".to_string(),
        "pe:202401".to_string(),
        "pe:202402;202403".to_string(),
    ];
    let merged = merge_date_filters(&filters, &dimensions);
    assert_eq!(
        merged,
        vec![
            "dx:fbfJHSPpUQD",
            "pe:202401;202402;202403;YESTERDAY:EVENT_DATE"
        ]
    );
    assert_eq!(
        merged
            .iter()
            .filter(|param| param.starts_with("pe:"))
            .count(),
        1
    );
}

#[test]
fn test_merge_with_bare_pe_param() {
    let mut filters = DateFilters::new();
    filters.insert(TimeField::EventDate, "TODAY".to_string());

    let merged = merge_date_filters(&filters, &["pe".to_string()]);
    assert_eq!(merged, vec!["pe:TODAY:EVENT_DATE"]);
}

#[test]
fn test_merge_with_degenerate_empty_pe_param() {
    let mut filters = DateFilters::new();
    filters.insert(TimeField::EventDate, "TODAY".to_string());

    // A colon with no items must not leave a leading empty item behind.
    let merged = merge_date_filters(&filters, &["pe:".to_string()]);
    assert_eq!(merged, vec!["pe:TODAY:EVENT_DATE"]);

    let merged = merge_date_filters(&filters, &["pe:".to_string(), "pe:202401".to_string()]);
    assert_eq!(merged, vec!["pe:202401;TODAY:EVENT_DATE"]);
}

#[test]
fn test_empty_filters_are_a_no_op() {
    let dimensions = vec!["dx:fbfJHSPpUQD".to_string(), "pe:202401".to_string()];
    assert_eq!(merge_date_filters(&DateFilters::new(), &dimensions), dimensions);
}

#[test]
fn test_split_then_merge_round_trip() {
    let mut filters = DateFilters::new();
    filters.insert(TimeField::EventDate, "LAST_WEEK".to_string());

    let merged = merge_date_filters(&filters, &[]);
    let tokens = axial::key::dimension_items_from_param(&merged[0]);
    assert_eq!(
        split_date_filter(&tokens[0]),
        ("LAST_WEEK", Some(TimeField::EventDate))
    );
}

#[test]
fn test_deprecated_fields_map_to_current_names() {
    assert_eq!(TimeField::IncidentDate.canonical(), TimeField::OccurredDate);
    assert_eq!(TimeField::DueDate.canonical(), TimeField::ScheduledDate);
    assert!(TimeField::IncidentDate.is_deprecated());
    assert!(!TimeField::OccurredDate.is_deprecated());
}
