use axial::id::{IdScheme, ReportingRateMetric};
use axial::model::{
    any_dimension_has_items, AggregationType, DimensionItemType, DimensionType, DimensionalItem,
    DimensionalObject, DATA_X_DIM_ID, ORGUNIT_DIM_ID,
};

#[test]
fn test_items_are_deduplicated_by_dimension_item_string() {
    let operand_a =
        DimensionalItem::operand("fbfJHSPpUQD".to_string(), Some("pq2XI5kz2BY".to_string()), None)
            .unwrap();
    let operand_b =
        DimensionalItem::operand("fbfJHSPpUQD".to_string(), Some("pq2XI5kz2BY".to_string()), None)
            .unwrap();
    let plain = DimensionalItem::new("fbfJHSPpUQD", DimensionItemType::DataElement);

    let dimension = DimensionalObject::with_items(
        DATA_X_DIM_ID,
        DimensionType::DataX,
        "Data",
        [operand_a, plain, operand_b],
    );

    // The operand and the bare data element have different identities.
    assert_eq!(
        dimension.item_ids(),
        vec!["fbfJHSPpUQD.pq2XI5kz2BY", "fbfJHSPpUQD"]
    );
}

#[test]
fn test_operands_differing_only_in_combo_kind_stay_distinct() {
    let coc_only = DimensionalItem::operand(
        "fbfJHSPpUQD",
        Some("pq2XI5kz2BY".to_string()),
        None,
    )
    .unwrap();
    let aoc_only = DimensionalItem::operand(
        "fbfJHSPpUQD",
        None,
        Some("pq2XI5kz2BY".to_string()),
    )
    .unwrap();
    assert_eq!(aoc_only.dimension_item(), "fbfJHSPpUQD.*.pq2XI5kz2BY");

    let dimension = DimensionalObject::with_items(
        DATA_X_DIM_ID,
        DimensionType::DataX,
        "Data",
        [coc_only, aoc_only],
    );
    assert_eq!(
        dimension.item_ids(),
        vec!["fbfJHSPpUQD.pq2XI5kz2BY", "fbfJHSPpUQD.*.pq2XI5kz2BY"]
    );
}

#[test]
fn test_composite_items_render_dotted_identifiers() {
    let rate = DimensionalItem::reporting_rate("BfMAe6Itzgt", ReportingRateMetric::ActualReports)
        .unwrap();
    assert_eq!(rate.dimension_item(), "BfMAe6Itzgt.ACTUAL_REPORTS");

    let pde = DimensionalItem::program_data_element("IpHINAT79UW", "uODmvdTEeMr").unwrap();
    assert_eq!(pde.dimension_item(), "IpHINAT79UW.uODmvdTEeMr");

    let attribute = DimensionalItem::program_attribute("IpHINAT79UW", "w75KJ2mc4zz").unwrap();
    assert_eq!(attribute.dimension_item(), "IpHINAT79UW.w75KJ2mc4zz");
}

#[test]
fn test_dimension_item_as_scheme() {
    let item = DimensionalItem::new("O6uvpzGd5pu", DimensionItemType::OrganisationUnit)
        .with_code("OU_BO")
        .with_name("Bo");

    assert_eq!(item.dimension_item_as(&IdScheme::Uid), "O6uvpzGd5pu");
    assert_eq!(item.dimension_item_as(&IdScheme::Code), "OU_BO");
    assert_eq!(item.dimension_item_as(&IdScheme::Name), "Bo");
    // An unset property falls back to the base identifier.
    assert_eq!(item.dimension_item_as(&IdScheme::Uuid), "O6uvpzGd5pu");
}

#[test]
fn test_builder_metadata() {
    let dimension = DimensionalObject::new(ORGUNIT_DIM_ID, DimensionType::OrganisationUnit, "Organisation unit")
        .with_filter("path:like:O6uvpzGd5pu")
        .with_legend_set("fqs276KXCXi")
        .with_aggregation_type(AggregationType::Count)
        .with_all_items(true);

    assert_eq!(dimension.filter.as_deref(), Some("path:like:O6uvpzGd5pu"));
    assert_eq!(dimension.legend_set.as_deref(), Some("fqs276KXCXi"));
    assert_eq!(dimension.aggregation_type, Some(AggregationType::Count));
    assert!(dimension.all_items);
    assert!(!dimension.has_items());
}

#[test]
fn test_copy_of_replaces_items_and_keeps_metadata() {
    let original = DimensionalObject::with_items(
        ORGUNIT_DIM_ID,
        DimensionType::OrganisationUnit,
        "Organisation unit",
        [DimensionalItem::new("O6uvpzGd5pu", DimensionItemType::OrganisationUnit)],
    )
    .with_legend_set("fqs276KXCXi");

    let copy = DimensionalObject::copy_of(
        &original,
        [
            DimensionalItem::new("fdc6uOvgoji", DimensionItemType::OrganisationUnit),
            DimensionalItem::new("fdc6uOvgoji", DimensionItemType::OrganisationUnit),
        ],
    );

    assert_eq!(copy.item_ids(), vec!["fdc6uOvgoji"]);
    assert_eq!(copy.legend_set, original.legend_set);
    assert_eq!(original.item_ids(), vec!["O6uvpzGd5pu"]);
}

#[test]
fn test_any_dimension_has_items() {
    let empty = DimensionalObject::new(DATA_X_DIM_ID, DimensionType::DataX, "Data");
    let filled = DimensionalObject::with_items(
        ORGUNIT_DIM_ID,
        DimensionType::OrganisationUnit,
        "Organisation unit",
        [DimensionalItem::new("O6uvpzGd5pu", DimensionItemType::OrganisationUnit)],
    );

    assert!(!any_dimension_has_items(&[empty.clone()]));
    assert!(any_dimension_has_items(&[empty, filled]));
}

#[test]
fn test_serde_round_trip() {
    let dimension = DimensionalObject::with_items(
        DATA_X_DIM_ID,
        DimensionType::DataX,
        "Data",
        [
            DimensionalItem::new("fbfJHSPpUQD", DimensionItemType::DataElement)
                .with_name("ANC 1st visit"),
            DimensionalItem::reporting_rate("BfMAe6Itzgt", ReportingRateMetric::ReportingRate)
                .unwrap(),
        ],
    )
    .as_data_dimension();

    let json = serde_json::to_string(&dimension).unwrap();
    let back: DimensionalObject = serde_json::from_str(&json).unwrap();
    assert_eq!(back, dimension);
    assert!(json.contains("\"DATA_X\""));
}
