//! Canonical keys and request-parameter helpers.
//!
//! The separators here form the wire grammar of a dimension parameter:
//! `dim:item;item` with `-` joining the segments of composed keys. Keys built
//! by this module are canonical, meaning order-insensitive where sorting is
//! applied and stable across repeated normalization.

use crate::model::dimension::DimensionalObject;
use crate::model::item::DimensionalItem;

/// Separator between segments of a composed key.
pub const DIMENSION_SEP: &str = "-";
/// Separator between a dimension key and its items in a parameter.
pub const DIMENSION_NAME_SEP: &str = ":";
/// Separator between items in a parameter.
pub const OPTION_SEP: &str = ";";
/// Separator between item id strings in a grid identifier.
pub const ITEM_SEP: &str = "-";
/// Separator between words in a short-name key.
pub const NAME_SEP: &str = "_";
/// Separator between item names in a display name.
pub const COL_SEP: &str = " ";

/// Sorts the `-`-separated segments of a key and rejoins them, producing an
/// order-insensitive canonical form. Idempotent.
pub fn sort_key(key: &str) -> String {
    let mut segments: Vec<&str> = key.split(DIMENSION_SEP).collect();
    segments.sort_unstable();
    segments.join(DIMENSION_SEP)
}

/// A canonical identifier for a grid layout: the sorted union of the column
/// and row item id strings. Invariant under swapping columns and rows and
/// under reordering within either axis.
pub fn grid_identifier(columns: &[DimensionalItem], rows: &[DimensionalItem]) -> String {
    let mut ids: Vec<String> = columns
        .iter()
        .chain(rows.iter())
        .map(DimensionalItem::dimension_item)
        .collect();
    ids.sort_unstable();
    ids.join(ITEM_SEP)
}

/// The dimension key of a parameter: everything before the first `:`, or the
/// whole parameter when no `:` is present.
pub fn dimension_from_param(param: &str) -> &str {
    match param.split_once(DIMENSION_NAME_SEP) {
        Some((dimension, _)) => dimension,
        None => param,
    }
}

/// The item tokens of a parameter: everything after the first `:`, split on
/// `;`. Empty when the parameter carries no items. Tokens keep any further
/// `:`-qualification, e.g. `TODAY:LAST_UPDATED` stays one token.
pub fn dimension_items_from_param(param: &str) -> Vec<String> {
    match param.split_once(DIMENSION_NAME_SEP) {
        Some((_, items)) => items_from_param(items),
        None => Vec::new(),
    }
}

/// Splits a `;`-separated item list.
pub fn items_from_param(items: &str) -> Vec<String> {
    items.split(OPTION_SEP).map(str::to_string).collect()
}

/// The value of a `KEYWORD-value` token, when one is present and non-empty.
pub fn value_from_keyword_param(param: &str) -> Option<String> {
    param
        .split(DIMENSION_SEP)
        .nth(1)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// The uid of an `OU_GROUP-<uid>` style token.
pub fn uid_from_group_param(param: &str) -> Option<String> {
    value_from_keyword_param(param)
}

/// Joins a dimension with its program and stage qualifiers, skipping blank
/// parts: `program.stage.dimension`.
pub fn qualified_dimension(
    dimension: &str,
    program: Option<&str>,
    stage: Option<&str>,
) -> String {
    let parts: Vec<&str> = [program, stage, Some(dimension)]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect();
    parts.join(".")
}

/// The unqualified dimension of a possibly qualified one: everything after
/// the last `.`, or the whole input.
pub fn actual_dimension(dimension: &str) -> &str {
    match dimension.rsplit_once('.') {
        Some((_, actual)) => actual,
        None => dimension,
    }
}

/// The dimension-item strings of the given items, in order.
pub fn dimension_item_ids(items: &[DimensionalItem]) -> Vec<String> {
    items.iter().map(DimensionalItem::dimension_item).collect()
}

/// The dimension keys of the given dimensions, in order.
pub fn dimension_keys(dimensions: &[DimensionalObject]) -> Vec<String> {
    dimensions.iter().map(|d| d.dimension.clone()).collect()
}

/// A lowercase `_`-joined key built from the item header names, with spaces
/// folded into the separator.
pub fn short_name_key(items: &[DimensionalItem]) -> String {
    items
        .iter()
        .map(|item| item.header_name().to_lowercase().replace(' ', NAME_SEP))
        .collect::<Vec<_>>()
        .join(NAME_SEP)
}

/// A space-joined display name built from the item header names.
pub fn display_name(items: &[DimensionalItem]) -> String {
    items
        .iter()
        .map(|item| item.header_name().to_string())
        .collect::<Vec<_>>()
        .join(COL_SEP)
}

/// The dotted dimension-item string of a data set reporting rate.
pub fn reporting_rate_item(data_set: &str, metric: &str) -> String {
    format!("{data_set}.{metric}")
}
