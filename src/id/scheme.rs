//! Identifier schemes: by which property an object is referenced externally.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::item::DimensionalItem;

/// Length of a stable object identifier.
pub const UID_LENGTH: usize = 11;

const ATTRIBUTE_PREFIX: &str = "ATTRIBUTE:";

/// The property used to reference an object in external identifiers.
///
/// `Attribute` always carries the UID of the metadata attribute whose value
/// identifies the object; every other variant carries nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdScheme {
    #[default]
    Null,
    Id,
    Uid,
    Uuid,
    Code,
    Name,
    Attribute(String),
}

impl IdScheme {
    /// Builds a scheme from a free-form string. Total: `None`, empty and
    /// unrecognized inputs yield [`IdScheme::Null`], which resolves like
    /// `UID`. The literal prefix `ATTRIBUTE:` (case-insensitive) followed by
    /// exactly an 11-character alphanumeric UID yields the attribute variant.
    pub fn from(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::Null;
        };

        if raw.len() == ATTRIBUTE_PREFIX.len() + UID_LENGTH
            && raw[..ATTRIBUTE_PREFIX.len()].eq_ignore_ascii_case(ATTRIBUTE_PREFIX)
        {
            let uid = &raw[ATTRIBUTE_PREFIX.len()..];
            if uid.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Self::Attribute(uid.to_string());
            }
        }

        match raw.to_ascii_uppercase().as_str() {
            "ID" => Self::Id,
            "UID" => Self::Uid,
            "UUID" => Self::Uuid,
            "CODE" => Self::Code,
            "NAME" => Self::Name,
            _ => Self::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        *self == Self::Null
    }

    pub fn is_attribute(&self) -> bool {
        matches!(self, Self::Attribute(_))
    }

    /// The attribute UID for the attribute variant, `None` otherwise.
    pub fn attribute_uid(&self) -> Option<&str> {
        match self {
            Self::Attribute(uid) => Some(uid),
            _ => None,
        }
    }
}

impl fmt::Display for IdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Id => f.write_str("ID"),
            Self::Uid => f.write_str("UID"),
            Self::Uuid => f.write_str("UUID"),
            Self::Code => f.write_str("CODE"),
            Self::Name => f.write_str("NAME"),
            Self::Attribute(uid) => write!(f, "{ATTRIBUTE_PREFIX}{uid}"),
        }
    }
}

/// Resolves the property value the given scheme selects on the given item.
///
/// Pure and deterministic: the same item state and scheme always produce the
/// same value. The attribute variant scans the item's attribute-value map
/// and returns `None` when no value is recorded for the attribute.
pub fn resolve_property_value(item: &DimensionalItem, scheme: &IdScheme) -> Option<String> {
    match scheme {
        IdScheme::Null | IdScheme::Uid => Some(item.uid.clone()),
        IdScheme::Id => item.id.map(|id| id.to_string()),
        IdScheme::Uuid => item.uuid.clone(),
        IdScheme::Code => item.code.clone(),
        IdScheme::Name => item.name.clone(),
        IdScheme::Attribute(uid) => item.attribute_values.get(uid).cloned(),
    }
}

/// Maps each item's base dimension-item identifier to the identifier under
/// the given scheme. Items whose property is unset map to their base
/// identifier.
pub fn dimension_item_id_scheme_map<'a>(
    items: impl IntoIterator<Item = &'a DimensionalItem>,
    scheme: &IdScheme,
) -> BTreeMap<String, String> {
    items
        .into_iter()
        .map(|item| (item.dimension_item(), item.dimension_item_as(scheme)))
        .collect()
}

/// Maps operand constituents rather than the operands themselves: for each
/// (data element, category option combo) pair, both constituent identifiers
/// are entered into the mapping.
pub fn operand_id_scheme_map<'a>(
    operands: impl IntoIterator<Item = (&'a DimensionalItem, &'a DimensionalItem)>,
    scheme: &IdScheme,
) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for (data_element, category_option_combo) in operands {
        map.insert(
            data_element.dimension_item(),
            data_element.dimension_item_as(scheme),
        );
        map.insert(
            category_option_combo.dimension_item(),
            category_option_combo.dimension_item_as(scheme),
        );
    }
    map
}
