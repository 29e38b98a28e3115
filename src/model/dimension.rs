//! Dimensional objects: one normalized axis of an analytics query.

use serde::{Deserialize, Serialize};

use crate::model::item::DimensionalItem;
use crate::model::types::{AggregationType, DimensionType};

/// Fixed dimension key for data.
pub const DATA_X_DIM_ID: &str = "dx";
/// Fixed dimension key for periods.
pub const PERIOD_DIM_ID: &str = "pe";
/// Fixed dimension key for organisation units.
pub const ORGUNIT_DIM_ID: &str = "ou";
/// Fixed dimension key for category option combinations.
pub const CATEGORYOPTIONCOMBO_DIM_ID: &str = "co";

/// A normalized dimension: an ordered, de-duplicated collection of items
/// plus axis metadata. Built per query and discarded with the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionalObject {
    /// The dimension key, e.g. `dx` or a group-set uid.
    pub dimension: String,
    pub dimension_type: DimensionType,
    pub name: String,
    items: Vec<DimensionalItem>,
    /// When set, `items` means "all available" rather than an exhaustive
    /// list.
    pub all_items: bool,
    pub filter: Option<String>,
    pub legend_set: Option<String>,
    pub aggregation_type: Option<AggregationType>,
    pub data_dimension: bool,
}

impl DimensionalObject {
    pub fn new(
        dimension: impl Into<String>,
        dimension_type: DimensionType,
        name: impl Into<String>,
    ) -> Self {
        Self {
            dimension: dimension.into(),
            dimension_type,
            name: name.into(),
            items: Vec::new(),
            all_items: false,
            filter: None,
            legend_set: None,
            aggregation_type: None,
            data_dimension: false,
        }
    }

    pub fn with_items(
        dimension: impl Into<String>,
        dimension_type: DimensionType,
        name: impl Into<String>,
        items: impl IntoIterator<Item = DimensionalItem>,
    ) -> Self {
        let mut object = Self::new(dimension, dimension_type, name);
        object.add_items(items);
        object
    }

    /// A copy of another dimension carrying a different item list. The items
    /// go through the usual de-duplication.
    pub fn copy_of(
        other: &DimensionalObject,
        items: impl IntoIterator<Item = DimensionalItem>,
    ) -> Self {
        let mut object = other.clone();
        object.items.clear();
        object.add_items(items);
        object
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_legend_set(mut self, legend_set: impl Into<String>) -> Self {
        self.legend_set = Some(legend_set.into());
        self
    }

    pub fn with_aggregation_type(mut self, aggregation_type: AggregationType) -> Self {
        self.aggregation_type = Some(aggregation_type);
        self
    }

    pub fn with_all_items(mut self, all_items: bool) -> Self {
        self.all_items = all_items;
        self
    }

    pub fn as_data_dimension(mut self) -> Self {
        self.data_dimension = true;
        self
    }

    /// Adds an item unless another item with the same dimension-item string
    /// is already present. Insertion order is preserved, so the first
    /// occurrence wins.
    pub fn add_item(&mut self, item: DimensionalItem) {
        let id = item.dimension_item();
        if !self.items.iter().any(|existing| existing.dimension_item() == id) {
            self.items.push(item);
        }
    }

    pub fn add_items(&mut self, items: impl IntoIterator<Item = DimensionalItem>) {
        for item in items {
            self.add_item(item);
        }
    }

    pub fn items(&self) -> &[DimensionalItem] {
        &self.items
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// The dimension-item strings of all items, in order.
    pub fn item_ids(&self) -> Vec<String> {
        self.items.iter().map(DimensionalItem::dimension_item).collect()
    }
}

/// Whether at least one of the given dimensions has at least one item.
pub fn any_dimension_has_items(dimensions: &[DimensionalObject]) -> bool {
    dimensions.iter().any(DimensionalObject::has_items)
}
