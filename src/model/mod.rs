//! The dimensional item/object model.

pub mod dimension;
pub mod item;
pub mod period;
pub mod types;

pub use dimension::{
    any_dimension_has_items, DimensionalObject, CATEGORYOPTIONCOMBO_DIM_ID, DATA_X_DIM_ID,
    ORGUNIT_DIM_ID, PERIOD_DIM_ID,
};
pub use item::{DimensionalItem, QueryModifiers};
pub use period::{CalendarPeriodProvider, Period, PeriodProvider, RelativePeriod};
pub use types::{AggregationType, DimensionItemType, DimensionType};
