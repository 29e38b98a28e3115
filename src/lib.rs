//! # Axial
//!
//! A dimensional query normalization engine for health analytics.
//!
//! ## Architecture
//!
//! Request parameters and stored analytical objects both feed into one
//! normalized dimension model:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Request params / stored analytical object         │
//! │   (dx:..;.., pe:..;.., ou:.., group-set uids, filters)   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [id / key / timefilter]
//! ┌─────────────────────────────────────────────────────────┐
//! │      Typed identifiers (composite ids, id schemes,       │
//! │         time-field qualified period tokens)              │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [assemble + resolver]
//! ┌─────────────────────────────────────────────────────────┐
//! │      DimensionalObject per axis (live or canonical)      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [key]
//! ┌─────────────────────────────────────────────────────────┐
//! │       Canonical keys (sort keys, grid identifiers)       │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod assemble;
pub mod id;
pub mod key;
pub mod model;
pub mod resolver;
pub mod timefilter;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::assemble::{
        assemble_dimension, AssemblyContext, AssemblyMode, DimensionError, DimensionResult,
        StoredAssociations, UserContext,
    };
    pub use crate::id::{
        parse_composite, DimensionalItemId, IdScheme, ParseError, ReportingRateMetric,
    };
    pub use crate::key::{grid_identifier, sort_key};
    pub use crate::model::{
        DimensionItemType, DimensionType, DimensionalItem, DimensionalObject, Period,
        PeriodProvider, RelativePeriod,
    };
    pub use crate::timefilter::{merge_date_filters, split_date_filter, DateFilters, TimeField};
}

pub use assemble::{assemble_dimension, AssemblyMode, DimensionError, DimensionResult};
pub use id::{parse_composite, DimensionalItemId, IdScheme};
pub use key::{grid_identifier, sort_key};
pub use model::{DimensionalItem, DimensionalObject};
