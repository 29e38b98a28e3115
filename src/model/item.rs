//! Dimension items: the atomic values along a dimension axis.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::composite::{DimensionalItemId, ParseResult, ReportingRateMetric};
use crate::id::scheme::{self, IdScheme};
use crate::model::period::Period;
use crate::model::types::{AggregationType, DimensionItemType};

/// Expression-level overrides attached to a dimension item: period offsets,
/// date bounds, a sub-expression and aggregation or value-type overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryModifiers {
    pub period_offset: i32,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub sub_expression: Option<String>,
    pub aggregation_type: Option<AggregationType>,
    pub value_type: Option<String>,
}

impl QueryModifiers {
    /// True when nothing is overridden, meaning no extra grouping key is
    /// needed downstream.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// One concrete value along a dimension.
///
/// Constructed fresh per query; plain kinds may wrap a persisted object
/// (uid, code, name, attribute values), composite kinds carry the typed
/// identifier of their constituents, and period items carry the concrete
/// period when one exists (canonical placeholders do not).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionalItem {
    pub uid: String,
    pub code: Option<String>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub item_type: DimensionItemType,
    pub composite: Option<DimensionalItemId>,
    pub period: Option<Period>,
    pub legend_sets: Vec<String>,
    pub aggregation_type: Option<AggregationType>,
    pub query_mods: QueryModifiers,
    pub attribute_values: BTreeMap<String, String>,
    /// Internal database id, when the item wraps a persisted object.
    pub id: Option<i64>,
    pub uuid: Option<String>,
}

impl DimensionalItem {
    pub fn new(uid: impl Into<String>, item_type: DimensionItemType) -> Self {
        Self {
            uid: uid.into(),
            code: None,
            name: None,
            short_name: None,
            item_type,
            composite: None,
            period: None,
            legend_sets: Vec::new(),
            aggregation_type: None,
            query_mods: QueryModifiers::default(),
            attribute_values: BTreeMap::new(),
            id: None,
            uuid: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    pub fn with_aggregation_type(mut self, aggregation_type: AggregationType) -> Self {
        self.aggregation_type = Some(aggregation_type);
        self
    }

    pub fn with_legend_set(mut self, legend_set: impl Into<String>) -> Self {
        self.legend_sets.push(legend_set.into());
        self
    }

    pub fn with_attribute_value(
        mut self,
        attribute_uid: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attribute_values.insert(attribute_uid.into(), value.into());
        self
    }

    pub fn with_internal_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// A data element operand: data element plus optional category option
    /// combo and attribute option combo. The item identity is the dotted
    /// composite.
    pub fn operand(
        data_element: impl Into<String>,
        category_option_combo: Option<String>,
        attribute_option_combo: Option<String>,
    ) -> ParseResult<Self> {
        let composite = DimensionalItemId::new(
            DimensionItemType::DataElementOperand,
            data_element,
            category_option_combo,
            attribute_option_combo,
        )?;
        Ok(Self::from_composite(composite))
    }

    /// A data set reporting rate for a given metric.
    pub fn reporting_rate(
        data_set: impl Into<String>,
        metric: ReportingRateMetric,
    ) -> ParseResult<Self> {
        let composite = DimensionalItemId::new(
            DimensionItemType::ReportingRate,
            data_set,
            Some(metric.as_str().to_string()),
            None,
        )?;
        Ok(Self::from_composite(composite))
    }

    /// A data element scoped to a program.
    pub fn program_data_element(
        program: impl Into<String>,
        data_element: impl Into<String>,
    ) -> ParseResult<Self> {
        let composite = DimensionalItemId::new(
            DimensionItemType::ProgramDataElement,
            program,
            Some(data_element.into()),
            None,
        )?;
        Ok(Self::from_composite(composite))
    }

    /// A tracked-entity attribute scoped to a program.
    pub fn program_attribute(
        program: impl Into<String>,
        attribute: impl Into<String>,
    ) -> ParseResult<Self> {
        let composite = DimensionalItemId::new(
            DimensionItemType::ProgramAttribute,
            program,
            Some(attribute.into()),
            None,
        )?;
        Ok(Self::from_composite(composite))
    }

    /// Wraps a typed composite identifier as an item.
    pub fn from_composite(composite: DimensionalItemId) -> Self {
        let mut item = Self::new(composite.id0().to_string(), composite.item_type());
        item.query_mods = composite.query_mods().clone();
        item.composite = Some(composite);
        item
    }

    /// A concrete period item. The ISO token is the item identity.
    pub fn from_period(period: &Period) -> Self {
        let mut item = Self::new(period.iso.clone(), DimensionItemType::Period);
        item.period = Some(period.clone());
        item
    }

    /// A stable placeholder item used in canonical mode, e.g. `USER_ORGUNIT`
    /// or a relative-period name. The token itself is the identity.
    pub fn placeholder(token: impl Into<String>, item_type: DimensionItemType) -> Self {
        Self::new(token, item_type)
    }

    /// The resolvable dimension-item string: the dotted composite for
    /// operand, reporting rate and program-scoped kinds, the uid otherwise.
    pub fn dimension_item(&self) -> String {
        match &self.composite {
            Some(composite) => composite.item(),
            None => self.uid.clone(),
        }
    }

    /// The dimension-item string under the given id scheme, falling back to
    /// the base identifier when the selected property is unset.
    pub fn dimension_item_as(&self, id_scheme: &IdScheme) -> String {
        match id_scheme {
            IdScheme::Null | IdScheme::Uid => self.dimension_item(),
            _ => scheme::resolve_property_value(self, id_scheme)
                .unwrap_or_else(|| self.dimension_item()),
        }
    }

    /// The name used when building header keys: short name, then name, then
    /// the identifier.
    pub fn header_name(&self) -> &str {
        self.short_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(&self.uid)
    }
}
