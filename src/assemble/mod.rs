//! Dimension assembly: merges stored dimension associations into normalized
//! [`DimensionalObject`]s.
//!
//! One call per requested dimension key. Fixed keys (`dx`, `pe`, `ou`, `co`)
//! have bespoke rules; any other key is looked up against the embedded
//! group-set/category collections and then the tracked-entity collections,
//! first match wins. Two modes exist: live mode expands relative periods and
//! user organisation units into concrete items for execution, canonical mode
//! emits stable placeholder tokens (`USER_ORGUNIT`, `LEVEL-<n>`,
//! `OU_GROUP-<uid>`, relative-period names) for serialization and
//! round-tripping.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::id::composite::ParseError;
use crate::model::dimension::{
    DimensionalObject, CATEGORYOPTIONCOMBO_DIM_ID, DATA_X_DIM_ID, ORGUNIT_DIM_ID, PERIOD_DIM_ID,
};
use crate::model::item::DimensionalItem;
use crate::model::period::{Period, PeriodProvider, RelativePeriod};
use crate::model::types::{DimensionItemType, DimensionType};

/// Canonical placeholder for the current user's organisation units.
pub const KEY_USER_ORGUNIT: &str = "USER_ORGUNIT";
/// Canonical placeholder for the children of the user's organisation units.
pub const KEY_USER_ORGUNIT_CHILDREN: &str = "USER_ORGUNIT_CHILDREN";
/// Canonical placeholder for the grandchildren of the user's organisation
/// units.
pub const KEY_USER_ORGUNIT_GRANDCHILDREN: &str = "USER_ORGUNIT_GRANDCHILDREN";
/// Prefix for organisation-unit level placeholders, `LEVEL-<n>`.
pub const KEY_LEVEL: &str = "LEVEL-";
/// Prefix for organisation-unit group placeholders, `OU_GROUP-<uid>`.
pub const KEY_ORGUNIT_GROUP: &str = "OU_GROUP-";

/// Errors surfaced by dimension assembly.
#[derive(Debug, Error)]
pub enum DimensionError {
    /// The dimension key matches no fixed or dynamic rule.
    #[error("not a valid dimension: {0}")]
    IllegalDimension(String),

    /// The resolver found nothing for a token the grammar accepts.
    #[error("unresolved dimension item: {0}")]
    UnresolvedItem(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type DimensionResult<T> = Result<T, DimensionError>;

/// Assembly mode: concrete items for execution, or stable placeholders for
/// serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyMode {
    Live,
    Canonical,
}

/// An organisation unit with its place in the hierarchy, as needed for
/// user-org-unit expansion.
#[derive(Debug, Clone, Default)]
pub struct OrgUnit {
    pub uid: String,
    pub name: String,
    pub children: Vec<OrgUnit>,
}

impl OrgUnit {
    pub fn new(uid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<OrgUnit>) -> Self {
        self.children = children;
        self
    }

    /// Children ordered by name, then uid.
    pub fn sorted_children(&self) -> Vec<&OrgUnit> {
        let mut children: Vec<&OrgUnit> = self.children.iter().collect();
        children.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.uid.cmp(&b.uid)));
        children
    }

    /// Grandchildren, each group ordered like [`Self::sorted_children`].
    pub fn sorted_grand_children(&self) -> Vec<&OrgUnit> {
        self.sorted_children()
            .into_iter()
            .flat_map(|child| child.sorted_children())
            .collect()
    }

    fn item(&self) -> DimensionalItem {
        DimensionalItem::new(self.uid.clone(), DimensionItemType::OrganisationUnit)
            .with_name(self.name.clone())
    }
}

/// The current user, as far as assembly needs one: the organisation units
/// the user is assigned to.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    pub org_units: Vec<OrgUnit>,
}

impl UserContext {
    pub fn has_org_units(&self) -> bool {
        !self.org_units.is_empty()
    }
}

/// An embedded dimension stored on an analytical object: a group set,
/// category or category option group set together with its items.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedDimension {
    /// The dimension key (typically the group set or category uid).
    pub dimension: String,
    pub name: String,
    pub items: Vec<DimensionalItem>,
    pub legend_set: Option<String>,
    pub filter: Option<String>,
}

/// A tracked-entity dimension stored on an analytical object, keyed by the
/// dimension-item uid. Carries no items of its own, only metadata.
#[derive(Debug, Clone, Default)]
pub struct TrackedEntityDimension {
    pub uid: String,
    pub name: String,
    pub legend_set: Option<String>,
    pub filter: Option<String>,
}

/// The persisted dimension associations of one analytical object, as a plain
/// record. Assembly reads these copy-on-read and never mutates them.
#[derive(Debug, Clone, Default)]
pub struct StoredAssociations {
    pub data_dimension_items: Vec<DimensionalItem>,
    pub periods: Vec<Period>,
    pub relative_periods: Vec<RelativePeriod>,
    pub organisation_units: Vec<DimensionalItem>,
    pub transient_organisation_units: Vec<DimensionalItem>,
    pub transient_category_option_combos: Vec<DimensionalItem>,
    pub user_organisation_unit: bool,
    pub user_organisation_unit_children: bool,
    pub user_organisation_unit_grand_children: bool,
    pub organisation_unit_levels: Vec<u32>,
    /// Uids of the organisation-unit groups selected as items.
    pub item_organisation_unit_groups: Vec<String>,
    pub data_element_group_set_dimensions: Vec<EmbeddedDimension>,
    pub organisation_unit_group_set_dimensions: Vec<EmbeddedDimension>,
    pub category_dimensions: Vec<EmbeddedDimension>,
    pub category_option_group_set_dimensions: Vec<EmbeddedDimension>,
    pub attribute_dimensions: Vec<TrackedEntityDimension>,
    pub data_element_dimensions: Vec<TrackedEntityDimension>,
    pub program_indicator_dimensions: Vec<TrackedEntityDimension>,
}

impl StoredAssociations {
    pub fn has_user_org_unit(&self) -> bool {
        self.user_organisation_unit
            || self.user_organisation_unit_children
            || self.user_organisation_unit_grand_children
    }

    pub fn has_relative_periods(&self) -> bool {
        !self.relative_periods.is_empty()
    }
}

/// Runtime context for live assembly, passed explicitly: the engine never
/// reads ambient state.
pub struct AssemblyContext<'a> {
    user: Option<&'a UserContext>,
    as_of: Option<NaiveDate>,
    /// Concrete expansion of the configured organisation-unit levels,
    /// supplied by the caller.
    org_units_at_levels: Vec<DimensionalItem>,
    /// Concrete expansion of the configured organisation-unit groups,
    /// supplied by the caller.
    org_units_in_groups: Vec<DimensionalItem>,
    periods: &'a dyn PeriodProvider,
}

impl<'a> AssemblyContext<'a> {
    pub fn new(periods: &'a dyn PeriodProvider) -> Self {
        Self {
            user: None,
            as_of: None,
            org_units_at_levels: Vec::new(),
            org_units_in_groups: Vec::new(),
            periods,
        }
    }

    pub fn with_user(mut self, user: &'a UserContext) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    pub fn with_org_units_at_levels(mut self, items: Vec<DimensionalItem>) -> Self {
        self.org_units_at_levels = items;
        self
    }

    pub fn with_org_units_in_groups(mut self, items: Vec<DimensionalItem>) -> Self {
        self.org_units_in_groups = items;
        self
    }
}

/// Assembles one normalized dimension for the given key.
///
/// Unknown keys error in both modes; live mode degrades gracefully only for
/// missing optional context (no user, no "as of" date, no level or group
/// expansion supplied).
pub fn assemble_dimension(
    dimension: &str,
    stored: &StoredAssociations,
    mode: AssemblyMode,
    context: Option<&AssemblyContext<'_>>,
) -> DimensionResult<DimensionalObject> {
    match dimension {
        DATA_X_DIM_ID => Ok(data_dimension(stored)),
        PERIOD_DIM_ID => Ok(period_dimension(stored, mode, context)),
        ORGUNIT_DIM_ID => Ok(org_unit_dimension(stored, mode, context)),
        CATEGORYOPTIONCOMBO_DIM_ID => Ok(category_option_combo_dimension(stored)),
        _ => dynamic_dimension(dimension, stored),
    }
}

/// `dx`: all stored data-dimension items in stored order, duplicates
/// removed.
fn data_dimension(stored: &StoredAssociations) -> DimensionalObject {
    DimensionalObject::with_items(
        DATA_X_DIM_ID,
        DimensionType::DataX,
        "Data",
        stored.data_dimension_items.iter().cloned(),
    )
    .as_data_dimension()
}

/// `pe`: fixed periods merged with the relative-period specification.
/// Canonical mode emits one placeholder per relative-period name; live mode
/// expands them as of the context date.
fn period_dimension(
    stored: &StoredAssociations,
    mode: AssemblyMode,
    context: Option<&AssemblyContext<'_>>,
) -> DimensionalObject {
    let mut items: Vec<DimensionalItem> =
        stored.periods.iter().map(DimensionalItem::from_period).collect();

    match mode {
        AssemblyMode::Canonical => {
            sort_period_items(&mut items);
            for relative in &stored.relative_periods {
                items.push(DimensionalItem::placeholder(
                    relative.as_str(),
                    DimensionItemType::Period,
                ));
            }
        }
        AssemblyMode::Live => {
            if stored.has_relative_periods() {
                if let Some((context, as_of)) =
                    context.and_then(|c| c.as_of.map(|as_of| (c, as_of)))
                {
                    for relative in &stored.relative_periods {
                        for period in context.periods.expand(*relative, as_of) {
                            items.push(DimensionalItem::from_period(&period));
                        }
                    }
                    sort_period_items(&mut items);
                } else {
                    debug!(
                        dimension = PERIOD_DIM_ID,
                        "no as-of date in context, skipping relative period expansion"
                    );
                }
            }
        }
    }

    DimensionalObject::with_items(PERIOD_DIM_ID, DimensionType::Period, "Period", items)
}

/// Ascending by period start date; items without a concrete period keep
/// their relative order at the end.
fn sort_period_items(items: &mut [DimensionalItem]) {
    items.sort_by(|a, b| match (&a.period, &b.period) {
        (Some(a), Some(b)) => a.cmp_ascending(b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// `ou`: fixed and transient organisation units merged with the user,
/// level and group selections. Canonical mode emits one stable placeholder
/// per selection; live mode resolves against the context.
fn org_unit_dimension(
    stored: &StoredAssociations,
    mode: AssemblyMode,
    context: Option<&AssemblyContext<'_>>,
) -> DimensionalObject {
    let mut items: Vec<DimensionalItem> = stored.organisation_units.to_vec();
    items.extend(stored.transient_organisation_units.iter().cloned());

    match mode {
        AssemblyMode::Canonical => {
            if stored.user_organisation_unit {
                items.push(ou_placeholder(KEY_USER_ORGUNIT));
            }
            if stored.user_organisation_unit_children {
                items.push(ou_placeholder(KEY_USER_ORGUNIT_CHILDREN));
            }
            if stored.user_organisation_unit_grand_children {
                items.push(ou_placeholder(KEY_USER_ORGUNIT_GRANDCHILDREN));
            }
            for level in &stored.organisation_unit_levels {
                items.push(ou_placeholder(format!("{KEY_LEVEL}{level}")));
            }
            for group in &stored.item_organisation_unit_groups {
                items.push(ou_placeholder(format!("{KEY_ORGUNIT_GROUP}{group}")));
            }
        }
        AssemblyMode::Live => {
            let user = context.and_then(|c| c.user).filter(|u| u.has_org_units());

            if let Some(user) = user {
                if stored.user_organisation_unit {
                    items.extend(user.org_units.iter().map(OrgUnit::item));
                }
                if stored.user_organisation_unit_children {
                    for org_unit in &user.org_units {
                        items.extend(org_unit.sorted_children().into_iter().map(OrgUnit::item));
                    }
                }
                if stored.user_organisation_unit_grand_children {
                    for org_unit in &user.org_units {
                        items.extend(
                            org_unit.sorted_grand_children().into_iter().map(OrgUnit::item),
                        );
                    }
                }
            } else if stored.has_user_org_unit() {
                debug!(
                    dimension = ORGUNIT_DIM_ID,
                    "no user in context, skipping user org unit expansion"
                );
            }

            if let Some(context) = context {
                if !stored.organisation_unit_levels.is_empty() {
                    items.extend(context.org_units_at_levels.iter().cloned());
                }
                if !stored.item_organisation_unit_groups.is_empty() {
                    items.extend(context.org_units_in_groups.iter().cloned());
                }
            }
        }
    }

    DimensionalObject::with_items(
        ORGUNIT_DIM_ID,
        DimensionType::OrganisationUnit,
        "Organisation unit",
        items,
    )
}

fn ou_placeholder(token: impl Into<String>) -> DimensionalItem {
    DimensionalItem::placeholder(token, DimensionItemType::OrganisationUnit)
}

/// `co`: transient category option combos only; never persisted on the
/// analytical object itself.
fn category_option_combo_dimension(stored: &StoredAssociations) -> DimensionalObject {
    DimensionalObject::with_items(
        CATEGORYOPTIONCOMBO_DIM_ID,
        DimensionType::CategoryOptionCombo,
        "Category option combo",
        stored.transient_category_option_combos.iter().cloned(),
    )
}

/// Dynamic keys: the embedded collections in fixed priority order, then the
/// tracked-entity collections. The first collection containing the key wins.
fn dynamic_dimension(
    dimension: &str,
    stored: &StoredAssociations,
) -> DimensionResult<DimensionalObject> {
    let embedded: [(&[EmbeddedDimension], DimensionType); 4] = [
        (
            &stored.data_element_group_set_dimensions,
            DimensionType::DataElementGroupSet,
        ),
        (
            &stored.organisation_unit_group_set_dimensions,
            DimensionType::OrganisationUnitGroupSet,
        ),
        (&stored.category_dimensions, DimensionType::Category),
        (
            &stored.category_option_group_set_dimensions,
            DimensionType::CategoryOptionGroupSet,
        ),
    ];

    for (collection, dimension_type) in embedded {
        if let Some(embedded) = collection.iter().find(|e| e.dimension == dimension) {
            debug!(dimension, ?dimension_type, "matched embedded dimension");
            let mut object = DimensionalObject::with_items(
                dimension,
                dimension_type,
                embedded.name.clone(),
                embedded.items.iter().cloned(),
            );
            object.legend_set = embedded.legend_set.clone();
            object.filter = embedded.filter.clone();
            return Ok(object);
        }
    }

    let tracked: [(&[TrackedEntityDimension], DimensionType); 3] = [
        (&stored.attribute_dimensions, DimensionType::ProgramAttribute),
        (
            &stored.data_element_dimensions,
            DimensionType::ProgramDataElement,
        ),
        (
            &stored.program_indicator_dimensions,
            DimensionType::ProgramIndicator,
        ),
    ];

    for (collection, dimension_type) in tracked {
        if let Some(tracked) = collection.iter().find(|t| t.uid == dimension) {
            debug!(dimension, ?dimension_type, "matched tracked entity dimension");
            let mut object =
                DimensionalObject::new(dimension, dimension_type, tracked.name.clone());
            object.legend_set = tracked.legend_set.clone();
            object.filter = tracked.filter.clone();
            return Ok(object);
        }
    }

    Err(DimensionError::IllegalDimension(dimension.to_string()))
}
