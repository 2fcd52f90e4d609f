//! Public browsing use-case service.
//!
//! # Responsibility
//! - Back the home listing, the weekly preview modal and the group detail
//!   page.
//! - Resolve group names to catalog display metadata.
//!
//! # Invariants
//! - Read-only: never writes to the store.
//! - The preview degrades to an empty week on store failure; the detail page
//!   reports a generic load error instead.

use crate::catalog::{Catalog, CulturalGroup};
use crate::repo::schedule_repo::{ScheduleStore, StoreError};
use crate::view::{group_by_day, WeekSchedule, PLACEHOLDER_BACKGROUND, PLACEHOLDER_LOGO};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// User-facing message for a failed schedule load.
pub const LOAD_ERROR_MESSAGE: &str = "Error al cargar los horarios";

/// Errors surfaced by browse views.
#[derive(Debug)]
pub enum ViewError {
    /// Schedules could not be loaded from the store.
    Load(StoreError),
}

impl ViewError {
    /// Generic message shown to end users.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Load(_) => LOAD_ERROR_MESSAGE,
        }
    }
}

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "failed to load schedules: {err}"),
        }
    }
}

impl Error for ViewError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
        }
    }
}

/// Data rendered by the per-group detail route.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupPage<'c> {
    /// Name taken from the route, decoded.
    pub group_name: String,
    /// Catalog entry, `None` when the name is not in the catalog.
    pub group: Option<&'c CulturalGroup>,
    pub color: &'c str,
    pub logo: &'c str,
    pub background: &'c str,
    pub week: WeekSchedule,
}

/// Browse service over a schedule store.
pub struct BrowseService<'c, S: ScheduleStore> {
    store: S,
    catalog: &'c Catalog,
}

impl<S: ScheduleStore> BrowseService<'static, S> {
    /// Creates a service over the built-in catalog.
    pub fn new(store: S) -> Self {
        Self::with_catalog(store, Catalog::builtin())
    }
}

impl<'c, S: ScheduleStore> BrowseService<'c, S> {
    pub fn with_catalog(store: S, catalog: &'c Catalog) -> Self {
        Self { store, catalog }
    }

    /// Groups for the home listing, in catalog order.
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Weekly preview for the home modal.
    ///
    /// Store failures are logged and yield an empty week.
    pub fn group_preview(&self, group_name: &str) -> WeekSchedule {
        match self.store.list_by_group(group_name) {
            Ok(schedules) => group_by_day(schedules),
            Err(err) => {
                warn!(
                    "event=group_preview module=browse status=fallback group={group_name} error={err}"
                );
                WeekSchedule::default()
            }
        }
    }

    /// Detail page for one group.
    ///
    /// # Errors
    /// - `ViewError::Load` when the store call fails.
    pub fn group_page(&self, group_name: &str) -> Result<GroupPage<'c>, ViewError> {
        let schedules = self
            .store
            .list_by_group(group_name)
            .map_err(ViewError::Load)?;
        let group = self.catalog.find_by_name(group_name);

        Ok(GroupPage {
            group_name: group_name.to_string(),
            group,
            color: self.catalog.color_for_group(group_name),
            logo: group.map_or(PLACEHOLDER_LOGO, |g| g.logo.as_str()),
            background: group.map_or(PLACEHOLDER_BACKGROUND, |g| g.background.as_str()),
            week: group_by_day(schedules),
        })
    }
}
