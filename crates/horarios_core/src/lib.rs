//! Core domain logic for the cultural-group schedule site.
//! This crate is the single source of truth for schedule invariants.

pub mod catalog;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use catalog::{color_for_group, Catalog, CatalogError, CulturalGroup, DEFAULT_GROUP_COLOR};
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::schedule::{NewSchedule, Schedule, ScheduleId, SchedulePatch, Weekday};
pub use model::validation::{ScheduleDraft, ScheduleField, ValidationErrors, ValidationRules};
pub use repo::schedule_repo::{ScheduleStore, SqliteScheduleStore, StoreError, StoreResult};
pub use service::admin_service::{AdminError, AdminService, SubmitOutcome};
pub use service::browse_service::{BrowseService, GroupPage, ViewError};
pub use view::{group_by_day, group_by_group_name, GroupBucket, ViewState, WeekSchedule};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
