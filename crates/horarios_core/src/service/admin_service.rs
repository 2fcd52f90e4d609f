//! Admin console use-case service.
//!
//! # Responsibility
//! - Validate console drafts and write them through the store.
//! - Derive the stored `color` from the owning group at write time.
//! - Back the registered-schedules list and the weekly calendar tab.
//!
//! # Invariants
//! - Validation runs before any store call; invalid drafts never reach it.
//! - Editing overwrites every field of the target record (last write wins).

use crate::catalog::Catalog;
use crate::model::schedule::{Schedule, ScheduleId, SchedulePatch};
use crate::model::validation::{ScheduleDraft, ValidationErrors, ValidationRules};
use crate::repo::schedule_repo::{ScheduleStore, StoreError, StoreResult};
use crate::view::{group_by_day, group_by_group_name, GroupBucket, WeekSchedule};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// User-facing message for a failed save or delete.
pub const SAVE_ERROR_MESSAGE: &str = "Error al guardar el horario";

/// Errors from console operations.
#[derive(Debug)]
pub enum AdminError {
    /// Draft failed validation; nothing was sent to the store.
    Validation(ValidationErrors),
    /// Store-level failure.
    Store(StoreError),
}

impl AdminError {
    /// Generic message for store failures; validation errors are shown per field.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(errors) => errors.to_string(),
            Self::Store(_) => SAVE_ERROR_MESSAGE.to_string(),
        }
    }
}

impl Display for AdminError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "invalid schedule: {errors}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AdminError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationErrors> for AdminError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for AdminError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(ScheduleId),
    Updated(ScheduleId),
}

impl SubmitOutcome {
    pub fn id(self) -> ScheduleId {
        match self {
            Self::Created(id) | Self::Updated(id) => id,
        }
    }
}

/// Console service over a schedule store.
pub struct AdminService<'c, S: ScheduleStore> {
    store: S,
    catalog: &'c Catalog,
    rules: ValidationRules,
}

impl<S: ScheduleStore> AdminService<'static, S> {
    /// Creates a service over the built-in catalog with base rules.
    pub fn new(store: S) -> Self {
        Self::with_catalog(store, Catalog::builtin())
    }
}

impl<'c, S: ScheduleStore> AdminService<'c, S> {
    pub fn with_catalog(store: S, catalog: &'c Catalog) -> Self {
        Self {
            store,
            catalog,
            rules: ValidationRules::default(),
        }
    }

    /// Replaces the validation rules.
    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> ValidationRules {
        self.rules
    }

    /// Validates and saves a draft.
    ///
    /// `editing = None` creates a record; `Some(id)` overwrites that record.
    ///
    /// # Errors
    /// - `AdminError::Validation` with every failing field.
    /// - `AdminError::Store` when the write fails (including `NotFound`).
    pub fn submit(
        &self,
        draft: &ScheduleDraft,
        editing: Option<ScheduleId>,
    ) -> Result<SubmitOutcome, AdminError> {
        draft.validate_with(self.rules, self.catalog)?;

        let color = self.catalog.color_for_group(draft.group_name.trim());
        let body = draft.to_new_schedule(color);

        match editing {
            None => {
                let id = self.store.create(&body)?;
                info!(
                    "event=schedule_submit module=admin status=ok action=create id={id} group={}",
                    body.group_name
                );
                Ok(SubmitOutcome::Created(id))
            }
            Some(id) => {
                self.store.update(id, &SchedulePatch::replace_all(body))?;
                info!("event=schedule_submit module=admin status=ok action=update id={id}");
                Ok(SubmitOutcome::Updated(id))
            }
        }
    }

    /// Loads a stored record into a draft for the edit form.
    pub fn edit_draft(&self, id: ScheduleId) -> StoreResult<ScheduleDraft> {
        let schedule = self.store.get(id)?.ok_or(StoreError::NotFound(id))?;
        Ok(ScheduleDraft::from_schedule(&schedule))
    }

    /// Deletes one record.
    pub fn delete(&self, id: ScheduleId) -> StoreResult<()> {
        self.store.delete(id)?;
        info!("event=schedule_delete module=admin status=ok id={id}");
        Ok(())
    }

    /// Every stored schedule, unsorted.
    pub fn all(&self) -> StoreResult<Vec<Schedule>> {
        self.store.list_all()
    }

    /// Registered-schedules list, bucketed by group name.
    pub fn registered_by_group(&self) -> StoreResult<Vec<GroupBucket>> {
        Ok(group_by_group_name(self.store.list_all()?))
    }

    /// Weekly calendar of every stored schedule.
    pub fn weekly_calendar(&self) -> StoreResult<WeekSchedule> {
        Ok(group_by_day(self.store.list_all()?))
    }
}
