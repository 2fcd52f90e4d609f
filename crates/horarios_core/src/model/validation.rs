//! Admin write-path validation.
//!
//! # Responsibility
//! - Hold the console form state (`ScheduleDraft`).
//! - Validate a draft into field-scoped, human-readable messages.
//! - Convert a valid draft into a storable `NewSchedule`.
//!
//! # Invariants
//! - Validation is pure: it never touches the store.
//! - Any failing field rejects the whole submission.
//! - Every run starts from scratch; no state is carried between attempts.

use crate::catalog::Catalog;
use crate::model::schedule::{parse_time_of_day, NewSchedule, Schedule, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MSG_GROUP_REQUIRED: &str = "Selecciona un grupo cultural";
pub const MSG_GROUP_NOT_IN_CATALOG: &str = "Selecciona un grupo del catálogo";
pub const MSG_START_REQUIRED: &str = "Ingresa la hora de inicio";
pub const MSG_END_REQUIRED: &str = "Ingresa la hora de fin";
pub const MSG_DAY_REQUIRED: &str = "Selecciona el día de la semana";
pub const MSG_LUGAR_REQUIRED: &str = "Ingresa el lugar";
pub const MSG_TIME_FORMAT: &str = "Formato de hora inválido (HH:MM)";
pub const MSG_END_BEFORE_START: &str = "La hora de fin debe ser posterior a la hora de inicio";

/// Console option meaning "no sub-group".
pub const SUB_GROUP_NONE: &str = "none";

/// Sub-group options offered by the console picker.
pub const SUB_GROUP_OPTIONS: [&str; 3] = ["semillero", "proceso", "representativo"];

/// Form field a validation message is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScheduleField {
    GroupName,
    StartTime,
    EndTime,
    DayOfWeek,
    Lugar,
}

impl ScheduleField {
    /// Document field name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GroupName => "groupName",
            Self::StartTime => "startTime",
            Self::EndTime => "endTime",
            Self::DayOfWeek => "dayOfWeek",
            Self::Lugar => "lugar",
        }
    }
}

impl Display for ScheduleField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-scoped validation failures, one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<ScheduleField, &'static str>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Message attached to `field`, if it failed.
    pub fn get(&self, field: ScheduleField) -> Option<&'static str> {
        self.fields.get(&field).copied()
    }

    /// Failures in form order.
    pub fn iter(&self) -> impl Iterator<Item = (ScheduleField, &'static str)> + '_ {
        self.fields.iter().map(|(field, message)| (*field, *message))
    }

    // Later checks overwrite earlier ones for the same field.
    fn set(&mut self, field: ScheduleField, message: &'static str) {
        self.fields.insert(field, message);
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl Error for ValidationErrors {}

/// Optional strictness switches layered over the base rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationRules {
    /// Reject `group_name` values missing from the catalog.
    pub require_catalog_group: bool,
}

impl ValidationRules {
    pub fn strict() -> Self {
        Self {
            require_catalog_group: true,
        }
    }
}

/// Console form state. Every field is raw text as typed or picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDraft {
    pub group_name: String,
    pub start_time: String,
    pub end_time: String,
    pub day_of_week: String,
    pub sub_group: String,
    pub lugar: String,
}

impl ScheduleDraft {
    /// Loads a stored schedule into the form for editing.
    pub fn from_schedule(schedule: &Schedule) -> Self {
        Self {
            group_name: schedule.group_name.clone(),
            start_time: schedule.start_time.clone(),
            end_time: schedule.end_time.clone(),
            day_of_week: schedule.day_of_week.clone(),
            sub_group: schedule.sub_group.clone().unwrap_or_default(),
            lugar: schedule.lugar.clone().unwrap_or_default(),
        }
    }

    /// Validates with the base rules only.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.validate_with(ValidationRules::default(), Catalog::builtin())
    }

    /// Validates against `rules`, consulting `catalog` for group checks.
    pub fn validate_with(
        &self,
        rules: ValidationRules,
        catalog: &Catalog,
    ) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let group_name = self.group_name.trim();
        if group_name.is_empty() {
            errors.set(ScheduleField::GroupName, MSG_GROUP_REQUIRED);
        } else if rules.require_catalog_group && !catalog.contains_name(group_name) {
            errors.set(ScheduleField::GroupName, MSG_GROUP_NOT_IN_CATALOG);
        }

        let start_text = self.start_time.trim();
        let end_text = self.end_time.trim();
        let start = if start_text.is_empty() {
            errors.set(ScheduleField::StartTime, MSG_START_REQUIRED);
            None
        } else {
            let parsed = parse_time_of_day(start_text);
            if parsed.is_none() {
                errors.set(ScheduleField::StartTime, MSG_TIME_FORMAT);
            }
            parsed
        };
        let end = if end_text.is_empty() {
            errors.set(ScheduleField::EndTime, MSG_END_REQUIRED);
            None
        } else {
            let parsed = parse_time_of_day(end_text);
            if parsed.is_none() {
                errors.set(ScheduleField::EndTime, MSG_TIME_FORMAT);
            }
            parsed
        };

        if Weekday::parse(self.day_of_week.trim()).is_none() {
            errors.set(ScheduleField::DayOfWeek, MSG_DAY_REQUIRED);
        }

        if self.lugar.trim().is_empty() {
            errors.set(ScheduleField::Lugar, MSG_LUGAR_REQUIRED);
        }

        if let (Some(start), Some(end)) = (start, end) {
            if start >= end {
                errors.set(ScheduleField::EndTime, MSG_END_BEFORE_START);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Builds the storable body from a draft that already passed validation.
    ///
    /// Text is trimmed; an empty or `none` sub-group becomes `None`.
    pub fn to_new_schedule(&self, color: impl Into<String>) -> NewSchedule {
        let sub_group = self.sub_group.trim();
        let lugar = self.lugar.trim();
        NewSchedule {
            group_name: self.group_name.trim().to_string(),
            start_time: self.start_time.trim().to_string(),
            end_time: self.end_time.trim().to_string(),
            day_of_week: self.day_of_week.trim().to_string(),
            sub_group: (!sub_group.is_empty() && sub_group != SUB_GROUP_NONE)
                .then(|| sub_group.to_string()),
            lugar: (!lugar.is_empty()).then(|| lugar.to_string()),
            color: color.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn valid_draft() -> ScheduleDraft {
        ScheduleDraft {
            group_name: "CORO MAGNO DE LA UNIVERSIDAD DEL VALLE".to_string(),
            start_time: "10:00".to_string(),
            end_time: "12:00".to_string(),
            day_of_week: "Tuesday".to_string(),
            sub_group: String::new(),
            lugar: "Auditorio".to_string(),
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert_eq!(valid_draft().validate(), Ok(()));
    }

    #[test]
    fn empty_draft_reports_every_required_field() {
        let errors = ScheduleDraft::default().validate().unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get(ScheduleField::GroupName), Some(MSG_GROUP_REQUIRED));
        assert_eq!(errors.get(ScheduleField::StartTime), Some(MSG_START_REQUIRED));
        assert_eq!(errors.get(ScheduleField::EndTime), Some(MSG_END_REQUIRED));
        assert_eq!(errors.get(ScheduleField::DayOfWeek), Some(MSG_DAY_REQUIRED));
        assert_eq!(errors.get(ScheduleField::Lugar), Some(MSG_LUGAR_REQUIRED));
    }

    #[test]
    fn start_not_before_end_fails_on_end_time() {
        for (start, end) in [("12:00", "10:00"), ("10:00", "10:00"), ("23:59", "00:00")] {
            let draft = ScheduleDraft {
                start_time: start.to_string(),
                end_time: end.to_string(),
                ..valid_draft()
            };
            let errors = draft.validate().unwrap_err();
            assert_eq!(errors.len(), 1, "{start}-{end}");
            assert_eq!(errors.get(ScheduleField::EndTime), Some(MSG_END_BEFORE_START));
        }
    }

    #[test]
    fn start_before_end_passes_for_boundary_pairs() {
        for (start, end) in [("00:00", "00:01"), ("09:59", "10:00"), ("07:00", "23:59")] {
            let draft = ScheduleDraft {
                start_time: start.to_string(),
                end_time: end.to_string(),
                ..valid_draft()
            };
            assert!(draft.validate().is_ok(), "{start}-{end}");
        }
    }

    #[test]
    fn unrecognized_weekday_fails() {
        let draft = ScheduleDraft {
            day_of_week: "Lunes".to_string(),
            ..valid_draft()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.get(ScheduleField::DayOfWeek), Some(MSG_DAY_REQUIRED));
    }

    #[test]
    fn malformed_time_fails_on_its_own_field() {
        let draft = ScheduleDraft {
            start_time: "9:00".to_string(),
            ..valid_draft()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(ScheduleField::StartTime), Some(MSG_TIME_FORMAT));
    }

    #[test]
    fn whitespace_only_place_is_rejected() {
        let draft = ScheduleDraft {
            lugar: "   ".to_string(),
            ..valid_draft()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.get(ScheduleField::Lugar), Some(MSG_LUGAR_REQUIRED));
    }

    #[test]
    fn catalog_rule_is_opt_in() {
        let draft = ScheduleDraft {
            group_name: "GRUPO INVENTADO".to_string(),
            ..valid_draft()
        };
        assert!(draft.validate().is_ok());

        let errors = draft
            .validate_with(ValidationRules::strict(), Catalog::builtin())
            .unwrap_err();
        assert_eq!(
            errors.get(ScheduleField::GroupName),
            Some(MSG_GROUP_NOT_IN_CATALOG)
        );
    }

    #[test]
    fn display_lists_fields_in_form_order() {
        let draft = ScheduleDraft {
            group_name: String::new(),
            lugar: String::new(),
            ..valid_draft()
        };
        let rendered = draft.validate().unwrap_err().to_string();
        assert_eq!(
            rendered,
            format!("groupName: {MSG_GROUP_REQUIRED}; lugar: {MSG_LUGAR_REQUIRED}")
        );
    }

    #[test]
    fn to_new_schedule_trims_and_normalizes_optional_fields() {
        let draft = ScheduleDraft {
            sub_group: SUB_GROUP_NONE.to_string(),
            lugar: "  Auditorio ".to_string(),
            ..valid_draft()
        };
        let body = draft.to_new_schedule("#a16207");
        assert_eq!(body.sub_group, None);
        assert_eq!(body.lugar.as_deref(), Some("Auditorio"));
        assert_eq!(body.color, "#a16207");

        let draft = ScheduleDraft {
            sub_group: "semillero".to_string(),
            ..valid_draft()
        };
        assert_eq!(
            draft.to_new_schedule("#a16207").sub_group.as_deref(),
            Some("semillero")
        );
    }
}
