//! Schedule domain model.
//!
//! # Responsibility
//! - Define the persisted weekly schedule record and its create/patch shapes.
//! - Define the closed set of weekday tokens and time-of-day parsing.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused for another schedule.
//! - `start_time`/`end_time` are zero-padded `HH:MM` text when written through
//!   the admin path, so lexicographic order equals chronological order.
//! - `day_of_week` is kept as text; unknown tokens survive a read-back.

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static TIME_OF_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[01]\d|2[0-3]):[0-5]\d$").expect("valid time regex"));

/// Store-assigned identifier of a schedule document.
pub type ScheduleId = Uuid;

/// Weekday token stored in `dayOfWeek`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Rendering order used by every weekly view.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Parses an English weekday token. Matching is exact and case-sensitive.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "Monday" => Some(Self::Monday),
            "Tuesday" => Some(Self::Tuesday),
            "Wednesday" => Some(Self::Wednesday),
            "Thursday" => Some(Self::Thursday),
            "Friday" => Some(Self::Friday),
            "Saturday" => Some(Self::Saturday),
            "Sunday" => Some(Self::Sunday),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// Display label shown on public pages and the console.
    pub fn spanish_label(self) -> &'static str {
        match self {
            Self::Monday => "Lunes",
            Self::Tuesday => "Martes",
            Self::Wednesday => "Miércoles",
            Self::Thursday => "Jueves",
            Self::Friday => "Viernes",
            Self::Saturday => "Sábado",
            Self::Sunday => "Domingo",
        }
    }

    /// Zero-based position in Monday→Sunday order.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses strict zero-padded `HH:MM` text into a time of day.
///
/// Returns `None` for any other shape (`9:00`, `09:00:00`, `24:00`).
pub fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    if !TIME_OF_DAY_RE.is_match(text) {
        return None;
    }
    NaiveTime::parse_from_str(text, "%H:%M").ok()
}

/// Schedule document body before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSchedule {
    /// Must equal some `CulturalGroup::name` by convention.
    pub group_name: String,
    pub start_time: String,
    pub end_time: String,
    pub day_of_week: String,
    /// Free-form category such as `semillero`, `proceso` or `representativo`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_group: Option<String>,
    /// Meeting place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lugar: Option<String>,
    /// Hex color copied from the owning group at write time.
    pub color: String,
}

/// Persisted schedule document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: ScheduleId,
    pub group_name: String,
    pub start_time: String,
    pub end_time: String,
    pub day_of_week: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lugar: Option<String>,
    pub color: String,
}

impl Schedule {
    /// Attaches a store-assigned id to a document body.
    pub fn from_new(id: ScheduleId, body: NewSchedule) -> Self {
        Self {
            id,
            group_name: body.group_name,
            start_time: body.start_time,
            end_time: body.end_time,
            day_of_week: body.day_of_week,
            sub_group: body.sub_group,
            lugar: body.lugar,
            color: body.color,
        }
    }

    /// Returns the document body without its id.
    pub fn to_new(&self) -> NewSchedule {
        NewSchedule {
            group_name: self.group_name.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            day_of_week: self.day_of_week.clone(),
            sub_group: self.sub_group.clone(),
            lugar: self.lugar.clone(),
            color: self.color.clone(),
        }
    }

    /// Parsed weekday, `None` for unrecognized tokens.
    pub fn weekday(&self) -> Option<Weekday> {
        Weekday::parse(&self.day_of_week)
    }
}

/// Partial update merged into an existing schedule.
///
/// `None` leaves a field untouched. For the optional fields, `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulePatch {
    pub group_name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub day_of_week: Option<String>,
    pub sub_group: Option<Option<String>>,
    pub lugar: Option<Option<String>>,
    pub color: Option<String>,
}

impl SchedulePatch {
    /// Patch that overwrites every field with `body`.
    pub fn replace_all(body: NewSchedule) -> Self {
        Self {
            group_name: Some(body.group_name),
            start_time: Some(body.start_time),
            end_time: Some(body.end_time),
            day_of_week: Some(body.day_of_week),
            sub_group: Some(body.sub_group),
            lugar: Some(body.lugar),
            color: Some(body.color),
        }
    }

    /// Patch touching only `lugar`.
    pub fn lugar(value: impl Into<String>) -> Self {
        Self {
            lugar: Some(Some(value.into())),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merges the patch into `schedule`. The id is never touched.
    pub fn apply_to(&self, schedule: &mut Schedule) {
        if let Some(value) = &self.group_name {
            schedule.group_name = value.clone();
        }
        if let Some(value) = &self.start_time {
            schedule.start_time = value.clone();
        }
        if let Some(value) = &self.end_time {
            schedule.end_time = value.clone();
        }
        if let Some(value) = &self.day_of_week {
            schedule.day_of_week = value.clone();
        }
        if let Some(value) = &self.sub_group {
            schedule.sub_group = value.clone();
        }
        if let Some(value) = &self.lugar {
            schedule.lugar = value.clone();
        }
        if let Some(value) = &self.color {
            schedule.color = value.clone();
        }
    }
}
