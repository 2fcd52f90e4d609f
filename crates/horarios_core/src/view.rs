//! Presentation helpers over schedule lists.
//!
//! # Responsibility
//! - Group schedules by weekday or by group name for rendering.
//! - Derive display-only values (durations, labels, routes).
//! - Model the mutually exclusive loading/error/empty/ready view states.
//!
//! # Invariants
//! - All helpers are pure; nothing here performs I/O.
//! - A `WeekSchedule` always has seven buckets in Monday→Sunday order.
//! - Day buckets are sorted by `start_time` text, which equals chronological
//!   order for zero-padded `HH:MM`.

use crate::model::schedule::{parse_time_of_day, Schedule, Weekday};
use std::collections::HashMap;

pub const PLACEHOLDER_LOGO: &str = "/placeholder.svg";
pub const PLACEHOLDER_BACKGROUND: &str = "/placeholder.svg?height=1080&width=1920";

const GROUP_ROUTE_PREFIX: &str = "/group/";

// Marks that URI components keep literal but form encoding escapes.
const URI_COMPONENT_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%7E", "~"),
];

/// Schedules bucketed per weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekSchedule {
    days: [Vec<Schedule>; 7],
}

impl WeekSchedule {
    /// Entries of `day`, sorted by start time.
    pub fn day(&self, day: Weekday) -> &[Schedule] {
        &self.days[day.index()]
    }

    /// All seven days in rendering order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[Schedule])> + '_ {
        Weekday::ALL
            .iter()
            .map(move |day| (*day, self.days[day.index()].as_slice()))
    }

    /// Days that have at least one entry, in rendering order.
    pub fn non_empty_days(&self) -> impl Iterator<Item = (Weekday, &[Schedule])> + '_ {
        self.iter().filter(|(_, schedules)| !schedules.is_empty())
    }

    /// Total number of bucketed entries.
    pub fn len(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }
}

/// Buckets schedules by weekday and sorts each bucket by start time.
///
/// Records whose `day_of_week` is not a recognized token are dropped.
pub fn group_by_day(schedules: impl IntoIterator<Item = Schedule>) -> WeekSchedule {
    let mut week = WeekSchedule::default();
    for schedule in schedules {
        if let Some(day) = schedule.weekday() {
            week.days[day.index()].push(schedule);
        }
    }
    for bucket in &mut week.days {
        bucket.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    }
    week
}

/// Schedules sharing one `group_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBucket {
    pub group_name: String,
    pub schedules: Vec<Schedule>,
}

/// Buckets schedules by group name in order of first occurrence.
///
/// Entries keep their input order inside a bucket.
pub fn group_by_group_name(schedules: impl IntoIterator<Item = Schedule>) -> Vec<GroupBucket> {
    let mut buckets: Vec<GroupBucket> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for schedule in schedules {
        match index_by_name.get(&schedule.group_name) {
            Some(&index) => buckets[index].schedules.push(schedule),
            None => {
                index_by_name.insert(schedule.group_name.clone(), buckets.len());
                buckets.push(GroupBucket {
                    group_name: schedule.group_name.clone(),
                    schedules: vec![schedule],
                });
            }
        }
    }

    buckets
}

/// Hours between two `HH:MM` times on the same day.
///
/// Returns `None` when either side does not parse. The result is negative
/// when `end` precedes `start`.
pub fn duration_hours(start_time: &str, end_time: &str) -> Option<f64> {
    let start = parse_time_of_day(start_time)?;
    let end = parse_time_of_day(end_time)?;
    let minutes = end.signed_duration_since(start).num_minutes();
    Some(minutes as f64 / 60.0)
}

/// Label such as `2h`, `1.5h` or `1.33h`.
pub fn duration_label(hours: f64) -> String {
    let fixed = format!("{hours:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}h")
}

/// First two words of a group name, used on compact calendar tiles.
pub fn calendar_label(group_name: &str) -> String {
    group_name
        .split(' ')
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Spanish label for a weekday token; unknown tokens are echoed back.
pub fn day_label(token: &str) -> &str {
    Weekday::parse(token).map_or(token, |day| day.spanish_label())
}

/// Detail route for a group, e.g. `/group/BAILE%20RECREATIVO`.
pub fn group_route(group_name: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(group_name.as_bytes()).collect();
    // `byte_serialize` writes spaces as `+` and escapes a literal plus as `%2B`.
    let mut route = format!("{GROUP_ROUTE_PREFIX}{}", encoded.replace('+', "%20"));
    for (escaped, mark) in URI_COMPONENT_MARKS {
        route = route.replace(escaped, mark);
    }
    route
}

/// Extracts the decoded group name from a detail route.
///
/// Accepts an optional trailing slash. Returns `None` for other paths or an
/// empty name.
pub fn parse_group_route(path: &str) -> Option<String> {
    let segment = path.strip_prefix(GROUP_ROUTE_PREFIX)?;
    let segment = segment.strip_suffix('/').unwrap_or(segment);
    if segment.is_empty() || segment.contains('/') {
        return None;
    }

    // Form decoding would treat these as separators or spaces.
    let escaped = segment
        .replace('+', "%2B")
        .replace('&', "%26")
        .replace('=', "%3D");
    let (name, _) = form_urlencoded::parse(escaped.as_bytes()).next()?;
    let name = name.into_owned();
    (!name.is_empty()).then_some(name)
}

/// View state for one data-backed panel. Variants are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Loading,
    Error(String),
    Empty,
    Ready(T),
}

impl<T> ViewState<T> {
    /// Resolves a finished load into `Error`, `Empty` or `Ready`.
    pub fn resolve<E>(
        result: Result<T, E>,
        is_empty: impl FnOnce(&T) -> bool,
        error_message: &str,
    ) -> Self {
        match result {
            Ok(value) if is_empty(&value) => Self::Empty,
            Ok(value) => Self::Ready(value),
            Err(_) => Self::Error(error_message.to_string()),
        }
    }
}
