//! Text and JSON rendering for the read views.
//!
//! # Responsibility
//! - Turn catalog groups, weekly grids and admin buckets into terminal output.
//! - Mirror the labels shown on the public pages (Spanish day names, `Nh`
//!   durations, first-two-word calendar tiles).
//!
//! # Invariants
//! - Renderers are pure; the caller decides where the text goes.

use horarios_core::view::{calendar_label, day_label, duration_hours, duration_label, group_route};
use horarios_core::{CulturalGroup, GroupBucket, GroupPage, Schedule, ViewState, WeekSchedule};
use serde_json::{json, Value};
use std::fmt::Write;

pub const NO_SCHEDULES: &str = "No hay horarios registrados.";
pub const NO_GROUP_SCHEDULES: &str = "No hay horarios registrados para este grupo.";

const EMPTY_DAY: &str = "  (sin horarios)";

/// Text for one data panel: the rendered value, the `empty` notice, or the
/// error message as `Err`.
pub fn panel<T>(
    state: &ViewState<T>,
    empty: &str,
    ready: impl FnOnce(&T) -> String,
) -> Result<String, String> {
    match state {
        ViewState::Ready(value) => Ok(ready(value)),
        ViewState::Empty => Ok(format!("{empty}\n")),
        ViewState::Error(message) => Err(message.clone()),
        ViewState::Loading => Ok(String::new()),
    }
}

pub fn groups(groups: &[CulturalGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        let _ = writeln!(
            out,
            "{:<28} {}  {}",
            group.short_name,
            group.color,
            group_route(&group.name)
        );
    }
    out
}

pub fn groups_json(groups: &[CulturalGroup]) -> Value {
    json!(groups)
}

/// Seven-day grid; every day is printed, empty ones included.
pub fn week(week: &WeekSchedule, with_group: bool) -> String {
    let mut out = String::new();
    for (day, schedules) in week.iter() {
        let _ = writeln!(out, "{}", day.spanish_label());
        if schedules.is_empty() {
            let _ = writeln!(out, "{EMPTY_DAY}");
            continue;
        }
        for schedule in schedules {
            let _ = write!(out, "  {} - {}", schedule.start_time, schedule.end_time);
            if with_group {
                let _ = write!(out, "  {}", calendar_label(&schedule.group_name));
            }
            let _ = writeln!(out, "{}", details(schedule));
        }
    }
    out
}

/// Seven `{day, label, schedules}` entries, Monday first.
pub fn week_json(week: &WeekSchedule) -> Value {
    week.iter()
        .map(|(day, schedules)| {
            json!({
                "day": day.as_str(),
                "label": day.spanish_label(),
                "schedules": schedules,
            })
        })
        .collect()
}

pub fn group_page(page: &GroupPage<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", page.group_name);
    if let Some(group) = page.group {
        let _ = writeln!(out, "{}", group.short_name);
    }
    let _ = writeln!(out, "color: {}", page.color);
    let _ = writeln!(out, "logo: {}", page.logo);
    let _ = writeln!(out, "fondo: {}", page.background);
    let _ = writeln!(out);

    if page.week.is_empty() {
        let _ = writeln!(out, "{NO_GROUP_SCHEDULES}");
        return out;
    }

    for (day, schedules) in page.week.non_empty_days() {
        let _ = writeln!(out, "{}", day.spanish_label());
        for schedule in schedules {
            let duration = duration_hours(&schedule.start_time, &schedule.end_time)
                .map(duration_label)
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {} - {}  {duration}{}",
                schedule.start_time,
                schedule.end_time,
                details(schedule)
            );
        }
    }
    out
}

pub fn group_page_json(page: &GroupPage<'_>) -> Value {
    json!({
        "groupName": page.group_name,
        "group": page.group,
        "color": page.color,
        "logo": page.logo,
        "background": page.background,
        "week": week_json(&page.week),
    })
}

pub fn buckets(buckets: &[GroupBucket]) -> String {
    let mut out = String::new();
    for bucket in buckets {
        let color = bucket
            .schedules
            .first()
            .map_or("", |schedule| schedule.color.as_str());
        let _ = writeln!(out, "{} {color}", bucket.group_name);
        for schedule in &bucket.schedules {
            let _ = writeln!(
                out,
                "  {}  {} {} - {}{}",
                schedule.id,
                day_label(&schedule.day_of_week),
                schedule.start_time,
                schedule.end_time,
                details(schedule)
            );
        }
    }
    out
}

/// `{groupName, schedules}` entries in first-occurrence order.
pub fn buckets_json(buckets: &[GroupBucket]) -> Value {
    buckets
        .iter()
        .map(|bucket| {
            json!({
                "groupName": bucket.group_name,
                "schedules": bucket.schedules,
            })
        })
        .collect()
}

fn details(schedule: &Schedule) -> String {
    let mut out = String::new();
    if let Some(sub_group) = &schedule.sub_group {
        let _ = write!(out, "  [{sub_group}]");
    }
    if let Some(lugar) = &schedule.lugar {
        let _ = write!(out, "  @ {lugar}");
    }
    out
}
