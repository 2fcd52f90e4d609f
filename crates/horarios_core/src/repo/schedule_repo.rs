//! Schedule store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `schedules` collection.
//! - Keep SQL details inside the persistence boundary.
//! - Log every failure at the store boundary before propagating it.
//!
//! # Invariants
//! - The store does not validate documents; callers validate before writing.
//! - Ids are assigned by the store on create and never reused.
//! - Updates are last-write-wins merges; there is no version check.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::schedule::{NewSchedule, Schedule, ScheduleId, SchedulePatch};
use log::{debug, error};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;
use uuid::Uuid;

const SCHEDULE_SELECT_SQL: &str = "SELECT
    id,
    group_name,
    start_time,
    end_time,
    day_of_week,
    sub_group,
    lugar,
    color
FROM schedules";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a store operation.
///
/// Callers treat every variant as "operation failed"; the split exists for
/// logs and tests.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    NotFound(ScheduleId),
    InvalidData(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "schedule not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted schedule data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data-access contract for the `schedules` collection.
pub trait ScheduleStore {
    /// Every persisted schedule. Order is not part of the contract.
    fn list_all(&self) -> StoreResult<Vec<Schedule>>;
    /// Schedules whose `group_name` equals `group_name` exactly.
    fn list_by_group(&self, group_name: &str) -> StoreResult<Vec<Schedule>>;
    fn get(&self, id: ScheduleId) -> StoreResult<Option<Schedule>>;
    /// Persists `schedule` and returns the assigned id.
    fn create(&self, schedule: &NewSchedule) -> StoreResult<ScheduleId>;
    /// Merges `patch` into the record; `NotFound` when it does not exist.
    fn update(&self, id: ScheduleId, patch: &SchedulePatch) -> StoreResult<()>;
    /// Removes the record; `NotFound` when it does not exist.
    fn delete(&self, id: ScheduleId) -> StoreResult<()>;
}

impl<S: ScheduleStore + ?Sized> ScheduleStore for &S {
    fn list_all(&self) -> StoreResult<Vec<Schedule>> {
        (**self).list_all()
    }

    fn list_by_group(&self, group_name: &str) -> StoreResult<Vec<Schedule>> {
        (**self).list_by_group(group_name)
    }

    fn get(&self, id: ScheduleId) -> StoreResult<Option<Schedule>> {
        (**self).get(id)
    }

    fn create(&self, schedule: &NewSchedule) -> StoreResult<ScheduleId> {
        (**self).create(schedule)
    }

    fn update(&self, id: ScheduleId, patch: &SchedulePatch) -> StoreResult<()> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: ScheduleId) -> StoreResult<()> {
        (**self).delete(id)
    }
}

/// SQLite-backed schedule store.
pub struct SqliteScheduleStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteScheduleStore<'conn> {
    /// Wraps a connection opened through `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `DbError::SchemaNotReady` when migrations have not been applied.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let db_version = current_version(conn)?;
        let expected = latest_version();
        if db_version != expected {
            return Err(DbError::SchemaNotReady {
                db_version,
                expected,
            }
            .into());
        }
        Ok(Self { conn })
    }

    fn insert_row(&self, id: ScheduleId, schedule: &NewSchedule) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO schedules (
                id,
                group_name,
                start_time,
                end_time,
                day_of_week,
                sub_group,
                lugar,
                color
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                id.to_string(),
                schedule.group_name.as_str(),
                schedule.start_time.as_str(),
                schedule.end_time.as_str(),
                schedule.day_of_week.as_str(),
                schedule.sub_group.as_deref(),
                schedule.lugar.as_deref(),
                schedule.color.as_str(),
            ],
        )?;
        Ok(())
    }

    fn select_one(&self, id: ScheduleId) -> StoreResult<Option<Schedule>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SCHEDULE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_schedule_row(row)?));
        }
        Ok(None)
    }

    fn select_many(&self, group_name: Option<&str>) -> StoreResult<Vec<Schedule>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SCHEDULE_SELECT_SQL}
             WHERE (?1 IS NULL OR group_name = ?1)
             ORDER BY rowid ASC;"
        ))?;
        let mut rows = stmt.query([group_name])?;
        let mut schedules = Vec::new();
        while let Some(row) = rows.next()? {
            schedules.push(parse_schedule_row(row)?);
        }
        Ok(schedules)
    }

    fn merge_row(&self, id: ScheduleId, patch: &SchedulePatch) -> StoreResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let mut schedule = self.select_one(id)?.ok_or(StoreError::NotFound(id))?;
        patch.apply_to(&mut schedule);

        tx.execute(
            "UPDATE schedules
             SET
                group_name = ?1,
                start_time = ?2,
                end_time = ?3,
                day_of_week = ?4,
                sub_group = ?5,
                lugar = ?6,
                color = ?7,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?8;",
            params![
                schedule.group_name.as_str(),
                schedule.start_time.as_str(),
                schedule.end_time.as_str(),
                schedule.day_of_week.as_str(),
                schedule.sub_group.as_deref(),
                schedule.lugar.as_deref(),
                schedule.color.as_str(),
                id.to_string(),
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn delete_row(&self, id: ScheduleId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM schedules WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

impl ScheduleStore for SqliteScheduleStore<'_> {
    fn list_all(&self) -> StoreResult<Vec<Schedule>> {
        let started_at = Instant::now();
        logged("schedule_list", started_at, self.select_many(None))
    }

    fn list_by_group(&self, group_name: &str) -> StoreResult<Vec<Schedule>> {
        let started_at = Instant::now();
        logged(
            "schedule_list_by_group",
            started_at,
            self.select_many(Some(group_name)),
        )
    }

    fn get(&self, id: ScheduleId) -> StoreResult<Option<Schedule>> {
        let started_at = Instant::now();
        logged("schedule_get", started_at, self.select_one(id))
    }

    fn create(&self, schedule: &NewSchedule) -> StoreResult<ScheduleId> {
        let started_at = Instant::now();
        let id = Uuid::new_v4();
        let result = self.insert_row(id, schedule).map(|()| id);
        if result.is_ok() {
            debug!("event=schedule_create module=store status=ok id={id}");
        }
        logged("schedule_create", started_at, result)
    }

    fn update(&self, id: ScheduleId, patch: &SchedulePatch) -> StoreResult<()> {
        let started_at = Instant::now();
        logged("schedule_update", started_at, self.merge_row(id, patch))
    }

    fn delete(&self, id: ScheduleId) -> StoreResult<()> {
        let started_at = Instant::now();
        logged("schedule_delete", started_at, self.delete_row(id))
    }
}

fn logged<T>(event: &'static str, started_at: Instant, result: StoreResult<T>) -> StoreResult<T> {
    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => debug!("event={event} module=store status=ok duration_ms={duration_ms}"),
        Err(err) => error!(
            "event={event} module=store status=error duration_ms={duration_ms} error={err}"
        ),
    }
    result
}

fn parse_schedule_row(row: &Row<'_>) -> StoreResult<Schedule> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        StoreError::InvalidData(format!("invalid id value `{id_text}` in schedules.id"))
    })?;

    Ok(Schedule {
        id,
        group_name: row.get("group_name")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        day_of_week: row.get("day_of_week")?,
        sub_group: row.get("sub_group")?,
        lugar: row.get("lugar")?,
        color: row.get("color")?,
    })
}
