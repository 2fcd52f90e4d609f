use horarios_core::db::open_db_in_memory;
use horarios_core::model::validation::{MSG_END_BEFORE_START, MSG_GROUP_NOT_IN_CATALOG};
use horarios_core::service::admin_service::SAVE_ERROR_MESSAGE;
use horarios_core::{
    AdminError, AdminService, NewSchedule, Schedule, ScheduleDraft, ScheduleField, ScheduleId,
    SchedulePatch, ScheduleStore, SqliteScheduleStore, StoreError, StoreResult, SubmitOutcome,
    ValidationRules, Weekday, DEFAULT_GROUP_COLOR,
};
use std::cell::Cell;
use uuid::Uuid;

const CORO: &str = "CORO MAGNO DE LA UNIVERSIDAD DEL VALLE";
const POESIA: &str = "GRUPO DE POESÍA DE LA UNIVERSIDAD DEL VALLE";

fn draft(group_name: &str, day: &str, start: &str, end: &str) -> ScheduleDraft {
    ScheduleDraft {
        group_name: group_name.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        day_of_week: day.to_string(),
        sub_group: String::new(),
        lugar: "Auditorio".to_string(),
    }
}

/// Store that counts calls and fails every operation.
#[derive(Default)]
struct UnavailableStore {
    calls: Cell<u32>,
}

impl UnavailableStore {
    fn fail<T>(&self) -> StoreResult<T> {
        self.calls.set(self.calls.get() + 1);
        Err(StoreError::InvalidData("collection unavailable".to_string()))
    }
}

impl ScheduleStore for UnavailableStore {
    fn list_all(&self) -> StoreResult<Vec<Schedule>> {
        self.fail()
    }

    fn list_by_group(&self, _group_name: &str) -> StoreResult<Vec<Schedule>> {
        self.fail()
    }

    fn get(&self, _id: ScheduleId) -> StoreResult<Option<Schedule>> {
        self.fail()
    }

    fn create(&self, _schedule: &NewSchedule) -> StoreResult<ScheduleId> {
        self.fail()
    }

    fn update(&self, _id: ScheduleId, _patch: &SchedulePatch) -> StoreResult<()> {
        self.fail()
    }

    fn delete(&self, _id: ScheduleId) -> StoreResult<()> {
        self.fail()
    }
}

#[test]
fn submit_creates_record_with_group_color() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteScheduleStore::try_new(&conn).unwrap();
    let admin = AdminService::new(&store);

    let outcome = admin
        .submit(&draft(CORO, "Tuesday", "10:00", "12:00"), None)
        .unwrap();
    let SubmitOutcome::Created(id) = outcome else {
        panic!("expected a created outcome, got {outcome:?}");
    };

    let stored = store.get(id).unwrap().unwrap();
    assert_eq!(stored.color, "#a16207");
    assert_eq!(stored.sub_group, None);
    assert_eq!(stored.lugar.as_deref(), Some("Auditorio"));
    assert_eq!(store.list_by_group(CORO).unwrap(), vec![stored]);
}

#[test]
fn submit_with_unknown_group_uses_default_color() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteScheduleStore::try_new(&conn).unwrap();
    let admin = AdminService::new(&store);

    let id = admin
        .submit(&draft("GRUPO NUEVO", "Monday", "08:00", "09:00"), None)
        .unwrap()
        .id();
    assert_eq!(store.get(id).unwrap().unwrap().color, DEFAULT_GROUP_COLOR);
}

#[test]
fn invalid_draft_never_reaches_the_store() {
    let store = UnavailableStore::default();
    let admin = AdminService::new(&store);

    let err = admin
        .submit(&draft(CORO, "Tuesday", "12:00", "10:00"), None)
        .unwrap_err();
    let AdminError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert_eq!(errors.get(ScheduleField::EndTime), Some(MSG_END_BEFORE_START));
    assert_eq!(store.calls.get(), 0);
}

#[test]
fn strict_rules_reject_groups_outside_catalog() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteScheduleStore::try_new(&conn).unwrap();
    let admin = AdminService::new(&store).with_rules(ValidationRules::strict());

    let err = admin
        .submit(&draft("GRUPO NUEVO", "Monday", "08:00", "09:00"), None)
        .unwrap_err();
    assert!(matches!(
        &err,
        AdminError::Validation(errors)
            if errors.get(ScheduleField::GroupName) == Some(MSG_GROUP_NOT_IN_CATALOG)
    ));
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn editing_overwrites_all_fields_and_recomputes_color() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteScheduleStore::try_new(&conn).unwrap();
    let admin = AdminService::new(&store);

    let mut first = draft(CORO, "Tuesday", "10:00", "12:00");
    first.sub_group = "semillero".to_string();
    let id = admin.submit(&first, None).unwrap().id();

    let mut edit = admin.edit_draft(id).unwrap();
    assert_eq!(edit.sub_group, "semillero");
    edit.group_name = POESIA.to_string();
    edit.day_of_week = "Wednesday".to_string();
    edit.sub_group = "none".to_string();

    let outcome = admin.submit(&edit, Some(id)).unwrap();
    assert_eq!(outcome, SubmitOutcome::Updated(id));

    let stored = store.get(id).unwrap().unwrap();
    assert_eq!(stored.group_name, POESIA);
    assert_eq!(stored.day_of_week, "Wednesday");
    assert_eq!(stored.sub_group, None);
    assert_eq!(stored.color, "#ec4899");
    assert_eq!(store.list_all().unwrap().len(), 1);
}

#[test]
fn editing_missing_record_is_a_store_error() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteScheduleStore::try_new(&conn).unwrap();
    let admin = AdminService::new(&store);

    let err = admin
        .submit(&draft(CORO, "Tuesday", "10:00", "12:00"), Some(Uuid::new_v4()))
        .unwrap_err();
    assert!(matches!(&err, AdminError::Store(inner) if inner.is_not_found()));
    assert_eq!(err.user_message(), SAVE_ERROR_MESSAGE);

    assert!(admin.edit_draft(Uuid::new_v4()).unwrap_err().is_not_found());
}

#[test]
fn delete_then_lists_exclude_record() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteScheduleStore::try_new(&conn).unwrap();
    let admin = AdminService::new(&store);

    let keep = admin
        .submit(&draft(CORO, "Monday", "08:00", "09:00"), None)
        .unwrap()
        .id();
    let gone = admin
        .submit(&draft(CORO, "Friday", "08:00", "09:00"), None)
        .unwrap()
        .id();
    admin.delete(gone).unwrap();

    let ids: Vec<_> = admin.all().unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![keep]);
    assert!(admin.weekly_calendar().unwrap().day(Weekday::Friday).is_empty());
}

#[test]
fn registered_list_and_calendar_group_all_records() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteScheduleStore::try_new(&conn).unwrap();
    let admin = AdminService::new(&store);

    for (group, day, start, end) in [
        (POESIA, "Monday", "14:00", "16:00"),
        (CORO, "Monday", "09:00", "11:00"),
        (POESIA, "Thursday", "08:30", "10:00"),
    ] {
        admin.submit(&draft(group, day, start, end), None).unwrap();
    }

    let buckets = admin.registered_by_group().unwrap();
    let names: Vec<&str> = buckets.iter().map(|b| b.group_name.as_str()).collect();
    assert_eq!(names, vec![POESIA, CORO]);
    assert_eq!(buckets[0].schedules.len(), 2);

    let week = admin.weekly_calendar().unwrap();
    let monday: Vec<&str> = week
        .day(Weekday::Monday)
        .iter()
        .map(|s| s.start_time.as_str())
        .collect();
    assert_eq!(monday, vec!["09:00", "14:00"]);
    assert_eq!(week.len(), 3);
}

#[test]
fn store_failures_surface_as_generic_message() {
    let store = UnavailableStore::default();
    let admin = AdminService::new(&store);

    let err = admin
        .submit(&draft(CORO, "Tuesday", "10:00", "12:00"), None)
        .unwrap_err();
    assert!(matches!(err, AdminError::Store(_)));
    assert_eq!(err.user_message(), SAVE_ERROR_MESSAGE);
    assert_eq!(store.calls.get(), 1);

    assert!(admin.registered_by_group().is_err());
    assert!(admin.weekly_calendar().is_err());
}
