use horarios_core::db::open_db_in_memory;
use horarios_core::service::browse_service::LOAD_ERROR_MESSAGE;
use horarios_core::view::{group_route, parse_group_route, PLACEHOLDER_BACKGROUND, PLACEHOLDER_LOGO};
use horarios_core::{
    color_for_group, BrowseService, NewSchedule, Schedule, ScheduleId, SchedulePatch,
    ScheduleStore, SqliteScheduleStore, StoreError, StoreResult, ViewError, ViewState, Weekday,
    DEFAULT_GROUP_COLOR,
};

const CAPOEIRA: &str = "GRUPO CAPOEIRA DE LA UNIVERSIDAD DEL VALLE";
const TEATRO: &str = "GRUPO DE TEATRO BIENESTAR UNIVERSITARIO DE LA UNIVERSIDAD DEL VALLE";

fn seed(store: &impl ScheduleStore, group_name: &str, day: &str, start: &str, end: &str) {
    store
        .create(&NewSchedule {
            group_name: group_name.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            day_of_week: day.to_string(),
            sub_group: None,
            lugar: Some("Plazoleta".to_string()),
            color: color_for_group(group_name).to_string(),
        })
        .unwrap();
}

struct OfflineStore;

impl ScheduleStore for OfflineStore {
    fn list_all(&self) -> StoreResult<Vec<Schedule>> {
        Err(StoreError::InvalidData("offline".to_string()))
    }

    fn list_by_group(&self, _group_name: &str) -> StoreResult<Vec<Schedule>> {
        Err(StoreError::InvalidData("offline".to_string()))
    }

    fn get(&self, id: ScheduleId) -> StoreResult<Option<Schedule>> {
        Err(StoreError::NotFound(id))
    }

    fn create(&self, _schedule: &NewSchedule) -> StoreResult<ScheduleId> {
        Err(StoreError::InvalidData("offline".to_string()))
    }

    fn update(&self, id: ScheduleId, _patch: &SchedulePatch) -> StoreResult<()> {
        Err(StoreError::NotFound(id))
    }

    fn delete(&self, id: ScheduleId) -> StoreResult<()> {
        Err(StoreError::NotFound(id))
    }
}

#[test]
fn catalog_lists_every_group_with_a_route() {
    let browse = BrowseService::new(OfflineStore);
    let groups = browse.catalog().groups();
    assert_eq!(groups.len(), 20);
    for group in groups {
        let route = group_route(&group.name);
        assert_eq!(parse_group_route(&route).as_deref(), Some(group.name.as_str()));
    }
}

#[test]
fn preview_groups_one_group_by_day() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteScheduleStore::try_new(&conn).unwrap();
    seed(&store, CAPOEIRA, "Wednesday", "16:00", "18:00");
    seed(&store, CAPOEIRA, "Wednesday", "07:00", "09:00");
    seed(&store, CAPOEIRA, "Saturday", "09:00", "11:00");
    seed(&store, TEATRO, "Wednesday", "10:00", "12:00");

    let browse = BrowseService::new(&store);
    let week = browse.group_preview(CAPOEIRA);
    assert_eq!(week.len(), 3);
    let wednesday: Vec<&str> = week
        .day(Weekday::Wednesday)
        .iter()
        .map(|s| s.start_time.as_str())
        .collect();
    assert_eq!(wednesday, vec!["07:00", "16:00"]);
}

#[test]
fn preview_falls_back_to_empty_week_on_store_failure() {
    let browse = BrowseService::new(OfflineStore);
    let week = browse.group_preview(CAPOEIRA);
    assert!(week.is_empty());
    assert_eq!(week.iter().count(), 7);
}

#[test]
fn group_page_uses_catalog_metadata() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteScheduleStore::try_new(&conn).unwrap();
    seed(&store, TEATRO, "Friday", "15:00", "17:30");
    seed(&store, TEATRO, "Monday", "15:00", "17:00");

    let browse = BrowseService::new(&store);
    let route = group_route(TEATRO);
    let name = parse_group_route(&route).unwrap();
    let page = browse.group_page(&name).unwrap();

    assert_eq!(page.group.map(|g| g.id.as_str()), Some("teatro"));
    assert_eq!(page.color, "#475569");
    assert_eq!(page.logo, "/images/logos/teatro.jpg");
    assert_eq!(page.background, "/images/backgrounds/teatro.jpg");

    let days: Vec<Weekday> = page.week.non_empty_days().map(|(day, _)| day).collect();
    assert_eq!(days, vec![Weekday::Monday, Weekday::Friday]);
}

#[test]
fn group_page_for_unknown_group_uses_fallbacks() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteScheduleStore::try_new(&conn).unwrap();

    let browse = BrowseService::new(&store);
    let page = browse.group_page("GRUPO FANTASMA").unwrap();
    assert!(page.group.is_none());
    assert_eq!(page.color, DEFAULT_GROUP_COLOR);
    assert_eq!(page.logo, PLACEHOLDER_LOGO);
    assert_eq!(page.background, PLACEHOLDER_BACKGROUND);
    assert!(page.week.is_empty());
}

#[test]
fn group_page_reports_generic_load_error() {
    let browse = BrowseService::new(OfflineStore);
    let err = browse.group_page(TEATRO).unwrap_err();
    assert!(matches!(err, ViewError::Load(_)));
    assert_eq!(err.user_message(), LOAD_ERROR_MESSAGE);

    let state = ViewState::resolve(
        browse.group_page(TEATRO),
        |page| page.week.is_empty(),
        LOAD_ERROR_MESSAGE,
    );
    assert_eq!(state, ViewState::Error(LOAD_ERROR_MESSAGE.to_string()));
}
