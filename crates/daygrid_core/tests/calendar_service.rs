use chrono::NaiveDate;
use daygrid_core::db::{open_db, open_db_in_memory, DbError};
use daygrid_core::{
    CalendarService, EventDraft, EventRecord, ScheduleError, SnapshotStore, SqliteSnapshotStore,
    StorageError, StorageResult,
};
use std::cell::{Cell, RefCell};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Records every save so tests can observe persistence calls.
#[derive(Default)]
struct RecordingStore {
    saved: RefCell<Vec<Vec<EventRecord>>>,
    selected: RefCell<Vec<Option<NaiveDate>>>,
    fail_saves: Cell<bool>,
}

impl RecordingStore {
    fn failing() -> Self {
        let store = Self::default();
        store.fail_saves.set(true);
        store
    }

    fn save_count(&self) -> usize {
        self.saved.borrow().len()
    }

    fn last_saved_names(&self) -> Vec<String> {
        self.saved
            .borrow()
            .last()
            .map(|events| events.iter().map(|event| event.name.clone()).collect())
            .unwrap_or_default()
    }
}

fn storage_failure() -> StorageError {
    StorageError::Db(DbError::Sqlite(rusqlite::Error::InvalidQuery))
}

impl SnapshotStore for &RecordingStore {
    fn load_events(&self) -> StorageResult<Vec<EventRecord>> {
        Ok(Vec::new())
    }

    fn save_events(&self, events: &[&EventRecord]) -> StorageResult<()> {
        self.saved
            .borrow_mut()
            .push(events.iter().map(|event| (*event).clone()).collect());
        if self.fail_saves.get() {
            return Err(storage_failure());
        }
        Ok(())
    }

    fn load_selected_day(&self) -> StorageResult<Option<NaiveDate>> {
        Ok(None)
    }

    fn save_selected_day(&self, day: Option<NaiveDate>) -> StorageResult<()> {
        self.selected.borrow_mut().push(day);
        if self.fail_saves.get() {
            return Err(storage_failure());
        }
        Ok(())
    }
}

#[test]
fn each_successful_mutation_saves_once() {
    let recorder = RecordingStore::default();
    let mut service = CalendarService::open(&recorder).unwrap();
    let day = date(2024, 3, 5);

    service.add(day, &EventDraft::new("a", "09:00", "10:00")).unwrap();
    service.edit(day, 0, &EventDraft::new("a2", "09:00", "10:00")).unwrap();
    assert_eq!(recorder.save_count(), 2);
    assert_eq!(recorder.last_saved_names(), vec!["a2"]);

    service.delete(day, 0).unwrap();
    assert_eq!(recorder.save_count(), 3);
    assert!(recorder.last_saved_names().is_empty());
}

#[test]
fn rejected_mutations_are_not_saved() {
    let recorder = RecordingStore::default();
    let mut service = CalendarService::open(&recorder).unwrap();
    let day = date(2024, 3, 5);

    service.add(day, &EventDraft::new("a", "09:00", "10:00")).unwrap();
    assert!(service.add(day, &EventDraft::new("b", "09:30", "10:30")).is_err());
    assert!(service.add(day, &EventDraft::new("", "11:00", "12:00")).is_err());
    assert!(service.delete(day, 4).is_err());
    assert_eq!(recorder.save_count(), 1);
}

#[test]
fn save_failure_does_not_change_results() {
    let recorder = RecordingStore::failing();
    let mut service = CalendarService::open(&recorder).unwrap();
    let day = date(2024, 3, 5);

    let id = service.add(day, &EventDraft::new("a", "09:00", "10:00")).unwrap();
    assert_eq!(service.events_on(day)[0].id, id);
    assert_eq!(
        service.add(day, &EventDraft::new("b", "09:30", "10:30")),
        Err(ScheduleError::Conflict { date: day, index: 0 })
    );

    service.select_day(Some(day));
    assert_eq!(service.selected_day(), Some(day));
    assert!(service.flush().is_err());
}

#[test]
fn id_operations_persist() {
    let recorder = RecordingStore::default();
    let mut service = CalendarService::open(&recorder).unwrap();
    let day = date(2024, 3, 5);

    let id = service.add(day, &EventDraft::new("a", "09:00", "10:00")).unwrap();
    service.edit_by_id(id, &EventDraft::new("a2", "09:00", "09:45")).unwrap();
    assert_eq!(recorder.last_saved_names(), vec!["a2"]);
    service.delete_by_id(id).unwrap();
    assert_eq!(recorder.save_count(), 3);
}

#[test]
fn reopening_restores_events_and_selected_day() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daygrid.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let mut service =
            CalendarService::open(SqliteSnapshotStore::try_new(&conn).unwrap()).unwrap();
        service
            .add(date(2024, 3, 5), &EventDraft::new("Standup", "09:00", "09:30"))
            .unwrap();
        service
            .add(date(2024, 3, 6), &EventDraft::new("Sync", "09:15", "09:45"))
            .unwrap();
        service.select_day(Some(date(2024, 3, 6)));
    }

    let conn = open_db(&path).unwrap();
    let service = CalendarService::open(SqliteSnapshotStore::try_new(&conn).unwrap()).unwrap();
    assert_eq!(service.events().len(), 2);
    assert_eq!(service.events_on(date(2024, 3, 6))[0].name, "Sync");
    assert_eq!(service.selected_day(), Some(date(2024, 3, 6)));
}

#[test]
fn deleting_last_event_persists_empty_snapshot() {
    let conn = open_db_in_memory().unwrap();
    let mut service =
        CalendarService::open(SqliteSnapshotStore::try_new(&conn).unwrap()).unwrap();
    service
        .add(date(2024, 3, 5), &EventDraft::new("a", "09:00", "10:00"))
        .unwrap();
    service.delete(date(2024, 3, 5), 0).unwrap();
    let store = service.close().unwrap();

    assert!(store.load_events().unwrap().is_empty());
}

#[test]
fn write_month_export_creates_named_file() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db_in_memory().unwrap();
    let mut service =
        CalendarService::open(SqliteSnapshotStore::try_new(&conn).unwrap()).unwrap();
    service
        .add(date(2024, 2, 20), &EventDraft::new("late", "09:00", "10:00"))
        .unwrap();
    service
        .add(date(2024, 2, 3), &EventDraft::new("early", "09:00", "10:00"))
        .unwrap();
    service
        .add(date(2024, 3, 3), &EventDraft::new("march", "09:00", "10:00"))
        .unwrap();

    let path = service.write_month_export(dir.path(), 2024, 2).unwrap();
    assert_eq!(path.file_name().unwrap(), "events-2-2024.json");

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let entries = written.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "late");
    assert_eq!(entries[0]["date"], "2024-02-20");
    assert_eq!(entries[0]["startTime"], "09:00");
    assert_eq!(entries[0]["endTime"], "10:00");
    assert_eq!(entries[0]["category"], "Work");
    assert_eq!(entries[1]["name"], "early");
}
