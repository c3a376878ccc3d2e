use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use tempfile::TempDir;
use tire::core::clock::FixedClock;
use tire::core::report::{Report, Reporting};
use tire::core::tracker::{SessionState, SessionTracker};
use tire::db::{SqliteStore, Store};
use tire::errors::AppError;

fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, day)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn fresh_store(dir: &TempDir) -> SqliteStore {
    let store = SqliteStore::open(dir.path().join("tire.sqlite")).unwrap();
    store.initialize().unwrap();
    store
}

#[test]
fn open_session_survives_reopening_the_store() {
    let dir = TempDir::new().unwrap();
    let clock = FixedClock(at(10, 18, 0));

    {
        let store = fresh_store(&dir);
        store.add_project("work", at(10, 8, 0)).unwrap();
        SessionTracker::new(&store, &clock)
            .begin("work", at(10, 9, 0))
            .unwrap();
    }

    // a new process sees the same state
    let store = SqliteStore::open(dir.path().join("tire.sqlite")).unwrap();
    store.check_schema().unwrap();
    let tracker = SessionTracker::new(&store, &clock);
    assert!(matches!(tracker.status().unwrap(), SessionState::Active(r) if r.project == "work"));

    let err = tracker.begin("work", at(10, 10, 0)).unwrap_err();
    assert!(matches!(err, AppError::SessionAlreadyOpen { project } if project == "work"));

    tracker.end(None, at(10, 12, 0)).unwrap();
    assert_eq!(tracker.status().unwrap(), SessionState::Idle);
}

#[test]
fn scenario_begin_end_list() {
    let dir = TempDir::new().unwrap();
    let store = fresh_store(&dir);
    let clock = FixedClock(at(10, 18, 0));
    store.add_project("work", at(10, 8, 0)).unwrap();

    let tracker = SessionTracker::new(&store, &clock);
    tracker.begin("work", at(10, 9, 0)).unwrap();
    tracker.end(None, at(10, 17, 0)).unwrap();

    let records = Reporting::new(&store, &clock).list_all(None).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].project, "work");
    assert_eq!(records[0].begin, at(10, 9, 0));
    assert_eq!(records[0].end, Some(at(10, 17, 0)));
}

#[test]
fn closed_records_never_end_before_they_begin() {
    let dir = TempDir::new().unwrap();
    let store = fresh_store(&dir);
    let clock = FixedClock(at(12, 0, 0));
    store.add_project("a", at(1, 0, 0)).unwrap();
    let tracker = SessionTracker::new(&store, &clock);

    for day in 2..8 {
        tracker.begin("a", at(day, 10, 0)).unwrap();
        // rejected: one minute before the begin
        assert!(tracker.end(None, at(day, 9, 59)).is_err());
        tracker.end(None, at(day, 10, day)).unwrap();
    }

    let records = store.list_records(None).unwrap();
    assert_eq!(records.len(), 6);
    assert!(records.iter().all(|r| r.end.is_some_and(|end| end >= r.begin)));
}

#[test]
fn day_report_only_counts_the_part_inside_the_day() {
    let dir = TempDir::new().unwrap();
    let store = fresh_store(&dir);
    let clock = FixedClock(at(20, 0, 0));
    store.add_project("night", at(1, 0, 0)).unwrap();

    let tracker = SessionTracker::new(&store, &clock);
    tracker.begin("night", at(14, 23, 15)).unwrap();
    tracker.end(None, at(15, 0, 45)).unwrap();

    let reporting = Reporting::new(&store, &clock);
    let day = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();

    let Report::Totals(totals) = reporting.day_report(day, true).unwrap() else {
        panic!("expected totals");
    };
    assert_eq!(totals.len(), 1);
    assert_eq!(totals["night"], TimeDelta::minutes(45));

    let empty = NaiveDate::from_ymd_opt(2025, 3, 16).unwrap();
    assert_eq!(
        reporting.day_report(empty, true).unwrap(),
        Report::Totals(Default::default())
    );
    assert_eq!(
        reporting.day_report(empty, false).unwrap(),
        Report::Records(Vec::new())
    );
}
