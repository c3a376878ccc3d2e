//! Read-only listing and per-period aggregation of records.

use crate::core::clock::Clock;
use crate::core::period::Period;
use crate::core::plan::Plan;
use crate::db::store::Store;
use crate::errors::AppResult;
use crate::models::record::Record;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use std::collections::BTreeMap;

/// Result of a period report: raw records or per-project totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Records(Vec<Record>),
    Totals(BTreeMap<String, TimeDelta>),
}

impl Report {
    pub fn is_empty(&self) -> bool {
        match self {
            Report::Records(records) => records.is_empty(),
            Report::Totals(totals) => totals.is_empty(),
        }
    }

    /// Sum of all per-project totals (zero for a raw report).
    pub fn total(&self) -> TimeDelta {
        match self {
            Report::Records(_) => TimeDelta::zero(),
            Report::Totals(totals) => totals.values().fold(TimeDelta::zero(), |acc, d| acc + *d),
        }
    }
}

/// Worked against planned time over a range of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    pub worked: TimeDelta,
    pub planned: TimeDelta,
}

impl Balance {
    pub fn overtime(&self) -> TimeDelta {
        self.worked - self.planned
    }
}

pub struct Reporting<'a, S: Store> {
    store: &'a S,
    clock: &'a dyn Clock,
}

impl<'a, S: Store> Reporting<'a, S> {
    pub fn new(store: &'a S, clock: &'a dyn Clock) -> Self {
        Self { store, clock }
    }

    pub fn list_all(&self, project: Option<&str>) -> AppResult<Vec<Record>> {
        self.store.list_records(project)
    }

    /// The open record, if any, as a 0/1 element list.
    pub fn list_open(&self) -> AppResult<Vec<Record>> {
        Ok(self.store.find_open_record()?.into_iter().collect())
    }

    pub fn day_report(&self, date: NaiveDate, accumulate: bool) -> AppResult<Report> {
        self.period_report(&Period::day(date), accumulate)
    }

    /// Records overlapping `period`, or with `accumulate` their durations clipped
    /// to the period and summed per project. Open records count up to now.
    pub fn period_report(&self, period: &Period, accumulate: bool) -> AppResult<Report> {
        let (start, end) = (period.start(), period.end());
        let now = self.clock.now();
        let records = self.records_within(start, end, now)?;

        if !accumulate {
            return Ok(Report::Records(records));
        }

        let mut totals: BTreeMap<String, TimeDelta> = BTreeMap::new();
        for record in records {
            let clipped = record.clipped(start, end, now);
            *totals.entry(record.project).or_insert_with(TimeDelta::zero) += clipped;
        }
        Ok(Report::Totals(totals))
    }

    /// Worked and planned time over `period`, day by day.
    pub fn period_balance(&self, plan: &Plan, period: &Period) -> AppResult<Balance> {
        self.balance(plan, period.first_day(), period.last_day())
    }

    /// Running overtime from the plan's start up to and including today, plus
    /// the carried-over offset. `None` when the plan has no start date.
    pub fn overtime_to_date(&self, plan: &Plan) -> AppResult<Option<TimeDelta>> {
        let Some(first) = plan.start() else {
            return Ok(None);
        };
        let today = self.clock.now().date();
        if first > today {
            return Ok(Some(plan.overtime_offset()));
        }
        let balance = self.balance(plan, first, today)?;
        Ok(Some(plan.overtime_offset() + balance.overtime()))
    }

    fn balance(&self, plan: &Plan, first: NaiveDate, last: NaiveDate) -> AppResult<Balance> {
        let now = self.clock.now();
        let records = self.records_within(midnight(first), midnight(last + Days::new(1)), now)?;

        let mut balance = Balance {
            worked: TimeDelta::zero(),
            planned: TimeDelta::zero(),
        };
        for day in first.iter_days().take_while(|d| *d <= last) {
            let (day_start, day_end) = (midnight(day), midnight(day + Days::new(1)));
            let worked = records
                .iter()
                .map(|r| r.clipped(day_start, day_end, now))
                .fold(TimeDelta::zero(), |acc, d| acc + d);
            balance.worked += worked;
            balance.planned += plan.planned(day, worked);
        }
        Ok(balance)
    }

    /// Records overlapping `[start, end)`, minus open records that had not yet
    /// reached the window at `now`.
    fn records_within(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        now: NaiveDateTime,
    ) -> AppResult<Vec<Record>> {
        let mut records = self.store.list_records_overlapping(start, end)?;
        records.retain(|r| !r.is_open() || r.begin.max(start) < now);
        Ok(records)
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::core::period::PeriodKind;
    use crate::core::tracker::SessionTracker;
    use crate::db::store::SqliteStore;
    use chrono::NaiveDateTime;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    fn setup(sessions: &[(&str, NaiveDateTime, Option<NaiveDateTime>)]) -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        store.add_project("work", at(1, 0, 0)).unwrap();
        store.add_project("home", at(1, 0, 0)).unwrap();

        let clock = FixedClock(at(1, 0, 0));
        let tracker = SessionTracker::new(&store, &clock);
        for (project, begin, end) in sessions {
            tracker.begin(project, *begin).unwrap();
            if let Some(end) = end {
                tracker.end(None, *end).unwrap();
            }
        }
        store
    }

    #[test]
    fn accumulate_clips_record_spanning_midnight() {
        let store = setup(&[("work", at(17, 22, 0), Some(at(18, 1, 30)))]);
        let clock = FixedClock(at(20, 0, 0));
        let reporting = Reporting::new(&store, &clock);

        let report = reporting.day_report(date(18), true).unwrap();
        let Report::Totals(totals) = report else {
            panic!("expected totals");
        };
        assert_eq!(totals["work"], TimeDelta::minutes(90));

        let report = reporting.day_report(date(17), true).unwrap();
        assert_eq!(report.total(), TimeDelta::hours(2));
    }

    #[test]
    fn accumulate_sums_per_project() {
        let store = setup(&[
            ("work", at(18, 9, 0), Some(at(18, 12, 0))),
            ("home", at(18, 12, 0), Some(at(18, 12, 45))),
            ("work", at(18, 13, 0), Some(at(18, 17, 30))),
        ]);
        let clock = FixedClock(at(20, 0, 0));
        let reporting = Reporting::new(&store, &clock);

        let Report::Totals(totals) = reporting.day_report(date(18), true).unwrap() else {
            panic!("expected totals");
        };
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["work"], TimeDelta::minutes(450));
        assert_eq!(totals["home"], TimeDelta::minutes(45));
    }

    #[test]
    fn raw_report_returns_overlapping_records() {
        let store = setup(&[
            ("work", at(17, 9, 0), Some(at(17, 10, 0))),
            ("home", at(18, 9, 0), Some(at(18, 10, 0))),
        ]);
        let clock = FixedClock(at(20, 0, 0));
        let reporting = Reporting::new(&store, &clock);

        let Report::Records(records) = reporting.day_report(date(18), false).unwrap() else {
            panic!("expected records");
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].project, "home");
    }

    #[test]
    fn empty_day_yields_empty_report() {
        let store = setup(&[("work", at(17, 9, 0), Some(at(17, 10, 0)))]);
        let clock = FixedClock(at(20, 0, 0));
        let reporting = Reporting::new(&store, &clock);

        assert!(reporting.day_report(date(19), true).unwrap().is_empty());
        assert!(reporting.day_report(date(19), false).unwrap().is_empty());
    }

    #[test]
    fn open_record_is_clipped_at_now() {
        let store = setup(&[("work", at(18, 9, 0), None)]);
        let clock = FixedClock(at(18, 11, 15));
        let reporting = Reporting::new(&store, &clock);

        let report = reporting.day_report(date(18), true).unwrap();
        assert_eq!(report.total(), TimeDelta::minutes(135));
        assert_eq!(reporting.list_open().unwrap().len(), 1);
    }

    #[test]
    fn open_record_does_not_reach_days_after_now() {
        let store = setup(&[("work", at(18, 9, 0), None)]);
        let clock = FixedClock(at(18, 12, 0));
        let reporting = Reporting::new(&store, &clock);

        assert!(reporting.day_report(date(20), true).unwrap().is_empty());
        assert!(reporting.day_report(date(20), false).unwrap().is_empty());

        let week = Period::new(date(18), PeriodKind::Week);
        assert_eq!(reporting.period_report(&week, true).unwrap().total(), TimeDelta::hours(3));
    }

    #[test]
    fn open_record_starting_after_now_is_left_out() {
        let store = setup(&[("work", at(18, 15, 0), None)]);
        let clock = FixedClock(at(18, 12, 0));
        let reporting = Reporting::new(&store, &clock);

        assert!(reporting.day_report(date(18), true).unwrap().is_empty());
        assert_eq!(reporting.list_open().unwrap().len(), 1);
    }

    #[test]
    fn week_report_covers_monday_to_sunday() {
        let store = setup(&[
            ("work", at(11, 9, 0), Some(at(11, 10, 0))), // Sunday before
            ("work", at(12, 9, 0), Some(at(12, 10, 0))), // Monday
            ("work", at(18, 9, 0), Some(at(18, 11, 0))), // Sunday
        ]);
        let clock = FixedClock(at(20, 0, 0));
        let reporting = Reporting::new(&store, &clock);

        let period = Period::new(date(15), PeriodKind::Week);
        let report = reporting.period_report(&period, true).unwrap();
        assert_eq!(report.total(), TimeDelta::hours(3));
    }

    #[test]
    fn week_balance_counts_planned_time_per_weekday() {
        use crate::core::plan::{DayKind, DayOff};

        // Mon 12th: 9h, Tue 13th holiday with 1h worked, Sat 17th: 2h
        let store = setup(&[
            ("work", at(12, 8, 0), Some(at(12, 17, 0))),
            ("work", at(13, 10, 0), Some(at(13, 11, 0))),
            ("home", at(17, 10, 0), Some(at(17, 12, 0))),
        ]);
        let clock = FixedClock(at(20, 0, 0));
        let reporting = Reporting::new(&store, &clock);
        let plan = Plan::new(
            TimeDelta::hours(8),
            &[DayOff {
                date: date(13),
                kind: DayKind::Holiday,
            }],
        );

        let week = Period::new(date(15), PeriodKind::Week);
        let balance = reporting.period_balance(&plan, &week).unwrap();
        assert_eq!(balance.worked, TimeDelta::hours(12));
        assert_eq!(balance.planned, TimeDelta::hours(32));
        assert_eq!(balance.overtime(), TimeDelta::hours(-20));
    }

    #[test]
    fn overtime_to_date_runs_from_plan_start() {
        // Mon 12th to Wed 14th: 9h, 8h and 6h30 against 8h a day
        let store = setup(&[
            ("work", at(12, 8, 0), Some(at(12, 17, 0))),
            ("work", at(13, 8, 0), Some(at(13, 16, 0))),
            ("work", at(14, 8, 0), Some(at(14, 14, 30))),
        ]);
        let clock = FixedClock(at(14, 18, 0));
        let reporting = Reporting::new(&store, &clock);

        let plan = Plan::new(TimeDelta::hours(8), &[]);
        assert_eq!(reporting.overtime_to_date(&plan).unwrap(), None);

        let plan = plan.with_balance_start(date(12), TimeDelta::minutes(90));
        assert_eq!(
            reporting.overtime_to_date(&plan).unwrap(),
            Some(TimeDelta::minutes(60))
        );
    }

    #[test]
    fn list_all_filters_by_project() {
        let store = setup(&[
            ("work", at(17, 9, 0), Some(at(17, 10, 0))),
            ("home", at(18, 9, 0), Some(at(18, 10, 0))),
        ]);
        let clock = FixedClock(at(20, 0, 0));
        let reporting = Reporting::new(&store, &clock);

        assert_eq!(reporting.list_all(None).unwrap().len(), 2);
        let work = reporting.list_all(Some("work")).unwrap();
        assert_eq!(work.len(), 1);
        assert_eq!(work[0].begin, at(17, 9, 0));
        assert!(reporting.list_open().unwrap().is_empty());
    }
}
