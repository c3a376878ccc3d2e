//! Planned working time per calendar day.
//!
//! Weekdays carry the configured daily time, weekends none. Individual dates can
//! be marked as holiday, vacation (or half of either) or sick leave.

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayKind {
    #[default]
    Normal,
    Sick,
    Holiday,
    HalfHoliday,
    Vacation,
    HalfVacation,
    HalfVacationHalfHoliday,
}

impl fmt::Display for DayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DayKind::Normal => "Normal",
            DayKind::Sick => "Sick",
            DayKind::Holiday => "Holiday",
            DayKind::HalfHoliday => "Half Holiday",
            DayKind::Vacation => "Vacation",
            DayKind::HalfVacation => "Half Vacation",
            DayKind::HalfVacationHalfHoliday => "Half Vacation, Half Holiday",
        })
    }
}

/// A date that deviates from a normal working day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOff {
    pub date: NaiveDate,
    pub kind: DayKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    daily: TimeDelta,
    days: BTreeMap<NaiveDate, DayKind>,
    start: Option<NaiveDate>,
    overtime_offset: TimeDelta,
}

impl Plan {
    pub fn new(daily: TimeDelta, days_off: &[DayOff]) -> Self {
        Self {
            daily,
            days: days_off.iter().map(|d| (d.date, d.kind)).collect(),
            start: None,
            overtime_offset: TimeDelta::zero(),
        }
    }

    /// First day counted by the running overtime balance, and the balance
    /// carried over from before it.
    pub fn with_balance_start(mut self, start: NaiveDate, offset: TimeDelta) -> Self {
        self.start = Some(start);
        self.overtime_offset = offset;
        self
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn overtime_offset(&self) -> TimeDelta {
        self.overtime_offset
    }

    pub fn kind(&self, date: NaiveDate) -> DayKind {
        self.days.get(&date).copied().unwrap_or_default()
    }

    fn normal_time(&self, date: NaiveDate) -> TimeDelta {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => TimeDelta::zero(),
            _ => self.daily,
        }
    }

    /// Time expected on `date`. A sick day expects what was worked, capped at a
    /// normal day.
    pub fn planned(&self, date: NaiveDate, worked: TimeDelta) -> TimeDelta {
        let normal = self.normal_time(date);
        match self.kind(date) {
            DayKind::Normal => normal,
            DayKind::Holiday | DayKind::Vacation | DayKind::HalfVacationHalfHoliday => {
                TimeDelta::zero()
            }
            DayKind::Sick => worked.min(normal),
            DayKind::HalfHoliday | DayKind::HalfVacation => normal / 2,
        }
    }
}
