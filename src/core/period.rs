//! Calendar windows used by the reports.

use crate::errors::AppError;
use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodKind {
    #[default]
    Day,
    Week,
    Month,
    Year,
}

impl PeriodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKind::Day => "day",
            PeriodKind::Week => "week",
            PeriodKind::Month => "month",
            PeriodKind::Year => "year",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "d" => Ok(PeriodKind::Day),
            "week" | "w" => Ok(PeriodKind::Week),
            "month" | "m" => Ok(PeriodKind::Month),
            "year" | "y" => Ok(PeriodKind::Year),
            _ => Err(AppError::InvalidPeriod(s.to_string())),
        }
    }
}

/// Inclusive range of calendar days `[first, last]` of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    first: NaiveDate,
    last: NaiveDate,
    kind: PeriodKind,
}

impl Period {
    /// The period of `kind` containing `date`. Weeks start on Monday.
    pub fn new(date: NaiveDate, kind: PeriodKind) -> Self {
        let (first, last) = match kind {
            PeriodKind::Day => (date, date),
            PeriodKind::Week => {
                let first = date - Days::new(u64::from(date.weekday().num_days_from_monday()));
                (first, first + Days::new(6))
            }
            PeriodKind::Month => {
                let first = date.with_day(1).unwrap_or(date);
                (first, first + Months::new(1) - Days::new(1))
            }
            PeriodKind::Year => {
                let first = date.with_ordinal(1).unwrap_or(date);
                (first, first + Months::new(12) - Days::new(1))
            }
        };
        Self { first, last, kind }
    }

    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, PeriodKind::Day)
    }

    pub fn kind(&self) -> PeriodKind {
        self.kind
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    /// Every calendar day of the period, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last;
        self.first.iter_days().take_while(move |d| *d <= last)
    }

    /// Midnight opening the window (inclusive).
    pub fn start(&self) -> NaiveDateTime {
        self.first.and_time(NaiveTime::MIN)
    }

    /// Midnight after the last day (exclusive).
    pub fn end(&self) -> NaiveDateTime {
        (self.last + Days::new(1)).and_time(NaiveTime::MIN)
    }

    pub fn label(&self) -> String {
        match self.kind {
            PeriodKind::Year => format!("Year {}", self.first.year()),
            PeriodKind::Month => self.first.format("%B %Y").to_string(),
            PeriodKind::Week => {
                let week = self.first.iso_week();
                format!(
                    "Week {} in {} (from {})",
                    week.week(),
                    week.year(),
                    self.first.format("%b. %d.")
                )
            }
            PeriodKind::Day => self.first.format("%A, %d.%m.%Y").to_string(),
        }
    }
}
