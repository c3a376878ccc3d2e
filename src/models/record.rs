use chrono::{NaiveDateTime, TimeDelta};

/// Row identifier of a record (`records.id`).
pub type RecordId = i64;

/// One interval of work time. `end == None` means the session is still open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub project: String,              // ⇔ records.project (FK → projects.name)
    pub creation_time: NaiveDateTime, // ⇔ records.creation_time
    pub begin: NaiveDateTime,         // ⇔ records.begin
    pub end: Option<NaiveDateTime>,   // ⇔ records.end (NULL while open)
}

impl Record {
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// End of the interval, substituting `now` for an open record.
    pub fn end_or(&self, now: NaiveDateTime) -> NaiveDateTime {
        self.end.unwrap_or(now)
    }

    /// Full duration of the record. Open records run until `now`.
    pub fn duration(&self, now: NaiveDateTime) -> TimeDelta {
        (self.end_or(now) - self.begin).max(TimeDelta::zero())
    }

    /// Portion of the record inside `[window_start, window_end)`, never negative.
    pub fn clipped(
        &self,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
        now: NaiveDateTime,
    ) -> TimeDelta {
        let from = self.begin.max(window_start);
        let to = self.end_or(now).min(window_end);
        (to - from).max(TimeDelta::zero())
    }
}
