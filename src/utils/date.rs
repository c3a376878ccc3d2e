use crate::errors::{AppError, AppResult};
use chrono::{Days, NaiveDate};

/// Accepts `YYYY-MM-DD`, `today` and `yesterday`.
pub fn parse_date(s: &str, today: NaiveDate) -> AppResult<NaiveDate> {
    match s.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - Days::new(1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
            .map_err(|_| AppError::InvalidDate(s.to_string())),
    }
}

/// "Today", "Yesterday" or the ISO date.
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if date + Days::new(1) == today {
        "Yesterday".to_string()
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}
