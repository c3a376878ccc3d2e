//! Time utilities: timestamp parsing, duration rendering.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Resolve a `--at` value. Absent means `now`; a bare time is taken on `now`'s date;
/// a bare date means its midnight.
pub fn parse_timestamp(input: Option<&str>, now: NaiveDateTime) -> AppResult<NaiveDateTime> {
    let Some(raw) = input else {
        return Ok(now);
    };
    let s = raw.trim();

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    for fmt in TIME_FORMATS {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            return Ok(now.date().and_time(t));
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d.and_time(NaiveTime::MIN));
    }

    Err(AppError::InvalidTimestamp(raw.to_string()))
}

/// `HH:MM`, truncated to whole minutes. Hours are not wrapped at 24.
pub fn format_duration(d: TimeDelta) -> String {
    let mins = d.num_minutes();
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}

/// Parse a work duration such as `8h`, `7h30m`, `450m` or `-1h15m`.
pub fn parse_work_duration(input: &str) -> AppResult<TimeDelta> {
    let s = input.trim();
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let invalid = || AppError::InvalidDuration(input.to_string());

    if body == "0" {
        return Ok(TimeDelta::zero());
    }

    let (hours, rest) = match body.split_once('h') {
        Some((h, rest)) => (h.parse::<i64>().map_err(|_| invalid())?, rest),
        None => (0, body),
    };
    let minutes = match rest {
        "" => 0,
        m => m
            .strip_suffix('m')
            .and_then(|m| m.parse::<i64>().ok())
            .ok_or_else(invalid)?,
    };
    if body.is_empty() || hours < 0 || minutes < 0 {
        return Err(invalid());
    }

    let total = TimeDelta::hours(hours) + TimeDelta::minutes(minutes);
    Ok(if negative { -total } else { total })
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}
