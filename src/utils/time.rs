//! Time utilities: parsing HH:MM, duration specs like "7h30m", formatting durations.

use crate::errors::{AppError, AppResult};
use chrono::{Duration, NaiveTime};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t.trim(), "%H:%M:%S"))
        .ok()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Whole minutes as a duration; negative or out-of-range values are rejected.
pub fn minutes_checked(m: i64) -> AppResult<Duration> {
    Duration::try_minutes(m)
        .filter(|d| *d >= Duration::zero())
        .ok_or_else(|| AppError::InvalidDuration(format!("{m} minutes")))
}

/// Parse durations written as "8h", "7h30m", "450m", "45" (minutes) or "07:30".
///
/// Negative and out-of-range values are an `InvalidDuration`.
pub fn parse_duration_spec(s: &str) -> AppResult<Duration> {
    let raw = s.trim().to_lowercase();
    let invalid = || AppError::InvalidDuration(s.to_string());

    if raw.is_empty() {
        return Err(invalid());
    }

    let total = if let Some((h, m)) = raw.split_once(':') {
        let h: i64 = h.parse().map_err(|_| invalid())?;
        let m: i64 = m.parse().map_err(|_| invalid())?;
        Duration::try_hours(h).and_then(|h| Duration::try_minutes(m).and_then(|m| h.checked_add(&m)))
    } else if let Ok(m) = raw.parse::<i64>() {
        Duration::try_minutes(m)
    } else {
        let mut total = Some(Duration::zero());
        let mut digits = String::new();
        for c in raw.chars() {
            match c {
                '0'..='9' => digits.push(c),
                'h' | 'm' => {
                    let n: i64 = digits.parse().map_err(|_| invalid())?;
                    digits.clear();
                    let part = if c == 'h' {
                        Duration::try_hours(n)
                    } else {
                        Duration::try_minutes(n)
                    };
                    total = total.zip(part).and_then(|(t, p)| t.checked_add(&p));
                }
                ' ' => {}
                _ => return Err(invalid()),
            }
        }
        if !digits.is_empty() {
            return Err(invalid());
        }
        total
    };

    total
        .filter(|d| *d >= Duration::zero())
        .ok_or_else(invalid)
}

/// "hh:mm" with an optional sign; days are folded into hours.
pub fn format_duration(d: Duration) -> String {
    let mins = d.num_minutes();
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}

/// "dd.hh:mm", the long form used by the totals report.
pub fn format_duration_days(d: Duration) -> String {
    let m = d.num_minutes().abs();
    format!("{:02}.{:02}:{:02}", m / (24 * 60), (m / 60) % 24, m % 60)
}
