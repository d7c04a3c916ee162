use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Duration, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse a period expression into inclusive date bounds.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - any two of the above joined by ':' (same granularity)
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = |why: &str| AppError::InvalidRange(format!("{r}: {why}"));

    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(invalid("start and end must have same format"));
        }

        let (from, _) = single_bounds(start).ok_or_else(|| invalid("invalid start"))?;
        let (_, to) = single_bounds(end).ok_or_else(|| invalid("invalid end"))?;

        if to < from {
            return Err(invalid("end is before start"));
        }
        return Ok((from, to));
    }

    single_bounds(r.trim()).ok_or_else(|| invalid("unsupported format"))
}

fn single_bounds(p: &str) -> Option<(NaiveDate, NaiveDate)> {
    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(y, 1, 1)?,
                NaiveDate::from_ymd_opt(y, 12, 31)?,
            ))
        }
        // YYYY-MM
        7 => {
            let y: i32 = p.get(0..4)?.parse().ok()?;
            let m: u32 = p.get(5..7)?.parse().ok()?;
            let first = NaiveDate::from_ymd_opt(y, m, 1)?;
            Some((first, last_day_of_month(first)))
        }
        // YYYY-MM-DD
        10 => {
            let d = parse_date(p)?;
            Some((d, d))
        }
        _ => None,
    }
}

pub fn last_day_of_month(d: NaiveDate) -> NaiveDate {
    let (y, m) = if d.month() == 12 {
        (d.year() + 1, 1)
    } else {
        (d.year(), d.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|n| n.pred_opt())
        .unwrap_or(d)
}

pub fn current_month_bounds() -> (NaiveDate, NaiveDate) {
    let t = today();
    let first = t.with_day(1).unwrap_or(t);
    (first, last_day_of_month(first))
}

/// Translate "week", "month", "*" or a number of days (1 = today) into a
/// lower date bound. `None` means no bound.
pub fn since_from_days(spec: Option<&str>, default_days: i64) -> AppResult<Option<NaiveDate>> {
    let days = match spec.map(|s| s.trim().to_lowercase()) {
        None => default_days,
        Some(s) if s == "*" || s == "all" => return Ok(None),
        Some(s) if s == "week" => 7,
        Some(s) if s == "month" => 31,
        Some(s) => s
            .parse::<i64>()
            .map_err(|_| AppError::InvalidRange(s.clone()))?,
    };
    days_back_from(today(), days).map(Some)
}

/// First day of a window of `days` days ending on `end`.
fn days_back_from(end: NaiveDate, days: i64) -> AppResult<NaiveDate> {
    Duration::try_days(days.saturating_sub(1).max(0))
        .and_then(|back| end.checked_sub_signed(back))
        .ok_or_else(|| AppError::InvalidRange(format!("{days} days back from {end}")))
}
