//! Policy parameters for the break check and the worked-time balance.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::utils::time::{minutes_checked, parse_duration_spec};
use chrono::Duration;

/// Policy durations may not exceed one day.
fn within_day(key: &str, d: Duration) -> AppResult<Duration> {
    if d > Duration::days(1) {
        return Err(AppError::InvalidDuration(format!(
            "{key}: {} minutes is longer than a day",
            d.num_minutes()
        )));
    }
    Ok(d)
}

/// Mandatory rest rules, split in intervals counted from the first entry
/// of the day.
///
/// Interval 0 spans the first `min_span` (6h) and requires `first_break`
/// (30 min). Every later interval spans `later_window` (3h) and requires
/// `later_break` (45 min).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakPolicy {
    pub min_span: Duration,
    pub first_break: Duration,
    pub later_break: Duration,
    pub later_window: Duration,
}

impl Default for BreakPolicy {
    fn default() -> Self {
        Self {
            min_span: Duration::hours(6),
            first_break: Duration::minutes(30),
            later_break: Duration::minutes(45),
            later_window: Duration::hours(3),
        }
    }
}

impl BreakPolicy {
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Ok(Self {
            min_span: within_day("break_min_span", parse_duration_spec(&cfg.break_min_span)?)?,
            first_break: within_day("break_first", minutes_checked(cfg.break_first)?)?,
            later_break: within_day("break_later", minutes_checked(cfg.break_later)?)?,
            later_window: within_day(
                "break_later_window",
                parse_duration_spec(&cfg.break_later_window)?,
            )?,
        })
    }

    pub fn required_break(&self, interval: usize) -> Duration {
        if interval == 0 {
            self.first_break
        } else {
            self.later_break
        }
    }

    /// Offset from the day start where `interval` begins.
    pub fn interval_start(&self, interval: usize) -> Duration {
        if interval == 0 {
            Duration::zero()
        } else {
            self.min_span + self.later_window * (interval as i32 - 1)
        }
    }

    /// Offset from the day start where `interval` ends.
    pub fn interval_end(&self, interval: usize) -> Duration {
        if interval == 0 {
            self.min_span
        } else {
            self.interval_start(interval) + self.later_window
        }
    }

    /// End of the window used to hint which entries are sensible anchors.
    pub fn compliance_window_end(&self, interval: usize) -> Duration {
        self.min_span + self.later_window * interval as i32
    }
}

/// Daily working-time target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkPolicy {
    pub daily_target: Duration,
}

impl Default for WorkPolicy {
    fn default() -> Self {
        Self {
            daily_target: Duration::hours(8),
        }
    }
}

impl WorkPolicy {
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Ok(Self {
            daily_target: within_day("daily_target", parse_duration_spec(&cfg.daily_target)?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_intervals() {
        let p = BreakPolicy::default();
        assert_eq!(p.required_break(0), Duration::minutes(30));
        assert_eq!(p.required_break(3), Duration::minutes(45));

        assert_eq!(p.interval_end(0), Duration::hours(6));
        assert_eq!(p.interval_start(1), Duration::hours(6));
        assert_eq!(p.interval_start(2), Duration::hours(9));
        assert_eq!(p.interval_end(2), Duration::hours(12));

        assert_eq!(p.compliance_window_end(0), Duration::hours(6));
        assert_eq!(p.compliance_window_end(1), Duration::hours(9));
    }

    #[test]
    fn bad_config_values_are_errors() {
        let cfg = Config {
            break_first: i64::MAX,
            ..Config::default()
        };
        assert!(matches!(
            BreakPolicy::from_config(&cfg),
            Err(AppError::InvalidDuration(_))
        ));

        let cfg = Config {
            break_later: -45,
            ..Config::default()
        };
        assert!(BreakPolicy::from_config(&cfg).is_err());

        let cfg = Config {
            daily_target: "99999999999999h".to_string(),
            ..Config::default()
        };
        assert!(WorkPolicy::from_config(&cfg).is_err());

        let cfg = Config {
            daily_target: "25h".to_string(),
            break_min_span: "48h".to_string(),
            ..Config::default()
        };
        assert!(WorkPolicy::from_config(&cfg).is_err());
        assert!(BreakPolicy::from_config(&cfg).is_err());
        assert_eq!(
            WorkPolicy::from_config(&Config::default()).unwrap(),
            WorkPolicy::default()
        );
    }
}
