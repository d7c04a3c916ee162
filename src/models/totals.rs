use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::ops::AddAssign;

/// Reference time, actual worked time and the difference between them.
/// A positive delta means the target was missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkTotals {
    #[serde(with = "minutes")]
    pub reference: Duration,
    #[serde(with = "minutes")]
    pub actual: Duration,
    #[serde(with = "minutes")]
    pub delta: Duration,
}

impl WorkTotals {
    pub fn new(reference: Duration, actual: Duration) -> Self {
        Self {
            reference,
            actual,
            delta: reference - actual,
        }
    }
}

impl Default for WorkTotals {
    fn default() -> Self {
        Self::new(Duration::zero(), Duration::zero())
    }
}

impl AddAssign for WorkTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.reference += rhs.reference;
        self.actual += rhs.actual;
        self.delta += rhs.delta;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DayTotals {
    pub date: NaiveDate,
    pub totals: WorkTotals,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthTotals {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DayTotals>,
    pub totals: WorkTotals,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TotalsReport {
    pub months: Vec<MonthTotals>,
    pub totals: WorkTotals,
}

mod minutes {
    use chrono::Duration;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(d.num_minutes())
    }
}
