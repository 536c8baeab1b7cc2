//! Conversion of a point in time into a fixed five-field cron expression.

use std::fmt;

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

/// A five-field cron expression: `minute hour day-of-month month day-of-week`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CronExpression(String);

impl CronExpression {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CronExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CronExpression> for String {
    fn from(val: CronExpression) -> Self {
        val.0
    }
}

/// Derive the cron expression that fires at `time`.
///
/// Calendar fields are read in the zone carried by `time`, so pass a
/// `DateTime<Local>` for local-calendar semantics. Day-of-month and
/// day-of-week are both pinned; the scheduler fires only when both match.
pub fn to_cron<Tz: TimeZone>(time: &DateTime<Tz>) -> CronExpression {
    CronExpression(format!(
        "{} {} {} {} {}",
        time.minute(),
        time.hour(),
        time.day(),
        time.month(),
        time.weekday().num_days_from_sunday()
    ))
}
