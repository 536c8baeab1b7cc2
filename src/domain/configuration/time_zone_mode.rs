use chrono::{DateTime, FixedOffset, Local, Utc};
use serde::{Deserialize, Serialize};

/// Calendar in which job times are read before cron fields are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeZoneMode {
    /// The zone of the machine running the tool.
    #[default]
    Local,
    Utc,
}

impl TimeZoneMode {
    /// Re-express `time` in this calendar. The instant is unchanged.
    pub fn apply(self, time: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        match self {
            TimeZoneMode::Local => time.with_timezone(&Local).fixed_offset(),
            TimeZoneMode::Utc => time.with_timezone(&Utc).fixed_offset(),
        }
    }
}
