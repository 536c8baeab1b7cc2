//! Scheduler configuration loaded from `.github/ghsched.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::TimeZoneMode;
use crate::domain::AppError;

/// Workflow file written when neither the CLI nor the config names one.
pub const DEFAULT_WORKFLOW_PATH: &str = ".github/workflows/scheduled-jobs.yml";

/// Root of `.github/ghsched.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl ToolConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.schedule.validate()
    }
}

/// `[schedule]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    /// Workflow file to create or update.
    #[serde(default = "default_workflow")]
    pub workflow: PathBuf,
    /// Union new jobs with the existing workflow instead of replacing it.
    #[serde(default)]
    pub merge: bool,
    /// Validate the workflow location before reading or writing.
    #[serde(default = "default_true")]
    pub check: bool,
    /// Also declare a manual `workflow_dispatch` trigger.
    #[serde(default)]
    pub dispatch: bool,
    /// Calendar used to turn job times into cron fields.
    #[serde(default)]
    pub timezone: TimeZoneMode,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            workflow: default_workflow(),
            merge: false,
            check: default_true(),
            dispatch: false,
            timezone: TimeZoneMode::default(),
        }
    }
}

impl ScheduleConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.workflow.as_os_str().is_empty() {
            return Err(AppError::InvalidConfig("schedule.workflow must not be empty".to_string()));
        }
        Ok(())
    }
}

fn default_workflow() -> PathBuf {
    PathBuf::from(DEFAULT_WORKFLOW_PATH)
}

fn default_true() -> bool {
    true
}
