//! Library entry points used by the CLI, rooted at the current directory.

use std::path::{Path, PathBuf};

use chrono::DateTime;

use crate::adapters::FilesystemStore;
use crate::adapters::yaml::decode_jobs;
use crate::app::commands::schedule::{ScheduleOptions, ScheduleOutcome};
use crate::app::commands;
use crate::domain::configuration::load_config;
use crate::domain::{
    AppError, CronExpression, MergeMode, MergeOptions, ScheduleConfig, TimeZoneMode, TimedJob,
    to_cron,
};
use crate::ports::WorkflowFilesystem;

/// Command-line values that take precedence over `.github/ghsched.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub workflow: Option<PathBuf>,
    pub merge: bool,
    pub no_check: bool,
    pub utc: bool,
    pub dispatch: bool,
}

/// Combine config file values with command-line overrides.
///
/// Boolean flags can only switch a behaviour on (or, for `no_check`, off);
/// they never undo a config value in the other direction.
pub fn resolve_options(config: &ScheduleConfig, overrides: &Overrides) -> ScheduleOptions {
    ScheduleOptions {
        path: overrides.workflow.clone().unwrap_or_else(|| config.workflow.clone()),
        merge: MergeOptions {
            mode: MergeMode::from_flag(overrides.merge || config.merge),
            dispatch: overrides.dispatch || config.dispatch,
        },
        check: config.check && !overrides.no_check,
        timezone: resolve_timezone(config, overrides.utc),
    }
}

fn resolve_timezone(config: &ScheduleConfig, utc: bool) -> TimeZoneMode {
    if utc { TimeZoneMode::Utc } else { config.timezone }
}

/// Schedule the jobs listed in `jobs_file` into the configured workflow.
pub fn schedule(jobs_file: &Path, overrides: &Overrides) -> Result<ScheduleOutcome, AppError> {
    let store = FilesystemStore::current()?;
    let config = load_config(&store)?;
    let options = resolve_options(&config.schedule, overrides);
    let jobs = read_jobs(&store, jobs_file)?;
    commands::schedule::execute(&store, jobs, &options)
}

/// Render the workflow for the jobs in `jobs_file` without writing anything.
pub fn render(jobs_file: &Path, overrides: &Overrides) -> Result<String, AppError> {
    let store = FilesystemStore::current()?;
    let config = load_config(&store)?;
    let options = resolve_options(&config.schedule, overrides);
    let jobs = read_jobs(&store, jobs_file)?;
    commands::schedule::render(jobs, &options.merge, options.timezone)
}

/// Cron expression for an RFC 3339 timestamp.
pub fn cron(time: &str, utc: bool) -> Result<CronExpression, AppError> {
    let store = FilesystemStore::current()?;
    let config = load_config(&store)?;
    let parsed = DateTime::parse_from_rfc3339(time).map_err(|e| AppError::InvalidTime {
        value: time.to_string(),
        details: e.to_string(),
    })?;
    let zoned = resolve_timezone(&config.schedule, utc).apply(parsed);
    Ok(to_cron(&zoned))
}

fn read_jobs(fs: &impl WorkflowFilesystem, jobs_file: &Path) -> Result<Vec<TimedJob>, AppError> {
    let content = fs.read_file(jobs_file)?;
    decode_jobs(&content)
}
