//! ghsched: generate and merge scheduled GitHub Actions workflows.
//!
//! Each job is paired with the instant it should run. The job is stored under a
//! slug of its display name and guarded by a condition that matches the cron
//! expression derived from its time.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use adapters::FilesystemStore;

pub use adapters::yaml::{decode_workflow, encode_workflow};
pub use app::commands::schedule::{ScheduleOptions, ScheduleOutcome};
pub use domain::{
    AppError, CronExpression, EventMap, Job, JobBatch, MergeMode, MergeOptions, ScheduleEntry,
    ScheduledWorkflow, TimeZoneMode, TimedJob, Trigger, Workflow, generate_workflow,
    merge_workflow, schedule_workflow, slugify, to_cron,
};

/// Schedule `jobs` into the workflow file named by `options`, resolved against
/// the current directory.
pub fn schedule_jobs(
    jobs: Vec<TimedJob>,
    options: &ScheduleOptions,
) -> Result<ScheduleOutcome, AppError> {
    let store = FilesystemStore::current()?;
    app::commands::schedule::execute(&store, jobs, options)
}

/// Schedule `jobs` into a workflow file under an explicit repository root.
pub fn schedule_jobs_at(
    root: &std::path::Path,
    jobs: Vec<TimedJob>,
    options: &ScheduleOptions,
) -> Result<ScheduleOutcome, AppError> {
    let store = FilesystemStore::new(root.to_path_buf());
    app::commands::schedule::execute(&store, jobs, options)
}
