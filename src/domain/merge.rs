//! Combine an existing workflow with newly timed jobs.
//!
//! The merge never mutates its input. Each precedence rule lives in its own
//! function with a fixed winner:
//! - schedule entries: candidate wins over existing on equal `cron`
//! - synthesized job keys: later input job wins on equal slug
//! - job map: generated job wins over existing job on equal key
//! - trigger events: existing values win over the optional `workflow_dispatch` default

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde_yaml::{Mapping, Value};

use super::cron::to_cron;
use super::slug::slugify;
use super::workflow::{
    DEFAULT_JOB_NAME, DEFAULT_WORKFLOW_NAME, EventMap, Job, JobBatch, ScheduleEntry, TimedJob,
    Trigger, WORKFLOW_DISPATCH, Workflow,
};

/// Whether existing triggers and jobs are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeMode {
    /// Prior triggers and jobs are discarded.
    #[default]
    Replace,
    /// New schedule entries and jobs are unioned with the existing ones.
    Merge,
}

impl MergeMode {
    pub fn from_flag(merge: bool) -> Self {
        if merge { MergeMode::Merge } else { MergeMode::Replace }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    pub mode: MergeMode,
    /// Declare a manual `workflow_dispatch` trigger alongside the schedule.
    pub dispatch: bool,
}

impl MergeOptions {
    pub fn new(mode: MergeMode) -> Self {
        Self { mode, dispatch: false }
    }
}

/// A merged workflow together with the keys of the jobs generated into it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledWorkflow {
    pub workflow: Workflow,
    /// Keys of the synthesized jobs, sorted.
    pub generated: Vec<String>,
}

/// Produce the workflow that schedules `jobs`, starting from `existing`.
pub fn merge_workflow(
    existing: Option<&Workflow>,
    jobs: &JobBatch,
    options: &MergeOptions,
) -> Workflow {
    schedule_batch(existing, jobs, options).workflow
}

fn schedule_batch(
    existing: Option<&Workflow>,
    jobs: &JobBatch,
    options: &MergeOptions,
) -> ScheduledWorkflow {
    let base = existing.cloned().unwrap_or_default();
    let trigger = base.on.unwrap_or_else(|| Trigger::EventMap(EventMap::default()));

    let on = merge_trigger(trigger, candidate_schedule(jobs), options);
    let synthesized = synthesize_jobs(jobs);
    let generated = synthesized.keys().cloned().collect();
    let jobs = merge_jobs(synthesized, base.jobs, options.mode);

    let workflow = Workflow {
        name: Some(workflow_name(base.name)),
        on: Some(Trigger::EventMap(on)),
        jobs: Some(jobs),
        extra: base.extra,
    };
    ScheduledWorkflow { workflow, generated }
}

/// Like [`merge_workflow`], but accepts an empty job list.
pub fn generate_workflow(
    existing: Option<&Workflow>,
    jobs: Vec<TimedJob>,
    options: &MergeOptions,
) -> Workflow {
    schedule_workflow(existing, jobs, options).workflow
}

/// Like [`generate_workflow`], also reporting which job keys were generated.
///
/// With no jobs, replace mode keeps the existing name and unrelated top-level
/// keys but resets `on` to a manual trigger and clears `jobs`. Merge mode
/// returns the existing workflow as-is (or [`Workflow::unscheduled`] when
/// absent).
pub fn schedule_workflow(
    existing: Option<&Workflow>,
    jobs: Vec<TimedJob>,
    options: &MergeOptions,
) -> ScheduledWorkflow {
    let Ok(batch) = JobBatch::new(jobs) else {
        let workflow = match (options.mode, existing) {
            (MergeMode::Merge, Some(workflow)) => workflow.clone(),
            (MergeMode::Merge, None) => Workflow::unscheduled(),
            (MergeMode::Replace, existing) => unschedule(existing),
        };
        return ScheduledWorkflow { workflow, generated: Vec::new() };
    };
    schedule_batch(existing, &batch, options)
}

fn unschedule(existing: Option<&Workflow>) -> Workflow {
    let base = existing.cloned().unwrap_or_default();
    Workflow {
        name: Some(workflow_name(base.name)),
        extra: base.extra,
        ..Workflow::unscheduled()
    }
}

fn workflow_name(name: Option<String>) -> String {
    name.filter(|name| !name.is_empty()).unwrap_or_else(|| DEFAULT_WORKFLOW_NAME.to_string())
}

/// One schedule entry per input job, in input order. Duplicates are kept.
pub fn candidate_schedule(jobs: &JobBatch) -> Vec<ScheduleEntry> {
    jobs.iter().map(|job| ScheduleEntry::new(to_cron(&job.time))).collect()
}

/// `candidate ++ existing`, keeping the first entry seen for each `cron`.
pub fn dedup_schedule(
    candidate: Vec<ScheduleEntry>,
    existing: Vec<ScheduleEntry>,
) -> Vec<ScheduleEntry> {
    let mut seen = HashSet::new();
    candidate.into_iter().chain(existing).filter(|entry| seen.insert(entry.cron.clone())).collect()
}

/// Normalize any trigger shape into an event map carrying the candidate schedule.
pub fn merge_trigger(
    existing: Trigger,
    candidate: Vec<ScheduleEntry>,
    options: &MergeOptions,
) -> EventMap {
    let merged = match (options.mode, existing) {
        (MergeMode::Replace, _) => EventMap { schedule: Some(candidate), events: Mapping::new() },
        (MergeMode::Merge, Trigger::Event(event)) => {
            EventMap { schedule: Some(candidate), events: null_events([event]) }
        }
        (MergeMode::Merge, Trigger::EventList(events)) => {
            EventMap { schedule: Some(candidate), events: null_events(events) }
        }
        (MergeMode::Merge, Trigger::EventMap(map)) => {
            let schedule = dedup_schedule(candidate, map.schedule.unwrap_or_default());
            EventMap {
                schedule: if schedule.is_empty() { None } else { Some(schedule) },
                events: map.events,
            }
        }
    };

    if options.dispatch {
        EventMap { events: declare_dispatch(merged.events), ..merged }
    } else {
        merged
    }
}

/// Map bare event names to `null` configuration. A bare `schedule` event is
/// dropped since the schedule list replaces it.
fn null_events(names: impl IntoIterator<Item = String>) -> Mapping {
    names
        .into_iter()
        .filter(|name| name != "schedule")
        .map(|name| (Value::String(name), Value::Null))
        .collect()
}

/// Put `workflow_dispatch: {}` first; an existing value for it is kept.
fn declare_dispatch(events: Mapping) -> Mapping {
    let mut declared = Mapping::new();
    declared.insert(WORKFLOW_DISPATCH.into(), Value::Mapping(Mapping::new()));
    for (key, value) in events {
        declared.insert(key, value);
    }
    declared
}

/// Build the stored job for each timed job, keyed by the slug of its display name.
///
/// Later jobs overwrite earlier ones whose display names slugify identically.
pub fn synthesize_jobs(jobs: &JobBatch) -> BTreeMap<String, Job> {
    let mut synthesized = BTreeMap::new();
    for timed in jobs {
        let cron = to_cron(&timed.time);
        let display = display_name(timed.job.name.as_deref(), &timed.time);
        let job = Job {
            name: Some(display.clone()),
            condition: Some(format!("github.event.schedule == '{}'", cron)),
            fields: timed.job.fields.clone(),
        };
        synthesized.insert(slugify(&display), job);
    }
    synthesized
}

/// Generated jobs win over existing jobs with the same key.
pub fn merge_jobs(
    generated: BTreeMap<String, Job>,
    existing: Option<BTreeMap<String, Job>>,
    mode: MergeMode,
) -> BTreeMap<String, Job> {
    match (mode, existing) {
        (MergeMode::Merge, Some(mut jobs)) => {
            jobs.extend(generated);
            jobs
        }
        _ => generated,
    }
}

fn display_name(name: Option<&str>, time: &DateTime<FixedOffset>) -> String {
    let name = name.filter(|name| !name.is_empty()).unwrap_or(DEFAULT_JOB_NAME);
    format!("{} at {}", name, iso_timestamp(time))
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2021-01-01T00:00:00.000Z`.
pub fn iso_timestamp(time: &DateTime<FixedOffset>) -> String {
    time.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true)
}
