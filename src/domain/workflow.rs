//! GitHub Actions workflow records as seen by the scheduler.
//!
//! Only the fields the merger reads or writes are typed. Everything else is
//! carried through untouched in a `Mapping` so a load/merge/save cycle does not
//! drop configuration the scheduler knows nothing about.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use super::AppError;

/// Workflow name used when the existing workflow has none.
pub const DEFAULT_WORKFLOW_NAME: &str = "Scheduled Jobs";

/// Job name prefix used when a timed job has none.
pub const DEFAULT_JOB_NAME: &str = "Scheduled job";

/// Trigger key for manual runs.
pub const WORKFLOW_DISPATCH: &str = "workflow_dispatch";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<Trigger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<BTreeMap<String, Job>>,
    /// Top-level keys the scheduler does not interpret (`env`, `permissions`, ...).
    #[serde(flatten)]
    pub extra: Mapping,
}

impl Workflow {
    /// The workflow produced when no timed jobs are scheduled at all.
    pub fn unscheduled() -> Self {
        let mut events = Mapping::new();
        events.insert(WORKFLOW_DISPATCH.into(), Value::Mapping(Mapping::new()));
        Self {
            name: Some(DEFAULT_WORKFLOW_NAME.to_string()),
            on: Some(Trigger::EventMap(EventMap { schedule: None, events })),
            jobs: Some(BTreeMap::new()),
            extra: Mapping::new(),
        }
    }

    /// The schedule entries declared by the trigger, if any.
    pub fn schedule(&self) -> &[ScheduleEntry] {
        match &self.on {
            Some(Trigger::EventMap(map)) => map.schedule.as_deref().unwrap_or_default(),
            _ => &[],
        }
    }
}

/// The `on:` block, in any of the three shapes GitHub accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Trigger {
    /// `on: push`
    Event(String),
    /// `on: [push, pull_request]`
    EventList(Vec<String>),
    /// `on: { push: ..., schedule: [...] }`
    EventMap(EventMap),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventMap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<ScheduleEntry>>,
    /// Every other event, in declaration order.
    #[serde(flatten)]
    pub events: Mapping,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub cron: String,
    /// Any other keys on an existing entry.
    #[serde(flatten)]
    pub extra: Mapping,
}

impl ScheduleEntry {
    pub fn new(cron: impl Into<String>) -> Self {
        Self { cron: cron.into(), extra: Mapping::new() }
    }
}

/// One job definition. Only `name` and `if` are interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// `runs-on`, `steps`, `permissions` and any other job keys.
    #[serde(flatten)]
    pub fields: Mapping,
}

impl Job {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(Value::String(key.into()), value.into());
        self
    }
}

/// A job paired with the instant it should run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimedJob {
    pub time: DateTime<FixedOffset>,
    #[serde(flatten)]
    pub job: Job,
}

impl TimedJob {
    pub fn new(time: DateTime<FixedOffset>, job: Job) -> Self {
        Self { time, job }
    }
}

/// A non-empty list of timed jobs.
#[derive(Debug, Clone, PartialEq)]
pub struct JobBatch(Vec<TimedJob>);

impl JobBatch {
    pub fn new(jobs: Vec<TimedJob>) -> Result<Self, AppError> {
        if jobs.is_empty() {
            return Err(AppError::EmptyJobBatch);
        }
        Ok(Self(jobs))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimedJob> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a JobBatch {
    type Item = &'a TimedJob;
    type IntoIter = std::slice::Iter<'a, TimedJob>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
