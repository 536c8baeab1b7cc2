//! Load, merge and persist a scheduled-jobs workflow.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::adapters::yaml::{decode_workflow, encode_workflow};
use crate::domain::{
    AppError, MergeMode, MergeOptions, TimeZoneMode, TimedJob, Workflow, WorkflowPath,
    generate_workflow, schedule_workflow,
};
use crate::ports::WorkflowFilesystem;

/// Options for [`execute`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleOptions {
    /// Workflow file to create or update.
    pub path: PathBuf,
    pub merge: MergeOptions,
    /// Validate the workflow location before touching it.
    pub check: bool,
    /// Calendar used for cron fields.
    pub timezone: TimeZoneMode,
}

impl ScheduleOptions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            merge: MergeOptions::default(),
            check: true,
            timezone: TimeZoneMode::default(),
        }
    }

    pub fn merging(mut self, merge: bool) -> Self {
        self.merge.mode = MergeMode::from_flag(merge);
        self
    }
}

/// Result of a schedule run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOutcome {
    /// Path the workflow was written to.
    pub path: PathBuf,
    /// Keys of the jobs generated in this run, sorted.
    pub jobs: Vec<String>,
    /// Cron expressions declared by the written workflow.
    pub schedule: Vec<String>,
}

/// Validate a workflow path and confirm the enclosing git repository exists.
pub fn check_path(fs: &impl WorkflowFilesystem, path: &Path) -> Result<WorkflowPath, AppError> {
    let workflow_path = WorkflowPath::parse(path, fs.root())?;
    if !fs.is_dir(workflow_path.git_dir()) {
        return Err(AppError::NotInGitRepository(workflow_path.absolute().display().to_string()));
    }
    Ok(workflow_path)
}

/// Load the workflow at `path`; `None` when the file does not exist yet.
pub fn load_workflow(
    fs: &impl WorkflowFilesystem,
    path: &Path,
    check: bool,
) -> Result<Option<Workflow>, AppError> {
    if check {
        check_path(fs, path)?;
    }
    if !fs.file_exists(path) {
        debug!(path = %path.display(), "no existing workflow");
        return Ok(None);
    }

    let content = fs.read_file(path)?;
    decode_workflow(&content).map(Some)
}

/// Encode `workflow` and write it to `path`.
pub fn save_workflow(
    fs: &impl WorkflowFilesystem,
    path: &Path,
    workflow: &Workflow,
    check: bool,
) -> Result<(), AppError> {
    if check {
        check_path(fs, path)?;
    }
    let content = encode_workflow(workflow)?;
    fs.write_file(path, &content)
}

/// Schedule `jobs` into the workflow at `options.path`.
pub fn execute(
    fs: &impl WorkflowFilesystem,
    jobs: Vec<TimedJob>,
    options: &ScheduleOptions,
) -> Result<ScheduleOutcome, AppError> {
    let jobs = in_zone(jobs, options.timezone);
    let existing = load_workflow(fs, &options.path, options.check)?;
    debug!(
        path = %options.path.display(),
        existing = existing.is_some(),
        mode = ?options.merge.mode,
        jobs = jobs.len(),
        "merging scheduled jobs"
    );

    let scheduled = schedule_workflow(existing.as_ref(), jobs, &options.merge);
    let workflow = scheduled.workflow;
    save_workflow(fs, &options.path, &workflow, options.check)?;

    let schedule: Vec<String> =
        workflow.schedule().iter().map(|entry| entry.cron.clone()).collect();
    info!(path = %options.path.display(), schedule = schedule.len(), "workflow written");

    Ok(ScheduleOutcome { path: options.path.clone(), jobs: scheduled.generated, schedule })
}

/// Render the workflow for `jobs` without reading or writing any file.
pub fn render(
    jobs: Vec<TimedJob>,
    merge: &MergeOptions,
    timezone: TimeZoneMode,
) -> Result<String, AppError> {
    let workflow = generate_workflow(None, in_zone(jobs, timezone), merge);
    encode_workflow(&workflow)
}

fn in_zone(jobs: Vec<TimedJob>, timezone: TimeZoneMode) -> Vec<TimedJob> {
    jobs.into_iter()
        .map(|timed| TimedJob { time: timezone.apply(timed.time), ..timed })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Job;
    use crate::testing::MockFilesystem;
    use chrono::DateTime;
    use serde_yaml::Value;

    const WORKFLOW: &str = ".github/workflows/cron.yml";

    fn repo() -> MockFilesystem {
        MockFilesystem::new().with_dir(".git")
    }

    fn deploy_at(time: &str) -> TimedJob {
        TimedJob::new(
            DateTime::parse_from_rfc3339(time).unwrap(),
            Job::named("Deploy").with_field("runs-on", "ubuntu-latest"),
        )
    }

    fn utc_options() -> ScheduleOptions {
        ScheduleOptions { timezone: TimeZoneMode::Utc, ..ScheduleOptions::new(WORKFLOW) }
    }

    fn written(fs: &MockFilesystem) -> Value {
        serde_yaml::from_str(&fs.contents(WORKFLOW).unwrap()).unwrap()
    }

    #[test]
    fn creates_workflow_in_fresh_repository() {
        let fs = repo();
        let outcome = execute(&fs, vec![deploy_at("2021-01-01T00:00:00Z")], &utc_options()).unwrap();

        assert_eq!(outcome.jobs, vec!["deploy-at-2021-01-01t000000000z"]);
        assert_eq!(outcome.schedule, vec!["0 0 1 1 5"]);

        let yaml = written(&fs);
        assert_eq!(yaml["name"], Value::from("Scheduled Jobs"));
        assert_eq!(yaml["on"]["schedule"][0]["cron"], Value::from("0 0 1 1 5"));
        assert_eq!(
            yaml["jobs"]["deploy-at-2021-01-01t000000000z"]["if"],
            Value::from("github.event.schedule == '0 0 1 1 5'")
        );
    }

    #[test]
    fn merges_into_existing_workflow() {
        let fs = repo().with_file(
            WORKFLOW,
            "name: Ops\non: push\njobs:\n  lint:\n    runs-on: ubuntu-latest\n",
        );
        let options = utc_options().merging(true);
        let outcome = execute(&fs, vec![deploy_at("2021-01-01T00:00:00Z")], &options).unwrap();
        assert_eq!(outcome.schedule, vec!["0 0 1 1 5"]);

        let yaml = written(&fs);
        assert_eq!(yaml["name"], Value::from("Ops"));
        assert_eq!(yaml["on"]["push"], Value::Null);
        assert!(yaml["jobs"]["lint"].is_mapping());
        assert!(yaml["jobs"]["deploy-at-2021-01-01t000000000z"].is_mapping());
    }

    #[test]
    fn repeated_merge_is_stable() {
        let fs = repo();
        let options = utc_options().merging(true);
        execute(&fs, vec![deploy_at("2021-01-01T00:00:00Z")], &options).unwrap();
        let first = fs.contents(WORKFLOW).unwrap();
        execute(&fs, vec![deploy_at("2021-01-01T00:00:00Z")], &options).unwrap();
        assert_eq!(fs.contents(WORKFLOW).unwrap(), first);
    }

    #[test]
    fn empty_job_list_writes_unscheduled_workflow() {
        let fs = repo();
        let outcome = execute(&fs, Vec::new(), &utc_options()).unwrap();
        assert!(outcome.jobs.is_empty());
        assert!(outcome.schedule.is_empty());

        let yaml = written(&fs);
        assert!(yaml["on"]["workflow_dispatch"].as_mapping().unwrap().is_empty());
        assert!(yaml["jobs"].as_mapping().unwrap().is_empty());
    }

    #[test]
    fn missing_git_directory_is_rejected() {
        let fs = MockFilesystem::new();
        let err = execute(&fs, vec![deploy_at("2021-01-01T00:00:00Z")], &utc_options()).unwrap_err();
        assert!(matches!(err, AppError::NotInGitRepository(_)));
        assert!(fs.contents(WORKFLOW).is_none());
    }

    #[test]
    fn unchecked_paths_skip_validation() {
        let fs = MockFilesystem::new();
        let options = ScheduleOptions { check: false, ..ScheduleOptions::new("workflow.yml") };
        execute(&fs, vec![deploy_at("2021-01-01T00:00:00Z")], &options).unwrap();
        assert!(fs.contents("workflow.yml").is_some());
    }

    #[test]
    fn wrong_extension_is_rejected_before_reading() {
        let fs = repo();
        let options = ScheduleOptions::new(".github/workflows/cron.yaml");
        let err = execute(&fs, vec![deploy_at("2021-01-01T00:00:00Z")], &options).unwrap_err();
        assert!(matches!(err, AppError::NotYamlFile(_)));
    }

    #[test]
    fn malformed_existing_workflow_is_reported() {
        let fs = repo().with_file(WORKFLOW, "on: [unterminated\n");
        let err = execute(&fs, vec![deploy_at("2021-01-01T00:00:00Z")], &utc_options()).unwrap_err();
        assert!(matches!(err, AppError::ParseError { .. }));
    }

    #[test]
    fn render_does_not_need_a_repository() {
        let yaml =
            render(vec![deploy_at("2021-01-01T00:00:00Z")], &MergeOptions::default(), TimeZoneMode::Utc)
                .unwrap();
        let value: Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value["on"]["schedule"][0]["cron"], Value::from("0 0 1 1 5"));
        assert!(yaml.starts_with("name: Scheduled Jobs\n"));
    }
}
