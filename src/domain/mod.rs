pub mod configuration;
pub mod cron;
pub mod error;
pub mod merge;
pub mod slug;
pub mod workflow;
pub mod workflow_path;

pub use configuration::{
    CONFIG_FILE, DEFAULT_WORKFLOW_PATH, ScheduleConfig, TimeZoneMode, ToolConfig,
};
pub use cron::{CronExpression, to_cron};
pub use error::AppError;
pub use merge::{
    MergeMode, MergeOptions, ScheduledWorkflow, generate_workflow, merge_workflow,
    schedule_workflow,
};
pub use slug::slugify;
pub use workflow::{
    DEFAULT_JOB_NAME, DEFAULT_WORKFLOW_NAME, EventMap, Job, JobBatch, ScheduleEntry, TimedJob,
    Trigger, WORKFLOW_DISPATCH, Workflow,
};
pub use workflow_path::WorkflowPath;
