//! CLI Adapter.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::api::{self, Overrides};
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "ghsched")]
#[command(version)]
#[command(
    about = "Generate and merge scheduled GitHub Actions workflows",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule timed jobs into a workflow file
    #[clap(visible_alias = "s")]
    Schedule {
        /// YAML file holding a list of jobs, each with a `time` key
        #[arg(short, long)]
        jobs: PathBuf,
        #[command(flatten)]
        target: TargetArgs,
        /// Skip the .github/workflows/ and git repository checks
        #[arg(long)]
        no_check: bool,
    },
    /// Print the workflow that would be generated, without touching any file
    #[clap(visible_alias = "r")]
    Render {
        /// YAML file holding a list of jobs, each with a `time` key
        #[arg(short, long)]
        jobs: PathBuf,
        /// Read job times in UTC instead of the local time zone
        #[arg(long)]
        utc: bool,
        /// Also declare a manual workflow_dispatch trigger
        #[arg(long)]
        dispatch: bool,
    },
    /// Print the cron expression for an RFC 3339 timestamp
    Cron {
        /// Timestamp, e.g. 2021-01-01T00:00:00Z
        time: String,
        /// Read the time in UTC instead of the local time zone
        #[arg(long)]
        utc: bool,
    },
}

#[derive(Args)]
struct TargetArgs {
    /// Workflow file to create or update
    #[arg(short, long, env = "GHSCHED_WORKFLOW")]
    workflow: Option<PathBuf>,
    /// Merge into the existing workflow instead of replacing it
    #[arg(short, long)]
    merge: bool,
    /// Read job times in UTC instead of the local time zone
    #[arg(long)]
    utc: bool,
    /// Also declare a manual workflow_dispatch trigger
    #[arg(long)]
    dispatch: bool,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command {
        Commands::Schedule { jobs, target, no_check } => {
            let overrides = Overrides {
                workflow: target.workflow,
                merge: target.merge,
                no_check,
                utc: target.utc,
                dispatch: target.dispatch,
            };
            run_schedule(jobs, overrides)
        }
        Commands::Render { jobs, utc, dispatch } => {
            let overrides = Overrides { utc, dispatch, ..Overrides::default() };
            api::render(&jobs, &overrides).map(|yaml| print!("{}", yaml))
        }
        Commands::Cron { time, utc } => api::cron(&time, utc).map(|cron| println!("{}", cron)),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_schedule(jobs: PathBuf, overrides: Overrides) -> Result<(), AppError> {
    let outcome = api::schedule(&jobs, &overrides)?;

    if outcome.jobs.is_empty() {
        println!("✅ Wrote {} with no scheduled jobs", outcome.path.display());
        return Ok(());
    }

    println!("✅ Scheduled {} job(s) in {}", outcome.jobs.len(), outcome.path.display());
    for key in &outcome.jobs {
        println!("  • {}", key);
    }
    Ok(())
}
