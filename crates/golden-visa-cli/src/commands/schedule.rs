use clap::Args;
use serde_json::Value;

use golden_visa_core::schedule::{FeeSchedule, ScheduleProfile};

/// Arguments for printing a fee schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Built-in profile: standard or flat-dependent
    #[arg(long, default_value = "standard")]
    pub profile: ScheduleProfile,

    /// Validate and print a JSON or YAML schedule file instead
    #[arg(long)]
    pub file: Option<String>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule = match args.file {
        Some(ref path) => FeeSchedule::from_path(path)?,
        None => args.profile.schedule(),
    };
    Ok(serde_json::to_value(schedule)?)
}
