//! CLI enum types shared by `compose` and `pairs`: progress mode, plan format.

use clap::ValueEnum;
use doublex_core::{OutputFormat as CoreOutputFormat, ProgressMode};

/// How run progress is shown.
#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum ProgressArg {
    /// Progress bar with percentage complete
    Percent,
    /// One status line per step
    Verbose,
}

impl From<ProgressArg> for ProgressMode {
    fn from(arg: ProgressArg) -> Self {
        match arg {
            ProgressArg::Percent => ProgressMode::Percent,
            ProgressArg::Verbose => ProgressMode::Verbose,
        }
    }
}

/// Format of a printed pair plan.
#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum PlanFormat {
    /// Pretty JSON array (default)
    #[default]
    Json,
    /// One JSON object per line (newline-delimited)
    Jsonl,
}

impl From<PlanFormat> for CoreOutputFormat {
    fn from(format: PlanFormat) -> Self {
        match format {
            PlanFormat::Json => CoreOutputFormat::Json,
            PlanFormat::Jsonl => CoreOutputFormat::JsonLines,
        }
    }
}

impl std::fmt::Display for PlanFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanFormat::Json => write!(f, "json"),
            PlanFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}
