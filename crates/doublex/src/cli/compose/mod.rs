//! The `doublex compose` command: pair, blend, and write double exposures.

mod render;
pub mod types;

pub use types::{PlanFormat, ProgressArg};

use clap::Args;
use doublex_core::config::expand_path;
use doublex_core::{
    Config, DoubleX, Pairing, PipelineError, PipelineResult, ProgressMode, RunConfiguration,
};
use std::path::PathBuf;

/// Arguments for the `compose` command.
#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// First source directory
    #[arg(required = true)]
    pub dir1: PathBuf,

    /// Second source directory (omit to split DIR1 into two random halves)
    #[arg(short, long = "with", value_name = "DIR2")]
    pub with: Option<PathBuf>,

    /// Output directory (must exist)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Downsample both images before blending
    #[arg(short, long)]
    pub resize: bool,

    /// Convert both images to greyscale before blending
    #[arg(short, long, visible_alias = "grayscale")]
    pub greyscale: bool,

    /// Seed for a reproducible pairing
    #[arg(long)]
    pub seed: Option<u64>,

    /// Progress display (defaults to `progress.mode` from config)
    #[arg(long, value_enum)]
    pub progress: Option<ProgressArg>,
}

/// Manual Default impl for constructing ComposeArgs outside of clap.
///
/// Used by the interactive module to build ComposeArgs field-by-field.
impl Default for ComposeArgs {
    fn default() -> Self {
        Self {
            dir1: PathBuf::new(),
            with: None,
            output: PathBuf::new(),
            resize: false,
            greyscale: false,
            seed: None,
            progress: None,
        }
    }
}

impl ComposeArgs {
    /// Run configuration with `~` expanded in every path.
    pub fn run_configuration(&self) -> RunConfiguration {
        let expand = |p: &PathBuf| expand_path(&p.to_string_lossy());
        RunConfiguration::new(
            expand(&self.dir1),
            self.with.as_ref().map(expand),
            expand(&self.output),
        )
        .with_resize(self.resize)
        .with_greyscale(self.greyscale)
    }

    fn progress_mode(&self, config: &Config) -> ProgressMode {
        self.progress
            .map(ProgressMode::from)
            .unwrap_or(config.progress.mode)
    }
}

/// Execute the compose command.
pub async fn execute(args: ComposeArgs, config: &Config) -> anyhow::Result<()> {
    let mode = args.progress_mode(config);
    let run = args.run_configuration();
    let doublex = DoubleX::new(config.clone());

    let Some(pairing) = accept_pairing(doublex.plan(&run, args.seed), config)? else {
        return Ok(());
    };

    tracing::info!("Found {} pair(s) to compose", pairing.pairs.len());
    if pairing.dropped > 0 {
        tracing::info!("{} image(s) left unpaired", pairing.dropped);
    }

    let handle = doublex.start(&run, pairing);
    let summary = render::drive(handle, mode).await?;
    render::print_summary(&summary, &run);

    Ok(())
}

/// Turn a planning result into a pairing to run.
///
/// An empty pool is a warning (`Ok(None)`); a missing directory gets a hint.
pub(crate) fn accept_pairing(
    planned: PipelineResult<Pairing>,
    config: &Config,
) -> anyhow::Result<Option<Pairing>> {
    match planned {
        Ok(pairing) => Ok(Some(pairing)),
        Err(PipelineError::NoEligibleImages { dir }) => {
            tracing::warn!(
                "No eligible images ({}) found in {:?}",
                config.pairing.supported_formats.join(", "),
                dir
            );
            Ok(None)
        }
        Err(PipelineError::DirectoryNotFound { role, path }) => {
            anyhow::bail!(
                "{role} directory does not exist: {:?}\n\n  Hint: Check the path and try again.",
                path
            );
        }
        Err(e) => Err(e.into()),
    }
}
