//! doublex core - random image pairing and double exposure compositing.
//!
//! Images from two folders (or two random halves of one folder) are paired
//! 1:1 at random, and each pair is blended by halving the brightness of both
//! images and adding them channel by channel.
//!
//! # Architecture
//!
//! ```text
//! Discover → Pair → [worker] Decode → Greyscale? → Resize? → Halve → Add → Write
//!                        └── ProgressEvent stream ──→ presentation layer
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use doublex_core::{Config, DoubleX, RunConfiguration};
//!
//! #[tokio::main]
//! async fn main() -> doublex_core::Result<()> {
//!     let doublex = DoubleX::new(Config::load()?);
//!     let run = RunConfiguration::new("./city", Some("./forest".into()), "./out")
//!         .with_resize(true);
//!
//!     let pairing = doublex.plan(&run, None)?;
//!     let mut handle = doublex.start(&run, pairing);
//!     while let Some(event) = handle.next_event().await {
//!         println!("{event}");
//!     }
//!     let summary = handle.finish().await?;
//!     println!("{} composites written", summary.written());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, DoublexError, PipelineError, PipelineResult, Result};
pub use output::{OutputFormat, OutputWriter, PlannedComposite};
pub use pipeline::{
    ComposeOptions, Compositor, CompositorState, FileDiscovery, PairGenerator,
    Pairing, RunHandle,
};
pub use types::{Pair, ProgressEvent, ProgressMode, RunConfiguration, RunSummary, Stage};

use std::path::Path;
use types::validate_sources;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Entry point tying pair generation to the compositor worker.
pub struct DoubleX {
    config: Config,
}

impl DoubleX {
    /// Create a new instance with the given configuration.
    pub fn new(config: Config) -> Self {
        tracing::debug!("Initializing doublex v{}", VERSION);
        Self { config }
    }

    /// Validate the run's directories and build the pairing.
    ///
    /// `seed` overrides `pairing.seed` from the config.
    pub fn plan(&self, run: &RunConfiguration, seed: Option<u64>) -> PipelineResult<Pairing> {
        run.validate()?;
        self.pair_sources(&run.source_dir1, run.source_dir2.as_deref(), seed)
    }

    /// Pair the images of one or two source directories without an output.
    ///
    /// An empty pool is reported as `NoEligibleImages` naming the directory
    /// that came up empty.
    pub fn pair_sources(
        &self,
        dir1: &Path,
        dir2: Option<&Path>,
        seed: Option<u64>,
    ) -> PipelineResult<Pairing> {
        validate_sources(dir1, dir2)?;

        let pairing = PairGenerator::new(self.config.pairing.clone())
            .with_seed(seed)
            .generate(dir1, dir2)?;

        if pairing.is_empty() {
            let dir = match dir2 {
                Some(dir2) if pairing.pool_sizes.0 > 0 => dir2,
                _ => dir1,
            };
            return Err(PipelineError::NoEligibleImages {
                dir: dir.to_path_buf(),
            });
        }
        Ok(pairing)
    }

    /// Hand the pairing to a background worker and return its handle.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, run: &RunConfiguration, pairing: Pairing) -> RunHandle {
        tracing::info!(
            "Starting run: {} pair(s) → {:?} (resize: {}, greyscale: {})",
            pairing.pairs.len(),
            run.output_dir,
            run.resize,
            run.convert_greyscale
        );
        Compositor::new(&self.config).spawn(
            pairing,
            run.output_dir.clone(),
            ComposeOptions::from(run),
        )
    }

    /// Plan and run to completion, discarding progress events.
    pub async fn compose(&self, run: &RunConfiguration, seed: Option<u64>) -> Result<RunSummary> {
        let pairing = self.plan(run, seed)?;
        let mut handle = self.start(run, pairing);
        while handle.next_event().await.is_some() {}
        Ok(handle.finish().await?)
    }
}
