//! Compositor: turns each pair into one double exposure on disk.
//!
//! Pairs are processed strictly one after another. The first failure aborts
//! the run; composites already written stay where they are.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageError, ImageFormat};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task::JoinHandle;

use crate::config::{ComposeConfig, Config};
use crate::error::{PipelineError, PipelineResult};
use crate::types::{Pair, ProgressEvent, RunConfiguration, RunSummary, Stage};

use super::channel::{progress_channel, ProgressReceiver, ProgressSender};
use super::decode::ImageDecoder;
use super::exposure::{resize_target, Exposure};
use super::pairing::Pairing;

/// Per-run transform switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Downsample both exposures before blending
    pub resize: bool,
    /// Work in single-channel luminance
    pub convert_greyscale: bool,
}

impl From<&RunConfiguration> for ComposeOptions {
    fn from(run: &RunConfiguration) -> Self {
        Self {
            resize: run.resize,
            convert_greyscale: run.convert_greyscale,
        }
    }
}

/// Lifecycle of a compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositorState {
    Idle,
    Running,
    Completed,
    Failed,
}

/// Blends pairs of images into double exposures.
pub struct Compositor {
    decoder: ImageDecoder,
    compose: ComposeConfig,
    state: CompositorState,
}

impl Compositor {
    /// Create an idle compositor with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            decoder: ImageDecoder::new(config.limits.clone()),
            compose: config.compose.clone(),
            state: CompositorState::Idle,
        }
    }

    pub fn state(&self) -> CompositorState {
        self.state
    }

    /// Composite every pair into `output_dir`, reporting through `progress`.
    ///
    /// Emits `Started`, per-pair `Stage`/`PairCompleted` events, then either
    /// `Completed` or `Failed`. Returns the written paths in order.
    pub fn run(
        &mut self,
        pairs: &[Pair],
        output_dir: &Path,
        options: ComposeOptions,
        progress: &ProgressSender,
    ) -> PipelineResult<Vec<PathBuf>> {
        self.state = CompositorState::Running;
        let total = pairs.len();
        progress.send(ProgressEvent::Started { total });
        tracing::debug!("Compositing {} pair(s) into {:?}", total, output_dir);

        let mut outputs = Vec::with_capacity(total);
        for (index, pair) in pairs.iter().enumerate() {
            match self.compose_pair(pair, output_dir, options, index, total, progress) {
                Ok(output) => {
                    progress.send(ProgressEvent::PairCompleted {
                        index,
                        total,
                        output: output.clone(),
                    });
                    outputs.push(output);
                }
                Err(e) => {
                    self.state = CompositorState::Failed;
                    tracing::error!("Compositing {:?} failed: {}", pair.output_name(), e);
                    progress.send(ProgressEvent::Failed {
                        message: e.to_string(),
                    });
                    return Err(e);
                }
            }
        }

        self.state = CompositorState::Completed;
        progress.send(ProgressEvent::Completed {
            written: outputs.len(),
        });
        Ok(outputs)
    }

    /// Composite a single pair and return the path written.
    pub fn compose_pair(
        &self,
        pair: &Pair,
        output_dir: &Path,
        options: ComposeOptions,
        index: usize,
        total: usize,
        progress: &ProgressSender,
    ) -> PipelineResult<PathBuf> {
        let start = Instant::now();
        let stage = |stage: Stage| {
            progress.send(ProgressEvent::Stage {
                index,
                total,
                stage,
            })
        };

        stage(Stage::Load);
        let first = self.decoder.decode(&pair.first)?;
        let second = self.decoder.decode(&pair.second)?;
        tracing::trace!("  Decode: {:?}", start.elapsed());

        if options.convert_greyscale {
            stage(Stage::Greyscale);
        }
        let mut a = Exposure::from_image(first.image, options.convert_greyscale);
        let mut b = Exposure::from_image(second.image, options.convert_greyscale);

        if options.resize {
            stage(Stage::Resize);
            let target = resize_target(
                a.dimensions(),
                b.dimensions(),
                self.compose.resize_divisor,
            );
            a = a.downsample(target);
            b = b.downsample(target);
            tracing::trace!("  Resize to {}: {:?}", target, start.elapsed());
        }

        stage(Stage::Brightness);
        a.scale_brightness(self.compose.brightness);
        b.scale_brightness(self.compose.brightness);

        stage(Stage::Blend);
        let blended = a.add(&b).ok_or_else(|| PipelineError::ModeMismatch {
            first: pair.first.clone(),
            second: pair.second.clone(),
        })?;

        stage(Stage::Write);
        let output = pair.output_path(output_dir);
        self.write(blended.into_dynamic(), &output)?;

        tracing::debug!(
            "Composed {:?} in {:?} ({}x{} + {}x{})",
            pair.output_name(),
            start.elapsed(),
            first.width,
            first.height,
            second.width,
            second.height
        );
        Ok(output)
    }

    /// Encode `image` in the container named by the extension of `path`.
    ///
    /// An existing file at `path` is overwritten.
    fn write(&self, image: DynamicImage, path: &Path) -> PipelineResult<()> {
        let format = ImageFormat::from_path(path).map_err(|_| PipelineError::UnsupportedFormat {
            path: path.to_path_buf(),
            format: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        })?;

        let result = match format {
            ImageFormat::Jpeg => File::create(path)
                .map_err(ImageError::IoError)
                .and_then(|file| {
                    let mut writer = BufWriter::new(file);
                    let encoder =
                        JpegEncoder::new_with_quality(&mut writer, self.compose.jpeg_quality);
                    image.write_with_encoder(encoder)?;
                    writer.flush().map_err(ImageError::IoError)
                }),
            other => image.save_with_format(path, other),
        };

        result.map_err(|e| PipelineError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Move this compositor onto a blocking worker thread and start the run.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        mut self,
        pairing: Pairing,
        output_dir: PathBuf,
        options: ComposeOptions,
    ) -> RunHandle {
        let (tx, rx) = progress_channel();
        let dropped = pairing.dropped;
        let started = Instant::now();
        let task = tokio::task::spawn_blocking(move || {
            self.run(&pairing.pairs, &output_dir, options, &tx)
        });

        RunHandle {
            events: rx,
            task,
            dropped,
            started,
        }
    }
}

/// Foreground side of a running compose job.
pub struct RunHandle {
    events: ProgressReceiver,
    task: JoinHandle<PipelineResult<Vec<PathBuf>>>,
    dropped: usize,
    started: Instant,
}

impl RunHandle {
    /// Next progress event; `None` once the worker is done sending.
    pub async fn next_event(&mut self) -> Option<ProgressEvent> {
        self.events.recv().await
    }

    /// Wait for the worker and collect its outcome.
    pub async fn finish(self) -> PipelineResult<RunSummary> {
        let outputs = self
            .task
            .await
            .map_err(|e| PipelineError::Worker(e.to_string()))??;
        Ok(RunSummary {
            outputs,
            dropped: self.dropped,
            elapsed: self.started.elapsed(),
        })
    }
}
