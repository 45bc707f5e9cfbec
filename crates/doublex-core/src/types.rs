//! Core data types shared between the pair generator, the compositor, and
//! whatever presentation layer drives them.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};

/// Two images to be blended into one double exposure.
///
/// `first` always comes from the first pool (directory 1, or the first half of
/// a split directory) and `second` from the other one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub first: PathBuf,
    pub second: PathBuf,
}

impl Pair {
    pub fn new(first: impl Into<PathBuf>, second: impl Into<PathBuf>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// File name of the composite: `<stem(first)>_<file_name(second)>`.
    ///
    /// The extension, and so the output container, is inherited from `second`.
    pub fn output_name(&self) -> OsString {
        let mut name = self.first.file_stem().unwrap_or_default().to_os_string();
        name.push("_");
        name.push(self.second.file_name().unwrap_or_default());
        name
    }

    /// Full output path of the composite inside `output_dir`.
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.output_name())
    }

    /// The same pair with its two sides swapped.
    pub fn swapped(&self) -> Self {
        Self {
            first: self.second.clone(),
            second: self.first.clone(),
        }
    }
}

/// Everything one compose run needs from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfiguration {
    /// First source directory (required)
    pub source_dir1: PathBuf,

    /// Second source directory; `None` splits `source_dir1` in two
    pub source_dir2: Option<PathBuf>,

    /// Where composites are written (must already exist)
    pub output_dir: PathBuf,

    /// Downsample both exposures before blending
    pub resize: bool,

    /// Convert both exposures to single-channel luminance
    pub convert_greyscale: bool,
}

impl RunConfiguration {
    /// Create a run configuration with both flags off.
    ///
    /// An empty `source_dir2` is treated the same as an absent one.
    pub fn new(
        source_dir1: impl Into<PathBuf>,
        source_dir2: Option<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_dir1: source_dir1.into(),
            source_dir2: source_dir2.filter(|dir| !dir.as_os_str().is_empty()),
            output_dir: output_dir.into(),
            resize: false,
            convert_greyscale: false,
        }
    }

    pub fn with_resize(mut self, resize: bool) -> Self {
        self.resize = resize;
        self
    }

    pub fn with_greyscale(mut self, convert_greyscale: bool) -> Self {
        self.convert_greyscale = convert_greyscale;
        self
    }

    /// Check that every directory the run touches exists.
    pub fn validate(&self) -> PipelineResult<()> {
        validate_sources(&self.source_dir1, self.source_dir2.as_deref())?;
        require_dir("Output", &self.output_dir)
    }
}

/// Check that the source directories of a pairing exist.
pub fn validate_sources(dir1: &Path, dir2: Option<&Path>) -> PipelineResult<()> {
    require_dir("Source", dir1)?;
    if let Some(dir) = dir2 {
        require_dir("Second source", dir)?;
    }
    Ok(())
}

fn require_dir(role: &'static str, path: &Path) -> PipelineResult<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(PipelineError::DirectoryNotFound {
            role,
            path: path.to_path_buf(),
        })
    }
}

/// How a presentation layer renders progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressMode {
    /// A 0-100 percentage per completed pair
    #[default]
    Percent,
    /// One status line per sub-step
    Verbose,
}

/// A compositing sub-step, reported before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Load,
    Greyscale,
    Resize,
    Brightness,
    Blend,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Load => "Loading",
            Stage::Greyscale => "Converting to greyscale",
            Stage::Resize => "Resizing",
            Stage::Brightness => "Adjusting brightness",
            Stage::Blend => "Blending",
            Stage::Write => "Writing",
        };
        f.write_str(label)
    }
}

/// Notification sent from the compositor worker to the presentation layer.
///
/// Each event can be rendered either as a percentage (`percent`) or as a
/// status line (`Display`); the consumer picks one via `ProgressMode`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// The run began
    Started { total: usize },

    /// A sub-step of pair `index` is about to run
    Stage {
        index: usize,
        total: usize,
        stage: Stage,
    },

    /// Pair `index` was written to `output`
    PairCompleted {
        index: usize,
        total: usize,
        output: PathBuf,
    },

    /// Every pair was written
    Completed { written: usize },

    /// The run aborted
    Failed { message: String },
}

impl ProgressEvent {
    /// Overall completion carried by this event, if any.
    pub fn percent(&self) -> Option<u8> {
        match self {
            ProgressEvent::Started { .. } => Some(0),
            ProgressEvent::PairCompleted { index, total, .. } => {
                Some(percent_complete(*index, *total))
            }
            ProgressEvent::Completed { .. } => Some(100),
            ProgressEvent::Stage { .. } | ProgressEvent::Failed { .. } => None,
        }
    }

    /// Whether this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProgressEvent::Completed { .. } | ProgressEvent::Failed { .. }
        )
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::Started { total } => write!(f, "Compositing {total} pair(s)"),
            ProgressEvent::Stage {
                index,
                total,
                stage,
            } => write!(f, "[{}/{}] {}", index + 1, total, stage),
            ProgressEvent::PairCompleted {
                index,
                total,
                output,
            } => write!(f, "[{}/{}] Wrote {}", index + 1, total, output.display()),
            ProgressEvent::Completed { written } => {
                write!(f, "Operation completed: {written} image(s) written")
            }
            ProgressEvent::Failed { message } => write!(f, "Operation failed: {message}"),
        }
    }
}

/// `round((index + 1) * 100 / total)`, clamped to 100.
pub fn percent_complete(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = ((index + 1) as f64 * 100.0 / total as f64).round();
    pct.min(100.0) as u8
}

/// Outcome of a finished compose run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Composites written, in processing order
    pub outputs: Vec<PathBuf>,

    /// Files left unpaired in the longer pool
    pub dropped: usize,

    /// Wall-clock time spent in the compositor
    pub elapsed: std::time::Duration,
}

impl RunSummary {
    pub fn written(&self) -> usize {
        self.outputs.len()
    }
}
