//! Error types for the doublex pairing and compositing pipeline.
//!
//! Errors are organized by stage so messages carry the offending path and,
//! where it matters, which side of the pairing the problem came from.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for doublex operations.
#[derive(Error, Debug)]
pub enum DoublexError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A required directory is missing or is not a directory
    #[error("{role} directory not found: {path}")]
    DirectoryNotFound { role: &'static str, path: PathBuf },

    /// A candidate pool came up empty after filtering
    #[error("No eligible images found in {dir}")]
    NoEligibleImages { dir: PathBuf },

    /// Directory listing failed
    #[error("Cannot read directory {path}: {message}")]
    Discovery { path: PathBuf, message: String },

    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Writing the composite failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// The two exposures of a pair are in different color modes
    #[error("Cannot blend {first} with {second}: color modes differ")]
    ModeMismatch { first: PathBuf, second: PathBuf },

    /// The background worker died before reporting a result
    #[error("Compositor worker failed: {0}")]
    Worker(String),

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Output extension has no known image container
    #[error("Unsupported output format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

/// Convenience type alias for doublex results.
pub type Result<T> = std::result::Result<T, DoublexError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
