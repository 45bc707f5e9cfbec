//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

use crate::types::ProgressMode;

/// Pair generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingConfig {
    /// Eligible input extensions, matched case-insensitively
    pub supported_formats: Vec<String>,

    /// Fixed RNG seed for reproducible pairings (random when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            supported_formats: vec!["jpg".to_string(), "jpeg".to_string()],
            seed: None,
        }
    }
}

/// Compositing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Factor applied to every channel of both exposures before the add
    pub brightness: f32,

    /// Resize target is the smaller longest edge divided by this
    pub resize_divisor: u32,

    /// JPEG encoder quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            brightness: 0.5,
            resize_divisor: 5,
            jpeg_quality: 75,
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 20000,
        }
    }
}

/// Progress reporting settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// How progress is rendered: "percent" or "verbose"
    pub mode: ProgressMode,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
