//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.pairing.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "pairing.supported_formats must not be empty".into(),
            ));
        }
        if !(self.compose.brightness > 0.0 && self.compose.brightness <= 1.0) {
            return Err(ConfigError::ValidationError(
                "compose.brightness must be in (0.0, 1.0]".into(),
            ));
        }
        if self.compose.resize_divisor == 0 {
            return Err(ConfigError::ValidationError(
                "compose.resize_divisor must be > 0".into(),
            ));
        }
        if !(1..=100).contains(&self.compose.jpeg_quality) {
            return Err(ConfigError::ValidationError(
                "compose.jpeg_quality must be between 1 and 100".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_formats() {
        let mut config = Config::default();
        config.pairing.supported_formats.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("supported_formats"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_brightness() {
        let mut config = Config::default();
        config.compose.brightness = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("brightness"));

        config.compose.brightness = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("brightness"));
    }

    #[test]
    fn test_validate_rejects_zero_quality() {
        let mut config = Config::default();
        config.compose.jpeg_quality = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("jpeg_quality"));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = Config::default();
        config.limits.max_image_dimension = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_image_dimension"));
    }
}
