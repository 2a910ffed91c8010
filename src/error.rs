//! Error types for the oklch_scan library

use thiserror::Error;

/// Result type alias for oklch_scan operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for color extraction and aggregation
///
/// Empty inputs are not errors: a zero-pixel image or an empty color table
/// produces an empty, well-formed result rather than a failure.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Image file could not be opened, identified or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Color table could not be read from or written to the CSV interchange format
    #[error("Color table interchange error: {message}")]
    InterchangeError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration file could not be read, parsed or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AnalysisError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an interchange error with context
    pub fn interchange<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::InterchangeError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an interchange error that has no underlying cause
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::InterchangeError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::ImageLoadError { .. } => {
                "Could not load the image. Please check the file format and try again.".to_string()
            }
            AnalysisError::InvalidParameter { parameter, value } => {
                format!("The setting '{}' has an unusable value ({}).", parameter, value)
            }
            AnalysisError::InterchangeError { message, .. } => {
                format!("The color table could not be processed: {}", message)
            }
            AnalysisError::ConfigError { .. } => {
                "Could not read the configuration file. Please check its contents.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_parameter_display() {
        let err = AnalysisError::invalid_parameter("voxel.divisions", 0);
        assert_eq!(err.to_string(), "Invalid parameter: voxel.divisions = 0");
        assert!(err.user_message().contains("voxel.divisions"));
    }

    #[test]
    fn test_image_load_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = AnalysisError::image_load("Failed to open image file: a.png", io);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Failed to load image"));
    }

    #[test]
    fn test_malformed_has_no_source() {
        let err = AnalysisError::malformed("bad hex");
        assert!(err.source().is_none());
    }
}
