//! Error types for RIMO operations

use thiserror::Error;

/// Main error type for RIMO operations
#[derive(Error, Debug)]
pub enum RimoError {
    /// Spreadsheet or RDF parsing errors
    #[error("Failed to parse {}: {message}", location.as_deref().unwrap_or("input"))]
    ParseError {
        /// Error message
        message: String,
        /// Location in the input if available (file, row, column)
        location: Option<String>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The spreadsheet could not be fetched
    #[error("Failed to fetch sheet from '{location}': {reason}")]
    SourceError {
        /// File path or URL of the sheet
        location: String,
        /// Reason for failure
        reason: String,
    },

    /// Errors while building RDF terms (invalid IRIs, language tags)
    #[error("RDF error: {0}")]
    RdfError(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Curation checks reported problems that block publishing
    #[error("Validation failed with {errors} error(s) and {warnings} warning(s)")]
    ValidationFailed {
        /// Number of errors found
        errors: usize,
        /// Number of warnings found
        warnings: usize,
    },

    /// Generic errors with context
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for RIMO operations
pub type Result<T> = std::result::Result<T, RimoError>;

impl RimoError {
    /// Create a new parse error
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location: None,
        }
    }

    /// Create a new parse error with location
    #[must_use]
    pub fn parse_at(message: impl Into<String>, location: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location: Some(location.into()),
        }
    }

    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create a new error for a sheet that could not be fetched
    #[must_use]
    pub fn fetch(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceError {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Create a new RDF error
    #[must_use]
    pub fn rdf(message: impl Into<String>) -> Self {
        Self::RdfError(message.into())
    }

    /// Create a serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError(message.into())
    }

    /// Create an IO error from a message
    #[must_use]
    pub fn io_error(message: impl Into<String>) -> Self {
        Self::IoError(std::io::Error::other(message.into()))
    }

    /// Create a generic error
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            source: None,
        }
    }

    /// Create a generic error with source
    #[must_use]
    pub fn other_with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Other {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<serde_json::Error> for RimoError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for RimoError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<anyhow::Error> for RimoError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            message: err.to_string(),
            source: Some(Box::new(std::io::Error::other(err))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = RimoError::parse("missing header");
        assert!(matches!(err, RimoError::ParseError { .. }));

        let err = RimoError::parse_at("unterminated quote", "kpis.csv:12");
        match err {
            RimoError::ParseError { location, .. } => {
                assert_eq!(location.as_deref(), Some("kpis.csv:12"));
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = RimoError::fetch("https://example.org/sheet.csv", "HTTP 404");
        let display = err.to_string();
        assert!(display.contains("https://example.org/sheet.csv"));
        assert!(display.contains("HTTP 404"));

        let err = RimoError::parse_at("no Indicator column", "kpis.csv");
        assert_eq!(
            err.to_string(),
            "Failed to parse kpis.csv: no Indicator column"
        );

        let err = RimoError::ValidationFailed {
            errors: 1,
            warnings: 3,
        };
        assert!(err.to_string().contains("1 error(s) and 3 warning(s)"));
    }

    #[test]
    fn test_error_conversions() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let rimo_err: RimoError = json_err.into();
        assert!(matches!(rimo_err, RimoError::SerializationError(_)));

        let yaml_err = serde_yaml::from_str::<Vec<String>>("{ not: [a list").unwrap_err();
        let rimo_err: RimoError = yaml_err.into();
        assert!(matches!(rimo_err, RimoError::SerializationError(_)));
    }
}
