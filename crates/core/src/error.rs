//! Error types for representation conversion

use thiserror::Error;

/// Result type alias for conversion and negotiation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while negotiating or converting representations
#[derive(Debug, Error)]
pub enum Error {
    /// Input content type is not among the converter's input types
    #[error("Unsupported media type {content_type}. Can only convert from: {}", supported.join(", "))]
    UnsupportedMediaType {
        /// Content type of the rejected input
        content_type: String,
        /// Input types the converter accepts
        supported: Vec<String>,
    },

    /// No output type satisfies both the requester and the converter
    #[error("Not acceptable: requested [{}], available [{}]", requested.join(", "), supported.join(", "))]
    NotAcceptable {
        /// Preferences as given by the requester
        requested: Vec<String>,
        /// Output types the converter can produce
        supported: Vec<String>,
    },

    /// Input representation does not declare a content type
    #[error("Input content type required for conversion")]
    MissingContentType,

    /// The codec failed while producing a converted stream
    #[error("Conversion of {identifier} failed: {reason}")]
    ConversionFailure {
        /// Identifier of the resource being converted
        identifier: String,
        /// What went wrong
        reason: String,
    },

    /// Malformed media type or media range
    #[error("Invalid media type: {0}")]
    InvalidMediaType(String),

    /// Malformed preference list (duplicates, weights out of range)
    #[error("Invalid preferences: {0}")]
    InvalidPreferences(String),

    /// A serializer could not encode an item
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error only means "this converter does not fit the request".
    ///
    /// Selection loops use this to move on to the next candidate converter
    /// instead of failing the whole request.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedMediaType { .. } | Error::NotAcceptable { .. } | Error::MissingContentType
        )
    }

    /// Wrap an error raised while a converted stream was consumed.
    pub fn conversion_failure(identifier: impl Into<String>, cause: &Error) -> Self {
        match cause {
            // Already tied to a resource, keep the innermost context
            Error::ConversionFailure { identifier, reason } => Error::ConversionFailure {
                identifier: identifier.clone(),
                reason: reason.clone(),
            },
            other => Error::ConversionFailure {
                identifier: identifier.into(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigError(format!("TOML parse error: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::ConfigError(format!("YAML parse error: {}", err))
    }
}
