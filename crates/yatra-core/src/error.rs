//! Error types for the companion library.

use thiserror::Error;

/// Error taxonomy shared by every companion operation.
#[derive(Error, Debug)]
pub enum YatraError {
    /// Caller input failed its contract
    #[error("Invalid input for field '{field}': {reason}")]
    Validation { field: String, reason: String },
    /// Backend output does not match the declared output shape
    #[error("Response for '{operation}' does not match its schema: {reason}")]
    SchemaMismatch { operation: String, reason: String },
    /// Backend call failed or returned nothing usable
    #[error("Generation failed: {message}")]
    Generation { message: String },
    /// Geocoding returned zero matches
    #[error("Could not find location: {location}")]
    LocationNotFound { location: String },
    /// Weather upstream request did not succeed
    #[error("Weather upstream unavailable: {message}")]
    UpstreamUnavailable { message: String },
    /// Tool-flow invariant violated
    #[error("Protocol error: {message}")]
    Protocol { message: String },
    /// Missing or malformed configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// Prompt template could not be registered or rendered
    #[error("Template error: {message}")]
    Template { message: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

/// Builder for creating input validation errors.
pub struct ValidationErrorBuilder {
    field: String,
}

impl ValidationErrorBuilder {
    /// Create a new validation error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> YatraError {
        YatraError::Validation {
            field: self.field,
            reason: reason.into(),
        }
    }
}

/// Builder for creating schema mismatch errors.
pub struct SchemaMismatchBuilder {
    operation: String,
}

impl SchemaMismatchBuilder {
    /// Create a new schema mismatch builder for an operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> YatraError {
        YatraError::SchemaMismatch {
            operation: self.operation,
            reason: reason.into(),
        }
    }
}

impl YatraError {
    /// Creates a builder for input validation errors.
    pub fn validation(field: impl Into<String>) -> ValidationErrorBuilder {
        ValidationErrorBuilder::new(field)
    }

    /// Creates a builder for schema mismatch errors.
    pub fn schema_mismatch(operation: impl Into<String>) -> SchemaMismatchBuilder {
        SchemaMismatchBuilder::new(operation)
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            message: message.into(),
        }
    }

    /// Returns the field name for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<handlebars::RenderError> for YatraError {
    fn from(e: handlebars::RenderError) -> Self {
        Self::Template {
            message: e.to_string(),
        }
    }
}

impl From<handlebars::TemplateError> for YatraError {
    fn from(e: handlebars::TemplateError) -> Self {
        Self::Template {
            message: e.to_string(),
        }
    }
}

/// Extension trait for mapping transport errors into the taxonomy.
pub trait ResultExt<T> {
    /// Map the error into [`YatraError::Generation`] with a message prefix.
    fn generation_context(self, message: &str) -> Result<T>;

    /// Map the error into [`YatraError::UpstreamUnavailable`] with a message
    /// prefix.
    fn upstream_context(self, message: &str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn generation_context(self, message: &str) -> Result<T> {
        self.map_err(|e| YatraError::generation(format!("{message}: {e}")))
    }

    fn upstream_context(self, message: &str) -> Result<T> {
        self.map_err(|e| YatraError::upstream(format!("{message}: {e}")))
    }
}

/// Result type alias for companion operations
pub type Result<T> = std::result::Result<T, YatraError>;
