use thiserror::Error;

/// Top-level error type for ecograph.
///
/// Every failure the write path can produce is one of these variants.
/// None of them is retried automatically.
#[derive(Error, Debug)]
pub enum EcoGraphError {
    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),

    #[error("Missing required field '{field}' for entity type {entity_type}")]
    MissingRequiredField { entity_type: String, field: String },

    #[error("Unsafe literal value for field '{field}': contains {character:?} at offset {offset}")]
    UnsafeLiteralValue {
        field: String,
        character: char,
        offset: usize,
    },

    #[error("Execution failure: {0}")]
    ExecutionFailure(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<config::ConfigError> for EcoGraphError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EcoGraphError>;
