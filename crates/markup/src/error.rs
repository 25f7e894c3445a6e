//! Error types for serialization
//!
//! Flat hierarchy. A failing component is passed through untouched.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SerializeError>;

/// Error raised by a component's render step
pub type ComponentError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("Invalid format: {0:?}. Valid formats are: \"xml\", \"html\"")]
    InvalidFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Component(ComponentError),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl SerializeError {
    /// Check if error came from a component
    pub fn is_component(&self) -> bool {
        matches!(self, SerializeError::Component(_))
    }
}
