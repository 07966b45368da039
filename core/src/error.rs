//! Error types and handling for Atelier Core

use thiserror::Error;

/// Result type alias for Atelier operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Atelier Core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend call and decoding errors
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Chain orchestration errors
    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),

    /// Prompt template errors
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },
}

/// Errors raised while talking to the generative backend or decoding its answer
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Connection or transport failure before a status was received
    #[error("Network error: {message}")]
    Network { message: String },

    /// Backend answered with a non-success HTTP status
    #[error("Backend returned status {status}: {body}")]
    Transport { status: u16, body: String },

    /// Well-formed envelope without the expected payload
    #[error("Empty response: {reason}")]
    EmptyResponse { reason: String },

    /// Payload present but not parseable or not matching its schema
    #[error("Could not decode response: {message}")]
    Decode { message: String },

    /// Caller-side precondition not met
    #[error("Missing required input: {input}")]
    MissingInput { input: String },

    /// Caller supplied an input the backend cannot accept
    #[error("Invalid input '{input}': {message}")]
    InvalidInput { input: String, message: String },
}

/// Chain orchestration errors
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Step '{step}' failed: {source}")]
    Step {
        step: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Chain was cancelled")]
    Cancelled,

    #[error("Invalid chain: {message}")]
    InvalidChain { message: String },

    #[error("No output recorded for step '{step}'")]
    MissingOutput { step: String },
}

/// Coarse failure classification, independent of chain wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Transport,
    EmptyResponse,
    Decode,
    MissingInput,
    InvalidInput,
    Cancelled,
    Other,
}

impl Error {
    /// Classify this error, looking through chain-step wrapping
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::Generation(GenerationError::Network { .. }) => FailureKind::Network,
            Error::Generation(GenerationError::Transport { .. }) => FailureKind::Transport,
            Error::Generation(GenerationError::EmptyResponse { .. }) => FailureKind::EmptyResponse,
            Error::Generation(GenerationError::Decode { .. }) => FailureKind::Decode,
            Error::Generation(GenerationError::MissingInput { .. }) => FailureKind::MissingInput,
            Error::Generation(GenerationError::InvalidInput { .. }) => FailureKind::InvalidInput,
            Error::Chain(ChainError::Step { source, .. }) => source.kind(),
            Error::Chain(ChainError::Cancelled) => FailureKind::Cancelled,
            Error::Serialization(_) => FailureKind::Decode,
            _ => FailureKind::Other,
        }
    }

    /// Whether this error reports a superseded or cancelled invocation
    pub fn is_cancelled(&self) -> bool {
        self.kind() == FailureKind::Cancelled
    }

    /// Shorthand for a decode failure
    pub(crate) fn decode(message: impl Into<String>) -> Self {
        GenerationError::Decode {
            message: message.into(),
        }
        .into()
    }

    /// Shorthand for an empty-response failure
    pub(crate) fn empty(reason: impl Into<String>) -> Self {
        GenerationError::EmptyResponse {
            reason: reason.into(),
        }
        .into()
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Generic(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Generic(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_looks_through_chain_steps() {
        let inner: Error = GenerationError::Transport {
            status: 503,
            body: "unavailable".to_string(),
        }
        .into();
        let wrapped: Error = ChainError::Step {
            step: "persona".to_string(),
            source: Box::new(inner),
        }
        .into();

        assert_eq!(wrapped.kind(), FailureKind::Transport);
        assert!(wrapped.to_string().contains("persona"));
        assert!(!wrapped.is_cancelled());
    }

    #[test]
    fn test_decode_and_network_are_distinct() {
        let decode = Error::decode("bad json");
        let network: Error = GenerationError::Network {
            message: "connection refused".to_string(),
        }
        .into();

        assert_eq!(decode.kind(), FailureKind::Decode);
        assert_eq!(network.kind(), FailureKind::Network);
        assert_ne!(decode.kind(), network.kind());
    }
}
