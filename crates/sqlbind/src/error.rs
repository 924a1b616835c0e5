//! Error types for sqlbind

use thiserror::Error;

/// Result type alias for sqlbind operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Error types for query construction and execution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Structurally invalid clause input (wrong shape or type)
    #[error("Argument error: {0}")]
    Argument(String),

    /// An empty list or mapping where a non-empty one is required
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Malformed identifier or value specification
    #[error("Format error: {0}")]
    Format(String),

    /// Number of `?` placeholders differs from the number of bound values
    #[error("Wrong number of values to escape: expected {expected}, got {got}")]
    ParameterCountMismatch { expected: usize, got: usize },

    /// Failure reported by the connection or while copying rows
    #[error("Execution error: {0}")]
    Execution(String),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(String),
}

impl QueryError {
    /// Create an argument error
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument(message.into())
    }

    /// Create an empty-input error
    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::EmptyInput(message.into())
    }

    /// Create a format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Check if this is a placeholder/value count mismatch
    pub fn is_parameter_count_mismatch(&self) -> bool {
        matches!(self, Self::ParameterCountMismatch { .. })
    }

    /// Check if this error was raised while building a clause
    pub fn is_builder_error(&self) -> bool {
        matches!(
            self,
            Self::Argument(_)
                | Self::EmptyInput(_)
                | Self::Format(_)
                | Self::ParameterCountMismatch { .. }
        )
    }

    /// The bare diagnostic message, without the variant prefix.
    ///
    /// This is what `error` notifications carry.
    pub fn message(&self) -> String {
        match self {
            Self::Argument(m)
            | Self::EmptyInput(m)
            | Self::Format(m)
            | Self::Execution(m)
            | Self::Connection(m)
            | Self::Config(m) => m.clone(),
            Self::ParameterCountMismatch { .. } => self.to_string(),
        }
    }
}

impl From<toml::de::Error> for QueryError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
