//! Error types for the analyzer framework.

use thiserror::Error;

/// Result type for analyzer operations.
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Errors that can occur during analyzer operations.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// DataFusion query execution error.
    #[error("Query execution failed: {0}")]
    QueryExecution(#[from] datafusion::error::DataFusionError),

    /// Arrow computation error.
    #[error("Arrow computation failed: {0}")]
    ArrowComputation(#[from] arrow::error::ArrowError),

    /// Invalid configuration or parameters.
    ///
    /// Also raised when persisted decision metadata (for example a gender
    /// strategy string) cannot be parsed back.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Data type mismatch or invalid data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// No data available for analysis.
    #[error("No data available for analysis")]
    NoData,

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic analyzer error with custom message.
    #[error("{0}")]
    Custom(String),
}

impl AnalyzerError {
    /// Creates an invalid configuration error with the given message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Creates an invalid data error with the given message.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Creates an execution error with the given message.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Custom(format!("Execution error: {}", msg.into()))
    }
}

/// Converts serde_json errors to AnalyzerError.
impl From<serde_json::Error> for AnalyzerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AnalyzerError::invalid_config("top_k must be positive").to_string(),
            "Invalid configuration: top_k must be positive"
        );
        assert_eq!(
            AnalyzerError::NoData.to_string(),
            "No data available for analysis"
        );
        assert_eq!(
            AnalyzerError::execution("worker panicked").to_string(),
            "Execution error: worker panicked"
        );
    }

    #[test]
    fn test_serde_json_conversion() {
        let err: AnalyzerError = serde_json::from_str::<u64>("not a number")
            .unwrap_err()
            .into();
        assert!(matches!(err, AnalyzerError::Serialization(_)));
    }
}
