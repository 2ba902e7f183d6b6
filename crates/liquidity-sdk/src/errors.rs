use liquidity_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Pool not found: {0}")]
    PoolNotFound(String),

    #[error("State source failure: {0}")]
    SourceFailure(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SdkResult<T> = Result<T, SdkError>;

impl SdkError {
    /// Create a configuration error for a parameter with an unexpected value
    pub fn invalid_parameter(name: &str, value: &str, expected: &str) -> Self {
        Self::Config(format!(
            "invalid {}: got '{}', expected {}",
            name, value, expected
        ))
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
