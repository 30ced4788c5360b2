use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors from the one-shot order submission path.
///
/// None of these are retried; they abort the run before the keeper starts.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("invalid order field {field}: {reason}")]
    InvalidOrder { field: &'static str, reason: String },

    #[error("failed to build order: {0}")]
    BuildFailed(String),

    #[error("failed to execute order: {0}")]
    ExecutionFailed(String),
}

/// Errors raised by verification capabilities during a keeper cycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("failed to scan pending price data: {0}")]
    ScanFailed(String),

    #[error("failed to list pending order ids: {0}")]
    PendingIdsFailed(String),

    #[error("failed to verify price: {0}")]
    VerifyFailed(String),

    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout {
        operation: &'static str,
        timeout_ms: u64,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("wallet error: {0}")]
    Wallet(String),

    #[error("failed to fetch trader positions: {0}")]
    Positions(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for errors raised before any venue capability was invoked.
    #[must_use]
    pub const fn is_startup(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
