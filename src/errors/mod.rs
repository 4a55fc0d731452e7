/// Error types for heliswap-core
///
/// Pure transforms (valuation, analytics, search classification) never fail on
/// degenerate input. These errors come from constructors, configuration
/// loading, session-bound calls and the mirror-node client.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid pool {pair}: {reason}")]
    InvalidPool { pair: String, reason: String },

    #[error("Invalid amount '{amount}': {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("Invalid identifier '{value}'")]
    InvalidIdentifier { value: String },

    #[error("Unknown stake action '{action}'")]
    InvalidStakeAction { action: String },

    #[error("No account connected")]
    NotConnected,

    #[error("Mirror node error: {0}")]
    Api(#[from] ApiError),
}

impl CoreError {
    pub fn invalid_amount(amount: &str, reason: &str) -> Self {
        CoreError::InvalidAmount {
            amount: amount.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Mirror-node REST failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("HTTP {status} from {endpoint}: {body}")]
    HttpStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Transport-level failures that may succeed on retry
    pub fn is_recoverable(&self) -> bool {
        match self {
            ApiError::Network(_) | ApiError::Timeout { .. } => true,
            ApiError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            ApiError::InvalidResponse(_) => false,
        }
    }
}
