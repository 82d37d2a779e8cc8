//! Route client error types.

use std::fmt;

use super::convert::ConversionError;

/// Why a route fetch failed, without the details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Network,
    Service,
    Malformed,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Network => "network failure",
            FailureKind::Service => "service error",
            FailureKind::Malformed => "malformed response",
        };
        f.write_str(name)
    }
}

/// Errors from fetching a route.
///
/// None of these are fatal: the controller reports them and waits for the
/// next input change.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// HTTP request failed (connection refused, timeout, etc.)
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    /// Routing service answered with a non-success status
    #[error("routing service error {status}: {message}")]
    Service { status: u16, message: String },

    /// Response body could not be turned into a route
    #[error("malformed route response: {message}")]
    Malformed {
        message: String,
        body: Option<String>,
    },
}

impl RouteError {
    /// The cause tag of this failure.
    pub fn kind(&self) -> FailureKind {
        match self {
            RouteError::Network(_) => FailureKind::Network,
            RouteError::Service { .. } => FailureKind::Service,
            RouteError::Malformed { .. } => FailureKind::Malformed,
        }
    }
}

impl From<ConversionError> for RouteError {
    fn from(err: ConversionError) -> Self {
        RouteError::Malformed {
            message: err.to_string(),
            body: None,
        }
    }
}
