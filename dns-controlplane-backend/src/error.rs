use serde::Serialize;
use thiserror::Error;

/// Error type for backend drivers and option resolution.
///
/// Every variant names the backend that produced it. Drivers never retry;
/// retry policy belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code")]
pub enum BackendError {
    /// No driver is compiled in under this name.
    #[error("Unknown backend: {backend}")]
    UnknownBackend { backend: String },

    /// A required option has no value.
    #[error("[{backend}] Missing option '{key}'")]
    MissingOption { backend: String, key: String },

    /// An option has a value of the wrong shape.
    #[error("[{backend}] Invalid option '{key}': {detail}")]
    InvalidOption {
        backend: String,
        key: String,
        detail: String,
    },

    /// Configuration registry is inconsistent (e.g. no `server_ids`).
    #[error("[{backend}] Configuration error: {detail}")]
    Config { backend: String, detail: String },

    /// Connection-level failure talking to the name server side.
    #[error("[{backend}] Network error: {detail}")]
    Network { backend: String, detail: String },

    #[error("[{backend}] Request timeout: {detail}")]
    Timeout { backend: String, detail: String },

    /// The remote side answered with an error.
    #[error("[{backend}] Remote error (status {status}): {message}")]
    Remote {
        backend: String,
        status: u16,
        message: String,
    },
}

impl BackendError {
    /// Whether it is expected behavior (misconfiguration, rejected request), used for log grading.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::UnknownBackend { .. }
                | Self::MissingOption { .. }
                | Self::InvalidOption { .. }
                | Self::Config { .. }
        )
    }

    /// Whether the failure is transient and the caller may try again later.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Timeout { .. } => true,
            Self::Remote { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Convenience type alias for `Result<T, BackendError>`.
pub type Result<T> = std::result::Result<T, BackendError>;
