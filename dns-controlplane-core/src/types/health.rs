//! Health check result shared by storage and backend drivers

use serde::{Deserialize, Serialize};

/// Result of a `ping`.
///
/// `status: None` means the state is unknown, not that the service is down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtt: Option<String>,
}

impl HealthStatus {
    #[must_use]
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Known status with the measured round-trip time.
    #[must_use]
    pub fn measured(status: bool, rtt: std::time::Duration) -> Self {
        Self {
            status: Some(status),
            rtt: Some(format!("{:.6}", rtt.as_secs_f64())),
        }
    }
}
