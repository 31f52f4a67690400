//! HTTP helpers for drivers talking to a remote agent.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};

use crate::error::{BackendError, Result};

/// Connection timeout applied to every driver client.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Maximum number of characters of a response body kept in logs and errors.
const TRUNCATE_LIMIT: usize = 256;

/// Build a client with the given request timeout.
pub(crate) fn create_http_client(backend: &str, timeout: Duration) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(timeout)
        .build()
        .map_err(|e| BackendError::Config {
            backend: backend.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// Shorten a response body for logging without splitting a character.
pub(crate) fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let mut end = TRUNCATE_LIMIT;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated, total {} bytes]", &s[..end], s.len())
}

/// Send a request and return the status code with the response text.
///
/// Transport failures become `Timeout` or `Network`; status codes are left
/// to the caller.
pub(crate) async fn execute_request(
    request_builder: RequestBuilder,
    backend: &str,
    method: &str,
    url: &str,
) -> Result<(u16, String)> {
    log::debug!("[{backend}] {method} {url}");

    let response = request_builder.send().await.map_err(|e| {
        if e.is_timeout() {
            BackendError::Timeout {
                backend: backend.to_string(),
                detail: e.to_string(),
            }
        } else {
            BackendError::Network {
                backend: backend.to_string(),
                detail: e.to_string(),
            }
        }
    })?;

    let status = response.status().as_u16();
    log::debug!("[{backend}] Response Status: {status}");

    let text = response.text().await.map_err(|e| BackendError::Network {
        backend: backend.to_string(),
        detail: format!("Failed to read response body: {e}"),
    })?;
    log::debug!("[{backend}] Response Body: {}", truncate_for_log(&text));

    Ok((status, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_unchanged() {
        assert_eq!(truncate_for_log("ok"), "ok");
    }

    #[test]
    fn multibyte_body_truncated_on_char_boundary() {
        let body = "区".repeat(200);
        let result = truncate_for_log(&body);
        assert!(result.contains("[truncated, total 600 bytes]"));
    }
}
