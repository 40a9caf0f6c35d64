//! HTTP helper functions for Crux Core
//!
//! This module extracts common HTTP response handling logic from macros
//! into debuggable, testable functions. Every transport outcome is folded
//! into `Result<T, ApiError>`.

use crux_http::Response;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Validates HTTP response.
///
/// Returns `true` if the response status is 2xx.
pub fn is_response_success(response: &Response<Vec<u8>>) -> bool {
    response.status().is_success()
}

/// Extracts error message from HTTP response.
pub fn extract_error_message(response: &mut Response<Vec<u8>>) -> String {
    let status = response.status().to_string();

    match response.take_body() {
        Some(body) if !body.is_empty() => match String::from_utf8(body) {
            Ok(msg) => format!("HTTP {status}: {msg}"),
            Err(e) => format!("HTTP {status} (Invalid UTF-8: {e})"),
        },
        _ => format!("HTTP {status} (Empty body)"),
    }
}

/// Check whether a transport error message describes a timeout.
///
/// The shell reports an aborted `fetch()` as "Request timed out"; crux_http
/// reports its own timeout as "Timeout".
pub fn is_timeout_error(error: &str) -> bool {
    let e_lower = error.to_lowercase();
    e_lower.contains("timed out") || e_lower.contains("timeout")
}

/// Convert a transport error into an `ApiError`
pub fn map_http_error(action: &str, error: impl std::fmt::Display) -> ApiError {
    let message = error.to_string();
    ApiError::Transport {
        action: action.to_string(),
        timeout: is_timeout_error(&message),
        message,
    }
}

/// Parse JSON from response body.
///
/// Returns error if response is not successful or JSON parsing fails.
pub fn parse_json_response<T: DeserializeOwned>(
    action: &str,
    response: &mut Response<Vec<u8>>,
) -> Result<T, ApiError> {
    if !is_response_success(response) {
        return Err(ApiError::Rejected {
            action: action.to_string(),
            message: extract_error_message(response),
        });
    }

    match response.take_body() {
        Some(body) => serde_json::from_slice(&body).map_err(|e| ApiError::Parse {
            action: action.to_string(),
            message: e.to_string(),
        }),
        None => Err(ApiError::Parse {
            action: action.to_string(),
            message: "Empty response body".to_string(),
        }),
    }
}

/// Check response status only (no body parsing).
pub fn check_response_status(
    action: &str,
    response: &mut Response<Vec<u8>>,
) -> Result<(), ApiError> {
    if is_response_success(response) {
        Ok(())
    } else {
        Err(ApiError::Rejected {
            action: action.to_string(),
            message: extract_error_message(response),
        })
    }
}

/// Process HTTP response result and check status only (no JSON parsing)
pub fn process_status_response(
    action: &str,
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<(), ApiError> {
    match result {
        Ok(mut response) => check_response_status(action, &mut response),
        Err(e) => Err(map_http_error(action, e)),
    }
}

/// Process HTTP response result, parse the wire type and convert it
pub fn process_json_response<W, T>(
    action: &str,
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<T, ApiError>
where
    W: DeserializeOwned,
    T: From<W>,
{
    match result {
        Ok(mut response) => parse_json_response::<W>(action, &mut response).map(T::from),
        Err(e) => Err(map_http_error(action, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_messages_are_detected() {
        assert!(is_timeout_error("Request timed out"));
        assert!(is_timeout_error("Timeout"));
        assert!(!is_timeout_error("IO error: Failed to fetch"));
    }

    #[test]
    fn transport_errors_keep_action_and_timeout_flag() {
        let error = map_http_error("Disconnect", "Request timed out");

        assert!(error.is_timeout());
        assert_eq!(error.to_string(), "Disconnect failed: Request timed out");
    }
}

// Note: Unit tests for the response helpers are not included because
// crux_http::Response has a private constructor. They are exercised through
// the update handlers, which receive already mapped results.
