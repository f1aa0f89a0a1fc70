use anyhow::Error;

use crate::api::ApiStatusError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    ConnectionRefused,
    Timeout,
    NotFound,     // HTTP 404
    ClientError,  // other HTTP 4xx
    ServerError,  // HTTP 500+
    NetworkError, // DNS, routing, etc.
    Other,
}

/// Find the backend status error in the chain, if any
pub fn status_error(error: &Error) -> Option<&ApiStatusError> {
    error.chain().find_map(|e| e.downcast_ref::<ApiStatusError>())
}

/// HTTP status of the failed reply, if the failure came from the backend
pub fn http_status(error: &Error) -> Option<u16> {
    if let Some(status_err) = status_error(error) {
        return Some(status_err.status);
    }
    error
        .chain()
        .find_map(|e| e.downcast_ref::<reqwest::Error>())
        .and_then(|e| e.status())
        .map(|s| s.as_u16())
}

/// Classify an error based on its type and error chain
pub fn classify_error(error: &Error) -> ErrorType {
    if let Some(status) = http_status(error) {
        return match status {
            404 => ErrorType::NotFound,
            500..=599 => ErrorType::ServerError,
            _ => ErrorType::ClientError,
        };
    }

    let error_msg = format!("{:#}", error).to_lowercase();

    if error_msg.contains("connection refused") {
        return ErrorType::ConnectionRefused;
    }
    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        return ErrorType::Timeout;
    }
    if error_msg.contains("dns") || error_msg.contains("network") || error_msg.contains("connect") {
        return ErrorType::NetworkError;
    }

    ErrorType::Other
}

pub fn is_not_found(error: &Error) -> bool {
    classify_error(error) == ErrorType::NotFound
}

/// Whether the request never got an HTTP reply
pub fn is_transport_error(error: &Error) -> bool {
    matches!(
        classify_error(error),
        ErrorType::ConnectionRefused | ErrorType::Timeout | ErrorType::NetworkError
    )
}

/// Format error message for tech-savvy audience - show raw error details
///
/// A backend reply contributes its body when it has one; otherwise the
/// deepest error in the chain is shown.
pub fn format_error_message(error: &Error) -> String {
    if let Some(status_err) = status_error(error) {
        if !status_err.body.trim().is_empty() {
            return status_err.body.trim().to_string();
        }
        return format!("{} {}", status_err.status, status_err.reason);
    }

    // Walk the error chain to find reqwest::Error (most informative for network errors)
    let mut current: Option<&dyn std::error::Error> = Some(error.as_ref());

    while let Some(err) = current {
        if let Some(reqwest_err) = err.downcast_ref::<reqwest::Error>() {
            return reqwest_err.to_string();
        }
        current = err.source();
    }

    // If no reqwest error found, walk the chain to get the deepest (root cause) error
    let mut source = error.source();
    let mut deepest = error.to_string();

    while let Some(err) = source {
        deepest = err.to_string();
        source = err.source();
    }

    deepest
}

/// "Error <status>: <reason>" for replies, the transport message otherwise
pub fn format_status_line(error: &Error) -> String {
    match status_error(error) {
        Some(status_err) => format!("Error {}: {}", status_err.status, status_err.reason),
        None => format_error_message(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16, reason: &str, body: &str) -> Error {
        ApiStatusError {
            status: code,
            reason: reason.to_string(),
            body: body.to_string(),
        }
        .into()
    }

    #[test]
    fn test_classify_not_found() {
        let err = status(404, "Not Found", "");
        assert_eq!(classify_error(&err), ErrorType::NotFound);
        assert!(is_not_found(&err));
    }

    #[test]
    fn test_classify_not_found_through_context() {
        let err = status(404, "Not Found", "").context("Failed to fetch banner");
        assert!(is_not_found(&err));
    }

    #[test]
    fn test_classify_server_error() {
        let err = status(503, "Service Unavailable", "");
        assert_eq!(classify_error(&err), ErrorType::ServerError);
    }

    #[test]
    fn test_classify_bad_request() {
        let err = status(400, "Bad Request", "title missing");
        assert_eq!(classify_error(&err), ErrorType::ClientError);
        assert!(!is_transport_error(&err));
    }

    #[test]
    fn test_classify_connection_refused() {
        let err = anyhow::anyhow!("connection refused (os error 111)");
        assert_eq!(classify_error(&err), ErrorType::ConnectionRefused);
        assert!(is_transport_error(&err));
    }

    #[test]
    fn test_classify_timeout() {
        let err = anyhow::anyhow!("request timed out");
        assert_eq!(classify_error(&err), ErrorType::Timeout);
    }

    #[test]
    fn test_classify_dns_error() {
        let err = anyhow::anyhow!("dns lookup failed");
        assert_eq!(classify_error(&err), ErrorType::NetworkError);
    }

    #[test]
    fn test_classify_other_error() {
        let err = anyhow::anyhow!("some random error");
        assert_eq!(classify_error(&err), ErrorType::Other);
    }

    #[test]
    fn test_format_prefers_reply_body() {
        let err = status(400, "Bad Request", "  Course not found  ");
        assert_eq!(format_error_message(&err), "Course not found");
    }

    #[test]
    fn test_format_falls_back_to_status() {
        let err = status(500, "Internal Server Error", "");
        assert_eq!(format_error_message(&err), "500 Internal Server Error");
    }

    #[test]
    fn test_format_shows_root_cause() {
        let inner = anyhow::anyhow!("tcp connect error");
        let outer = inner.context("Failed to fetch listing");
        assert_eq!(format_error_message(&outer), "tcp connect error");
    }

    #[test]
    fn test_status_line() {
        let err = status(403, "Forbidden", "nope");
        assert_eq!(format_status_line(&err), "Error 403: Forbidden");
    }
}
