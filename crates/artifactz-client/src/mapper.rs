//! Maps failed HTTP exchanges to client errors

use artifactz_api::ClientError;
use reqwest::StatusCode;

use crate::types::ErrorResponse;

const PREVIEW_LIMIT: usize = 300;

pub(crate) fn map_transport_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::NetworkError(format!("Request timed out: {err}"))
    } else if err.is_connect() {
        ClientError::NetworkError(format!("Failed to connect: {err}"))
    } else {
        ClientError::NetworkError(err.to_string())
    }
}

/// Builds the error for a non-success response from its status and body
pub(crate) fn map_error_response(status: StatusCode, body: &str) -> ClientError {
    let message = registry_message(body).unwrap_or_else(|| describe_body(status, body));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ClientError::AuthenticationFailed(message)
        }
        _ => ClientError::Rejected(message),
    }
}

fn registry_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(ErrorResponse::into_message)
}

fn describe_body(status: StatusCode, body: &str) -> String {
    let body = body.trim();

    if body.is_empty() || body.contains("<!DOCTYPE html>") || body.contains("<html") {
        return format!("HTTP {status}");
    }

    if body.chars().count() > PREVIEW_LIMIT {
        let preview: String = body.chars().take(PREVIEW_LIMIT).collect();
        format!("HTTP {status}: {preview}...")
    } else {
        format!("HTTP {status}: {body}")
    }
}
