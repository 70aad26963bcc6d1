//! Error mapping for provider APIs
//!
//! Converts the error bodies returned by Google Ads, the Google OAuth token
//! endpoint, SerpAPI and Azure OpenAI into the normalized ServiceError type.

use reqwest::StatusCode;
use serde_json::Value;

use super::{ErrorContext, ServiceError};

/// Map a status code and message to the matching error category
fn error_for_status(status: StatusCode, message: impl Into<String>) -> ServiceError {
    let message = message.into();
    match status {
        StatusCode::UNAUTHORIZED => ServiceError::authentication(message),
        StatusCode::FORBIDDEN => ServiceError::authorization(message),
        StatusCode::TOO_MANY_REQUESTS => ServiceError::rate_limit(message),
        StatusCode::BAD_REQUEST => ServiceError::validation(message),
        StatusCode::NOT_FOUND => ServiceError::not_found(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ServiceError::timeout(message),
        _ => ServiceError::service(message),
    }
}

/// Map a Google Ads API error to a ServiceError
///
/// The REST surface wraps a `GoogleAdsFailure` inside the standard Google
/// API error envelope; the failure carries the per-field messages and the
/// request id that support asks for.
pub fn map_google_ads_error(
    status: StatusCode,
    json: &Value,
    context: &mut ErrorContext,
) -> ServiceError {
    context.service = "google_ads".to_string();

    let Some(error) = json.get("error") else {
        return error_for_status(status, "Unknown Google Ads error");
    };

    let mut message = error
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or("Unknown Google Ads error")
        .to_string();

    if let Some(api_status) = error.get("status").and_then(|s| s.as_str()) {
        context.error_code = Some(api_status.to_string());
    }

    let details = error
        .get("details")
        .and_then(|d| d.as_array())
        .map(|d| d.as_slice())
        .unwrap_or(&[]);

    let mut failures = Vec::new();
    for detail in details {
        if let Some(request_id) = detail.get("requestId").and_then(|r| r.as_str()) {
            context.request_id = Some(request_id.to_string());
        }

        let errors = detail
            .get("errors")
            .and_then(|e| e.as_array())
            .map(|e| e.as_slice())
            .unwrap_or(&[]);

        for failure in errors {
            // errorCode is a one-field object such as {"requestError": "INVALID_CUSTOMER_ID"}
            if let Some(code) = failure
                .get("errorCode")
                .and_then(|c| c.as_object())
                .and_then(|c| c.values().next())
                .and_then(|c| c.as_str())
            {
                context.error_code = Some(code.to_string());
            }
            if let Some(text) = failure.get("message").and_then(|m| m.as_str()) {
                failures.push(text.to_string());
            }
        }
    }

    if !failures.is_empty() {
        message = format!("{} ({})", message, failures.join("; "));
    }

    error_for_status(status, message)
}

/// Map a Google OAuth token endpoint error to a ServiceError
pub fn map_oauth_error(
    status: StatusCode,
    json: &Value,
    context: &mut ErrorContext,
) -> ServiceError {
    context.service = "google_oauth".to_string();

    let code = json.get("error").and_then(|e| e.as_str()).unwrap_or("unknown_error");
    context.error_code = Some(code.to_string());

    let message = match json.get("error_description").and_then(|d| d.as_str()) {
        Some(description) => format!("{}: {}", code, description),
        None => code.to_string(),
    };

    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => ServiceError::authentication(message),
        _ => error_for_status(status, message),
    }
}

/// Map a SerpAPI error to a ServiceError
pub fn map_serpapi_error(
    status: StatusCode,
    json: &Value,
    context: &mut ErrorContext,
) -> ServiceError {
    context.service = "serpapi".to_string();

    let error_message = json
        .get("error")
        .and_then(|e| e.as_str())
        .unwrap_or("Unknown SerpAPI error");

    match status {
        StatusCode::PAYMENT_REQUIRED => ServiceError::authorization("Account credits exhausted")
            .with_context_value("details", error_message),
        _ => error_for_status(status, error_message),
    }
}

/// Map an Azure OpenAI error to a ServiceError
pub fn map_azure_openai_error(
    status: StatusCode,
    json: &Value,
    context: &mut ErrorContext,
) -> ServiceError {
    context.service = "azure_openai".to_string();

    let error = json.get("error").unwrap_or(json);

    if let Some(code) = error.get("code").and_then(|c| c.as_str()) {
        context.error_code = Some(code.to_string());
    }

    let message = error
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or("Unknown Azure OpenAI error");

    error_for_status(status, message)
}

/// Map an HTTP error response to a ServiceError, dispatching on the
/// service recorded in `context`
pub fn map_http_error(
    status: StatusCode,
    body: &str,
    context: &mut ErrorContext,
) -> ServiceError {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        match context.service.as_str() {
            "google_ads" => return map_google_ads_error(status, &json, context),
            "google_oauth" => return map_oauth_error(status, &json, context),
            "serpapi" => return map_serpapi_error(status, &json, context),
            "azure_openai" => return map_azure_openai_error(status, &json, context),
            _ => {
                let message = json
                    .get("message")
                    .or_else(|| json.get("error"))
                    .and_then(|m| m.as_str())
                    .unwrap_or(body);

                return error_for_status(status, message);
            }
        }
    }

    // Fallback to status-based mapping
    let message = if body.is_empty() {
        status.to_string()
    } else if body.chars().count() > 100 {
        format!("{}: {}...", status, body.chars().take(100).collect::<String>())
    } else {
        format!("{}: {}", status, body)
    };

    error_for_status(status, message)
}

/// Helper function to classify HTTP errors by category
pub fn classify_http_error(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "validation",
        401 => "authentication",
        403 => "authorization",
        404 => "not_found",
        408 => "timeout",
        429 => "rate_limit",
        500..=599 => "server",
        _ => "unknown",
    }
}
