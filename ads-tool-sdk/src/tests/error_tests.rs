//! Tests for error handling functionality
//!
//! These tests verify that the error system in the SDK works correctly.

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;

    use crate::error::{mapping, ErrorContext, ServiceError};

    #[test]
    fn test_service_error_creation() {
        let network_err = ServiceError::network("Connection failed");
        let auth_err = ServiceError::authentication("Invalid credentials");
        let rate_limit_err = ServiceError::rate_limit("Too many requests");

        assert_eq!(network_err.to_string(), "Network error: Connection failed");
        assert_eq!(auth_err.to_string(), "Authentication error: Invalid credentials");
        assert_eq!(rate_limit_err.to_string(), "Rate limit exceeded: Too many requests");
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::for_service("google_ads")
            .status_code(400)
            .request_id("req-123")
            .endpoint("v21/customers/1:generateKeywordIdeas")
            .with("seed_count", 3);

        let err = ServiceError::validation("Bad seeds").with_context(context);

        assert_eq!(err.service_name(), Some("google_ads"));
        assert_eq!(err.status_code(), Some(400));
        assert_eq!(err.request_id(), Some("req-123"));
        assert_eq!(err.to_string(), "Validation error: Bad seeds");
        assert!(matches!(err.root(), ServiceError::Validation(_)));
        assert_eq!(err.context().unwrap().data["seed_count"], "3");

        let quick = ServiceError::timeout("Request timed out").with_context_value("attempt", 2);
        assert_eq!(quick.context().unwrap().data["attempt"], "2");
        assert_eq!(quick.service_name(), Some("unknown"));
    }

    #[test]
    fn test_rejection_requires_service_and_status() {
        let rejected = ServiceError::validation("bad")
            .with_context(ErrorContext::for_service("google_ads").status_code(400));
        assert!(rejected.is_rejection_from("google_ads"));
        assert!(!rejected.is_rejection_from("serpapi"));

        let oauth = ServiceError::authentication("invalid_grant")
            .with_context(ErrorContext::for_service("google_oauth").status_code(400));
        assert!(!oauth.is_rejection_from("google_ads"));

        let transport = ServiceError::network("refused").with_context(ErrorContext::for_service("google_ads"));
        assert!(!transport.is_rejection_from("google_ads"));

        assert!(!ServiceError::configuration("missing").is_rejection_from("google_ads"));
    }

    #[test]
    fn test_google_ads_error_mapping() {
        let body = json!({
            "error": {
                "code": 400,
                "message": "Request contains an invalid argument.",
                "status": "INVALID_ARGUMENT",
                "details": [{
                    "@type": "type.googleapis.com/google.ads.googleads.v21.errors.GoogleAdsFailure",
                    "errors": [{
                        "errorCode": { "requestError": "INVALID_CUSTOMER_ID" },
                        "message": "Invalid customer ID '123'."
                    }],
                    "requestId": "abc-req"
                }]
            }
        });

        let mut context = ErrorContext::new();
        let err = mapping::map_google_ads_error(StatusCode::BAD_REQUEST, &body, &mut context);

        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(err.to_string().contains("Invalid customer ID '123'."));
        assert_eq!(context.service, "google_ads");
        assert_eq!(context.error_code.as_deref(), Some("INVALID_CUSTOMER_ID"));
        assert_eq!(context.request_id.as_deref(), Some("abc-req"));
    }

    #[test]
    fn test_oauth_error_mapping() {
        let body = json!({ "error": "invalid_grant", "error_description": "Token has been expired or revoked." });

        let mut context = ErrorContext::new();
        let err = mapping::map_oauth_error(StatusCode::BAD_REQUEST, &body, &mut context);

        assert!(matches!(err, ServiceError::Authentication(_)));
        assert_eq!(
            err.to_string(),
            "Authentication error: invalid_grant: Token has been expired or revoked."
        );
        assert_eq!(context.error_code.as_deref(), Some("invalid_grant"));
    }

    #[test]
    fn test_serpapi_error_mapping() {
        let body = json!({ "error": "Invalid API key. Your API key should be here: https://serpapi.com/manage-api-key" });

        let mut context = ErrorContext::new();
        let err = mapping::map_serpapi_error(StatusCode::UNAUTHORIZED, &body, &mut context);
        assert!(matches!(err, ServiceError::Authentication(_)));
        assert_eq!(context.service, "serpapi");

        let err = mapping::map_serpapi_error(StatusCode::PAYMENT_REQUIRED, &body, &mut context);
        assert!(matches!(err.root(), ServiceError::Authorization(_)));
    }

    #[test]
    fn test_azure_openai_error_mapping() {
        let body = json!({ "error": { "code": "DeploymentNotFound", "message": "The API deployment for this resource does not exist." } });

        let mut context = ErrorContext::new();
        let err = mapping::map_azure_openai_error(StatusCode::NOT_FOUND, &body, &mut context);

        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(context.error_code.as_deref(), Some("DeploymentNotFound"));
    }

    #[test]
    fn test_non_json_bodies_map_by_status() {
        let mut context = ErrorContext::for_service("serpapi");
        let long_body = "x".repeat(250);

        let err = mapping::map_http_error(StatusCode::BAD_GATEWAY, &long_body, &mut context);
        assert!(matches!(err, ServiceError::Service(_)));
        assert!(err.to_string().ends_with("..."));

        let err = mapping::map_http_error(StatusCode::TOO_MANY_REQUESTS, "", &mut context);
        assert!(matches!(err, ServiceError::RateLimit(_)));

        assert_eq!(mapping::classify_http_error(StatusCode::UNAUTHORIZED), "authentication");
        assert_eq!(mapping::classify_http_error(StatusCode::NOT_FOUND), "not_found");
    }
}
