//! Wire and Error Mapping Tests
//!
//! Table-driven checks for base URL validation, non-2xx message
//! extraction, and the wording the controller logs for each failure.

use reqwest::StatusCode;
use rstest::rstest;

use crate::core::api::http::{error_message, parse_base_url};
use crate::core::api::ApiError;
use crate::core::creation::CreationError;

// =============================================================================
// Base URL
// =============================================================================

#[rstest]
#[case("http://localhost:5000")]
#[case("https://gm.example.com/")]
#[case("  http://127.0.0.1:8080  ")]
fn test_accepts_http_urls(#[case] raw: &str) {
    assert!(parse_base_url(raw).is_ok());
}

#[rstest]
#[case("localhost:5000")]
#[case("ftp://gm.example.com")]
#[case("file:///tmp/gm")]
#[case("")]
fn test_rejects_non_http_urls(#[case] raw: &str) {
    assert!(matches!(parse_base_url(raw), Err(ApiError::InvalidUrl(_))));
}

// =============================================================================
// Error Messages
// =============================================================================

#[rstest]
#[case(StatusCode::BAD_REQUEST, r#"{"error": "Character name is required"}"#, "Character name is required")]
#[case(StatusCode::INTERNAL_SERVER_ERROR, r#"{"story": "The GM lost the thread.", "character": null}"#, "The GM lost the thread.")]
#[case(StatusCode::BAD_REQUEST, r#"{"message": "bad stats", "error": "ignored"}"#, "bad stats")]
#[case(StatusCode::BAD_GATEWAY, "<html>upstream</html>", "Bad Gateway")]
#[case(StatusCode::NOT_FOUND, r#"{"error": "  "}"#, "Not Found")]
fn test_error_message_sources(
    #[case] status: StatusCode,
    #[case] body: &str,
    #[case] expected: &str,
) {
    assert_eq!(error_message(status, body), expected);
}

#[test]
fn test_unknown_status_falls_back_to_code() {
    let status = StatusCode::from_u16(599).unwrap();
    assert_eq!(error_message(status, ""), "HTTP 599");
}

// =============================================================================
// Display Wording
// =============================================================================

#[rstest]
#[case(ApiError::Network("refused".into()), "network error: refused")]
#[case(ApiError::Status { status: 500, message: "Internal Server Error".into() }, "Internal Server Error")]
#[case(ApiError::Rejected("name taken".into()), "name taken")]
#[case(ApiError::MalformedResponse("eof".into()), "malformed response: eof")]
fn test_api_error_display(#[case] error: ApiError, #[case] expected: &str) {
    assert_eq!(error.to_string(), expected);
}

#[test]
fn test_creation_error_display() {
    assert_eq!(
        CreationError::UnallocatedPoints(2).to_string(),
        "Please allocate all stat points (2 remaining)."
    );
    assert_eq!(
        CreationError::EmptyName.to_string(),
        "Please enter a name for your character."
    );
}
