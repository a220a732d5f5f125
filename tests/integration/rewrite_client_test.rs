//! Rewrite client integration tests
//!
//! Tests the HTTP client against a wiremock rewrite endpoint: request body,
//! auth cookie and the mapping of every failure mode to `RewriteError`.

use crate::common::*;
use assert_matches::assert_matches;
use postcraft::client::{Config, RewriteClient, RewriteError, RewriteService};
use postcraft::shared::config::AppConfig;
use postcraft::shared::enhance::{EnhanceDirective, EnhanceRequest};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn love_request(directive: &EnhanceDirective) -> EnhanceRequest {
    EnhanceRequest::new("love", SHORT_DRAFT, directive)
}

#[tokio::test]
async fn test_rewrite_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENHANCE_PATH))
        .and(body_json(json!({
            "selected_text": "love",
            "full_text": "I love AI",
            "enhance_type": "engaging",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("love", "adore")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .rewrite(love_request(&EnhanceDirective::Engaging))
        .await
        .unwrap();

    assert_eq!(response.enhanced_text(), Some("adore"));
}

#[tokio::test]
async fn test_custom_instruction_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENHANCE_PATH))
        .and(body_json(json!({
            "selected_text": "love",
            "full_text": "I love AI",
            "enhance_type": "custom",
            "custom_instruction": "make it rhyme",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("love", "dove")))
        .expect(1)
        .mount(&server)
        .await;

    let directive = EnhanceDirective::custom("  make it rhyme ").unwrap();
    let response = client_for(&server).rewrite(love_request(&directive)).await.unwrap();
    assert_eq!(response.enhanced_text(), Some("dove"));
}

#[tokio::test]
async fn test_auth_cookie_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENHANCE_PATH))
        .and(header("cookie", "auth_token=secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("love", "adore")))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.set_token(Some("secret-token".to_string()));
    let client = RewriteClient::new(config).unwrap();

    let result = client.rewrite(love_request(&EnhanceDirective::Professional)).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_no_cookie_without_token() {
    let server = rewrite_server_returning("adore").await;

    client_for(&server)
        .rewrite(love_request(&EnhanceDirective::Professional))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("cookie").is_none());
}

#[tokio::test]
async fn test_custom_enhance_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/rewrite"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("love", "adore")))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config::with_builder(
        AppConfig::builder()
            .api_url(server.uri())
            .enhance_path("/v2/rewrite"),
    )
    .unwrap();
    let client = RewriteClient::new(config).unwrap();

    assert!(client
        .rewrite(love_request(&EnhanceDirective::Creative))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let server = MockServer::start().await;
    mount_enhance(
        &server,
        ResponseTemplate::new(500).set_body_string("model overloaded"),
    )
    .await;

    let result = client_for(&server)
        .rewrite(love_request(&EnhanceDirective::Engaging))
        .await;

    assert_eq!(result, Err(RewriteError::status(500, "model overloaded")));
}

#[tokio::test]
async fn test_unauthorized_maps_to_status() {
    let server = MockServer::start().await;
    mount_enhance(&server, ResponseTemplate::new(401)).await;

    let result = client_for(&server)
        .rewrite(love_request(&EnhanceDirective::Engaging))
        .await;

    assert_matches!(result, Err(RewriteError::Status { status: 401, .. }));
}

#[tokio::test]
async fn test_malformed_json() {
    let server = MockServer::start().await;
    mount_enhance(
        &server,
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    )
    .await;

    let result = client_for(&server)
        .rewrite(love_request(&EnhanceDirective::Engaging))
        .await;

    assert_matches!(result, Err(RewriteError::Malformed(_)));
}

#[tokio::test]
async fn test_missing_enhanced_text() {
    let server = MockServer::start().await;
    mount_enhance(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "success": true })),
    )
    .await;

    let result = client_for(&server)
        .rewrite(love_request(&EnhanceDirective::Engaging))
        .await;

    assert_eq!(result, Err(RewriteError::MissingEnhancedText));
}

#[tokio::test]
async fn test_unsuccessful_body_is_missing_text() {
    let server = MockServer::start().await;
    mount_enhance(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "enhanced_text": "adore",
            "error": "quota exceeded",
        })),
    )
    .await;

    let result = client_for(&server)
        .rewrite(love_request(&EnhanceDirective::Engaging))
        .await;

    assert_eq!(result, Err(RewriteError::MissingEnhancedText));
}

#[tokio::test]
async fn test_blank_enhanced_text_is_missing() {
    let server = rewrite_server_returning("   ").await;

    let result = client_for(&server)
        .rewrite(love_request(&EnhanceDirective::Engaging))
        .await;

    assert_eq!(result, Err(RewriteError::MissingEnhancedText));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    mount_enhance(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(success_body("love", "adore"))
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let client = RewriteClient::new(config_with_timeout(&server, 1)).unwrap();
    let result = client.rewrite(love_request(&EnhanceDirective::Engaging)).await;

    assert_eq!(result, Err(RewriteError::Timeout(Duration::from_secs(1))));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let config = Config::with_builder(AppConfig::builder().api_url("http://127.0.0.1:1")).unwrap();

    let client = RewriteClient::new(config).unwrap();
    let result = client.rewrite(love_request(&EnhanceDirective::Engaging)).await;

    assert_matches!(result, Err(RewriteError::Network(_)));
}
