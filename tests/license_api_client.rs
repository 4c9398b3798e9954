//! HTTP contract of the license service client, against a local mock server.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skypost_pro::adapters::{LicenseApiClient, LicenseApiConfig};
use skypost_pro::ports::{CheckoutProvider, LicenseVerifier, ServiceError};

async fn client_for(server: &MockServer) -> LicenseApiClient {
    let config = LicenseApiConfig::default().with_base_url(format!("{}/api", server.uri()));
    LicenseApiClient::new(config).expect("client should build")
}

#[tokio::test]
async fn verify_posts_license_key_and_parses_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/licenses/verify"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"licenseKey": "GOOD-KEY"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "valid": true,
            "license": {"expiresAt": "2030-01-01T00:00:00.000Z"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .await
        .verify("GOOD-KEY")
        .await
        .expect("verify should succeed");

    assert!(response.valid);
    assert_eq!(response.expires_at(), Some("2030-01-01T00:00:00.000Z"));
}

#[tokio::test]
async fn verify_reads_invalid_answer_with_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/licenses/verify"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"valid": false, "error": "License expired"})),
        )
        .mount(&server)
        .await;

    let response = client_for(&server)
        .await
        .verify("OLD-KEY")
        .await
        .expect("verify should succeed");

    assert!(!response.valid);
    assert_eq!(response.error.as_deref(), Some("License expired"));
    assert_eq!(response.expires_at(), None);
}

#[tokio::test]
async fn not_found_maps_to_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/licenses/verify"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such license"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .verify("NOPE")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ServiceError::Rejected {
            status: 404,
            body: "no such license".to_string()
        }
    );
    assert!(err.is_rejection());
}

#[tokio::test]
async fn non_json_body_is_an_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/licenses/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .verify("GOOD-KEY")
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidResponse(_)));
}

#[tokio::test]
async fn checkout_posts_email_and_returns_session_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/subscriptions/create-checkout"))
        .and(body_json(json!({"userEmail": "user@example.com"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"sessionUrl": "https://checkout.example.com/s/1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .await
        .create_checkout("user@example.com")
        .await
        .expect("checkout should succeed");

    assert_eq!(
        response.session_url.as_deref(),
        Some("https://checkout.example.com/s/1")
    );
}

#[tokio::test]
async fn checkout_without_session_url_parses_as_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/subscriptions/create-checkout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let response = client_for(&server)
        .await
        .create_checkout("user@example.com")
        .await
        .expect("checkout should succeed");

    assert_eq!(response.session_url, None);
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/licenses/verify"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"valid": true}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = LicenseApiConfig::default()
        .with_base_url(format!("{}/api", server.uri()))
        .with_timeout(Duration::from_millis(200));
    let client = LicenseApiClient::new(config).expect("client should build");

    let err = client.verify("GOOD-KEY").await.unwrap_err();

    assert!(matches!(err, ServiceError::Timeout(_)));
}
