//! Common test utilities for inkgate integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::Router;
use axum_test::TestServer;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;

use inkgate_core::UserId;
use inkgate_service::crypto::hmac_sha256_hex;
use inkgate_service::{create_router, AppState, ServiceConfig};
use inkgate_store::{MemStore, Store};

/// Webhook signing secret used by the test config.
pub const WEBHOOK_SECRET: &str = "whsec_test_secret";

/// Session token secret used by the test config.
pub const SESSION_SECRET: &str = "session-test-secret";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The backing store, for seeding and inspecting state.
    pub store: Arc<MemStore>,
    /// A test user ID for authenticated requests.
    pub test_user_id: UserId,
}

impl TestHarness {
    /// Create a new test harness with a fresh in-memory store.
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a test harness with a custom configuration.
    pub fn with_config(config: ServiceConfig) -> Self {
        let store = Arc::new(MemStore::new());
        let server = server_with_store(store.clone(), config);

        Self {
            server,
            store,
            test_user_id: UserId::generate(),
        }
    }

    /// Get the authorization header for the harness user.
    pub fn user_auth_header(&self) -> String {
        bearer_for(&self.test_user_id)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a test server around an arbitrary store implementation.
pub fn server_with_store(store: Arc<dyn Store>, config: ServiceConfig) -> TestServer {
    let state = AppState::new(store, config);
    let router: Router = create_router(state);
    TestServer::new(router).expect("Failed to create test server")
}

/// Service configuration for tests: signature verification and session
/// validation on, external services unset unless a test fills them in.
pub fn test_config() -> ServiceConfig {
    ServiceConfig {
        stripe_webhook_secret: Some(WEBHOOK_SECRET.into()),
        session_secret: Some(SESSION_SECRET.into()),
        ..ServiceConfig::default()
    }
}

#[derive(Debug, Serialize)]
struct TestClaims {
    sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    exp: i64,
}

/// Build a valid session bearer header for a user.
pub fn bearer_for(user_id: &UserId) -> String {
    let claims = TestClaims {
        sub: user_id.to_string(),
        email: Some("reader@example.com".into()),
        exp: unix_now() + 3600,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SESSION_SECRET.as_bytes()),
    )
    .expect("encode session token");

    format!("Bearer {token}")
}

/// Current unix time in seconds.
pub fn unix_now() -> i64 {
    i64::try_from(
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before epoch")
            .as_secs(),
    )
    .expect("timestamp fits in i64")
}

/// Compute a valid `stripe-signature` header for a body.
pub fn signature_header(body: &str) -> String {
    let timestamp = unix_now();
    let signed_payload = format!("{timestamp}.{body}");
    let signature = hmac_sha256_hex(WEBHOOK_SECRET, signed_payload.as_bytes());
    format!("t={timestamp},v1={signature}")
}
