//! Posts API integration tests.
//!
//! The content API is mocked with wiremock; subscription state is seeded
//! straight into the store.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{test_config, TestHarness};
use inkgate_core::{Account, CustomerId, SubscriptionId};
use inkgate_store::Store;

fn post_document() -> Value {
    json!({
        "uid": "my-new-post",
        "data": {
            "title": [{"type": "heading", "text": "My New Post"}],
            "content": [
                {"type": "paragraph", "text": "Post content"},
                {"type": "paragraph", "text": "The rest of the story."}
            ]
        },
        "last_publication_date": "2021-04-01T00:00:00Z"
    })
}

async fn harness_with_content() -> (TestHarness, MockServer) {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/documents"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"results": [post_document()]})),
        )
        .mount(&mock)
        .await;

    Mock::given(method("GET"))
        .and(path("/documents/my-new-post"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_document()))
        .mount(&mock)
        .await;

    Mock::given(method("GET"))
        .and(path("/documents/missing-post"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock)
        .await;

    let mut config = test_config();
    config.content_api_url = Some(mock.uri());

    (TestHarness::with_config(config), mock)
}

/// Seed an account linked to a customer with a subscription record.
fn seed_subscription(harness: &TestHarness, active: bool) {
    let customer_id = CustomerId::new("cus_reader").unwrap();

    let mut account = Account::new(harness.test_user_id);
    account.link_customer(customer_id.clone());
    harness.store.put_account(&account).unwrap();

    harness
        .store
        .reconcile_subscription(
            &SubscriptionId::new("sub_reader").unwrap(),
            &customer_id,
            active,
        )
        .unwrap();
}

#[tokio::test]
async fn list_posts_returns_excerpts() {
    let (harness, _mock) = harness_with_content().await;

    let response = harness.server.get("/v1/posts").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let posts = body["posts"].as_array().expect("posts array");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["slug"], "my-new-post");
    assert_eq!(posts[0]["title"], "My New Post");
    assert_eq!(posts[0]["excerpt"], "Post content");
    assert!(posts[0].get("content").is_none());
}

#[tokio::test]
async fn anonymous_reader_gets_preview() {
    let (harness, _mock) = harness_with_content().await;

    let response = harness.server.get("/v1/posts/my-new-post").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["preview"], true);
    assert_eq!(body["content"], "Post content");
}

#[tokio::test]
async fn reader_without_subscription_gets_preview() {
    let (harness, _mock) = harness_with_content().await;

    let response = harness
        .server
        .get("/v1/posts/my-new-post")
        .add_header("authorization", harness.user_auth_header())
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["preview"], true);
    assert_eq!(body["content"], "Post content");
}

#[tokio::test]
async fn subscriber_gets_full_content() {
    let (harness, _mock) = harness_with_content().await;
    seed_subscription(&harness, true);

    let response = harness
        .server
        .get("/v1/posts/my-new-post")
        .add_header("authorization", harness.user_auth_header())
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["preview"], false);
    assert_eq!(body["content"], "Post content\n\nThe rest of the story.");
}

#[tokio::test]
async fn cancelled_subscriber_gets_preview() {
    let (harness, _mock) = harness_with_content().await;
    seed_subscription(&harness, false);

    let response = harness
        .server
        .get("/v1/posts/my-new-post")
        .add_header("authorization", harness.user_auth_header())
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["preview"], true);
}

#[tokio::test]
async fn unknown_post_is_not_found() {
    let (harness, _mock) = harness_with_content().await;

    let response = harness.server.get("/v1/posts/missing-post").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn posts_unavailable_without_content_api() {
    let harness = TestHarness::new();

    let response = harness.server.get("/v1/posts").await;
    response.assert_status(StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn subscribe_requires_a_session() {
    let harness = TestHarness::new();

    let response = harness.server.post("/v1/subscribe").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn subscribe_with_garbage_token_is_rejected() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/subscribe")
        .add_header("authorization", "Bearer not-a-jwt")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
