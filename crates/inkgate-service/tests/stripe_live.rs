//! Stripe integration tests using real API calls.
//!
//! These tests require valid Stripe test-mode credentials via the
//! `STRIPE_API_KEY_TEST` (or `STRIPE_API_KEY`) environment variable.
//!
//! Run with: `cargo test --test stripe_live -- --ignored --nocapture`
//!
//! Note: these use Stripe's test mode; no real charges are made.

use inkgate_service::StripeClient;

fn api_key() -> Option<String> {
    std::env::var("STRIPE_API_KEY_TEST")
        .or_else(|_| std::env::var("STRIPE_API_KEY"))
        .ok()
}

#[tokio::test]
#[ignore = "requires Stripe API credentials"]
async fn create_customer_in_test_mode() {
    let api_key = api_key().expect("Stripe credentials not found");
    let client = StripeClient::new(api_key);

    let user_id = uuid::Uuid::new_v4().to_string();
    let email = format!("test-{user_id}@example.com");

    let customer = client
        .create_customer(&user_id, Some(&email))
        .await
        .expect("Failed to create customer");

    println!("Created Stripe customer: {}", customer.id);
    assert!(customer.id.starts_with("cus_"));
    assert_eq!(customer.email.as_deref(), Some(email.as_str()));
}

#[tokio::test]
#[ignore = "requires Stripe API credentials and a subscription price"]
async fn create_subscription_checkout_in_test_mode() {
    let api_key = api_key().expect("Stripe credentials not found");
    let price_id = std::env::var("STRIPE_PRICE_ID").expect("STRIPE_PRICE_ID not set");
    let client = StripeClient::new(api_key);

    let user_id = uuid::Uuid::new_v4().to_string();
    let customer = client
        .create_customer(&user_id, Some("checkout-test@example.com"))
        .await
        .expect("Failed to create customer");

    let session = client
        .create_subscription_checkout(
            &customer.id,
            &price_id,
            "http://localhost:3000/posts",
            "http://localhost:3000",
        )
        .await
        .expect("Failed to create checkout session");

    println!("Created checkout session: {}", session.id);
    println!("Checkout URL: {:?}", session.url);

    assert!(session.id.starts_with("cs_"));
    let url = session.url.expect("session has a URL");
    assert!(url.contains("checkout.stripe.com"));
}
