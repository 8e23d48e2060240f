//! Stripe API client implementation.

use reqwest::Client;
use std::time::Duration;

use super::types::{CheckoutSession, Customer, StripeErrorResponse};

/// Error type for Stripe operations.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe API returned an error.
    #[error("Stripe API error: {error_type} - {message}")]
    Api {
        /// Error type.
        error_type: String,
        /// Error message.
        message: String,
        /// Error code.
        code: Option<String>,
    },
}

/// Stripe API client.
///
/// Covers the two calls the subscribe flow needs: customer creation and
/// subscription-mode checkout sessions.
#[derive(Debug, Clone)]
pub struct StripeClient {
    client: Client,
    api_key: String,
}

impl StripeClient {
    /// Stripe API base URL.
    const BASE_URL: &'static str = "https://api.stripe.com/v1";

    /// Create a new Stripe client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Stripe secret API key (`sk_test_...` or `sk_live_...`)
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key: api_key.into(),
        }
    }

    /// Create a new Stripe customer.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Our internal user ID (stored as metadata)
    /// * `email` - Optional customer email
    pub async fn create_customer(
        &self,
        user_id: &str,
        email: Option<&str>,
    ) -> Result<Customer, StripeError> {
        let mut params = vec![("metadata[user_id]", user_id.to_string())];

        if let Some(email) = email {
            params.push(("email", email.to_string()));
        }

        let response = self
            .client
            .post(format!("{}/customers", Self::BASE_URL))
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Create a subscription-mode Checkout session for a customer.
    ///
    /// # Arguments
    ///
    /// * `customer_id` - Stripe customer ID
    /// * `price_id` - The recurring price to subscribe to
    /// * `success_url` - URL to redirect on success
    /// * `cancel_url` - URL to redirect on cancel
    pub async fn create_subscription_checkout(
        &self,
        customer_id: &str,
        price_id: &str,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, StripeError> {
        let params = vec![
            ("mode", "subscription".to_string()),
            ("customer", customer_id.to_string()),
            ("success_url", success_url.to_string()),
            ("cancel_url", cancel_url.to_string()),
            ("line_items[0][price]", price_id.to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            ("allow_promotion_codes", "true".to_string()),
        ];

        tracing::debug!(
            customer_id = %customer_id,
            price_id = %price_id,
            "Creating Stripe subscription checkout session"
        );

        let response = self
            .client
            .post(format!("{}/checkout/sessions", Self::BASE_URL))
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, StripeError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let error_body: Result<StripeErrorResponse, _> = response.json().await;

        match error_body {
            Ok(stripe_error) => Err(StripeError::Api {
                error_type: stripe_error.error.error_type,
                message: stripe_error.error.message,
                code: stripe_error.error.code,
            }),
            Err(_) => Err(StripeError::Api {
                error_type: "unknown".to_string(),
                message: format!("HTTP {status}"),
                code: None,
            }),
        }
    }
}
