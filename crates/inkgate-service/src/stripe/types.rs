//! Stripe API response types (simplified to the fields we read).

use serde::Deserialize;

/// A Stripe customer.
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    /// Customer ID (`cus_…`).
    pub id: String,
    /// Email address, if set.
    #[serde(default)]
    pub email: Option<String>,
    /// Display name, if set.
    #[serde(default)]
    pub name: Option<String>,
}

/// A Stripe Checkout session.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    /// Session ID (`cs_…`).
    pub id: String,
    /// Hosted checkout URL to redirect the user to.
    #[serde(default)]
    pub url: Option<String>,
    /// Session status.
    #[serde(default)]
    pub status: Option<String>,
}

/// Error envelope returned by the Stripe API.
#[derive(Debug, Deserialize)]
pub struct StripeErrorResponse {
    /// The error payload.
    pub error: StripeApiError,
}

/// Error payload returned by the Stripe API.
#[derive(Debug, Deserialize)]
pub struct StripeApiError {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Machine-readable code.
    #[serde(default)]
    pub code: Option<String>,
}
