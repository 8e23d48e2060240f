//! Account types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CustomerId, UserId};

/// An account linking one of our users to a payment-provider customer.
///
/// Accounts are created lazily on the first subscribe request. The
/// `stripe_customer_id` is filled in once the provider-side customer exists;
/// subscription state itself lives in [`crate::SubscriptionRecord`], keyed by
/// that customer id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// The user ID (from the session token).
    pub user_id: UserId,

    /// Email address, if known. Passed to the provider when the customer is
    /// created so receipts reach the user.
    pub email: Option<String>,

    /// Stripe customer ID for checkout and subscription lookups.
    pub stripe_customer_id: Option<CustomerId>,

    /// When the account was created.
    pub created_at: DateTime<Utc>,

    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with no provider customer yet.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            email: None,
            stripe_customer_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the provider customer id, bumping `updated_at`.
    pub fn link_customer(&mut self, customer_id: CustomerId) {
        self.stripe_customer_id = Some(customer_id);
        self.updated_at = Utc::now();
    }
}
