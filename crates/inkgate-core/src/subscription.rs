//! Subscription records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CustomerId, SubscriptionId};

/// A durable subscription record, one per customer.
///
/// Webhook events for the same customer overwrite this record (last write
/// wins); records are never deleted — a provider-side cancellation sets
/// `active` to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    /// The provider's subscription identifier.
    pub subscription_id: SubscriptionId,

    /// The provider's customer identifier. Storage key.
    pub customer_id: CustomerId,

    /// Whether the subscription is currently active.
    pub active: bool,

    /// When the record was first created.
    pub created_at: DateTime<Utc>,

    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

impl SubscriptionRecord {
    /// Create a new record with the current timestamp.
    #[must_use]
    pub fn new(subscription_id: SubscriptionId, customer_id: CustomerId, active: bool) -> Self {
        let now = Utc::now();
        Self {
            subscription_id,
            customer_id,
            active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether a reconcile call with these arguments would change the record.
    ///
    /// Reconciliation is idempotent: re-delivered events that carry the same
    /// subscription id and status leave the record untouched.
    #[must_use]
    pub fn differs_from(&self, subscription_id: &SubscriptionId, active: bool) -> bool {
        self.subscription_id != *subscription_id || self.active != active
    }

    /// Overwrite the mutable fields, preserving `created_at`.
    pub fn apply(&mut self, subscription_id: SubscriptionId, active: bool) {
        self.subscription_id = subscription_id;
        self.active = active;
        self.updated_at = Utc::now();
    }
}
