//! In-memory storage implementation.
//!
//! Used by tests and as the default backend when the `rocksdb-backend`
//! feature is disabled. Data does not survive a restart.

use std::collections::HashMap;
use std::sync::RwLock;

use inkgate_core::{Account, CustomerId, SubscriptionId, SubscriptionRecord, UserId};

use crate::error::{Result, StoreError};
use crate::Store;

/// In-memory implementation of the [`Store`] trait.
#[derive(Debug, Default)]
pub struct MemStore {
    accounts: RwLock<HashMap<UserId, Account>>,
    subscriptions: RwLock<HashMap<CustomerId, SubscriptionRecord>>,
}

impl MemStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(_: impl std::error::Error) -> StoreError {
    StoreError::Database("lock poisoned".into())
}

impl Store for MemStore {
    fn put_account(&self, account: &Account) -> Result<()> {
        self.accounts
            .write()
            .map_err(poisoned)?
            .insert(account.user_id, account.clone());
        Ok(())
    }

    fn get_account(&self, user_id: &UserId) -> Result<Option<Account>> {
        Ok(self
            .accounts
            .read()
            .map_err(poisoned)?
            .get(user_id)
            .cloned())
    }

    fn reconcile_subscription(
        &self,
        subscription_id: &SubscriptionId,
        customer_id: &CustomerId,
        active: bool,
    ) -> Result<SubscriptionRecord> {
        let mut subscriptions = self.subscriptions.write().map_err(poisoned)?;

        let record = match subscriptions.get_mut(customer_id) {
            Some(existing) => {
                if existing.differs_from(subscription_id, active) {
                    existing.apply(subscription_id.clone(), active);
                }
                existing.clone()
            }
            None => {
                let record =
                    SubscriptionRecord::new(subscription_id.clone(), customer_id.clone(), active);
                subscriptions.insert(customer_id.clone(), record.clone());
                record
            }
        };

        Ok(record)
    }

    fn get_subscription_by_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Option<SubscriptionRecord>> {
        Ok(self
            .subscriptions
            .read()
            .map_err(poisoned)?
            .get(customer_id)
            .cloned())
    }
}
