//! Storage layer for inkgate.
//!
//! This crate provides persistent storage for accounts and subscription
//! records. Two backends implement the [`Store`] trait:
//!
//! - [`MemStore`]: in-memory, used by tests and as the non-durable default.
//! - `RocksStore`: `RocksDB` with column families (feature `rocksdb-backend`).
//!
//! # Example
//!
//! ```
//! use inkgate_core::{CustomerId, SubscriptionId};
//! use inkgate_store::{MemStore, Store};
//!
//! let store = MemStore::new();
//! let sub = SubscriptionId::new("sub_1").unwrap();
//! let cus = CustomerId::new("cus_1").unwrap();
//!
//! let record = store.reconcile_subscription(&sub, &cus, true).unwrap();
//! assert!(record.active);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;
#[cfg(feature = "rocksdb-backend")]
pub mod keys;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
#[cfg(feature = "rocksdb-backend")]
pub mod schema;

pub use error::{Result, StoreError};
pub use memory::MemStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;

use inkgate_core::{Account, CustomerId, SubscriptionId, SubscriptionRecord, UserId};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (`RocksDB` for deployment, in-memory for testing).
pub trait Store: Send + Sync {
    // =========================================================================
    // Account Operations
    // =========================================================================

    /// Insert or update an account record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_account(&self, account: &Account) -> Result<()>;

    /// Get an account by user ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_account(&self, user_id: &UserId) -> Result<Option<Account>>;

    // =========================================================================
    // Subscription Operations
    // =========================================================================

    /// Upsert the subscription record for a customer.
    ///
    /// Keyed by `customer_id`, one record per customer, last write wins.
    /// Idempotent: a call carrying the same subscription id and status as the
    /// stored record leaves the record byte-for-byte unchanged. Records are
    /// never deleted; cancellation arrives as `active = false`.
    ///
    /// Returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn reconcile_subscription(
        &self,
        subscription_id: &SubscriptionId,
        customer_id: &CustomerId,
        active: bool,
    ) -> Result<SubscriptionRecord>;

    /// Get the subscription record for a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_subscription_by_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Option<SubscriptionRecord>>;
}
