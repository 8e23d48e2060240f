//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Account records, keyed by `user_id`.
    pub const ACCOUNTS: &str = "accounts";

    /// Subscription records, keyed by `customer_id`.
    pub const SUBSCRIPTIONS: &str = "subscriptions";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::ACCOUNTS, cf::SUBSCRIPTIONS]
}
