//! Key encoding utilities for `RocksDB`.

use inkgate_core::{CustomerId, UserId};

/// Create an account key from a user ID.
#[must_use]
pub fn account_key(user_id: &UserId) -> Vec<u8> {
    user_id.as_bytes().to_vec()
}

/// Create a subscription key from a customer ID.
///
/// Customer IDs are provider-issued opaque strings, so the key is the raw
/// UTF-8 bytes.
#[must_use]
pub fn subscription_key(customer_id: &CustomerId) -> Vec<u8> {
    customer_id.as_str().as_bytes().to_vec()
}
