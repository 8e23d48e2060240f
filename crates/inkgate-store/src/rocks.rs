//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, MultiThreaded, Options,
};

use inkgate_core::{Account, CustomerId, SubscriptionId, SubscriptionRecord, UserId};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl Store for RocksStore {
    fn put_account(&self, account: &Account) -> Result<()> {
        let cf = self.cf(cf::ACCOUNTS)?;
        let key = keys::account_key(&account.user_id);
        let value = Self::serialize(account)?;

        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_account(&self, user_id: &UserId) -> Result<Option<Account>> {
        let cf = self.cf(cf::ACCOUNTS)?;
        let key = keys::account_key(user_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn reconcile_subscription(
        &self,
        subscription_id: &SubscriptionId,
        customer_id: &CustomerId,
        active: bool,
    ) -> Result<SubscriptionRecord> {
        let cf = self.cf(cf::SUBSCRIPTIONS)?;
        let key = keys::subscription_key(customer_id);

        let existing: Option<SubscriptionRecord> = self
            .db
            .get_cf(&cf, &key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()?;

        let record = match existing {
            Some(mut record) => {
                if !record.differs_from(subscription_id, active) {
                    return Ok(record);
                }
                record.apply(subscription_id.clone(), active);
                record
            }
            None => SubscriptionRecord::new(subscription_id.clone(), customer_id.clone(), active),
        };

        let value = Self::serialize(&record)?;
        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(record)
    }

    fn get_subscription_by_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Option<SubscriptionRecord>> {
        let cf = self.cf(cf::SUBSCRIPTIONS)?;
        let key = keys::subscription_key(customer_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let store = RocksStore::open(dir.path()).expect("open store");
        (store, dir)
    }

    #[test]
    fn subscription_roundtrip_survives_reopen() {
        let dir = TempDir::new().expect("temp dir");
        let sub = SubscriptionId::new("sub_1").unwrap();
        let cus = CustomerId::new("cus_1").unwrap();

        let record = {
            let store = RocksStore::open(dir.path()).expect("open store");
            store.reconcile_subscription(&sub, &cus, true).unwrap()
        };

        let store = RocksStore::open(dir.path()).expect("reopen store");
        let fetched = store.get_subscription_by_customer(&cus).unwrap().unwrap();
        assert_eq!(fetched, record);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let (store, _dir) = open_store();
        let sub = SubscriptionId::new("sub_1").unwrap();
        let cus = CustomerId::new("cus_1").unwrap();

        let first = store.reconcile_subscription(&sub, &cus, true).unwrap();
        let second = store.reconcile_subscription(&sub, &cus, true).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn reconcile_flips_active_in_place() {
        let (store, _dir) = open_store();
        let sub = SubscriptionId::new("sub_1").unwrap();
        let cus = CustomerId::new("cus_1").unwrap();

        let created = store.reconcile_subscription(&sub, &cus, true).unwrap();
        let cancelled = store.reconcile_subscription(&sub, &cus, false).unwrap();

        assert!(!cancelled.active);
        assert_eq!(cancelled.created_at, created.created_at);
    }

    #[test]
    fn account_roundtrip() {
        let (store, _dir) = open_store();
        let mut account = Account::new(UserId::generate());
        account.email = Some("reader@example.com".into());

        store.put_account(&account).unwrap();
        let fetched = store.get_account(&account.user_id).unwrap().unwrap();
        assert_eq!(fetched.email.as_deref(), Some("reader@example.com"));
    }
}
