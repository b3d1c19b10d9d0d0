use crate::domain::AccountId;
use crate::domain::account::{Admin, Customer};
use crate::domain::ports::{AdminStore, CustomerStore, OrderStore};
use crate::domain::order::Order;
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

/// Column Family for admin records.
pub const CF_ADMINS: &str = "admins";
/// Column Family for customer records.
pub const CF_CUSTOMERS: &str = "customers";
/// Column Family for orders.
pub const CF_ORDERS: &str = "orders";

/// A persistent store implementation using RocksDB.
///
/// Handles storage for all three ledger collections using separate Column
/// Families, with JSON-encoded values keyed by the record identifier.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbStore {
    db: Arc<DB>,
}

impl RocksDbStore {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// the three ledger column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cfs = vec![
            ColumnFamilyDescriptor::new(CF_ADMINS, Options::default()),
            ColumnFamilyDescriptor::new(CF_CUSTOMERS, Options::default()),
            ColumnFamilyDescriptor::new(CF_ORDERS, Options::default()),
        ];

        let db = DB::open_cf_descriptors(&opts, path, cfs)?;

        Ok(Self { db: Arc::new(db) })
    }

    fn put<T: Serialize>(&self, cf_name: &str, key: &str, value: &T) -> Result<()> {
        let cf = self.cf_handle(cf_name)?;
        let bytes = serde_json::to_vec(value)?;
        self.db.put_cf(&cf, key.as_bytes(), bytes)?;
        Ok(())
    }

    fn fetch<T: DeserializeOwned>(&self, cf_name: &str, key: &str) -> Result<Option<T>> {
        let cf = self.cf_handle(cf_name)?;
        match self.db.get_cf(&cf, key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn exists(&self, cf_name: &str, key: &str) -> Result<bool> {
        let cf = self.cf_handle(cf_name)?;
        // Just check if the key exists without copying the value out.
        Ok(self.db.get_pinned_cf(&cf, key.as_bytes())?.is_some())
    }

    fn scan<T: DeserializeOwned>(&self, cf_name: &str) -> Result<Vec<T>> {
        let cf = self.cf_handle(cf_name)?;
        let mut records = Vec::new();
        for item in self.db.iterator_cf(&cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            records.push(serde_json::from_slice(&value)?);
        }
        Ok(records)
    }

    fn cf_handle(&self, cf_name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(cf_name).ok_or_else(|| {
            LedgerError::Internal(Box::new(std::io::Error::other(format!(
                "{cf_name} column family not found"
            ))))
        })
    }
}

#[async_trait]
impl AdminStore for RocksDbStore {
    async fn store(&self, admin: Admin) -> Result<()> {
        self.put(CF_ADMINS, &admin.id, &admin)
    }

    async fn get(&self, id: &str) -> Result<Option<Admin>> {
        self.fetch(CF_ADMINS, id)
    }

    async fn contains(&self, id: &str) -> Result<bool> {
        self.exists(CF_ADMINS, id)
    }

    async fn ids(&self) -> Result<Vec<AccountId>> {
        let admins: Vec<Admin> = self.scan(CF_ADMINS)?;
        Ok(admins.into_iter().map(|admin| admin.id).collect())
    }
}

#[async_trait]
impl CustomerStore for RocksDbStore {
    async fn store(&self, customer: Customer) -> Result<()> {
        self.put(CF_CUSTOMERS, &customer.id, &customer)
    }

    async fn get(&self, id: &str) -> Result<Option<Customer>> {
        self.fetch(CF_CUSTOMERS, id)
    }

    async fn contains(&self, id: &str) -> Result<bool> {
        self.exists(CF_CUSTOMERS, id)
    }

    async fn get_all(&self) -> Result<Vec<Customer>> {
        self.scan(CF_CUSTOMERS)
    }
}

#[async_trait]
impl OrderStore for RocksDbStore {
    async fn store(&self, order: Order) -> Result<()> {
        self.put(CF_ORDERS, &order.id, &order)
    }

    async fn get(&self, id: &str) -> Result<Option<Order>> {
        self.fetch(CF_ORDERS, id)
    }

    async fn contains(&self, id: &str) -> Result<bool> {
        self.exists(CF_ORDERS, id)
    }

    async fn get_all(&self) -> Result<Vec<Order>> {
        self.scan(CF_ORDERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::CustomerProfile;
    use crate::domain::order::Amount;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_rocksdb_open_creates_column_families() {
        let dir = tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).expect("Failed to open RocksDB");

        assert!(store.db.cf_handle(CF_ADMINS).is_some());
        assert!(store.db.cf_handle(CF_CUSTOMERS).is_some());
        assert!(store.db.cf_handle(CF_ORDERS).is_some());
    }

    #[tokio::test]
    async fn test_rocksdb_round_trips_each_collection() {
        let dir = tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).unwrap();

        let admin = Admin::new("millefolium.testnet".to_string(), 1);
        AdminStore::store(&store, admin.clone()).await.unwrap();
        assert_eq!(
            AdminStore::get(&store, "millefolium.testnet").await.unwrap(),
            Some(admin)
        );
        assert_eq!(store.ids().await.unwrap(), vec!["millefolium.testnet"]);

        let customer = Customer::new(
            "envoy.testnet".to_string(),
            CustomerProfile {
                name: "envoy".to_string(),
                full_address: "369, wall street".to_string(),
                landmark: String::new(),
                map_code_address: None,
                phone: "9999999999".to_string(),
                email: String::new(),
            },
            1,
        );
        CustomerStore::store(&store, customer.clone()).await.unwrap();
        assert_eq!(
            CustomerStore::get(&store, "envoy.testnet").await.unwrap(),
            Some(customer)
        );
        assert!(!CustomerStore::contains(&store, "stranger.testnet")
            .await
            .unwrap());

        let order = Order::new(
            "order-0001".to_string(),
            "envoy.testnet".to_string(),
            "simple order".to_string(),
            2000,
            Amount::new(dec!(3)).unwrap(),
            1,
        );
        OrderStore::store(&store, order.clone()).await.unwrap();
        assert_eq!(
            OrderStore::get(&store, "order-0001").await.unwrap(),
            Some(order)
        );
        assert_eq!(OrderStore::get_all(&store).await.unwrap().len(), 1);
    }
}
