use crate::domain::AccountId;
use crate::domain::account::{Admin, Customer};
use crate::domain::order::{Amount, Order};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn store(&self, admin: Admin) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<Admin>>;
    async fn contains(&self, id: &str) -> Result<bool>;
    async fn ids(&self) -> Result<Vec<AccountId>>;
}

#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn store(&self, customer: Customer) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<Customer>>;
    async fn contains(&self, id: &str) -> Result<bool>;
    async fn get_all(&self) -> Result<Vec<Customer>>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn store(&self, order: Order) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<Order>>;
    async fn contains(&self, id: &str) -> Result<bool>;
    async fn get_all(&self) -> Result<Vec<Order>>;
}

/// The opaque "transfer value V to account A" capability.
///
/// The call either succeeds or the whole enclosing operation fails; the
/// engine never persists a status change whose transfer did not complete.
#[async_trait]
pub trait Treasury: Send + Sync {
    async fn transfer(&self, to: &str, amount: Amount) -> Result<()>;
}

pub type AdminStoreBox = Box<dyn AdminStore>;
pub type CustomerStoreBox = Box<dyn CustomerStore>;
pub type OrderStoreBox = Box<dyn OrderStore>;
pub type TreasuryBox = Box<dyn Treasury>;
