use crate::domain::AccountId;
use crate::domain::account::{Admin, Customer};
use crate::domain::order::{Amount, Order};
use crate::domain::ports::{AdminStore, CustomerStore, OrderStore, Treasury};
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for admin records.
///
/// Uses `Arc<RwLock<HashMap>>` to allow shared concurrent access. Ideal for
/// testing or replay runs where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryAdminStore {
    admins: Arc<RwLock<HashMap<AccountId, Admin>>>,
}

impl InMemoryAdminStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdminStore for InMemoryAdminStore {
    async fn store(&self, admin: Admin) -> Result<()> {
        let mut admins = self.admins.write().await;
        admins.insert(admin.id.clone(), admin);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Admin>> {
        let admins = self.admins.read().await;
        Ok(admins.get(id).cloned())
    }

    async fn contains(&self, id: &str) -> Result<bool> {
        let admins = self.admins.read().await;
        Ok(admins.contains_key(id))
    }

    async fn ids(&self) -> Result<Vec<AccountId>> {
        let admins = self.admins.read().await;
        Ok(admins.keys().cloned().collect())
    }
}

/// A thread-safe in-memory store for customer records.
#[derive(Default, Clone)]
pub struct InMemoryCustomerStore {
    customers: Arc<RwLock<HashMap<AccountId, Customer>>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn store(&self, customer: Customer) -> Result<()> {
        let mut customers = self.customers.write().await;
        customers.insert(customer.id.clone(), customer);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.get(id).cloned())
    }

    async fn contains(&self, id: &str) -> Result<bool> {
        let customers = self.customers.read().await;
        Ok(customers.contains_key(id))
    }

    async fn get_all(&self) -> Result<Vec<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.values().cloned().collect())
    }
}

/// A thread-safe in-memory store for orders.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<String, Order>>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn store(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id.clone(), order);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(id).cloned())
    }

    async fn contains(&self, id: &str) -> Result<bool> {
        let orders = self.orders.read().await;
        Ok(orders.contains_key(id))
    }

    async fn get_all(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.values().cloned().collect())
    }
}

/// A transfer capability that records every transfer instead of moving real
/// funds. `Clone` shares the underlying log, so a caller can keep a handle
/// while the engine owns the boxed port.
#[derive(Default, Clone)]
pub struct RecordingTreasury {
    transfers: Arc<RwLock<Vec<(AccountId, Amount)>>>,
    fail_next: Arc<RwLock<bool>>,
}

impl RecordingTreasury {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything transferred so far, in call order.
    pub async fn transfers(&self) -> Vec<(AccountId, Amount)> {
        self.transfers.read().await.clone()
    }

    /// Makes the next transfer fail, to exercise the abort path.
    pub async fn fail_next(&self) {
        *self.fail_next.write().await = true;
    }
}

#[async_trait]
impl Treasury for RecordingTreasury {
    async fn transfer(&self, to: &str, amount: Amount) -> Result<()> {
        let mut fail_next = self.fail_next.write().await;
        if *fail_next {
            *fail_next = false;
            return Err(LedgerError::Transfer(format!(
                "transfer of {amount} to {to} rejected by host"
            )));
        }
        drop(fail_next);

        let mut transfers = self.transfers.write().await;
        transfers.push((to.to_string(), amount));
        Ok(())
    }
}
