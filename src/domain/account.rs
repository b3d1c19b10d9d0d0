use crate::domain::{AccountId, OrderId, Timestamp};
use serde::{Deserialize, Serialize};

/// Role attached to every directory record.
///
/// An account holds exactly one role for its whole lifetime; the engine
/// rejects registrations that would give an account both.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
}

/// An operator account, created only through the privileged registration
/// path (the ledger's own owning identity). Never deleted.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Admin {
    pub id: AccountId,
    pub role: Role,
    pub created: Timestamp,
    pub updated: Timestamp,
}

impl Admin {
    pub fn new(id: AccountId, now: Timestamp) -> Self {
        Self {
            id,
            role: Role::Admin,
            created: now,
            updated: now,
        }
    }
}

/// Mutable profile fields shared by customer registration and update.
///
/// Landmark, map code and email are optional conveniences for the pickup
/// crew; the validation layer only enforces name, address and phone.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct CustomerProfile {
    pub name: String,
    pub full_address: String,
    #[serde(default)]
    pub landmark: String,
    /// Precision-location code (e.g. a plus code) for doorstep pickup.
    #[serde(default)]
    pub map_code_address: Option<String>,
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// A registered customer.
///
/// `order_ids` is append-only: it grows as orders are placed and is never
/// rewritten, so it doubles as the per-customer order history index.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Customer {
    pub id: AccountId,
    pub name: String,
    pub full_address: String,
    pub landmark: String,
    pub map_code_address: Option<String>,
    pub phone: String,
    pub email: String,
    pub role: Role,
    pub order_ids: Vec<OrderId>,
    pub created: Timestamp,
    pub updated: Timestamp,
}

impl Customer {
    pub fn new(id: AccountId, profile: CustomerProfile, now: Timestamp) -> Self {
        Self {
            id,
            name: profile.name,
            full_address: profile.full_address,
            landmark: profile.landmark,
            map_code_address: profile.map_code_address,
            phone: profile.phone,
            email: profile.email,
            role: Role::Customer,
            order_ids: Vec::new(),
            created: now,
            updated: now,
        }
    }

    /// Replaces the mutable profile fields and bumps `updated`.
    pub fn apply_profile(&mut self, profile: CustomerProfile, now: Timestamp) {
        self.name = profile.name;
        self.full_address = profile.full_address;
        self.landmark = profile.landmark;
        self.map_code_address = profile.map_code_address;
        self.phone = profile.phone;
        self.email = profile.email;
        self.updated = now;
    }

    /// Appends a newly placed order to the customer's history.
    pub fn record_order(&mut self, order_id: OrderId, now: Timestamp) {
        self.order_ids.push(order_id);
        self.updated = now;
    }
}
