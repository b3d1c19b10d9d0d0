use rust_decimal::Decimal;
use washkart::application::context::CallContext;
use washkart::application::engine::LedgerEngine;
use washkart::domain::account::CustomerProfile;
use washkart::domain::order::Amount;
use washkart::infrastructure::in_memory::{
    InMemoryAdminStore, InMemoryCustomerStore, InMemoryOrderStore, RecordingTreasury,
};

pub const OWNER: &str = "washkart.near";
pub const ADMIN: &str = "millefolium.testnet";
pub const CUSTOMER: &str = "envoy.testnet";

pub fn engine() -> (LedgerEngine, RecordingTreasury) {
    let treasury = RecordingTreasury::new();
    let engine = LedgerEngine::new(
        OWNER,
        Box::new(InMemoryAdminStore::new()),
        Box::new(InMemoryCustomerStore::new()),
        Box::new(InMemoryOrderStore::new()),
        Box::new(treasury.clone()),
    );
    (engine, treasury)
}

pub fn profile() -> CustomerProfile {
    CustomerProfile {
        name: "envoy".to_string(),
        full_address: "369, wall street".to_string(),
        landmark: "city center".to_string(),
        map_code_address: None,
        phone: "9999999999".to_string(),
        email: String::new(),
    }
}

pub fn amount(value: Decimal) -> Amount {
    Amount::new(value).unwrap()
}

/// Registers the default admin and customer.
pub async fn seed(engine: &LedgerEngine) {
    engine
        .register_admin(&CallContext::new(OWNER, 1), ADMIN)
        .await
        .unwrap();
    engine
        .register_customer(&CallContext::new(CUSTOMER, 2), profile())
        .await
        .unwrap();
}
