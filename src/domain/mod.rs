//! Domain model: entities, value objects, validation predicates and the
//! ports the application layer depends on.

pub mod account;
pub mod order;
pub mod ports;
pub mod validation;

/// Opaque identifier of a caller account (customer, admin or the ledger itself).
pub type AccountId = String;

/// Caller-supplied order identifier.
pub type OrderId = String;

/// Milliseconds since the Unix epoch, as asserted by the transport layer.
pub type Timestamp = u64;
