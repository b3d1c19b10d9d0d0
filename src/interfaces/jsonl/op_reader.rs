use crate::domain::account::CustomerProfile;
use crate::domain::order::OrderStatus;
use crate::domain::{AccountId, OrderId};
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::{BufRead, BufReader, Read};

/// One replayable ledger operation, externally tagged by `op`.
///
/// Every record carries the transport-asserted `caller`; `create_order`
/// additionally carries the deposit attached to the call.
#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OpRecord {
    RegisterAdmin {
        caller: AccountId,
        admin_id: AccountId,
    },
    RegisterCustomer {
        caller: AccountId,
        profile: CustomerProfile,
    },
    UpdateCustomer {
        caller: AccountId,
        profile: CustomerProfile,
    },
    CreateOrder {
        caller: AccountId,
        id: OrderId,
        description: String,
        weight_in_grams: u32,
        attached: Decimal,
    },
    UpdateOrderStatus {
        caller: AccountId,
        order_id: OrderId,
        status: OrderStatus,
    },
    SubmitFeedback {
        caller: AccountId,
        order_id: OrderId,
        rating: u8,
        #[serde(default)]
        comment: String,
    },
}

/// Reads operations from a JSON-lines source.
///
/// This reader wraps any `Read` source and provides an iterator over
/// `Result<OpRecord>`, skipping blank lines so journals can be grouped
/// visually.
pub struct OpReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> OpReader<R> {
    /// Creates a new `OpReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
        }
    }

    /// Returns an iterator that lazily reads and deserializes operations.
    ///
    /// This allows for processing large journals in a streaming fashion
    /// without loading the entire file into memory.
    pub fn ops(self) -> impl Iterator<Item = Result<OpRecord>> {
        self.reader.lines().filter_map(|line| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(serde_json::from_str(&line).map_err(LedgerError::from)),
            Err(e) => Some(Err(LedgerError::from(e))),
        })
    }
}
