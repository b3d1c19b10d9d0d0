use crate::domain::order::Amount;
use crate::domain::{AccountId, Timestamp};

/// Per-call environment asserted by the transport layer.
///
/// The engine never trusts a caller-supplied identity field over the one
/// carried here, and it reads the current time from here rather than from
/// the host clock, so a whole operation observes a single instant.
#[derive(Debug, Clone)]
pub struct CallContext {
    pub caller: AccountId,
    /// Deposit attached to the call, if any. Only order placement reads it.
    pub attached: Option<Amount>,
    pub now: Timestamp,
}

impl CallContext {
    pub fn new(caller: impl Into<AccountId>, now: Timestamp) -> Self {
        Self {
            caller: caller.into(),
            attached: None,
            now,
        }
    }

    pub fn with_attached(mut self, attached: Amount) -> Self {
        self.attached = Some(attached);
        self
    }
}
