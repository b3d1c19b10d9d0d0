use crate::domain::{AccountId, OrderId, Timestamp};
use crate::error::LedgerError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a positive monetary value in NEAR.
///
/// This is a wrapper around `rust_decimal::Decimal` to enforce domain-specific
/// rules and provide type safety for the escrow arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, LedgerError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(LedgerError::Validation(
                "amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = LedgerError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Absolute floor for any order, regardless of weight.
pub const MINIMUM_ORDER_PRICE: Decimal = dec!(3);

/// Accepted order weight range, in grams.
pub const MIN_ORDER_WEIGHT_GRAMS: u32 = 1_000;
pub const MAX_ORDER_WEIGHT_GRAMS: u32 = 10_000;

/// Price-by-weight bands. The attached deposit must meet the band minimum;
/// any excess is accepted and becomes the order price in full.
pub fn minimum_price_for_weight(weight_in_grams: u32) -> Decimal {
    if weight_in_grams <= 3_000 {
        dec!(3)
    } else if weight_in_grams <= 7_000 {
        dec!(7)
    } else {
        dec!(10)
    }
}

/// Payment modes the service accepts. Orders are prepaid into escrow; the
/// single variant is kept as a tagged type so the wire format stays explicit.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    #[default]
    Prepaid,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Confirmed,
    InProgress,
    Delivered,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Confirmed => "confirmed",
            Self::InProgress => "in-progress",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{label}")
    }
}

/// Customer rating for a delivered order.
///
/// The transport layer submits the original numeric wire codes (1..=6);
/// `from_code` is the only place that mapping lives.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackRating {
    #[default]
    None,
    Excellent,
    Good,
    Average,
    Bad,
    VeryBad,
}

impl FeedbackRating {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::None),
            2 => Some(Self::Excellent),
            3 => Some(Self::Good),
            4 => Some(Self::Average),
            5 => Some(Self::Bad),
            6 => Some(Self::VeryBad),
            _ => None,
        }
    }
}

impl fmt::Display for FeedbackRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::None => "none",
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Average => "average",
            Self::Bad => "bad",
            Self::VeryBad => "very-bad",
        };
        write!(f, "{label}")
    }
}

/// Monetary effect a status transition produces once it is allowed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TransitionEffect {
    /// No funds move (`Confirmed -> InProgress`).
    None,
    /// Release the escrowed price to the operating admin (delivery).
    PayOperator,
    /// Return the escrowed price to the owning customer (cancellation).
    RefundCustomer,
}

/// A wash order, owned by exactly one customer.
///
/// `price` is the full deposit attached at creation and never changes; it is
/// the amount later released to the operator or refunded to the customer.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: AccountId,
    pub description: String,
    pub weight_in_grams: u32,
    pub price: Amount,
    pub payment_type: PaymentType,
    pub status: OrderStatus,
    pub feedback: FeedbackRating,
    pub feedback_comment: String,
    pub pickup_at: Timestamp,
    pub delivered_at: Option<Timestamp>,
}

impl Order {
    pub fn new(
        id: OrderId,
        customer_id: AccountId,
        description: String,
        weight_in_grams: u32,
        price: Amount,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            customer_id,
            description,
            weight_in_grams,
            price,
            payment_type: PaymentType::Prepaid,
            status: OrderStatus::Confirmed,
            feedback: FeedbackRating::None,
            feedback_comment: String::new(),
            pickup_at: now,
            delivered_at: None,
        }
    }

    /// The authoritative transition table.
    ///
    /// Returns the monetary effect the transition requires, or a `Conflict`
    /// when the move is not allowed. Requesting the current state again is
    /// always rejected, never treated as a no-op.
    pub fn plan_transition(&self, requested: OrderStatus) -> Result<TransitionEffect, LedgerError> {
        use OrderStatus::*;

        if requested == self.status {
            return Err(LedgerError::Conflict(format!(
                "order {} already {}",
                self.id, self.status
            )));
        }

        match (self.status, requested) {
            (Confirmed, InProgress) => Ok(TransitionEffect::None),
            (InProgress, Delivered) => Ok(TransitionEffect::PayOperator),
            (Confirmed | InProgress, Cancelled) => Ok(TransitionEffect::RefundCustomer),
            (current, requested) => Err(LedgerError::Conflict(format!(
                "invalid status transition from {current} to {requested} for order {}",
                self.id
            ))),
        }
    }

    /// Commits an already-planned transition. Only called after the planned
    /// monetary effect has been executed.
    pub fn apply_transition(&mut self, requested: OrderStatus, now: Timestamp) {
        self.status = requested;
        if requested == OrderStatus::Delivered {
            self.delivered_at = Some(now);
        }
    }

    /// Overwrites rating and comment; resubmission replaces prior values.
    pub fn record_feedback(&mut self, rating: FeedbackRating, comment: String) {
        self.feedback = rating;
        self.feedback_comment = comment;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(status: OrderStatus) -> Order {
        let mut order = Order::new(
            "order-0001".to_string(),
            "envoy.testnet".to_string(),
            "simple order".to_string(),
            2000,
            Amount::new(dec!(3)).unwrap(),
            100,
        );
        order.status = status;
        order
    }

    #[test]
    fn test_amount_rejects_non_positive() {
        assert!(Amount::new(dec!(1)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0)),
            Err(LedgerError::Validation(_))
        ));
        assert!(matches!(
            Amount::new(dec!(-1)),
            Err(LedgerError::Validation(_))
        ));
    }

    #[test]
    fn test_price_bands() {
        assert_eq!(minimum_price_for_weight(1000), dec!(3));
        assert_eq!(minimum_price_for_weight(3000), dec!(3));
        assert_eq!(minimum_price_for_weight(3001), dec!(7));
        assert_eq!(minimum_price_for_weight(7000), dec!(7));
        assert_eq!(minimum_price_for_weight(7001), dec!(10));
        assert_eq!(minimum_price_for_weight(10_000), dec!(10));
    }

    #[test]
    fn test_feedback_rating_codes() {
        assert_eq!(FeedbackRating::from_code(1), Some(FeedbackRating::None));
        assert_eq!(FeedbackRating::from_code(3), Some(FeedbackRating::Good));
        assert_eq!(FeedbackRating::from_code(6), Some(FeedbackRating::VeryBad));
        assert_eq!(FeedbackRating::from_code(0), None);
        assert_eq!(FeedbackRating::from_code(7), None);
    }

    #[test]
    fn test_new_order_starts_confirmed() {
        let order = order(OrderStatus::Confirmed);
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.payment_type, PaymentType::Prepaid);
        assert_eq!(order.feedback, FeedbackRating::None);
        assert_eq!(order.pickup_at, 100);
        assert_eq!(order.delivered_at, None);
    }

    #[test]
    fn test_transition_same_state_conflicts() {
        for status in [
            OrderStatus::Confirmed,
            OrderStatus::InProgress,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            let result = order(status).plan_transition(status);
            assert!(matches!(result, Err(LedgerError::Conflict(_))));
        }
    }

    #[test]
    fn test_transition_forward_path() {
        assert_eq!(
            order(OrderStatus::Confirmed)
                .plan_transition(OrderStatus::InProgress)
                .unwrap(),
            TransitionEffect::None
        );
        assert_eq!(
            order(OrderStatus::InProgress)
                .plan_transition(OrderStatus::Delivered)
                .unwrap(),
            TransitionEffect::PayOperator
        );
    }

    #[test]
    fn test_transition_cancellation_refunds() {
        assert_eq!(
            order(OrderStatus::Confirmed)
                .plan_transition(OrderStatus::Cancelled)
                .unwrap(),
            TransitionEffect::RefundCustomer
        );
        assert_eq!(
            order(OrderStatus::InProgress)
                .plan_transition(OrderStatus::Cancelled)
                .unwrap(),
            TransitionEffect::RefundCustomer
        );
    }

    #[test]
    fn test_transition_rejects_skips_and_backwards_moves() {
        let skip = order(OrderStatus::Confirmed).plan_transition(OrderStatus::Delivered);
        assert!(matches!(skip, Err(LedgerError::Conflict(_))));

        let backwards = order(OrderStatus::Delivered).plan_transition(OrderStatus::InProgress);
        assert!(matches!(backwards, Err(LedgerError::Conflict(_))));

        let cancel_delivered = order(OrderStatus::Delivered).plan_transition(OrderStatus::Cancelled);
        assert!(matches!(cancel_delivered, Err(LedgerError::Conflict(_))));

        let revive = order(OrderStatus::Cancelled).plan_transition(OrderStatus::InProgress);
        assert!(matches!(revive, Err(LedgerError::Conflict(_))));
    }

    #[test]
    fn test_apply_transition_stamps_delivery_time() {
        let mut order = order(OrderStatus::InProgress);
        order.apply_transition(OrderStatus::Delivered, 500);
        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.delivered_at, Some(500));

        let mut cancelled = self::order(OrderStatus::Confirmed);
        cancelled.apply_transition(OrderStatus::Cancelled, 500);
        assert_eq!(cancelled.delivered_at, None);
    }

    #[test]
    fn test_record_feedback_replaces_prior_values() {
        let mut order = order(OrderStatus::Delivered);
        order.record_feedback(FeedbackRating::Good, "good service".to_string());
        order.record_feedback(FeedbackRating::Average, "late by a day".to_string());

        assert_eq!(order.feedback, FeedbackRating::Average);
        assert_eq!(order.feedback_comment, "late by a day");
    }
}
