//! Stateless predicate checks applied before any mutation.
//!
//! Every check returns pass/fail plus a human-readable reason; callers
//! translate a failure into the appropriate `LedgerError` kind. Creation and
//! update paths share these so no state is reachable by one path but not the
//! other.

use crate::domain::order::{
    FeedbackRating, MAX_ORDER_WEIGHT_GRAMS, MIN_ORDER_WEIGHT_GRAMS,
};
use rust_decimal::Decimal;

/// Minimum lengths, exclusive (a value passes when it is strictly longer).
pub const ACCOUNT_ID_MIN_LEN: usize = 5;
pub const ORDER_ID_MIN_LEN: usize = 5;
pub const NAME_MIN_LEN: usize = 2;
pub const ADDRESS_MIN_LEN: usize = 5;
pub const PHONE_MIN_LEN: usize = 7;

pub fn longer_than(label: &str, value: &str, min: usize) -> Result<(), String> {
    if value.len() > min {
        Ok(())
    } else {
        Err(format!("{label} must be longer than {min} characters"))
    }
}

pub fn at_least(label: &str, value: Decimal, minimum: Decimal) -> Result<(), String> {
    if value >= minimum {
        Ok(())
    } else {
        Err(format!("{label} must be at least {minimum}"))
    }
}

pub fn weight_within_bounds(weight_in_grams: u32) -> Result<(), String> {
    if (MIN_ORDER_WEIGHT_GRAMS..=MAX_ORDER_WEIGHT_GRAMS).contains(&weight_in_grams) {
        Ok(())
    } else {
        Err(format!(
            "weight must be between {MIN_ORDER_WEIGHT_GRAMS} and {MAX_ORDER_WEIGHT_GRAMS} grams"
        ))
    }
}

/// Enum-membership check for the numeric feedback wire codes.
pub fn feedback_rating(code: u8) -> Result<FeedbackRating, String> {
    FeedbackRating::from_code(code)
        .ok_or_else(|| format!("feedback rating code {code} is not one of 1..=6"))
}
