//! All monetary amounts are carried as integer South African cents
//! (minor units) so no floating-point rounding can creep into totals.
//! Decimal appears only at the display boundary.

use crate::core::{AppError, Result};
use rust_decimal::Decimal;

/// Upper bound for a single monetary component: R100 million in cents.
/// Keeps sums of components and the fee percentage inside i64.
pub const MAX_AMOUNT: i64 = 10_000_000_000;

/// Formats an amount of cents as rands with two decimal places,
/// e.g. 150000 -> "R1500.00".
pub fn format_rands(minor_units: i64) -> String {
    format!("R{}", Decimal::new(minor_units, 2))
}

/// Rejects amounts outside `0..=MAX_AMOUNT` before they reach
/// persistence or hashing.
pub fn ensure_non_negative(label: &str, minor_units: i64) -> Result<()> {
    if minor_units < 0 {
        return Err(AppError::validation(format!(
            "{} must be non-negative, got {}",
            label, minor_units
        )));
    }
    ensure_within_limit(label, minor_units)
}

/// Rejects amounts outside `1..=MAX_AMOUNT`.
pub fn ensure_positive(label: &str, minor_units: i64) -> Result<()> {
    if minor_units <= 0 {
        return Err(AppError::validation(format!(
            "{} must be positive, got {}",
            label, minor_units
        )));
    }
    ensure_within_limit(label, minor_units)
}

fn ensure_within_limit(label: &str, minor_units: i64) -> Result<()> {
    if minor_units > MAX_AMOUNT {
        return Err(AppError::validation(format!(
            "{} exceeds the maximum supported amount",
            label
        )));
    }
    Ok(())
}
