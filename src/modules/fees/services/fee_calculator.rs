use crate::core::{AppError, Result};

/// Admin fee ceiling: R375 in cents.
pub const ADMIN_FEE_CEILING: i64 = 37_500;

/// Admin fee rate below the ceiling: 15% of monthly rent.
pub const ADMIN_FEE_PERCENT: i64 = 15;

/// Flat cancellation penalty: R300 in cents.
pub const CANCELLATION_PENALTY: i64 = 30_000;

/// FeeCalculator holds the marketplace fee rules. Pure arithmetic over
/// minor units, no I/O.
pub struct FeeCalculator;

impl FeeCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Admin fee for a lease: 15% of rent or R375, whichever is lower.
    /// Integer division floors the percentage.
    pub fn admin_fee(&self, rent_amount: i64) -> Result<i64> {
        if rent_amount < 0 {
            return Err(AppError::Validation(
                "Rent amount cannot be negative".to_string(),
            ));
        }

        let fifteen_percent = rent_amount
            .checked_mul(ADMIN_FEE_PERCENT)
            .ok_or_else(|| AppError::Validation("Rent amount is out of range".to_string()))?
            / 100;
        Ok(ADMIN_FEE_CEILING.min(fifteen_percent))
    }

    /// Penalty charged when a signed lease is cancelled.
    pub fn cancellation_penalty(&self) -> i64 {
        CANCELLATION_PENALTY
    }
}

impl Default for FeeCalculator {
    fn default() -> Self {
        Self::new()
    }
}
