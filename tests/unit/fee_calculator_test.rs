// Admin fee and cancellation penalty rules
//
// - admin fee = min(R375, 15% of rent), floor division, integer cents
// - cancellation penalty fixed at R300
// - negative or out-of-range rent is rejected
//
// Uses proptest to validate fee bounds across many inputs

use proptest::prelude::*;
use yardpay::modules::fees::{
    FeeCalculator, ADMIN_FEE_CEILING, ADMIN_FEE_PERCENT, CANCELLATION_PENALTY,
};

proptest! {
    #[test]
    fn test_admin_fee_is_deterministic(rent in 0i64..100_000_000i64) {
        let calculator = FeeCalculator::new();
        let first = calculator.admin_fee(rent).unwrap();
        let second = calculator.admin_fee(rent).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_admin_fee_never_exceeds_ceiling(rent in 0i64..100_000_000i64) {
        let fee = FeeCalculator::new().admin_fee(rent).unwrap();
        prop_assert!(fee <= ADMIN_FEE_CEILING, "fee {} above ceiling", fee);
    }

    #[test]
    fn test_admin_fee_never_exceeds_percentage_of_rent(rent in 0i64..100_000_000i64) {
        let fee = FeeCalculator::new().admin_fee(rent).unwrap();
        prop_assert!(
            fee <= rent * ADMIN_FEE_PERCENT / 100,
            "fee {} above {}% of rent {}",
            fee,
            ADMIN_FEE_PERCENT,
            rent
        );
    }

    #[test]
    fn test_admin_fee_is_non_negative(rent in 0i64..100_000_000i64) {
        let fee = FeeCalculator::new().admin_fee(rent).unwrap();
        prop_assert!(fee >= 0);
    }

    #[test]
    fn test_admin_fee_is_monotonic(rent in 0i64..100_000_000i64, bump in 0i64..1_000_000i64) {
        let calculator = FeeCalculator::new();
        let lower = calculator.admin_fee(rent).unwrap();
        let higher = calculator.admin_fee(rent + bump).unwrap();
        prop_assert!(lower <= higher, "fee decreased as rent grew: {} -> {}", lower, higher);
    }

    #[test]
    fn test_admin_fee_never_panics(rent in 0i64..=i64::MAX) {
        // Absurd rents are refused, never wrapped into a wrong fee.
        match FeeCalculator::new().admin_fee(rent) {
            Ok(fee) => prop_assert!(fee <= ADMIN_FEE_CEILING),
            Err(_) => prop_assert!(rent > i64::MAX / ADMIN_FEE_PERCENT),
        }
    }
}

#[test]
fn test_specific_fee_amounts() {
    let calculator = FeeCalculator::new();

    // 15% of R2000 rent = R300, under the ceiling
    assert_eq!(calculator.admin_fee(200_000).unwrap(), 30_000);

    // 15% of R10000 rent = R1500, capped at R375
    assert_eq!(calculator.admin_fee(1_000_000).unwrap(), ADMIN_FEE_CEILING);

    // R2500 rent is exactly the break-even point
    assert_eq!(calculator.admin_fee(250_000).unwrap(), ADMIN_FEE_CEILING);

    // One cent below break-even floors to R374.99
    assert_eq!(calculator.admin_fee(249_999).unwrap(), 37_499);

    // Tiny rents floor to zero
    assert_eq!(calculator.admin_fee(0).unwrap(), 0);
    assert_eq!(calculator.admin_fee(6).unwrap(), 0);
    assert_eq!(calculator.admin_fee(7).unwrap(), 1);
}

#[test]
fn test_negative_rent_is_rejected() {
    let calculator = FeeCalculator::new();
    assert!(calculator.admin_fee(-1).is_err());
    assert!(calculator.admin_fee(i64::MIN / 2).is_err());
}

#[test]
fn test_out_of_range_rent_is_rejected() {
    let calculator = FeeCalculator::new();

    // Largest rent whose percentage still fits in i64 caps at the ceiling.
    let limit = i64::MAX / ADMIN_FEE_PERCENT;
    assert_eq!(calculator.admin_fee(limit).unwrap(), ADMIN_FEE_CEILING);

    // One cent beyond is an error, not a wrapped fee.
    assert!(calculator.admin_fee(limit + 1).is_err());
    assert!(calculator.admin_fee(i64::MAX / 2).is_err());
    assert!(calculator.admin_fee(i64::MAX).is_err());
}

#[test]
fn test_cancellation_penalty_is_fixed() {
    let calculator = FeeCalculator::new();
    assert_eq!(calculator.cancellation_penalty(), 30_000);
    assert_eq!(calculator.cancellation_penalty(), CANCELLATION_PENALTY);
}
