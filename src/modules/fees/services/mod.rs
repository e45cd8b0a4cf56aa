pub mod fee_calculator;

pub use fee_calculator::{
    FeeCalculator, ADMIN_FEE_CEILING, ADMIN_FEE_PERCENT, CANCELLATION_PENALTY,
};
