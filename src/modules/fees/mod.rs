pub mod services;

pub use services::{FeeCalculator, ADMIN_FEE_CEILING, ADMIN_FEE_PERCENT, CANCELLATION_PENALTY};
