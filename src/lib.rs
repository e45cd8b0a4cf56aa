//! Yardpay
//!
//! Payment gateway core for a township rental marketplace: Ozow
//! checkout signing, webhook verification, and the payment state
//! machine that drives lease activation and notifications.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::fees;
pub use modules::gateway;
pub use modules::notifications;
pub use modules::payments;
