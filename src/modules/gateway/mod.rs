pub mod models;
pub mod services;

pub use models::{
    AmountBreakdown, Checkout, CheckoutMetadata, MoveInCheckout, PaymentNotification,
    PaymentRequest, RentCheckout,
};
pub use services::{hash, OzowClient};
