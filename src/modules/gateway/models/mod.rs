pub mod checkout;

pub use checkout::{
    bank_reference, AmountBreakdown, Checkout, CheckoutMetadata, MoveInCheckout,
    PaymentNotification, PaymentRequest, RentCheckout,
};
