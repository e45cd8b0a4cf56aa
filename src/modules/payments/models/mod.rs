pub mod payment;
pub mod requests;

pub use payment::{Payment, PaymentStatus, PaymentType};
pub use requests::{
    CheckoutBreakdown, CheckoutResponse, HistoryQuery, HistoryRole, HistorySummary,
    MoveInPaymentRequest, PaymentHistory, RentPaymentRequest, StatusCounts,
};
