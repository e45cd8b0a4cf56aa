pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::{PaymentController, WebhookController};
pub use models::{Payment, PaymentStatus, PaymentType};
pub use repositories::{
    Lease, LeaseStore, MySqlLeaseStore, MySqlPaymentStore, PaymentStore, PropertyStatus,
    TransitionOutcome,
};
pub use services::{PaymentService, PaymentStateMachine};
