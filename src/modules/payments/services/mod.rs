pub mod payment_service;
pub mod state_machine;

pub use payment_service::PaymentService;
pub use state_machine::PaymentStateMachine;
