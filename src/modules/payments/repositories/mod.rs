pub mod lease_store;
pub mod payment_store;

pub use lease_store::{Lease, LeaseStore, MySqlLeaseStore, PropertyStatus};
pub use payment_store::{MySqlPaymentStore, PaymentStore, TransitionOutcome};
