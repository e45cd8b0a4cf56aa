pub mod fees;
pub mod gateway;
pub mod health;
pub mod notifications;
pub mod payments;
