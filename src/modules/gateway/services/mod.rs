pub mod hash;
pub mod ozow;

pub use ozow::OzowClient;
