pub mod notifier;

pub use notifier::{MySqlNotifier, Notifier};
