pub mod models;
pub mod services;

pub use models::{NewNotification, NotificationKind};
pub use services::{MySqlNotifier, Notifier};
