use crate::core::money;
use serde::{Deserialize, Serialize};

/// Notification categories emitted by the payment flow. Stored in the
/// `type` column as their snake_case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Payment,
    AdminFee,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Payment => write!(f, "payment"),
            NotificationKind::AdminFee => write!(f, "admin_fee"),
        }
    }
}

/// A notification about to be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub action_url: Option<String>,
}

impl NewNotification {
    /// Tells a landlord money arrived. Amount in integer cents.
    pub fn payment_received(amount: i64) -> Self {
        Self {
            title: "Payment Received".to_string(),
            message: format!(
                "You have received a payment of {}",
                money::format_rands(amount)
            ),
            kind: NotificationKind::Payment,
            action_url: Some("/landlord/payments".to_string()),
        }
    }

    /// Tells a landlord the platform admin fee is due after both lease
    /// signatures are in. Amount in integer cents.
    pub fn admin_fee_required(amount: i64) -> Self {
        Self {
            title: "Admin Fee Payment Required".to_string(),
            message: format!(
                "A lease has been successfully signed. Please pay the admin fee of {}.",
                money::format_rands(amount)
            ),
            kind: NotificationKind::AdminFee,
            action_url: Some("/landlord/payments".to_string()),
        }
    }

    /// Tells a tenant their payment did not go through. Amount in
    /// integer cents.
    pub fn payment_failed(amount: i64) -> Self {
        Self {
            title: "Payment Failed".to_string(),
            message: format!(
                "Your payment of {} could not be completed. Please try again.",
                money::format_rands(amount)
            ),
            kind: NotificationKind::Payment,
            action_url: Some("/tenant/payments".to_string()),
        }
    }
}
