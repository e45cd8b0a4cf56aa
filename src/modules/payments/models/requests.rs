use super::payment::{Payment, PaymentStatus};
use crate::core::{money, AppError, Result};
use serde::{Deserialize, Serialize};

/// Body for `POST /payments/move-in`. Amounts in integer cents.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveInPaymentRequest {
    pub user_id: String,
    pub user_email: String,
    pub user_name: String,
    pub landlord_id: String,
    pub property_id: String,
    pub lease_id: Option<String>,
    pub property_title: String,
    pub deposit_amount: i64,
    pub rent_amount: i64,
    #[serde(default)]
    pub utilities_amount: i64,
}

impl MoveInPaymentRequest {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(AppError::validation("userId is required"));
        }
        if self.landlord_id.trim().is_empty() {
            return Err(AppError::validation("landlordId is required"));
        }
        if self.property_id.trim().is_empty() {
            return Err(AppError::validation("propertyId is required"));
        }
        if self.property_title.trim().is_empty() {
            return Err(AppError::validation("propertyTitle is required"));
        }
        money::ensure_positive("depositAmount", self.deposit_amount)?;
        money::ensure_positive("rentAmount", self.rent_amount)?;
        money::ensure_non_negative("utilitiesAmount", self.utilities_amount)?;
        Ok(())
    }
}

/// Body for `POST /payments/rent`. Amounts in integer cents.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentPaymentRequest {
    pub user_id: String,
    pub user_email: String,
    pub user_name: String,
    pub landlord_id: String,
    pub property_id: String,
    pub lease_id: Option<String>,
    pub property_title: String,
    pub rent_amount: i64,
    #[serde(default)]
    pub utilities_amount: i64,
}

impl RentPaymentRequest {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(AppError::validation("userId is required"));
        }
        if self.landlord_id.trim().is_empty() {
            return Err(AppError::validation("landlordId is required"));
        }
        if self.property_id.trim().is_empty() {
            return Err(AppError::validation("propertyId is required"));
        }
        if self.property_title.trim().is_empty() {
            return Err(AppError::validation("propertyTitle is required"));
        }
        money::ensure_positive("rentAmount", self.rent_amount)?;
        money::ensure_non_negative("utilitiesAmount", self.utilities_amount)?;
        Ok(())
    }
}

/// Amount components echoed back to the client, including the computed
/// total. Absent components are omitted from the JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutBreakdown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit: Option<i64>,
    pub rent: i64,
    pub utilities: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_fee: Option<i64>,
    pub total: i64,
}

/// Response for both initiation endpoints: the stored payment record
/// plus the signed redirect URL the client sends the payer to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub payment: Payment,
    pub payment_url: String,
    pub breakdown: CheckoutBreakdown,
}

/// Who a history listing is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    Tenant,
    Landlord,
}

impl Default for HistoryRole {
    fn default() -> Self {
        HistoryRole::Tenant
    }
}

/// Query string for `GET /payments/history`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    pub user_id: String,
    #[serde(default)]
    pub role: HistoryRole,
    pub lease_id: Option<String>,
    #[serde(rename = "type")]
    pub payment_type: Option<String>,
}

/// Aggregates over a history page, integer cents throughout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistorySummary {
    pub total_paid: i64,
    pub total_pending: i64,
    pub count_by_status: StatusCounts,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub completed: usize,
    pub failed: usize,
    pub cancelled: usize,
}

impl HistorySummary {
    pub fn from_payments(payments: &[Payment]) -> Self {
        let mut summary = HistorySummary {
            total_paid: 0,
            total_pending: 0,
            count_by_status: StatusCounts {
                pending: 0,
                completed: 0,
                failed: 0,
                cancelled: 0,
            },
        };

        for payment in payments {
            match payment.get_status() {
                Ok(PaymentStatus::Pending) => {
                    summary.total_pending += payment.total_amount;
                    summary.count_by_status.pending += 1;
                }
                Ok(PaymentStatus::Completed) => {
                    summary.total_paid += payment.total_amount;
                    summary.count_by_status.completed += 1;
                }
                Ok(PaymentStatus::Failed) => summary.count_by_status.failed += 1,
                Ok(PaymentStatus::Cancelled) => summary.count_by_status.cancelled += 1,
                Err(_) => {}
            }
        }

        summary
    }
}

/// Response for `GET /payments/history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentHistory {
    pub payments: Vec<Payment>,
    pub total: usize,
    pub summary: HistorySummary,
}
