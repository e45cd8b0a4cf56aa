use crate::core::{money, AppError, Result};
use crate::modules::gateway::AmountBreakdown;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

/// Payment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Created at initiation, awaiting the gateway callback
    #[serde(rename = "pending")]
    Pending,

    /// Payer completed the gateway flow
    #[serde(rename = "completed")]
    Completed,

    /// Gateway reported an error
    #[serde(rename = "failed")]
    Failed,

    /// Payer cancelled or abandoned the gateway flow
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl PaymentStatus {
    /// Terminal states absorb: no transition ever leaves them.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Completed | PaymentStatus::Failed | PaymentStatus::Cancelled
        )
    }

    /// Maps the gateway's free-text status to an internal status,
    /// case-insensitively. Unrecognized values map to None and leave the
    /// payment untouched.
    pub fn from_gateway(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "complete" | "successful" => Some(PaymentStatus::Completed),
            "cancelled" | "abandoned" => Some(PaymentStatus::Cancelled),
            "error" | "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Completed => write!(f, "completed"),
            PaymentStatus::Failed => write!(f, "failed"),
            PaymentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "completed" => Ok(PaymentStatus::Completed),
            "failed" => Ok(PaymentStatus::Failed),
            "cancelled" => Ok(PaymentStatus::Cancelled),
            _ => Err(format!("Invalid payment status: {}", s)),
        }
    }
}

/// What a payment is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Deposit + first rent + utilities + admin fee
    MoveIn,
    MonthlyRent,
    DepositReturn,
    AdminFee,
    CancelPenalty,
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentType::MoveIn => write!(f, "move_in"),
            PaymentType::MonthlyRent => write!(f, "monthly_rent"),
            PaymentType::DepositReturn => write!(f, "deposit_return"),
            PaymentType::AdminFee => write!(f, "admin_fee"),
            PaymentType::CancelPenalty => write!(f, "cancel_penalty"),
        }
    }
}

impl std::str::FromStr for PaymentType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "move_in" => Ok(PaymentType::MoveIn),
            "monthly_rent" => Ok(PaymentType::MonthlyRent),
            "deposit_return" => Ok(PaymentType::DepositReturn),
            "admin_fee" => Ok(PaymentType::AdminFee),
            "cancel_penalty" => Ok(PaymentType::CancelPenalty),
            _ => Err(format!("Invalid payment type: {}", s)),
        }
    }
}

/// Durable payment record
///
/// Created `pending` at initiation, mutated exactly once to a terminal
/// state by a verified webhook. The transaction reference is unique and
/// matches the reference signed into the gateway request.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    /// Unique payment ID (UUID)
    #[serde(skip_deserializing)]
    pub id: Option<String>,

    /// Gateway transaction reference (unique, drives idempotency)
    pub transaction_reference: String,

    /// Paying tenant
    pub tenant_id: String,

    /// Receiving landlord
    pub landlord_id: String,

    /// Property the payment is for
    pub property_id: String,

    /// Lease the payment activates (move-in only)
    pub lease_id: Option<String>,

    /// Payment type (move_in, monthly_rent, ...)
    pub payment_type: String,

    /// Lifecycle status
    pub status: String,

    /// Amount components, all integer cents
    pub rent_amount: i64,
    pub deposit_amount: i64,
    pub utilities_amount: i64,
    pub admin_fee_amount: i64,
    pub total_amount: i64,

    /// Human-readable description shown in payment history
    pub description: String,

    /// Raw status string last reported by the gateway
    pub gateway_status: Option<String>,

    /// Free-text message accompanying the gateway status
    pub gateway_message: Option<String>,

    /// Hash signed into the outbound request, kept for audit
    pub request_hash: Option<String>,

    #[serde(skip_deserializing)]
    pub created_at: Option<DateTime<Utc>>,

    /// Set when the gateway confirmed the payment
    pub paid_at: Option<DateTime<Utc>>,

    /// Set on the transition to `completed`
    pub completed_at: Option<DateTime<Utc>>,

    #[serde(skip_deserializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Payment {
    /// Create a new pending payment
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        transaction_reference: String,
        tenant_id: String,
        landlord_id: String,
        property_id: String,
        lease_id: Option<String>,
        payment_type: PaymentType,
        breakdown: &AmountBreakdown,
        description: String,
    ) -> Result<Self> {
        if transaction_reference.trim().is_empty() {
            return Err(AppError::validation(
                "Transaction reference cannot be empty",
            ));
        }
        if tenant_id.trim().is_empty() {
            return Err(AppError::validation("Tenant ID cannot be empty"));
        }
        if landlord_id.trim().is_empty() {
            return Err(AppError::validation("Landlord ID cannot be empty"));
        }
        if property_id.trim().is_empty() {
            return Err(AppError::validation("Property ID cannot be empty"));
        }

        money::ensure_non_negative("Rent amount", breakdown.rent)?;
        money::ensure_non_negative("Deposit amount", breakdown.deposit.unwrap_or(0))?;
        money::ensure_non_negative("Utilities amount", breakdown.utilities)?;
        money::ensure_non_negative("Admin fee", breakdown.admin_fee.unwrap_or(0))?;

        let now = Utc::now();
        Ok(Self {
            id: Some(uuid::Uuid::new_v4().to_string()),
            transaction_reference,
            tenant_id,
            landlord_id,
            property_id,
            lease_id,
            payment_type: payment_type.to_string(),
            status: PaymentStatus::Pending.to_string(),
            rent_amount: breakdown.rent,
            deposit_amount: breakdown.deposit.unwrap_or(0),
            utilities_amount: breakdown.utilities,
            admin_fee_amount: breakdown.admin_fee.unwrap_or(0),
            total_amount: breakdown.total()?,
            description,
            gateway_status: None,
            gateway_message: None,
            request_hash: None,
            created_at: Some(now),
            paid_at: None,
            completed_at: None,
            updated_at: Some(now),
        })
    }

    pub fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn get_status(&self) -> Result<PaymentStatus> {
        PaymentStatus::from_str(&self.status)
            .map_err(|e| AppError::Internal(format!("Invalid payment status: {}", e)))
    }

    pub fn get_payment_type(&self) -> Result<PaymentType> {
        PaymentType::from_str(&self.payment_type)
            .map_err(|e| AppError::Internal(format!("Invalid payment type: {}", e)))
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.get_status(), Ok(PaymentStatus::Completed))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.get_status(), Ok(s) if s.is_terminal())
    }

    /// A move-in payment carrying a lease activates that lease on
    /// completion.
    pub fn activates_lease(&self) -> bool {
        matches!(self.get_payment_type(), Ok(PaymentType::MoveIn)) && self.lease_id.is_some()
    }
}
