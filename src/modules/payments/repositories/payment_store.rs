use super::super::models::{Payment, PaymentStatus};
use crate::core::{AppError, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;
use std::time::Duration;

/// Column list shared by every payment SELECT.
const PAYMENT_COLUMNS: &str = "id, transaction_reference, tenant_id, landlord_id, property_id, \
     lease_id, payment_type, status, rent_amount, deposit_amount, utilities_amount, \
     admin_fee_amount, total_amount, description, gateway_status, gateway_message, \
     request_hash, created_at, paid_at, completed_at, updated_at";

/// History listings return at most this many rows, newest first.
const HISTORY_LIMIT: i64 = 50;

/// Result of an attempted status transition.
#[derive(Debug, Clone)]
pub enum TransitionOutcome {
    /// Status changed; carries the updated record.
    Applied(Payment),

    /// Payment was already terminal. Duplicate webhook deliveries land
    /// here and must not re-trigger side effects.
    AlreadyFinal(Payment),

    /// Gateway status had no mapping; record untouched.
    Unchanged(Payment),
}

impl TransitionOutcome {
    pub fn payment(&self) -> &Payment {
        match self {
            TransitionOutcome::Applied(p)
            | TransitionOutcome::AlreadyFinal(p)
            | TransitionOutcome::Unchanged(p) => p,
        }
    }

    pub fn was_applied(&self) -> bool {
        matches!(self, TransitionOutcome::Applied(_))
    }
}

/// Persistence seam for payment records
///
/// The webhook path depends on `transition` being atomic: concurrent
/// deliveries for the same reference must serialize so exactly one
/// observes the pending state.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Insert a new pending payment and return the stored record.
    async fn create(&self, payment: &Payment) -> Result<Payment>;

    /// Record the hash signed into the outbound gateway request.
    async fn attach_request_hash(&self, id: &str, request_hash: &str) -> Result<()>;

    /// Look up a payment by its gateway transaction reference.
    async fn find_by_reference(&self, reference: &str) -> Result<Option<Payment>>;

    /// Atomically move a payment to `status` unless it is already
    /// terminal. `Err(NotFound)` when the reference is unknown.
    async fn transition(
        &self,
        reference: &str,
        status: PaymentStatus,
        gateway_status: &str,
        gateway_message: Option<&str>,
    ) -> Result<TransitionOutcome>;

    /// Payments made by a tenant, newest first.
    async fn list_for_tenant(
        &self,
        tenant_id: &str,
        lease_id: Option<&str>,
        payment_type: Option<&str>,
    ) -> Result<Vec<Payment>>;

    /// Payments received by a landlord, newest first.
    async fn list_for_landlord(
        &self,
        landlord_id: &str,
        lease_id: Option<&str>,
        payment_type: Option<&str>,
    ) -> Result<Vec<Payment>>;
}

/// MySQL-backed payment store
///
/// `transition` takes a `SELECT ... FOR UPDATE` row lock inside a
/// transaction so concurrent webhook deliveries for one reference
/// serialize at the database. The whole transaction runs under a
/// timeout; expiry surfaces as an error, never as implicit success.
pub struct MySqlPaymentStore {
    pool: MySqlPool,
    op_timeout: Duration,
}

impl MySqlPaymentStore {
    pub fn new(pool: MySqlPool, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }

    async fn fetch_by_reference(&self, reference: &str) -> Result<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE transaction_reference = ?"
        ))
        .bind(reference)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    async fn transition_inner(
        &self,
        reference: &str,
        status: PaymentStatus,
        gateway_status: &str,
        gateway_message: Option<&str>,
    ) -> Result<TransitionOutcome> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE transaction_reference = ? FOR UPDATE"
        ))
        .bind(reference)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Payment with reference '{}' not found", reference))
        })?;

        if current.is_terminal() {
            tx.rollback().await?;
            return Ok(TransitionOutcome::AlreadyFinal(current));
        }

        // paid_at/completed_at only move on the transition to completed
        let completion = if status == PaymentStatus::Completed {
            Some(Utc::now())
        } else {
            None
        };

        sqlx::query(
            r#"
            UPDATE payments
            SET status = ?,
                gateway_status = ?,
                gateway_message = ?,
                paid_at = COALESCE(?, paid_at),
                completed_at = COALESCE(?, completed_at),
                updated_at = NOW()
            WHERE transaction_reference = ?
            "#,
        )
        .bind(status.to_string())
        .bind(gateway_status)
        .bind(gateway_message)
        .bind(completion)
        .bind(completion)
        .bind(reference)
        .execute(&mut *tx)
        .await?;

        let updated = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE transaction_reference = ?"
        ))
        .bind(reference)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(TransitionOutcome::Applied(updated))
    }

    async fn list_filtered(
        &self,
        owner_column: &str,
        owner_id: &str,
        lease_id: Option<&str>,
        payment_type: Option<&str>,
    ) -> Result<Vec<Payment>> {
        let mut sql =
            format!("SELECT {PAYMENT_COLUMNS} FROM payments WHERE {owner_column} = ?");
        if lease_id.is_some() {
            sql.push_str(" AND lease_id = ?");
        }
        if payment_type.is_some() {
            sql.push_str(" AND payment_type = ?");
        }
        sql.push_str(" ORDER BY created_at DESC LIMIT ?");

        let mut query = sqlx::query_as::<_, Payment>(&sql).bind(owner_id);
        if let Some(lease) = lease_id {
            query = query.bind(lease);
        }
        if let Some(kind) = payment_type {
            query = query.bind(kind);
        }

        let payments = query.bind(HISTORY_LIMIT).fetch_all(&self.pool).await?;
        Ok(payments)
    }
}

#[async_trait]
impl PaymentStore for MySqlPaymentStore {
    async fn create(&self, payment: &Payment) -> Result<Payment> {
        let id = payment
            .id
            .as_ref()
            .ok_or_else(|| AppError::Internal("Payment ID is required for creation".to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO payments (
                id, transaction_reference, tenant_id, landlord_id, property_id,
                lease_id, payment_type, status, rent_amount, deposit_amount,
                utilities_amount, admin_fee_amount, total_amount, description
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&payment.transaction_reference)
        .bind(&payment.tenant_id)
        .bind(&payment.landlord_id)
        .bind(&payment.property_id)
        .bind(&payment.lease_id)
        .bind(&payment.payment_type)
        .bind(&payment.status)
        .bind(payment.rent_amount)
        .bind(payment.deposit_amount)
        .bind(payment.utilities_amount)
        .bind(payment.admin_fee_amount)
        .bind(payment.total_amount)
        .bind(&payment.description)
        .execute(&self.pool)
        .await?;

        self.fetch_by_reference(&payment.transaction_reference)
            .await?
            .ok_or_else(|| AppError::Internal("Payment was created but not found".to_string()))
    }

    async fn attach_request_hash(&self, id: &str, request_hash: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET request_hash = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(request_hash)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Payment with id '{}' not found",
                id
            )));
        }

        Ok(())
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Payment>> {
        self.fetch_by_reference(reference).await
    }

    async fn transition(
        &self,
        reference: &str,
        status: PaymentStatus,
        gateway_status: &str,
        gateway_message: Option<&str>,
    ) -> Result<TransitionOutcome> {
        tokio::time::timeout(
            self.op_timeout,
            self.transition_inner(reference, status, gateway_status, gateway_message),
        )
        .await
        .map_err(|_| {
            AppError::timeout(format!(
                "Status update for payment '{}' exceeded {}s",
                reference,
                self.op_timeout.as_secs()
            ))
        })?
    }

    async fn list_for_tenant(
        &self,
        tenant_id: &str,
        lease_id: Option<&str>,
        payment_type: Option<&str>,
    ) -> Result<Vec<Payment>> {
        self.list_filtered("tenant_id", tenant_id, lease_id, payment_type)
            .await
    }

    async fn list_for_landlord(
        &self,
        landlord_id: &str,
        lease_id: Option<&str>,
        payment_type: Option<&str>,
    ) -> Result<Vec<Payment>> {
        self.list_filtered("landlord_id", landlord_id, lease_id, payment_type)
            .await
    }
}
