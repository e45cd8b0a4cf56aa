use super::super::models::{Payment, PaymentStatus};
use super::super::repositories::{Lease, LeaseStore, PaymentStore, PropertyStatus, TransitionOutcome};
use crate::core::{AppError, Result};
use crate::modules::fees::ADMIN_FEE_CEILING;
use crate::modules::notifications::{NewNotification, Notifier};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Drives payment status transitions from verified webhooks
///
/// `apply` is the single entry point for inbound gateway status. It is
/// idempotent: terminal payments absorb duplicate deliveries without
/// re-running side effects. Side effects run only after the status
/// change is committed, and each one is best-effort; a failed lease
/// update or notification is logged and never rolls the status back.
pub struct PaymentStateMachine {
    payments: Arc<dyn PaymentStore>,
    leases: Arc<dyn LeaseStore>,
    notifier: Arc<dyn Notifier>,
}

impl PaymentStateMachine {
    pub fn new(
        payments: Arc<dyn PaymentStore>,
        leases: Arc<dyn LeaseStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            payments,
            leases,
            notifier,
        }
    }

    /// Apply a gateway status report to the named payment
    ///
    /// # Arguments
    /// * `reference` - Gateway transaction reference
    /// * `gateway_status` - Raw status string as reported
    /// * `gateway_message` - Optional free-text detail
    ///
    /// # Returns
    /// * `Result<TransitionOutcome>` - What happened to the record
    ///
    /// # Errors
    /// * `404 Not Found` - Unknown reference. Logged at error level:
    ///   the gateway does not resend indefinitely, so a dropped
    ///   webhook here means a stuck pending payment.
    pub async fn apply(
        &self,
        reference: &str,
        gateway_status: &str,
        gateway_message: Option<&str>,
    ) -> Result<TransitionOutcome> {
        let Some(status) = PaymentStatus::from_gateway(gateway_status) else {
            let payment = self.payments.find_by_reference(reference).await?.ok_or_else(|| {
                error!(
                    transaction_reference = %reference,
                    gateway_status = %gateway_status,
                    "Webhook received for unknown payment reference"
                );
                AppError::not_found(format!("Payment with reference '{}' not found", reference))
            })?;

            warn!(
                transaction_reference = %reference,
                gateway_status = %gateway_status,
                "Gateway status has no mapping, payment left as-is"
            );
            return Ok(TransitionOutcome::Unchanged(payment));
        };

        let outcome = match self
            .payments
            .transition(reference, status, gateway_status, gateway_message)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                if matches!(e, AppError::NotFound(_)) {
                    error!(
                        transaction_reference = %reference,
                        gateway_status = %gateway_status,
                        "Webhook received for unknown payment reference"
                    );
                }
                return Err(e);
            }
        };

        match &outcome {
            TransitionOutcome::Applied(payment) => {
                info!(
                    transaction_reference = %reference,
                    status = %payment.status,
                    gateway_status = %gateway_status,
                    "Payment status updated"
                );
                match status {
                    PaymentStatus::Completed => self.on_completed(payment).await,
                    PaymentStatus::Failed | PaymentStatus::Cancelled => {
                        self.on_not_completed(payment).await
                    }
                    PaymentStatus::Pending => {}
                }
            }
            TransitionOutcome::AlreadyFinal(payment) => {
                info!(
                    transaction_reference = %reference,
                    status = %payment.status,
                    gateway_status = %gateway_status,
                    "Duplicate webhook for terminal payment ignored"
                );
            }
            TransitionOutcome::Unchanged(_) => {}
        }

        Ok(outcome)
    }

    /// Side effects of a completed payment. Runs after commit; every
    /// step is isolated so one failure cannot suppress the rest.
    async fn on_completed(&self, payment: &Payment) {
        let lease = self.load_lease(payment).await;

        if payment.activates_lease() {
            if let Some(lease) = &lease {
                if let Err(e) = self.leases.activate(&lease.id).await {
                    error!(
                        lease_id = %lease.id,
                        error = %e,
                        "Failed to activate lease after move-in payment"
                    );
                }
                if let Err(e) = self
                    .leases
                    .set_property_status(&lease.property_id, PropertyStatus::Occupied)
                    .await
                {
                    error!(
                        property_id = %lease.property_id,
                        error = %e,
                        "Failed to mark property occupied"
                    );
                }
            }
        }

        if let Err(e) = self
            .notifier
            .notify(
                &payment.landlord_id,
                NewNotification::payment_received(payment.total_amount),
            )
            .await
        {
            warn!(
                landlord_id = %payment.landlord_id,
                error = %e,
                "Failed to deliver payment received notification"
            );
        }

        if let Some(lease) = &lease {
            if lease.fully_signed() {
                if let Err(e) = self
                    .notifier
                    .notify(
                        &lease.landlord_id,
                        NewNotification::admin_fee_required(ADMIN_FEE_CEILING),
                    )
                    .await
                {
                    warn!(
                        landlord_id = %lease.landlord_id,
                        error = %e,
                        "Failed to deliver admin fee notification"
                    );
                }
            }
        }
    }

    /// Side effects of a failed or cancelled payment.
    async fn on_not_completed(&self, payment: &Payment) {
        if let Err(e) = self
            .notifier
            .notify(
                &payment.tenant_id,
                NewNotification::payment_failed(payment.total_amount),
            )
            .await
        {
            warn!(
                tenant_id = %payment.tenant_id,
                error = %e,
                "Failed to deliver payment failed notification"
            );
        }
    }

    async fn load_lease(&self, payment: &Payment) -> Option<Lease> {
        let lease_id = payment.lease_id.as_deref()?;
        match self.leases.find_by_id(lease_id).await {
            Ok(Some(lease)) => Some(lease),
            Ok(None) => {
                error!(
                    lease_id = %lease_id,
                    transaction_reference = %payment.transaction_reference,
                    "Lease referenced by completed payment not found"
                );
                None
            }
            Err(e) => {
                error!(
                    lease_id = %lease_id,
                    error = %e,
                    "Failed to load lease for completed payment"
                );
                None
            }
        }
    }
}
