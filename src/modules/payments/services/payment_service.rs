use super::super::models::{
    CheckoutBreakdown, CheckoutResponse, HistoryQuery, HistoryRole, HistorySummary,
    MoveInPaymentRequest, Payment, PaymentHistory, PaymentType, RentPaymentRequest,
};
use super::super::repositories::PaymentStore;
use crate::core::{AppError, Result};
use crate::modules::fees::FeeCalculator;
use crate::modules::gateway::{AmountBreakdown, MoveInCheckout, OzowClient, RentCheckout};
use std::sync::Arc;
use tracing::info;

/// Payment initiation and history
///
/// Orchestrates the outbound half of the flow: compute fees, persist a
/// pending payment, build the signed gateway checkout, and keep the
/// request hash on record for audit.
pub struct PaymentService {
    payments: Arc<dyn PaymentStore>,
    gateway: Arc<OzowClient>,
    fees: FeeCalculator,
}

impl PaymentService {
    pub fn new(payments: Arc<dyn PaymentStore>, gateway: Arc<OzowClient>) -> Self {
        Self {
            payments,
            gateway,
            fees: FeeCalculator::new(),
        }
    }

    /// Start a move-in payment (deposit + first rent + utilities +
    /// admin fee)
    ///
    /// The admin fee is computed here from the rent amount, never taken
    /// from the client.
    ///
    /// # Arguments
    /// * `request` - Validated initiation request, amounts in cents
    ///
    /// # Returns
    /// * `Result<CheckoutResponse>` - Stored payment plus redirect URL
    pub async fn start_move_in_payment(
        &self,
        request: MoveInPaymentRequest,
    ) -> Result<CheckoutResponse> {
        request.validate()?;

        let admin_fee = self.fees.admin_fee(request.rent_amount)?;
        let breakdown = AmountBreakdown::move_in(
            request.deposit_amount,
            request.rent_amount,
            request.utilities_amount,
            admin_fee,
        );

        let transaction_id = uuid::Uuid::new_v4().to_string();
        let payment = Payment::new(
            transaction_id.clone(),
            request.user_id.clone(),
            request.landlord_id.clone(),
            request.property_id.clone(),
            request.lease_id.clone(),
            PaymentType::MoveIn,
            &breakdown,
            format!("Move-in payment for {}", request.property_title),
        )?;

        let mut stored = self.payments.create(&payment).await?;

        let checkout = self.gateway.build_move_in_checkout(MoveInCheckout {
            transaction_id,
            user_id: request.user_id,
            user_email: request.user_email,
            user_name: request.user_name,
            property_title: request.property_title,
            deposit_amount: request.deposit_amount,
            rent_amount: request.rent_amount,
            utilities_amount: request.utilities_amount,
            admin_fee,
        })?;

        if let Some(id) = stored.get_id() {
            self.payments.attach_request_hash(id, &checkout.hash).await?;
        }
        stored.request_hash = Some(checkout.hash.clone());

        info!(
            transaction_reference = %stored.transaction_reference,
            total_amount = stored.total_amount,
            "Move-in checkout created"
        );

        Ok(CheckoutResponse {
            payment: stored,
            payment_url: checkout.redirect_url,
            breakdown: CheckoutBreakdown {
                deposit: Some(request.deposit_amount),
                rent: request.rent_amount,
                utilities: request.utilities_amount,
                admin_fee: Some(admin_fee),
                total: breakdown.total()?,
            },
        })
    }

    /// Start a monthly rent payment (rent + utilities, no admin fee).
    pub async fn start_rent_payment(
        &self,
        request: RentPaymentRequest,
    ) -> Result<CheckoutResponse> {
        request.validate()?;

        let breakdown =
            AmountBreakdown::monthly_rent(request.rent_amount, request.utilities_amount);

        let transaction_id = uuid::Uuid::new_v4().to_string();
        let payment = Payment::new(
            transaction_id.clone(),
            request.user_id.clone(),
            request.landlord_id.clone(),
            request.property_id.clone(),
            request.lease_id.clone(),
            PaymentType::MonthlyRent,
            &breakdown,
            format!("Monthly rent for {}", request.property_title),
        )?;

        let mut stored = self.payments.create(&payment).await?;

        let checkout = self.gateway.build_rent_checkout(RentCheckout {
            transaction_id,
            user_id: request.user_id,
            user_email: request.user_email,
            user_name: request.user_name,
            property_title: request.property_title,
            rent_amount: request.rent_amount,
            utilities_amount: request.utilities_amount,
        })?;

        if let Some(id) = stored.get_id() {
            self.payments.attach_request_hash(id, &checkout.hash).await?;
        }
        stored.request_hash = Some(checkout.hash.clone());

        info!(
            transaction_reference = %stored.transaction_reference,
            total_amount = stored.total_amount,
            "Rent checkout created"
        );

        Ok(CheckoutResponse {
            payment: stored,
            payment_url: checkout.redirect_url,
            breakdown: CheckoutBreakdown {
                deposit: None,
                rent: request.rent_amount,
                utilities: request.utilities_amount,
                admin_fee: None,
                total: breakdown.total()?,
            },
        })
    }

    /// Payment history for a tenant or landlord, newest first, with
    /// status aggregates.
    pub async fn history(&self, query: HistoryQuery) -> Result<PaymentHistory> {
        if query.user_id.trim().is_empty() {
            return Err(AppError::validation("user_id is required"));
        }

        let payments = match query.role {
            HistoryRole::Tenant => {
                self.payments
                    .list_for_tenant(
                        &query.user_id,
                        query.lease_id.as_deref(),
                        query.payment_type.as_deref(),
                    )
                    .await?
            }
            HistoryRole::Landlord => {
                self.payments
                    .list_for_landlord(
                        &query.user_id,
                        query.lease_id.as_deref(),
                        query.payment_type.as_deref(),
                    )
                    .await?
            }
        };

        let summary = HistorySummary::from_payments(&payments);
        Ok(PaymentHistory {
            total: payments.len(),
            payments,
            summary,
        })
    }
}
