use super::super::models::{
    bank_reference, AmountBreakdown, Checkout, CheckoutMetadata, MoveInCheckout, PaymentRequest,
    RentCheckout,
};
use super::hash;
use crate::config::OzowConfig;
use crate::core::{money, AppError, Result};
use std::collections::BTreeMap;
use tracing::warn;
use url::Url;

/// Ozow gateway client: builds signed checkouts and verifies webhook
/// authenticity. Constructed once from configuration and injected into
/// request handlers; no outbound calls are made here, the payer is
/// redirected to the gateway and the gateway calls back.
pub struct OzowClient {
    config: OzowConfig,
    post_url: Url,
    cancel_url: String,
    error_url: String,
    success_url: String,
    notify_url: String,
}

impl OzowClient {
    /// Create a client from gateway config and the public app base URL.
    ///
    /// The base URL derives the four redirect/notify URLs carried in every
    /// request. An unparseable gateway URL is a configuration error.
    pub fn new(config: OzowConfig, app_base_url: String) -> Result<Self> {
        let post_url = Url::parse(&config.post_url).map_err(|e| {
            AppError::Configuration(format!(
                "Invalid gateway post URL '{}': {}",
                config.post_url, e
            ))
        })?;

        let base = app_base_url.trim_end_matches('/').to_string();

        Ok(Self {
            post_url,
            cancel_url: format!("{}/payments/cancel", base),
            error_url: format!("{}/payments/error", base),
            success_url: format!("{}/payments/success", base),
            notify_url: format!("{}/payments/notify", base),
            config,
        })
    }

    /// Build a signed move-in checkout covering deposit, first rent,
    /// utilities and the admin fee.
    pub fn build_move_in_checkout(&self, params: MoveInCheckout) -> Result<Checkout> {
        money::ensure_non_negative("Deposit amount", params.deposit_amount)?;
        money::ensure_non_negative("Rent amount", params.rent_amount)?;
        money::ensure_non_negative("Utilities amount", params.utilities_amount)?;
        money::ensure_non_negative("Admin fee", params.admin_fee)?;

        let metadata = CheckoutMetadata {
            user_id: params.user_id,
            payment_kind: "move_in".to_string(),
            property_title: params.property_title,
            breakdown: AmountBreakdown::move_in(
                params.deposit_amount,
                params.rent_amount,
                params.utilities_amount,
                params.admin_fee,
            ),
            user_name: params.user_name,
        };

        self.build_checkout(params.transaction_id, params.user_email, "MOVEIN", metadata)
    }

    /// Build a signed monthly rent checkout covering rent and utilities.
    pub fn build_rent_checkout(&self, params: RentCheckout) -> Result<Checkout> {
        money::ensure_non_negative("Rent amount", params.rent_amount)?;
        money::ensure_non_negative("Utilities amount", params.utilities_amount)?;

        let metadata = CheckoutMetadata {
            user_id: params.user_id,
            payment_kind: "monthly_rent".to_string(),
            property_title: params.property_title,
            breakdown: AmountBreakdown::monthly_rent(
                params.rent_amount,
                params.utilities_amount,
            ),
            user_name: params.user_name,
        };

        self.build_checkout(params.transaction_id, params.user_email, "RENT", metadata)
    }

    fn build_checkout(
        &self,
        transaction_id: String,
        customer: String,
        prefix: &str,
        metadata: CheckoutMetadata,
    ) -> Result<Checkout> {
        if transaction_id.trim().is_empty() {
            return Err(AppError::validation("Transaction id cannot be empty"));
        }

        let [optional1, optional2, optional3, optional4, optional5] =
            metadata.to_optional_fields()?;

        let request = PaymentRequest {
            site_code: self.config.site_code.clone(),
            country_code: self.config.country_code.clone(),
            currency_code: self.config.currency_code.clone(),
            amount: metadata.breakdown.total()?,
            bank_reference: bank_reference(prefix, &transaction_id),
            transaction_reference: transaction_id,
            customer,
            optional1,
            optional2,
            optional3,
            optional4,
            optional5,
            cancel_url: self.cancel_url.clone(),
            error_url: self.error_url.clone(),
            success_url: self.success_url.clone(),
            notify_url: self.notify_url.clone(),
            is_test: self.config.is_test,
        };

        let hash = hash::sign_fields(&request.wire_fields(), &self.config.private_key);
        let redirect_url = self.redirect_url(&request, &hash);

        Ok(Checkout {
            request,
            hash,
            redirect_url,
        })
    }

    fn redirect_url(&self, request: &PaymentRequest, hash: &str) -> String {
        let mut url = self.post_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in request.query_pairs() {
                pairs.append_pair(name, &value);
            }
            pairs.append_pair("HashCheck", hash);
        }
        url.to_string()
    }

    /// Verify an inbound webhook payload against its embedded hash.
    ///
    /// Fail-closed: a missing hash, a non-object payload, or an unset
    /// signing secret all return false. All downstream state mutation is
    /// gated on this returning true.
    pub fn verify_notification(&self, payload: &serde_json::Value) -> bool {
        if self.config.private_key.is_empty() {
            warn!("Webhook rejected: no signing secret configured");
            return false;
        }

        let Some(object) = payload.as_object() else {
            return false;
        };

        let mut fields = BTreeMap::new();
        let mut received_hash: Option<String> = None;
        for (name, value) in object {
            // The gateway has sent the digest under both names.
            if name.eq_ignore_ascii_case("hash") || name.eq_ignore_ascii_case("hashcheck") {
                received_hash = Some(hash::field_value(value));
            } else {
                fields.insert(name.clone(), hash::field_value(value));
            }
        }

        let Some(received) = received_hash.filter(|h| !h.is_empty()) else {
            return false;
        };

        let expected = hash::sign_fields(&fields, &self.config.private_key);
        hash::hashes_match(&expected, &received)
    }
}
