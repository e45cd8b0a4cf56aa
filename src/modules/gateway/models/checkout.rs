use crate::core::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outbound payment request in the gateway's wire shape.
///
/// Every field participates in hashing. The struct is frozen once signed:
/// the checkout carries exactly the request that produced its hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentRequest {
    pub site_code: String,
    pub country_code: String,
    pub currency_code: String,
    /// Integer amount in minor units (cents).
    pub amount: i64,
    /// Unique reference, matches the persisted payment row.
    pub transaction_reference: String,
    /// Human-readable reference shown on the payer's bank statement.
    pub bank_reference: String,
    /// Payer email.
    pub customer: String,
    pub optional1: String,
    pub optional2: String,
    pub optional3: String,
    pub optional4: String,
    pub optional5: String,
    pub cancel_url: String,
    pub error_url: String,
    pub success_url: String,
    pub notify_url: String,
    pub is_test: bool,
}

impl PaymentRequest {
    /// Field map keyed by wire name, in the shape the signer consumes.
    pub fn wire_fields(&self) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        fields.insert("SiteCode".to_string(), self.site_code.clone());
        fields.insert("CountryCode".to_string(), self.country_code.clone());
        fields.insert("CurrencyCode".to_string(), self.currency_code.clone());
        fields.insert("Amount".to_string(), self.amount.to_string());
        fields.insert(
            "TransactionReference".to_string(),
            self.transaction_reference.clone(),
        );
        fields.insert("BankReference".to_string(), self.bank_reference.clone());
        fields.insert("Customer".to_string(), self.customer.clone());
        fields.insert("Optional1".to_string(), self.optional1.clone());
        fields.insert("Optional2".to_string(), self.optional2.clone());
        fields.insert("Optional3".to_string(), self.optional3.clone());
        fields.insert("Optional4".to_string(), self.optional4.clone());
        fields.insert("Optional5".to_string(), self.optional5.clone());
        fields.insert("CancelUrl".to_string(), self.cancel_url.clone());
        fields.insert("ErrorUrl".to_string(), self.error_url.clone());
        fields.insert("SuccessUrl".to_string(), self.success_url.clone());
        fields.insert("NotifyUrl".to_string(), self.notify_url.clone());
        fields.insert("IsTest".to_string(), self.is_test.to_string());
        fields
    }

    /// Query-string pairs in the fixed order the gateway documents.
    /// HashCheck is appended separately, after signing.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("SiteCode", self.site_code.clone()),
            ("CountryCode", self.country_code.clone()),
            ("CurrencyCode", self.currency_code.clone()),
            ("Amount", self.amount.to_string()),
            ("TransactionReference", self.transaction_reference.clone()),
            ("BankReference", self.bank_reference.clone()),
            ("Customer", self.customer.clone()),
            ("Optional1", self.optional1.clone()),
            ("Optional2", self.optional2.clone()),
            ("Optional3", self.optional3.clone()),
            ("Optional4", self.optional4.clone()),
            ("Optional5", self.optional5.clone()),
            ("CancelUrl", self.cancel_url.clone()),
            ("ErrorUrl", self.error_url.clone()),
            ("SuccessUrl", self.success_url.clone()),
            ("NotifyUrl", self.notify_url.clone()),
            ("IsTest", self.is_test.to_string()),
        ]
    }
}

/// Monetary breakdown carried to the gateway inside Optional4 and echoed
/// back for reconciliation. Serialized as compact JSON at the wire
/// boundary only; everywhere else it stays typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountBreakdown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit: Option<i64>,
    pub rent: i64,
    pub utilities: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_fee: Option<i64>,
}

impl AmountBreakdown {
    pub fn move_in(deposit: i64, rent: i64, utilities: i64, admin_fee: i64) -> Self {
        Self {
            deposit: Some(deposit),
            rent,
            utilities,
            admin_fee: Some(admin_fee),
        }
    }

    pub fn monthly_rent(rent: i64, utilities: i64) -> Self {
        Self {
            deposit: None,
            rent,
            utilities,
            admin_fee: None,
        }
    }

    /// Checked sum of the components. A breakdown can be echoed back
    /// through the wire, so the sum is not assumed to fit in i64.
    pub fn total(&self) -> Result<i64> {
        [
            self.deposit.unwrap_or(0),
            self.rent,
            self.utilities,
            self.admin_fee.unwrap_or(0),
        ]
        .iter()
        .try_fold(0i64, |sum, amount| sum.checked_add(*amount))
        .ok_or_else(|| AppError::validation("Amount breakdown total is out of range"))
    }

    pub fn to_wire(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_wire(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Typed view of the five optional wire fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutMetadata {
    pub user_id: String,
    pub payment_kind: String,
    pub property_title: String,
    pub breakdown: AmountBreakdown,
    pub user_name: String,
}

impl CheckoutMetadata {
    /// Flattens into Optional1..5 in wire order.
    pub fn to_optional_fields(&self) -> Result<[String; 5]> {
        Ok([
            self.user_id.clone(),
            self.payment_kind.clone(),
            self.property_title.clone(),
            self.breakdown.to_wire()?,
            self.user_name.clone(),
        ])
    }

    /// Recovers the typed view from a signed request.
    pub fn from_request(request: &PaymentRequest) -> Result<Self> {
        Ok(Self {
            user_id: request.optional1.clone(),
            payment_kind: request.optional2.clone(),
            property_title: request.optional3.clone(),
            breakdown: AmountBreakdown::from_wire(&request.optional4)?,
            user_name: request.optional5.clone(),
        })
    }
}

/// A fully built, signed checkout ready to redirect the payer to.
#[derive(Debug, Clone)]
pub struct Checkout {
    pub request: PaymentRequest,
    pub hash: String,
    pub redirect_url: String,
}

/// Inputs for a move-in checkout. Amounts in minor units.
#[derive(Debug, Clone)]
pub struct MoveInCheckout {
    pub transaction_id: String,
    pub user_id: String,
    pub user_email: String,
    pub user_name: String,
    pub property_title: String,
    pub deposit_amount: i64,
    pub rent_amount: i64,
    pub utilities_amount: i64,
    pub admin_fee: i64,
}

/// Inputs for a monthly rent checkout. Amounts in minor units.
#[derive(Debug, Clone)]
pub struct RentCheckout {
    pub transaction_id: String,
    pub user_id: String,
    pub user_email: String,
    pub user_name: String,
    pub property_title: String,
    pub rent_amount: i64,
    pub utilities_amount: i64,
}

/// The fields a webhook must carry for the state machine to act on it.
#[derive(Debug, Clone)]
pub struct PaymentNotification {
    pub transaction_reference: String,
    pub status: Option<String>,
    pub status_message: Option<String>,
}

impl PaymentNotification {
    pub fn from_payload(payload: &serde_json::Value) -> Result<Self> {
        let transaction_reference = payload
            .get("TransactionReference")
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                AppError::validation("Webhook payload is missing TransactionReference")
            })?
            .to_string();

        Ok(Self {
            transaction_reference,
            status: payload
                .get("Status")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            status_message: payload
                .get("StatusMessage")
                .and_then(|v| v.as_str())
                .map(str::to_string),
        })
    }
}

/// Bank statement reference: short type prefix plus the first characters
/// of the transaction id. Collisions across the truncated id are accepted;
/// transaction id uniqueness is enforced upstream.
pub fn bank_reference(prefix: &str, transaction_id: &str) -> String {
    let short: String = transaction_id.chars().take(8).collect();
    format!("{}-{}", prefix, short)
}
