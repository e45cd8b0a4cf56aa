use super::super::services::PaymentStateMachine;
use crate::core::{AppError, Result};
use crate::modules::gateway::{OzowClient, PaymentNotification};
use actix_web::{post, web, HttpResponse};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Gateway webhook endpoint
///
/// `POST /payments/notify` is the trust boundary of the whole flow:
/// nothing past the hash check runs for a payload that fails it.
pub struct WebhookController {
    state_machine: Arc<PaymentStateMachine>,
    gateway: Arc<OzowClient>,
}

impl WebhookController {
    pub fn new(state_machine: Arc<PaymentStateMachine>, gateway: Arc<OzowClient>) -> Self {
        Self {
            state_machine,
            gateway,
        }
    }
}

/// Body returned to the gateway for every accepted delivery, duplicates
/// and unmapped statuses included.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub success: bool,
    pub status: String,
}

#[post("/notify")]
pub(super) async fn notify(
    body: web::Json<Value>,
    controller: web::Data<WebhookController>,
) -> Result<HttpResponse> {
    let payload = body.into_inner();

    if !controller.gateway.verify_notification(&payload) {
        warn!(
            transaction_reference = %logged_reference(&payload),
            "Webhook rejected, hash verification failed"
        );
        return Err(AppError::verification("Hash verification failed"));
    }

    let notification = PaymentNotification::from_payload(&payload)?;
    info!(
        transaction_reference = %notification.transaction_reference,
        gateway_status = notification.status.as_deref().unwrap_or(""),
        "Verified webhook received"
    );

    let outcome = controller
        .state_machine
        .apply(
            &notification.transaction_reference,
            notification.status.as_deref().unwrap_or(""),
            notification.status_message.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(WebhookAck {
        success: true,
        status: outcome.payment().status.clone(),
    }))
}

fn logged_reference(payload: &Value) -> &str {
    payload
        .get("TransactionReference")
        .and_then(|v| v.as_str())
        .unwrap_or("<missing>")
}
