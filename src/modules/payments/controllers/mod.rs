pub mod payment_controller;
pub mod webhook_controller;

pub use payment_controller::PaymentController;
pub use webhook_controller::WebhookController;

use super::services::{PaymentService, PaymentStateMachine};
use crate::modules::gateway::OzowClient;
use actix_web::web;
use std::sync::Arc;

/// Mounts every payment route under one `/payments` scope. The notify
/// webhook shares the scope because the gateway is configured with
/// `{base}/payments/notify`.
pub fn configure(
    cfg: &mut web::ServiceConfig,
    payment_service: Arc<PaymentService>,
    state_machine: Arc<PaymentStateMachine>,
    gateway: Arc<OzowClient>,
) {
    cfg.service(
        web::scope("/payments")
            .app_data(web::Data::new(PaymentController::new(payment_service)))
            .app_data(web::Data::new(WebhookController::new(state_machine, gateway)))
            .service(payment_controller::start_move_in)
            .service(payment_controller::start_rent)
            .service(payment_controller::history)
            .service(webhook_controller::notify),
    );
}
