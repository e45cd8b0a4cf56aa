use super::super::models::{HistoryQuery, MoveInPaymentRequest, RentPaymentRequest};
use super::super::services::PaymentService;
use crate::core::Result;
use actix_web::{get, post, web, HttpResponse};
use std::sync::Arc;
use tracing::info;

/// Payment initiation and history endpoints
///
/// - `POST /payments/move-in` - start a move-in checkout
/// - `POST /payments/rent` - start a monthly rent checkout
/// - `GET /payments/history` - list payments for a tenant or landlord
pub struct PaymentController {
    payment_service: Arc<PaymentService>,
}

impl PaymentController {
    pub fn new(payment_service: Arc<PaymentService>) -> Self {
        Self { payment_service }
    }
}

#[post("/move-in")]
pub(super) async fn start_move_in(
    body: web::Json<MoveInPaymentRequest>,
    controller: web::Data<PaymentController>,
) -> Result<HttpResponse> {
    let request = body.into_inner();
    info!(
        tenant_id = %request.user_id,
        property_id = %request.property_id,
        "Move-in payment requested"
    );

    let response = controller
        .payment_service
        .start_move_in_payment(request)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/rent")]
pub(super) async fn start_rent(
    body: web::Json<RentPaymentRequest>,
    controller: web::Data<PaymentController>,
) -> Result<HttpResponse> {
    let request = body.into_inner();
    info!(
        tenant_id = %request.user_id,
        property_id = %request.property_id,
        "Rent payment requested"
    );

    let response = controller.payment_service.start_rent_payment(request).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/history")]
pub(super) async fn history(
    query: web::Query<HistoryQuery>,
    controller: web::Data<PaymentController>,
) -> Result<HttpResponse> {
    let response = controller.payment_service.history(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
