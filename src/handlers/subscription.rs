use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::SubscriptionService;

#[utoipa::path(
    post,
    path = "/create-checkout-session",
    tag = "subscription",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Stripe checkout session created", body = CheckoutResponse),
        (status = 502, description = "Payment provider error", body = ApiError)
    )
)]
pub async fn create_checkout_session(
    subscription_service: web::Data<SubscriptionService>,
    request: web::Json<CheckoutRequest>,
) -> Result<HttpResponse> {
    match subscription_service
        .create_checkout_session(&request.plan, &request.email)
        .await
    {
        Ok(session) => Ok(HttpResponse::Ok().json(session)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/check-subscription",
    tag = "subscription",
    params(SubscriptionQuery),
    responses(
        (status = 200, description = "Subscription status", body = SubscriptionStatus)
    )
)]
pub async fn check_subscription(
    subscription_service: web::Data<SubscriptionService>,
    query: web::Query<SubscriptionQuery>,
) -> Result<HttpResponse> {
    let status = subscription_service.check_subscription(query.uid.as_deref());
    Ok(HttpResponse::Ok().json(status))
}

pub fn subscription_config(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/create-checkout-session",
        web::post().to(create_checkout_session),
    )
    .route("/check-subscription", web::get().to(check_subscription));
}
