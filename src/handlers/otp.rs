use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::OtpService;

#[utoipa::path(
    post,
    path = "/send-otp",
    tag = "otp",
    request_body = SendOtpRequest,
    responses(
        (status = 200, description = "OTP sent to email", body = MessageResponse),
        (status = 500, description = "Error sending email", body = ApiError)
    )
)]
pub async fn send_otp(
    otp_service: web::Data<OtpService>,
    request: web::Json<SendOtpRequest>,
) -> Result<HttpResponse> {
    match otp_service.issue(&request.email).await {
        Ok(()) => Ok(HttpResponse::Ok().json(MessageResponse::new("OTP sent to email"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/verify-otp",
    tag = "otp",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "OTP accepted and consumed", body = MessageResponse),
        (status = 401, description = "Invalid OTP", body = ApiError)
    )
)]
pub async fn verify_otp(
    otp_service: web::Data<OtpService>,
    request: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse> {
    match otp_service.verify(&request.email, &request.otp).await {
        Ok(()) => Ok(HttpResponse::Ok().json(MessageResponse::new("OTP verified"))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn otp_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/send-otp", web::post().to(send_otp))
        .route("/verify-otp", web::post().to(verify_otp));
}
