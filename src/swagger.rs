use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::database::{InsertAck, UpdateAck};
use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::post::get_posts,
        handlers::post::get_user_posts,
        handlers::post::create_post,
        handlers::user::get_users,
        handlers::user::get_logged_in_user,
        handlers::user::register,
        handlers::user::update_user,
        handlers::video::get_videos,
        handlers::login::log_login,
        handlers::otp::send_otp,
        handlers::otp::verify_otp,
        handlers::subscription::create_checkout_session,
        handlers::subscription::check_subscription,
    ),
    components(
        schemas(
            InsertAck,
            UpdateAck,
            LoginInfo,
            SendOtpRequest,
            VerifyOtpRequest,
            CheckoutRequest,
            CheckoutResponse,
            SubscriptionStatus,
            MessageResponse,
            ApiError,
        )
    ),
    tags(
        (name = "post", description = "Post documents"),
        (name = "user", description = "User documents"),
        (name = "login", description = "Login device fingerprinting"),
        (name = "otp", description = "One-time password email verification"),
        (name = "subscription", description = "Stripe subscription checkout"),
    ),
    info(
        title = "Postboard Backend API",
        version = "0.1.0",
        description = "Postboard Backend REST API documentation"
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
