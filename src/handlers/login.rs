use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Result, web};

use crate::services::derive_login_info;

#[utoipa::path(
    post,
    path = "/log-login",
    tag = "login",
    responses(
        (status = 200, description = "Browser, OS, device and IP of the caller", body = LoginInfo)
    )
)]
pub async fn log_login(req: HttpRequest) -> Result<HttpResponse> {
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let forwarded_for = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok());
    let peer_addr = req.peer_addr().map(|addr| addr.ip().to_string());

    let login_info = derive_login_info(user_agent, forwarded_for, peer_addr);
    log::info!("User login info: {login_info:?}");

    Ok(HttpResponse::Ok().json(login_info))
}

pub fn login_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/log-login", web::post().to(log_login));
}
