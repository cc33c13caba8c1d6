use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::{Map, Value};

use crate::database::{documents_to_json, json_to_document};
use crate::models::EmailQuery;
use crate::services::UserService;

#[utoipa::path(
    get,
    path = "/user",
    tag = "user",
    responses(
        (status = 200, description = "All users"),
        (status = 500, description = "Database error")
    )
)]
pub async fn get_users(user_service: web::Data<UserService>) -> Result<HttpResponse> {
    match user_service.list_users().await {
        Ok(users) => Ok(HttpResponse::Ok().json(documents_to_json(users))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/loggedInUser",
    tag = "user",
    params(EmailQuery),
    responses(
        (status = 200, description = "Users matching the email (zero or more)"),
        (status = 500, description = "Database error")
    )
)]
pub async fn get_logged_in_user(
    user_service: web::Data<UserService>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse> {
    match user_service.find_by_email(query.email.as_deref()).await {
        Ok(users) => Ok(HttpResponse::Ok().json(documents_to_json(users))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "user",
    responses(
        (status = 200, description = "User stored", body = InsertAck),
        (status = 400, description = "Body is not a JSON object"),
        (status = 500, description = "Database error")
    )
)]
pub async fn register(
    user_service: web::Data<UserService>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse> {
    let user = match json_to_document(body.into_inner()) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match user_service.register(user).await {
        Ok(ack) => Ok(HttpResponse::Ok().json(ack)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/userUpdates/{email}",
    tag = "user",
    params(
        ("email" = String, Path, description = "Email of the profile to update")
    ),
    responses(
        (status = 200, description = "Profile updated or created", body = UpdateAck),
        (status = 400, description = "Body is not a JSON object"),
        (status = 500, description = "Database error")
    )
)]
pub async fn update_user(
    user_service: web::Data<UserService>,
    path: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse> {
    let email = path.into_inner();
    let profile = match json_to_document(body.into_inner()) {
        Ok(profile) => profile,
        Err(e) => return Ok(e.error_response()),
    };

    match user_service.upsert_profile(&email, profile).await {
        Ok(ack) => Ok(HttpResponse::Ok().json(ack)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/user", web::get().to(get_users))
        .route("/loggedInUser", web::get().to(get_logged_in_user))
        .route("/register", web::post().to(register))
        .route("/userUpdates/{email}", web::patch().to(update_user));
}
