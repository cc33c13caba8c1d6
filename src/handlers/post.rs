use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::{Map, Value};

use crate::database::{documents_to_json, json_to_document};
use crate::models::EmailQuery;
use crate::services::PostService;

#[utoipa::path(
    get,
    path = "/post",
    tag = "post",
    responses(
        (status = 200, description = "All posts, newest first"),
        (status = 500, description = "Database error")
    )
)]
pub async fn get_posts(post_service: web::Data<PostService>) -> Result<HttpResponse> {
    match post_service.list_posts().await {
        Ok(posts) => Ok(HttpResponse::Ok().json(documents_to_json(posts))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/userPost",
    tag = "post",
    params(EmailQuery),
    responses(
        (status = 200, description = "Posts owned by the email, newest first"),
        (status = 500, description = "Database error")
    )
)]
pub async fn get_user_posts(
    post_service: web::Data<PostService>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse> {
    match post_service.list_user_posts(query.email.as_deref()).await {
        Ok(posts) => Ok(HttpResponse::Ok().json(documents_to_json(posts))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/post",
    tag = "post",
    responses(
        (status = 200, description = "Post stored", body = InsertAck),
        (status = 400, description = "Body is not a JSON object"),
        (status = 500, description = "Database error")
    )
)]
pub async fn create_post(
    post_service: web::Data<PostService>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse> {
    let post = match json_to_document(body.into_inner()) {
        Ok(post) => post,
        Err(e) => return Ok(e.error_response()),
    };

    match post_service.create_post(post).await {
        Ok(ack) => Ok(HttpResponse::Ok().json(ack)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn post_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/post", web::get().to(get_posts))
        .route("/post", web::post().to(create_post))
        .route("/userPost", web::get().to(get_user_posts));
}
