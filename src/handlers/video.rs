use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::error::AppError;

/// videos 集合从未初始化，每次调用都会失败
#[utoipa::path(
    get,
    path = "/video",
    tag = "post",
    responses(
        (status = 500, description = "Videos collection is not configured")
    )
)]
pub async fn get_videos() -> Result<HttpResponse> {
    Ok(AppError::InternalError("videos collection is not initialized".to_string()).error_response())
}

pub fn video_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/video", web::get().to(get_videos));
}
