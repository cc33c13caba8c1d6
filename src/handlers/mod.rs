pub mod login;
pub mod otp;
pub mod post;
pub mod subscription;
pub mod user;
pub mod video;

pub use login::login_config;
pub use otp::otp_config;
pub use post::post_config;
pub use subscription::subscription_config;
pub use user::user_config;
pub use video::video_config;

use actix_web::{HttpResponse, web};

pub async fn index() -> HttpResponse {
    HttpResponse::Ok().body("Hello World!")
}

pub fn index_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
}

/// 在根路径下注册全部路由
pub fn routes(cfg: &mut web::ServiceConfig) {
    index_config(cfg);
    post_config(cfg);
    user_config(cfg);
    video_config(cfg);
    login_config(cfg);
    otp_config(cfg);
    subscription_config(cfg);
}
