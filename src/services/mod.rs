pub mod login_service;
pub mod otp_service;
pub mod post_service;
pub mod subscription_service;
pub mod user_service;

pub use login_service::*;
pub use otp_service::*;
pub use post_service::PostService;
pub use subscription_service::*;
pub use user_service::*;
