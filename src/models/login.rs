use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 登录请求解析出的浏览器与网络信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoginInfo {
    pub browser: Option<String>,
    pub version: Option<String>,
    pub os: String,
    pub device: String,
    pub ip: Option<String>,
}
