use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendOtpRequest {
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyOtpRequest {
    pub email: String,
    #[schema(value_type = String, example = "123456")]
    pub otp: SuppliedCode,
}

/// 客户端提交的验证码，可能是 `123456` 也可能是 `"123456"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SuppliedCode {
    Number(f64),
    Text(String),
}

impl SuppliedCode {
    /// 按数值宽松比较
    pub fn matches(&self, code: u32) -> bool {
        let expected = f64::from(code);
        match self {
            SuppliedCode::Number(n) => *n == expected,
            SuppliedCode::Text(s) => s.trim().parse::<f64>().is_ok_and(|n| n == expected),
        }
    }
}
