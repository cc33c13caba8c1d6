pub mod common;
pub mod login;
pub mod otp;
pub mod subscription;

pub use common::*;
pub use login::*;
pub use otp::*;
pub use subscription::*;
