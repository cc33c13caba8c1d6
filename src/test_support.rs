//! 测试用的邮件与支付替身

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::external::{CheckoutProvider, Mailer, OutgoingEmail};

#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
    fail: bool,
    failures_left: Arc<AtomicUsize>,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// 前 `count` 次发送失败，之后正常记录
    pub fn failing_first(count: usize) -> Self {
        Self {
            failures_left: Arc::new(AtomicUsize::new(count)),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// 最近一封 "Your OTP code is N" 邮件中的验证码
    pub fn last_code(&self) -> u32 {
        let sent = self.sent();
        let body = &sent.last().expect("no email sent").body;
        body.rsplit(' ').next().unwrap().parse().unwrap()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> AppResult<()> {
        let scripted_failure = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if self.fail || scripted_failure {
            return Err(AppError::MailError("smtp unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct FakeCheckout {
    fail: bool,
}

impl FakeCheckout {
    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl CheckoutProvider for FakeCheckout {
    async fn create_subscription_checkout(
        &self,
        plan: &str,
        _customer_email: &str,
    ) -> AppResult<String> {
        if self.fail {
            return Err(AppError::InternalError("payment provider down".to_string()));
        }
        Ok(format!("cs_test_{plan}"))
    }
}
