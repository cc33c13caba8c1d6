use std::sync::Arc;

use crate::error::AppResult;
use crate::external::{CheckoutProvider, OutgoingEmail};
use crate::models::{CheckoutResponse, SubscriptionStatus};
use crate::tasks::MailQueue;

#[derive(Clone)]
pub struct SubscriptionService {
    checkout: Arc<dyn CheckoutProvider>,
    mail_queue: MailQueue,
}

impl SubscriptionService {
    pub fn new(checkout: Arc<dyn CheckoutProvider>, mail_queue: MailQueue) -> Self {
        Self {
            checkout,
            mail_queue,
        }
    }

    /// 为 `plan` 创建订阅结账会话，并把套餐说明邮件放入发送队列
    pub async fn create_checkout_session(
        &self,
        plan: &str,
        email: &str,
    ) -> AppResult<CheckoutResponse> {
        let id = self
            .checkout
            .create_subscription_checkout(plan, email)
            .await?;

        self.mail_queue.submit(OutgoingEmail::new(
            email,
            "Subscription Plan Details",
            format!("Thank you for subscribing to our {plan} plan. Here are your plan details..."),
        ));

        Ok(CheckoutResponse { id })
    }

    /// 订阅状态占位接口，始终返回已订阅，不查询支付方
    pub fn check_subscription(&self, uid: Option<&str>) -> SubscriptionStatus {
        log::debug!("Subscription check for uid {uid:?}");
        SubscriptionStatus {
            is_subscribed: true,
        }
    }
}
