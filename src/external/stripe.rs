use async_trait::async_trait;
use stripe::{
    CheckoutSession, CheckoutSessionMode, Client, CreateCheckoutSession,
    CreateCheckoutSessionLineItems, CreateCheckoutSessionPaymentMethodTypes,
};

use crate::config::StripeConfig;
use crate::error::AppResult;

/// 可创建订阅结账会话的支付服务
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// 返回支付方的会话 ID
    async fn create_subscription_checkout(
        &self,
        plan: &str,
        customer_email: &str,
    ) -> AppResult<String>;
}

#[derive(Clone)]
pub struct StripeService {
    client: Client,
    config: StripeConfig,
}

impl StripeService {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            client: Client::new(config.secret_key.clone()),
            config,
        }
    }

    fn checkout_params<'a>(&'a self, plan: &str, customer_email: &'a str) -> CreateCheckoutSession<'a> {
        let mut params = CreateCheckoutSession::new();
        params.mode = Some(CheckoutSessionMode::Subscription);
        params.customer_email = Some(customer_email);
        params.payment_method_types = Some(vec![CreateCheckoutSessionPaymentMethodTypes::Card]);
        params.line_items = Some(vec![CreateCheckoutSessionLineItems {
            // Stripe 后台配置的 price id
            price: Some(plan.to_string()),
            quantity: Some(1),
            ..Default::default()
        }]);
        params.success_url = Some(&self.config.success_url);
        params.cancel_url = Some(&self.config.cancel_url);
        params
    }
}

#[async_trait]
impl CheckoutProvider for StripeService {
    async fn create_subscription_checkout(
        &self,
        plan: &str,
        customer_email: &str,
    ) -> AppResult<String> {
        let params = self.checkout_params(plan, customer_email);
        let session = CheckoutSession::create(&self.client, params).await?;
        log::info!(
            "Stripe checkout session created: {} (plan {plan})",
            session.id
        );
        Ok(session.id.to_string())
    }
}
