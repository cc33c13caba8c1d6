use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::external::{Mailer, OutgoingEmail};
use crate::models::SuppliedCode;
use crate::utils::generate_six_digit_code;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpRecord {
    pub code: u32,
    pub issued_at: DateTime<Utc>,
}

/// 验证码存储，每个邮箱最多一条
#[async_trait]
pub trait OtpStore: Send + Sync {
    async fn get(&self, email: &str) -> Option<OtpRecord>;

    /// 覆盖该邮箱已有的记录
    async fn set(&self, email: &str, record: OtpRecord);

    async fn delete(&self, email: &str) -> Option<OtpRecord>;

    /// 在同一次加锁内检查并删除：`pred` 为真时移除并返回记录，否则保持不变
    async fn take_if(
        &self,
        email: &str,
        pred: &(dyn for<'r> Fn(&'r OtpRecord) -> bool + Send + Sync),
    ) -> Option<OtpRecord>;
}

#[derive(Clone, Default)]
pub struct MemoryOtpStore {
    records: Arc<RwLock<HashMap<String, OtpRecord>>>,
}

impl MemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OtpStore for MemoryOtpStore {
    async fn get(&self, email: &str) -> Option<OtpRecord> {
        self.records.read().await.get(email).cloned()
    }

    async fn set(&self, email: &str, record: OtpRecord) {
        self.records.write().await.insert(email.to_string(), record);
    }

    async fn delete(&self, email: &str) -> Option<OtpRecord> {
        self.records.write().await.remove(email)
    }

    async fn take_if(
        &self,
        email: &str,
        pred: &(dyn for<'r> Fn(&'r OtpRecord) -> bool + Send + Sync),
    ) -> Option<OtpRecord> {
        let mut records = self.records.write().await;
        if records.get(email).is_some_and(|record| pred(record)) {
            records.remove(email)
        } else {
            None
        }
    }
}

const INVALID_OTP: &str = "Invalid OTP";

/// 邮箱验证码的签发与校验，验证码只能使用一次
#[derive(Clone)]
pub struct OtpService {
    store: Arc<dyn OtpStore>,
    mailer: Arc<dyn Mailer>,
    ttl: Option<Duration>,
}

impl OtpService {
    /// `ttl_seconds == 0` 时验证码不过期，直到被使用或被新验证码覆盖
    pub fn new(store: Arc<dyn OtpStore>, mailer: Arc<dyn Mailer>, ttl_seconds: u64) -> Self {
        let ttl = i64::try_from(ttl_seconds)
            .ok()
            .filter(|secs| *secs > 0)
            .and_then(Duration::try_seconds);
        Self { store, mailer, ttl }
    }

    /// 生成验证码并发送邮件。先保存再发送，发送失败时验证码仍然有效
    pub async fn issue(&self, email: &str) -> AppResult<()> {
        let code = generate_six_digit_code();
        self.store
            .set(
                email,
                OtpRecord {
                    code,
                    issued_at: Utc::now(),
                },
            )
            .await;

        let message = OutgoingEmail::new(
            email,
            "Your OTP Code",
            format!("Your OTP code is {code}"),
        );
        self.mailer.send(message).await?;

        log::info!("OTP sent to {email}");
        Ok(())
    }

    /// 校验并消费验证码。输错不会删除已保存的验证码
    pub async fn verify(&self, email: &str, supplied: &SuppliedCode) -> AppResult<()> {
        // 过期的验证码直接清除
        if self
            .store
            .take_if(email, &|record: &OtpRecord| self.is_expired(record))
            .await
            .is_some()
        {
            log::info!("Expired OTP discarded for {email}");
            return Err(AppError::AuthError(INVALID_OTP.to_string()));
        }

        // 比较与删除在同一把锁内完成，并发的重新签发不会被误删
        let taken = self
            .store
            .take_if(email, &|record: &OtpRecord| {
                !self.is_expired(record) && supplied.matches(record.code)
            })
            .await;

        match taken {
            Some(_) => {
                log::info!("OTP verified for {email}");
                Ok(())
            }
            None => Err(AppError::AuthError(INVALID_OTP.to_string())),
        }
    }

    fn is_expired(&self, record: &OtpRecord) -> bool {
        self.ttl
            .is_some_and(|ttl| Utc::now().signed_duration_since(record.issued_at) > ttl)
    }
}
