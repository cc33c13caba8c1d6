//! 后台任务
//!
//! 附带发送的邮件（结账后的套餐说明）交给邮件队列，请求无需等待 SMTP。
//! 启动时调用一次 `MailQueue::spawn`

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::external::{Mailer, OutgoingEmail};

/// 投递失败邮件的日志 target
pub const DEAD_LETTER_TARGET: &str = "dead_letter";

#[derive(Clone)]
pub struct MailQueue {
    sender: mpsc::UnboundedSender<OutgoingEmail>,
}

impl MailQueue {
    /// 启动投递任务，所有队列句柄释放后退出
    pub fn spawn(mailer: Arc<dyn Mailer>) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<OutgoingEmail>();

        tokio::spawn(async move {
            while let Some(email) = receiver.recv().await {
                let to = email.to.clone();
                let subject = email.subject.clone();
                // 失败不重试，记录到 dead_letter
                if let Err(e) = mailer.send(email).await {
                    log::error!(
                        target: DEAD_LETTER_TARGET,
                        "Undelivered email \"{subject}\" to {to}: {e}"
                    );
                }
            }
            log::debug!("Mail queue closed");
        });

        Self { sender }
    }

    /// 放入队列，不等待投递结果
    pub fn submit(&self, email: OutgoingEmail) {
        if let Err(mpsc::error::SendError(email)) = self.sender.send(email) {
            log::error!(
                target: DEAD_LETTER_TARGET,
                "Mail queue stopped, dropping \"{}\" to {}",
                email.subject,
                email.to
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingMailer;
    use std::time::Duration;

    async fn wait_for(mailer: &RecordingMailer, count: usize) {
        for _ in 0..100 {
            if mailer.sent().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[tokio::test]
    async fn test_submitted_email_is_delivered_in_background() {
        let mailer = RecordingMailer::default();
        let queue = MailQueue::spawn(Arc::new(mailer.clone()));

        queue.submit(OutgoingEmail::new("ann@example.com", "Hello", "Body"));
        wait_for(&mailer, 1).await;

        assert_eq!(
            mailer.sent(),
            vec![OutgoingEmail::new("ann@example.com", "Hello", "Body")]
        );
    }

    #[tokio::test]
    async fn test_delivery_failure_does_not_stop_worker() {
        let mailer = RecordingMailer::failing_first(1);
        let queue = MailQueue::spawn(Arc::new(mailer.clone()));

        queue.submit(OutgoingEmail::new("ann@example.com", "One", "Body"));
        queue.submit(OutgoingEmail::new("bob@example.com", "Two", "Body"));
        wait_for(&mailer, 1).await;

        assert_eq!(
            mailer.sent(),
            vec![OutgoingEmail::new("bob@example.com", "Two", "Body")]
        );
    }
}
