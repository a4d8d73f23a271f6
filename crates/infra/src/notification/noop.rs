//! Noop 通知送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! テスト環境や通知無効化時に使用する。

use async_trait::async_trait;
use marketlink_domain::notification::{NotificationError, OutboundEmail, SentEmail};
use uuid::Uuid;

use super::NotificationSender;

/// Noop 通知送信（ログ出力のみ）
#[derive(Debug, Clone, Default)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(&self, email: &OutboundEmail) -> Result<SentEmail, NotificationError> {
        let id = format!("noop-{}", Uuid::now_v7());
        tracing::info!(
            to = ?email.to,
            subject = %email.subject,
            message_id = %id,
            "Noop: メール送信をスキップ"
        );
        Ok(SentEmail { id })
    }
}
