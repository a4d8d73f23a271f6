//! # メール送信
//!
//! トランザクションメールの送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **3 つの実装**: Resend API（本番用）、SMTP（Mailpit 開発用）、Noop（テスト用）
//! - **環境変数切替**: `NOTIFICATION_BACKEND` でランタイム選択

mod noop;
mod resend;
mod smtp;

use async_trait::async_trait;
use marketlink_domain::notification::{NotificationError, OutboundEmail, SentEmail};
pub use noop::NoopNotificationSender;
pub use resend::{DEFAULT_RESEND_BASE_URL, ResendNotificationSender};
pub use smtp::SmtpNotificationSender;

/// メール送信トレイト
///
/// 1 回の呼び出しで 1 通のメールを送信する。リトライは行わない。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信し、プロバイダーが採番したメッセージ ID を返す
    async fn send_email(&self, email: &OutboundEmail) -> Result<SentEmail, NotificationError>;
}
