//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 開発環境では Mailpit（ローカル SMTP サーバー）に接続する。

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, MultiPart, SinglePart, header::ContentType},
};
use marketlink_domain::notification::{EmailBody, NotificationError, OutboundEmail, SentEmail};
use uuid::Uuid;

use super::NotificationSender;

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// 送信元アドレスは [`OutboundEmail::from`] を使う。
pub struct SmtpNotificationSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host:      String,
}

impl SmtpNotificationSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `host`: SMTP サーバーのホスト名（例: "localhost"）
    /// - `port`: SMTP サーバーのポート番号（例: 1025 for Mailpit）
    pub fn new(host: &str, port: u16) -> Self {
        // builder_dangerous: TLS なしで接続（Mailpit 等のローカル SMTP 向け）
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self {
            transport,
            host: host.to_string(),
        }
    }

    fn build_message(&self, email: &OutboundEmail) -> Result<(Message, String), NotificationError> {
        let message_id = format!("<{}@{}>", Uuid::new_v4(), self.host);

        let mut builder = Message::builder()
            .message_id(Some(message_id.clone()))
            .from(parse_mailbox(&email.from, "送信元")?)
            .subject(&email.subject);
        for to in &email.to {
            builder = builder.to(parse_mailbox(to, "宛先")?);
        }

        let message = match &email.body {
            EmailBody::Html(html) => builder.singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_HTML)
                    .body(html.clone()),
            ),
            EmailBody::Rendered { html, text } => builder.multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html.clone()),
                    ),
            ),
        }
        .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))?;

        Ok((message, message_id))
    }
}

fn parse_mailbox(address: &str, label: &str) -> Result<Mailbox, NotificationError> {
    address
        .parse()
        .map_err(|e| NotificationError::SendFailed(format!("{label}アドレス不正: {e}")))
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_email(&self, email: &OutboundEmail) -> Result<SentEmail, NotificationError> {
        let (message, message_id) = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        Ok(SentEmail { id: message_id })
    }
}
