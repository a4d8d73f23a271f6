//! Resend 通知送信実装
//!
//! Resend の HTTP API（`POST /emails`）でメールを送信する。
//! 本番環境で使用する。

use async_trait::async_trait;
use marketlink_domain::notification::{NotificationError, OutboundEmail, SentEmail};
use serde::{Deserialize, Serialize};

use super::NotificationSender;
use crate::error::read_error_body;

/// Resend API の既定ベース URL
pub const DEFAULT_RESEND_BASE_URL: &str = "https://api.resend.com";

/// Resend 通知送信
///
/// `reqwest::Client` をラップし、API キーを Bearer トークンとして送る。
#[derive(Clone)]
pub struct ResendNotificationSender {
    base_url: String,
    api_key:  String,
    client:   reqwest::Client,
}

impl ResendNotificationSender {
    /// 新しい Resend 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `api_key`: Resend の API キー
    /// - `base_url`: API のベース URL（例: [`DEFAULT_RESEND_BASE_URL`]）
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key:  api_key.into(),
            client:   reqwest::Client::new(),
        }
    }
}

/// `POST /emails` のリクエストボディ
#[derive(Debug, Serialize)]
struct SendEmailBody<'a> {
    from:    &'a str,
    to:      &'a [String],
    subject: &'a str,
    html:    &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text:    Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Resend のエラーレスポンス
#[derive(Debug, Deserialize)]
struct ResendErrorBody {
    name:    String,
    message: String,
}

#[async_trait]
impl NotificationSender for ResendNotificationSender {
    async fn send_email(&self, email: &OutboundEmail) -> Result<SentEmail, NotificationError> {
        let url = format!("{}/emails", self.base_url);
        let body = SendEmailBody {
            from:    &email.from,
            to:      &email.to,
            subject: &email.subject,
            html:    email.body.html(),
            text:    email.body.text(),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(format!("Resend 通信失敗: {e}")))?;

        let status = response.status();
        if status.is_success() {
            let sent = response
                .json::<SendEmailResponse>()
                .await
                .map_err(|e| NotificationError::SendFailed(format!("レスポンス解析失敗: {e}")))?;
            return Ok(SentEmail { id: sent.id });
        }

        let text = read_error_body(response).await;
        let detail = match serde_json::from_str::<ResendErrorBody>(&text) {
            Ok(error) => format!("{}: {}", error.name, error.message),
            Err(_) => format!("予期しないステータス {status}: {text}"),
        };

        Err(NotificationError::SendFailed(detail))
    }
}

#[cfg(test)]
mod tests {
    use marketlink_domain::notification::EmailBody;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResendNotificationSender>();
    }

    #[test]
    fn test_静的htmlではtextを送らない() {
        let email = OutboundEmail {
            from:    "tienda@example.com".to_string(),
            to:      vec!["cliente@example.com".to_string()],
            subject: "Nuevo pedido".to_string(),
            body:    EmailBody::Html("<p>Hola</p>".to_string()),
        };
        let body = SendEmailBody {
            from:    &email.from,
            to:      &email.to,
            subject: &email.subject,
            html:    email.body.html(),
            text:    email.body.text(),
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "from": "tienda@example.com",
                "to": ["cliente@example.com"],
                "subject": "Nuevo pedido",
                "html": "<p>Hola</p>"
            })
        );
    }

    #[test]
    fn test_ベースurl末尾のスラッシュを除去する() {
        let sender = ResendNotificationSender::new("re_test", "http://localhost:8025/");
        assert_eq!(sender.base_url, "http://localhost:8025");
    }
}
