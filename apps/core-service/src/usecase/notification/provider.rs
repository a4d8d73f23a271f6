//! # 通知プロバイダー
//!
//! ホストフレームワークの通知モジュールから呼び出されるプロバイダー契約と、
//! メール送信 API を使う [`ResendNotificationProvider`] を定義する。
//!
//! ## 設計方針
//!
//! - **ソフトフェイル**: [`NotificationProvider::send`] は失敗してもエラーを返さず、
//!   ログを出して空の [`NotificationResult`] を返す
//! - **区別可能な失敗**: 失敗理由が必要な呼び出し側は
//!   [`ResendNotificationProvider::try_send`] を使う
//! - **1 依頼 1 送信**: リトライは行わない

use std::sync::Arc;

use async_trait::async_trait;
use marketlink_domain::{
    DomainError,
    notification::{
        EmailBody,
        EmailProviderOptions,
        EmailTemplate,
        NotificationError,
        NotificationRequest,
        NotificationResult,
        OutboundEmail,
        SentEmail,
    },
};
use marketlink_infra::notification::NotificationSender;
use marketlink_shared::{
    event_log::{error as log_error, event},
    log_business_event,
};

use super::{ResolvedTemplate, TemplateRegistry, TemplateRenderer};

/// 通知プロバイダー
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// ホストに登録する識別子
    fn identifier(&self) -> &'static str;

    /// 通知を送信する
    ///
    /// 失敗時は `id` なしの結果を返す。
    async fn send(&self, notification: &NotificationRequest) -> NotificationResult;
}

/// メール送信 API を使う通知プロバイダー
pub struct ResendNotificationProvider {
    from:      String,
    templates: TemplateRegistry,
    renderer:  Arc<TemplateRenderer>,
    sender:    Arc<dyn NotificationSender>,
}

impl ResendNotificationProvider {
    /// ホストに登録する識別子
    pub const IDENTIFIER: &'static str = "notification-resend";

    /// オプションを検証してプロバイダーを構築する
    ///
    /// `api_key` と `from` が未設定（空文字列を含む）の場合は構築に失敗する。
    pub fn new(
        options: EmailProviderOptions,
        sender: Arc<dyn NotificationSender>,
        renderer: Arc<TemplateRenderer>,
    ) -> Result<Self, DomainError> {
        options.validate()?;

        Ok(Self {
            from: options.from.unwrap_or_default(),
            templates: TemplateRegistry::new(options.html_templates),
            renderer,
            sender,
        })
    }

    /// 通知を送信し、失敗理由を区別できる形で返す
    pub async fn try_send(
        &self,
        notification: &NotificationRequest,
    ) -> Result<SentEmail, NotificationError> {
        let template = self
            .templates
            .resolve_template(&notification.template)
            .ok_or_else(|| NotificationError::TemplateNotFound {
                template: notification.template.clone(),
                valid:    EmailTemplate::valid_names(),
            })?;

        let body = match template {
            ResolvedTemplate::Static(content) => EmailBody::Html(content),
            ResolvedTemplate::Renderer(template) => {
                self.renderer.render(template, &notification.data)?
            }
        };

        let email = OutboundEmail {
            from: self.from.clone(),
            to: vec![notification.to.clone()],
            subject: self.templates.resolve_subject(&notification.template),
            body,
        };

        self.sender.send_email(&email).await
    }
}

#[async_trait]
impl NotificationProvider for ResendNotificationProvider {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    #[tracing::instrument(skip_all, fields(template = %notification.template))]
    async fn send(&self, notification: &NotificationRequest) -> NotificationResult {
        match self.try_send(notification).await {
            Ok(sent) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.entity_type = event::entity_type::EMAIL,
                    event.entity_id = %sent.id,
                    event.result = event::result::SUCCESS,
                    notification.template = %notification.template,
                    "通知メール送信成功"
                );
                NotificationResult::sent(sent.id)
            }
            Err(NotificationError::TemplateNotFound { template, valid }) => {
                tracing::error!(
                    error.category = log_error::category::CONFIGURATION,
                    error.kind = log_error::kind::TEMPLATE_NOT_FOUND,
                    template = %template,
                    valid_templates = %valid,
                    "メールテンプレートが見つかりません: {template}（有効なテンプレート: {valid}）"
                );
                NotificationResult::empty()
            }
            Err(e) => {
                let kind = match &e {
                    NotificationError::TemplateFailed(_) => log_error::kind::TEMPLATE_RENDER,
                    _ => log_error::kind::EMAIL_DELIVERY,
                };
                tracing::error!(
                    error.category = log_error::category::EXTERNAL_SERVICE,
                    error.kind = kind,
                    error = %e,
                    "メール送信に失敗"
                );
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.entity_type = event::entity_type::EMAIL,
                    event.result = event::result::FAILURE,
                    notification.template = %notification.template,
                    "通知メール送信失敗"
                );
                NotificationResult::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        io,
        sync::{Arc, Mutex},
    };

    use marketlink_domain::notification::HtmlTemplateOverride;
    use marketlink_infra::mock::MockNotificationSender;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    /// ログ出力を保持するバッファ
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn options(html_templates: HashMap<String, HtmlTemplateOverride>) -> EmailProviderOptions {
        EmailProviderOptions {
            api_key: Some("re_test".to_string()),
            from: Some("tienda@example.com".to_string()),
            html_templates,
        }
    }

    fn create_provider(
        html_templates: HashMap<String, HtmlTemplateOverride>,
    ) -> (ResendNotificationProvider, MockNotificationSender) {
        let sender = MockNotificationSender::new();
        let provider = ResendNotificationProvider::new(
            options(html_templates),
            Arc::new(sender.clone()),
            Arc::new(TemplateRenderer::new().unwrap()),
        )
        .unwrap();
        (provider, sender)
    }

    fn request(template: &str, data: serde_json::Value) -> NotificationRequest {
        NotificationRequest {
            to: "cliente@example.com".to_string(),
            template: template.to_string(),
            data,
        }
    }

    #[tokio::test]
    async fn test_組み込みテンプレートをレンダリングして1回送信する() {
        let (sut, sender) = create_provider(HashMap::new());

        let result = sut
            .send(&request(
                "order-placed",
                json!({ "customer_name": "Lucía", "order": { "display_id": 7 } }),
            ))
            .await;

        assert_eq!(result, NotificationResult::sent("mock-email-1"));
        let sent = sender.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, "tienda@example.com");
        assert_eq!(sent[0].to, vec!["cliente@example.com".to_string()]);
        assert_eq!(sent[0].subject, "Confirmación de orden");
        assert!(sent[0].body.html().contains("Lucía"));
        assert!(sent[0].body.text().is_some());
    }

    #[tokio::test]
    async fn test_上書きテンプレートはそのまま送信される() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "order-placed".to_string(),
            HtmlTemplateOverride {
                subject: Some("Gracias".to_string()),
                content: "<p>Hola {{ customer_name }}</p>".to_string(),
            },
        );
        let (sut, sender) = create_provider(overrides);

        let result = sut
            .send(&request("order-placed", json!({ "customer_name": "Lucía" })))
            .await;

        assert!(result.is_sent());
        let sent = sender.sent_emails();
        assert_eq!(sent[0].subject, "Gracias");
        assert_eq!(
            sent[0].body,
            EmailBody::Html("<p>Hola {{ customer_name }}</p>".to_string())
        );
    }

    #[tokio::test]
    async fn test_未知のテンプレートは送信せず有効な名前をログに出す() {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);
        let (sut, sender) = create_provider(HashMap::new());

        let result = sut.send(&request("welcome", json!({}))).await;

        assert_eq!(result, NotificationResult::empty());
        assert!(sender.sent_emails().is_empty());
        let logs = buffer.contents();
        assert!(logs.contains("welcome"), "{logs}");
        for name in [
            "order-placed",
            "reset-password",
            "shipping-update",
            "order-seller-notification",
        ] {
            assert!(logs.contains(name), "{name} がログに含まれること: {logs}");
        }
    }

    #[tokio::test]
    async fn test_送信失敗は空の結果になる() {
        let (sut, sender) = create_provider(HashMap::new());
        sender.fail_with("validation_error: Invalid `to` field.");

        let result = sut.send(&request("shipping-update", json!({}))).await;

        assert_eq!(result, NotificationResult::empty());
    }

    #[tokio::test]
    async fn test_レンダリング失敗は送信せず空の結果になる() {
        let (sut, sender) = create_provider(HashMap::new());

        let result = sut.send(&request("reset-password", json!("texto"))).await;

        assert_eq!(result, NotificationResult::empty());
        assert!(sender.sent_emails().is_empty());
    }

    #[tokio::test]
    async fn test_try_sendは失敗理由を区別できる() {
        let (sut, sender) = create_provider(HashMap::new());

        let not_found = sut.try_send(&request("welcome", json!(null))).await;
        assert!(matches!(
            not_found,
            Err(NotificationError::TemplateNotFound { ref template, .. }) if template == "welcome"
        ));

        sender.fail_with("boom");
        let failed = sut.try_send(&request("order-placed", json!(null))).await;
        assert!(matches!(failed, Err(NotificationError::SendFailed(_))));
    }

    #[test]
    fn test_必須オプションが欠けていると構築に失敗する() {
        let mut invalid = options(HashMap::new());
        invalid.from = None;

        let result = ResendNotificationProvider::new(
            invalid,
            Arc::new(MockNotificationSender::new()),
            Arc::new(TemplateRenderer::new().unwrap()),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_識別子() {
        let (sut, _) = create_provider(HashMap::new());
        assert_eq!(sut.identifier(), "notification-resend");
    }
}
