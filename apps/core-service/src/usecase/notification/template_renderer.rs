//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで組み込みメールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **コンテキスト**: 送信依頼の `data` オブジェクトをそのままトップレベル変数にする
//! - **HTML のみ自動エスケープ**: tera の既定どおり `.html` テンプレートだけをエスケープする

use marketlink_domain::notification::{EmailBody, EmailTemplate, NotificationError};
use tera::{Context, Tera};

/// テンプレートレンダラー
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "order_placed.html",
                    include_str!("../../../templates/emails/order_placed.html"),
                ),
                (
                    "order_placed.txt",
                    include_str!("../../../templates/emails/order_placed.txt"),
                ),
                (
                    "reset_password.html",
                    include_str!("../../../templates/emails/reset_password.html"),
                ),
                (
                    "reset_password.txt",
                    include_str!("../../../templates/emails/reset_password.txt"),
                ),
                (
                    "shipping_update.html",
                    include_str!("../../../templates/emails/shipping_update.html"),
                ),
                (
                    "shipping_update.txt",
                    include_str!("../../../templates/emails/shipping_update.txt"),
                ),
                (
                    "order_seller_notification.html",
                    include_str!("../../../templates/emails/order_seller_notification.html"),
                ),
                (
                    "order_seller_notification.txt",
                    include_str!("../../../templates/emails/order_seller_notification.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 組み込みテンプレートで本文を生成する
    ///
    /// # 引数
    ///
    /// - `template`: 組み込みテンプレート
    /// - `data`: 送信依頼の `data`（JSON オブジェクトまたは `null`）
    pub fn render(
        &self,
        template: EmailTemplate,
        data: &serde_json::Value,
    ) -> Result<EmailBody, NotificationError> {
        let context = build_context(data)?;
        let stem = template.file_stem();

        let html = self
            .engine
            .render(&format!("{stem}.html"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text = self
            .engine
            .render(&format!("{stem}.txt"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(EmailBody::Rendered { html, text })
    }
}

fn build_context(data: &serde_json::Value) -> Result<Context, NotificationError> {
    match data {
        serde_json::Value::Null => Ok(Context::new()),
        serde_json::Value::Object(_) => Context::from_value(data.clone())
            .map_err(|e| NotificationError::TemplateFailed(e.to_string())),
        other => Err(NotificationError::TemplateFailed(format!(
            "テンプレートデータは JSON オブジェクトである必要があります: {other}"
        ))),
    }
}
