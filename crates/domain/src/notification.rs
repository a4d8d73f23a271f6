//! # 通知
//!
//! トランザクションメール通知のドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 |
//! |---|------------|
//! | [`NotificationRequest`] | ホストフレームワークから届く送信依頼 |
//! | [`EmailTemplate`] | 組み込みテンプレート（4 種類） |
//! | [`TemplateKey`] | 依頼されたテンプレート名の解釈結果 |
//! | [`NotificationResult`] | 送信結果。`id` なしは「送信されなかった」 |
//!
//! ## 設計方針
//!
//! - **閉じた enum**: 組み込みテンプレートは [`EmailTemplate`] で列挙し、
//!   未知の名前は [`TemplateKey::Unknown`] として明示的に表現する
//! - **ソフトフェイル**: 送信時の失敗は空の [`NotificationResult`] で表現する。
//!   区別が必要な呼び出し側には [`NotificationError`] を返す経路も用意する
//! - **起動時検証**: [`EmailProviderOptions::validate`] は送信前に一度だけ実行する

use std::{collections::HashMap, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{IntoEnumIterator, IntoStaticStr};
use thiserror::Error;

use crate::DomainError;

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// 依頼されたテンプレートが存在しない
    #[error("メールテンプレートが見つかりません: {template}（有効なテンプレート: {valid}）")]
    TemplateNotFound {
        /// 依頼されたテンプレート名
        template: String,
        /// 有効なテンプレート名（カンマ区切り）
        valid:    String,
    },

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),

    /// メール送信 API がエラーを返した、または通信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),
}

/// 組み込みメールテンプレート
///
/// 文字列表現はケバブケース（`order-placed` など）。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum EmailTemplate {
    /// 注文確定: 購入者に送信
    OrderPlaced,
    /// パスワード再設定
    ResetPassword,
    /// 配送状況の更新
    ShippingUpdate,
    /// 新規注文: 出品者に送信
    #[strum(serialize = "order-seller-notification")]
    #[serde(rename = "order-seller-notification")]
    SellerNotification,
}

impl EmailTemplate {
    /// 有効なテンプレート名をカンマ区切りで返す
    ///
    /// テンプレートが見つからない場合のログに使う。
    pub fn valid_names() -> String {
        Self::iter()
            .map(<&'static str>::from)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// テンプレートファイル名の語幹（`order_placed` など）
    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::OrderPlaced => "order_placed",
            Self::ResetPassword => "reset_password",
            Self::ShippingUpdate => "shipping_update",
            Self::SellerNotification => "order_seller_notification",
        }
    }
}

/// 依頼されたテンプレート名の解釈結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateKey {
    /// 組み込みテンプレート
    Builtin(EmailTemplate),
    /// 組み込みに存在しない名前（設定で上書きされている可能性がある）
    Unknown(String),
}

impl TemplateKey {
    pub fn parse(name: &str) -> Self {
        EmailTemplate::from_str(name)
            .map(Self::Builtin)
            .unwrap_or_else(|_| Self::Unknown(name.to_string()))
    }

    /// 設定で件名が与えられなかった場合の既定件名
    pub fn default_subject(&self) -> &'static str {
        match self {
            Self::Builtin(EmailTemplate::OrderPlaced) => "Confirmación de orden",
            Self::Builtin(EmailTemplate::ResetPassword) => "Restablece tu contraseña",
            Self::Builtin(EmailTemplate::ShippingUpdate) => "Actualización de envío",
            Self::Builtin(EmailTemplate::SellerNotification) | Self::Unknown(_) => "Nuevo pedido",
        }
    }
}

/// 通知送信依頼
///
/// ホストフレームワークが所有する読み取り専用の入力。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    /// 送信先メールアドレス
    pub to:       String,
    /// テンプレート名
    pub template: String,
    /// テンプレートに渡す任意の構造化データ
    #[serde(default)]
    pub data:     serde_json::Value,
}

/// 通知送信結果
///
/// `id` が `None` の場合は送信されなかったことを表す（`{}` にシリアライズされる）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResult {
    /// プロバイダーが採番したメッセージ ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl NotificationResult {
    /// 送信されなかったことを表す空の結果
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn sent(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }

    pub fn is_sent(&self) -> bool {
        self.id.is_some()
    }
}

/// 設定で与えられる HTML テンプレートの上書き
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlTemplateOverride {
    /// 件名（省略時は既定件名）
    #[serde(default)]
    pub subject: Option<String>,
    /// HTML 本文（変数展開なしでそのまま送信される）
    pub content: String,
}

/// メール通知プロバイダーの設定
///
/// 外部から与えられる値をそのまま受け取り、[`validate`](Self::validate) で検証する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EmailProviderOptions {
    /// メール送信 API の API キー（必須）
    #[serde(default)]
    pub api_key:        Option<String>,
    /// 送信元アドレス（必須）
    #[serde(default)]
    pub from:           Option<String>,
    /// テンプレート名ごとの HTML 上書き
    #[serde(default)]
    pub html_templates: HashMap<String, HtmlTemplateOverride>,
}

impl EmailProviderOptions {
    /// 必須オプションの存在を検証する
    ///
    /// 空文字列も未設定として扱う。
    pub fn validate(&self) -> Result<(), DomainError> {
        if is_blank(self.api_key.as_deref()) {
            return Err(DomainError::InvalidData(
                "プロバイダーオプション `api_key` は必須です".to_string(),
            ));
        }
        if is_blank(self.from.as_deref()) {
            return Err(DomainError::InvalidData(
                "プロバイダーオプション `from` は必須です".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

/// メール本文
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailBody {
    /// 設定で与えられた静的 HTML
    Html(String),
    /// 組み込みテンプレートのレンダリング結果
    Rendered {
        /// HTML 本文
        html: String,
        /// プレーンテキスト本文
        text: String,
    },
}

impl EmailBody {
    pub fn html(&self) -> &str {
        match self {
            Self::Html(html) | Self::Rendered { html, .. } => html,
        }
    }

    /// プレーンテキスト本文（静的 HTML の場合は `None`）
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Html(_) => None,
            Self::Rendered { text, .. } => Some(text),
        }
    }
}

/// メール送信 API に渡すリクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    /// 送信元アドレス
    pub from:    String,
    /// 送信先アドレス（通知では常に 1 件）
    pub to:      Vec<String>,
    /// 件名
    pub subject: String,
    /// 本文
    pub body:    EmailBody,
}

/// 送信に成功したメール
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    /// プロバイダーが採番したメッセージ ID
    pub id: String,
}
