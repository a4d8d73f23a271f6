//! # Core Service 設定
//!
//! 環境変数から Core Service サーバーの設定を読み込む。
//!
//! 読み込みは [`CoreConfig::from_lookup`] に集約し、テストでは環境変数の代わりに
//! 任意の検索関数を渡す。

use std::{collections::HashMap, env};

use marketlink_domain::notification::{EmailProviderOptions, HtmlTemplateOverride};
use marketlink_infra::{notification::DEFAULT_RESEND_BASE_URL, search_index::AlgoliaConfig};
use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 環境変数の値が不正
    #[error("{name} の値が不正です: {reason}")]
    Invalid {
        name:   &'static str,
        reason: String,
    },
}

/// Core Service サーバーの設定
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// 通知設定
    pub notification: NotificationConfig,
    /// 検索インデックス設定
    pub search_index: AlgoliaConfig,
}

/// メール送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationBackend {
    /// Resend API 経由で送信（本番）
    Resend,
    /// Mailpit（開発）/ SMTP サーバー経由で送信
    Smtp,
    /// 送信しない（ログ出力のみ）
    Noop,
}

/// 通知機能の設定
///
/// `NOTIFICATION_BACKEND` 環境変数で送信バックエンドを切り替える。
/// API キーと送信元アドレスの必須チェックはプロバイダー構築時に行う。
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// 送信バックエンド
    pub backend:         NotificationBackend,
    /// Resend の API キー
    pub resend_api_key:  Option<String>,
    /// Resend API のベース URL
    pub resend_base_url: String,
    /// 送信元メールアドレス
    pub from_address:    Option<String>,
    /// テンプレート名ごとの HTML 上書き
    pub html_templates:  HashMap<String, HtmlTemplateOverride>,
    /// SMTP ホスト（backend=smtp の場合に使用）
    pub smtp_host:       String,
    /// SMTP ポート（backend=smtp の場合に使用）
    pub smtp_port:       u16,
}

impl CoreConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 検索関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        Ok(Self {
            host:         lookup("CORE_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port:         parse_port("CORE_PORT", &required("CORE_PORT")?)?,
            notification: NotificationConfig::from_lookup(&lookup)?,
            search_index: AlgoliaConfig {
                app_id:             required("ALGOLIA_APP_ID")?,
                api_key:            required("ALGOLIA_API_KEY")?,
                product_index_name: lookup("ALGOLIA_PRODUCT_INDEX_NAME")
                    .unwrap_or_else(|| "products".to_string()),
                base_url:           lookup("ALGOLIA_BASE_URL"),
            },
        })
    }
}

impl NotificationConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = match lookup("NOTIFICATION_BACKEND") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name:   "NOTIFICATION_BACKEND",
                reason: format!("{value}（resend / smtp / noop のいずれか）"),
            })?,
            None => NotificationBackend::Resend,
        };

        let html_templates = match lookup("NOTIFICATION_HTML_TEMPLATES") {
            Some(json) => serde_json::from_str(&json).map_err(|e| ConfigError::Invalid {
                name:   "NOTIFICATION_HTML_TEMPLATES",
                reason: e.to_string(),
            })?,
            None => HashMap::new(),
        };

        let smtp_port = match lookup("SMTP_PORT") {
            Some(value) => parse_port("SMTP_PORT", &value)?,
            None => 1025,
        };

        Ok(Self {
            backend,
            resend_api_key: lookup("RESEND_API_KEY"),
            resend_base_url: lookup("RESEND_BASE_URL")
                .unwrap_or_else(|| DEFAULT_RESEND_BASE_URL.to_string()),
            from_address: lookup("NOTIFICATION_FROM_ADDRESS"),
            html_templates,
            smtp_host: lookup("SMTP_HOST").unwrap_or_else(|| "localhost".to_string()),
            smtp_port,
        })
    }

    /// メール通知プロバイダーに渡すオプション
    pub fn provider_options(&self) -> EmailProviderOptions {
        EmailProviderOptions {
            api_key:        self.resend_api_key.clone(),
            from:           self.from_address.clone(),
            html_templates: self.html_templates.clone(),
        }
    }
}

fn parse_port(name: &'static str, value: &str) -> Result<u16, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        name,
        reason: format!("{value} は有効なポート番号ではありません"),
    })
}
