//! # 通知ユースケース
//!
//! ホストフレームワークから届く送信依頼を、テンプレート解決 → 本文生成 → 送信
//! の順に処理する。
//!
//! ## モジュール構成
//!
//! - [`template_renderer`] - tera テンプレートエンジンによる組み込みテンプレートの生成
//! - [`template_registry`] - 設定上書きと組み込みテンプレートの解決、件名の決定
//! - [`provider`] - 通知プロバイダー trait と Resend プロバイダー
//! - [`registry`] - 識別子をキーにしたプロバイダーレジストリ

pub mod provider;
pub mod registry;
pub mod template_registry;
pub mod template_renderer;

pub use provider::{NotificationProvider, ResendNotificationProvider};
pub use registry::NotificationProviderRegistry;
pub use template_registry::{ResolvedTemplate, TemplateRegistry};
pub use template_renderer::TemplateRenderer;
