//! # Marketlink ドメイン層
//!
//! メール通知と検索インデックス同期で扱うデータ型と、その検証ルールを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! core-service → infra → domain
//! ```
//!
//! ドメイン層は外部 API（メール送信 API、検索インデックス API）を知らない。
//! 通信の詳細は `marketlink-infra` に閉じ込める。
//!
//! ## モジュール構成
//!
//! - [`error`] - 設定値の検証エラー
//! - [`notification`] - 通知リクエスト、テンプレートキー、送信メール
//! - [`search_index`] - 検索インデックスのレコード
//!
//! ## 使用例
//!
//! ```rust
//! use marketlink_domain::notification::{EmailTemplate, TemplateKey};
//!
//! let key = TemplateKey::parse("order-placed");
//! assert_eq!(key, TemplateKey::Builtin(EmailTemplate::OrderPlaced));
//! ```

pub mod error;
pub mod notification;
pub mod search_index;

pub use error::DomainError;
