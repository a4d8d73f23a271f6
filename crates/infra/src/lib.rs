//! # Marketlink インフラ層
//!
//! 外部 API との通信を担当する。
//!
//! ## 責務
//!
//! - **メール送信**: [`notification::NotificationSender`] とその実装
//!   （メール送信 API / SMTP / Noop）
//! - **検索インデックス**: [`search_index::SearchIndexService`] とその実装
//! - **エラー**: 通信失敗を [`InfraError`] に集約する
//!
//! ## 依存関係
//!
//! ```text
//! core-service → infra → domain
//! ```
//!
//! ## テスト用モック
//!
//! `test-utils` feature で [`mock`] モジュールのインメモリ実装を公開する。
//!
//! ```toml
//! [dev-dependencies]
//! marketlink-infra = { workspace = true, features = ["test-utils"] }
//! ```

pub mod error;
pub mod notification;
pub mod search_index;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::{InfraError, InfraErrorKind};
