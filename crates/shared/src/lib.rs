//! # Marketlink 共有ユーティリティ
//!
//! メール通知プロバイダーと検索インデックス同期の両方から使われる
//! 横断的なユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - アプリケーション層（core-service）から依存される
//! - ビジネスロジックを含まない
//! - トレーシング初期化は `observability` feature の背後に置き、
//!   ライブラリ利用側に subscriber の依存を強制しない

pub mod api_response;
pub mod event_log;
pub mod observability;

pub use api_response::ApiResponse;
