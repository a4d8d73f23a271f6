//! # ユースケース層
//!
//! - [`notification`] - トランザクションメール通知プロバイダー
//! - [`search_sync`] - 検索インデックス同期のワークフローステップ

pub mod notification;
pub mod search_sync;
