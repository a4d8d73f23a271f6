//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、処理はユースケース層とワークフロー層に委譲

pub mod health;
pub mod notification;
pub mod search_index;

pub use health::health_check;
pub use notification::{NotificationState, SendNotificationRequest, send_notification};
pub use search_index::{SearchIndexState, delete_products_from_index};
