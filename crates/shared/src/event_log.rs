//! # ビジネスイベントログ
//!
//! メール送信や検索インデックス操作の結果を、`jq` で絞り込める構造化ログとして
//! 出力するためのマクロとフィールド定数。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] で出力する。`event.kind = "business_event"` が自動付与され、
//! `jq 'select(.["event.kind"] == "business_event")'` で抽出できる。
//!
//! ## エラーコンテキスト
//!
//! `tracing::error!` に `error.category` と `error.kind` を直接付与する。
//! 値は [`error`] モジュールの定数を使う。
//!
//! フィールド名はドット記法（`event.category`、`error.kind`）。JSON 出力では
//! フラットなキーになる。

/// ビジネスイベントを `info` レベルで出力する。
///
/// 慣例として以下のフィールドを付与する:
///
/// - `event.category`: [`event::category`]
/// - `event.action`: [`event::action`]
/// - `event.entity_type`: [`event::entity_type`]
/// - `event.result`: [`event::result`]
///
/// 呼び出し側クレートは `tracing` に依存している必要がある。
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const NOTIFICATION: &str = "notification";
        pub const SEARCH_INDEX: &str = "search_index";
    }

    /// イベントアクション
    pub mod action {
        // 通知
        pub const NOTIFICATION_SENT: &str = "notification.sent";
        pub const NOTIFICATION_FAILED: &str = "notification.failed";

        // 検索インデックス
        pub const INDEX_RECORDS_DELETED: &str = "search_index.records_deleted";
        pub const INDEX_RECORDS_RESTORED: &str = "search_index.records_restored";
    }

    /// エンティティ種別
    pub mod entity_type {
        pub const EMAIL: &str = "email";
        pub const INDEX_RECORD: &str = "index_record";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// 外部 API 呼び出し（メール送信 API、検索インデックス API）
        pub const EXTERNAL_SERVICE: &str = "external_service";
        /// 設定・テンプレート定義の不備
        pub const CONFIGURATION: &str = "configuration";
        /// ワークフローの補償処理
        pub const WORKFLOW: &str = "workflow";
    }

    /// エラー種別
    pub mod kind {
        pub const TEMPLATE_NOT_FOUND: &str = "template_not_found";
        pub const TEMPLATE_RENDER: &str = "template_render";
        pub const EMAIL_DELIVERY: &str = "email_delivery";
        pub const SEARCH_INDEX: &str = "search_index";
        pub const COMPENSATION: &str = "compensation";
    }
}
