//! # 通知ハンドラ
//!
//! ホストからの送信依頼を通知プロバイダーに振り分ける内部 API。
//!
//! ## エンドポイント
//!
//! - `POST /internal/notifications` - 通知送信

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use marketlink_domain::notification::NotificationRequest;
use marketlink_shared::ApiResponse;
use serde::Deserialize;

use crate::{
    error::CoreError,
    usecase::notification::{NotificationProviderRegistry, ResendNotificationProvider},
};

/// 通知 API の共有状態
pub struct NotificationState {
    pub registry: NotificationProviderRegistry,
}

/// 通知送信リクエスト
#[derive(Debug, Deserialize)]
pub struct SendNotificationRequest {
    /// プロバイダー識別子（省略時は `notification-resend`）
    #[serde(default = "default_provider")]
    pub provider: String,
    /// 送信先メールアドレス
    pub to:       String,
    /// テンプレート名
    pub template: String,
    /// テンプレートに渡すデータ
    #[serde(default)]
    pub data:     serde_json::Value,
}

fn default_provider() -> String {
    ResendNotificationProvider::IDENTIFIER.to_string()
}

/// POST /internal/notifications
///
/// 送信に失敗しても 200 を返し、`data` は空オブジェクトになる。
/// ボディが不正な場合は 400 を返す。
#[tracing::instrument(skip_all)]
pub async fn send_notification(
    State(state): State<Arc<NotificationState>>,
    payload: Result<Json<SendNotificationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CoreError> {
    let Json(req) = payload?;
    let provider = state.registry.get(&req.provider).ok_or_else(|| {
        CoreError::NotFound(format!("通知プロバイダーが見つかりません: {}", req.provider))
    })?;

    let notification = NotificationRequest {
        to:       req.to,
        template: req.template,
        data:     req.data,
    };
    let result = provider.send(&notification).await;

    Ok((StatusCode::OK, Json(ApiResponse::new(result))))
}
