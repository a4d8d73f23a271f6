//! # Core Service エラー定義
//!
//! Core Service 固有のエラーと、HTTP レスポンスへの変換を定義する。

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use marketlink_shared::event_log::error as log_error;
use serde::Serialize;
use thiserror::Error;

use crate::workflow::WorkflowError;

/// エラーレスポンス（RFC 7807 Problem Details）
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
}

/// Core Service で発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 不正なリクエスト（JSON ボディの解析失敗など）
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// ワークフローステップの失敗
    #[error("ワークフローエラー: {0}")]
    Workflow(#[from] WorkflowError),
}

impl From<JsonRejection> for CoreError {
    fn from(rejection: JsonRejection) -> Self {
        CoreError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let (status, error_type, title, detail) = match &self {
            CoreError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "https://marketlink.example.com/errors/not-found",
                "Not Found",
                msg.clone(),
            ),
            CoreError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "https://marketlink.example.com/errors/bad-request",
                "Bad Request",
                msg.clone(),
            ),
            CoreError::Workflow(e) => {
                tracing::error!(
                    error.category = log_error::category::WORKFLOW,
                    error = %e,
                    "ワークフローエラー"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "https://marketlink.example.com/errors/internal-error",
                    "Internal Server Error",
                    "内部エラーが発生しました".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                error_type: error_type.to_string(),
                title: title.to_string(),
                status: status.as_u16(),
                detail,
            }),
        )
            .into_response()
    }
}
