//! # 検索インデックスハンドラ
//!
//! 検索インデックス同期ステップを単独のワークフローとして実行する内部 API。
//!
//! ## エンドポイント
//!
//! - `POST /internal/search-index/products/delete` - 商品をインデックスから削除

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    error::CoreError,
    usecase::search_sync::{DeleteProductsFromIndexInput, DeleteProductsFromIndexStep},
    workflow::{ModuleContainer, StepContext, WorkflowTransaction},
};

/// 検索インデックス API の共有状態
pub struct SearchIndexState {
    pub container: Arc<ModuleContainer>,
}

/// POST /internal/search-index/products/delete
///
/// 失敗時はトランザクションをロールバックしてから 500 を返す。
/// ボディが不正な場合はステップを実行せずに 400 を返す。
#[tracing::instrument(skip_all)]
pub async fn delete_products_from_index(
    State(state): State<Arc<SearchIndexState>>,
    payload: Result<Json<DeleteProductsFromIndexInput>, JsonRejection>,
) -> Result<StatusCode, CoreError> {
    let Json(input) = payload?;
    let mut transaction = WorkflowTransaction::new(StepContext::new(state.container.clone()));

    match transaction
        .run_step(Arc::new(DeleteProductsFromIndexStep), input)
        .await
    {
        Ok(()) => {
            transaction.commit();
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            tracing::warn!(
                steps = transaction.pending_count(),
                "ステップが失敗したためロールバックします"
            );
            let report = transaction.rollback().await;
            if report.has_failures() {
                tracing::error!(failed = report.failed.len(), "ロールバックが完了しませんでした");
            }
            Err(e.into())
        }
    }
}
