//! # 検索インデックス同期
//!
//! 商品削除ワークフローで、検索インデックスから商品レコードを削除するステップ。
//!
//! 前進処理は削除前のレコードを取得してから削除し、取得したスナップショットを
//! 補償データとして返す。補償処理はスナップショットを書き戻す。

use std::sync::Arc;

use async_trait::async_trait;
use marketlink_domain::search_index::{IndexRecord, IndexRecordType};
use marketlink_infra::{InfraError, search_index::SearchIndexService};
use marketlink_shared::{
    event_log::{error as log_error, event},
    log_business_event,
};
use serde::Deserialize;

use crate::workflow::{
    SEARCH_INDEX_MODULE,
    StepContext,
    StepResponse,
    WorkflowError,
    WorkflowStep,
};

/// 商品削除ステップの入力
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteProductsFromIndexInput {
    /// 削除する商品 ID
    pub ids: Vec<String>,
}

/// 検索インデックスから商品を削除するステップ
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteProductsFromIndexStep;

impl DeleteProductsFromIndexStep {
    pub const NAME: &'static str = "delete-products-from-search-index-step";
}

fn search_index(ctx: &StepContext) -> Result<Arc<dyn SearchIndexService>, WorkflowError> {
    ctx.container.resolve::<dyn SearchIndexService>(SEARCH_INDEX_MODULE)
}

fn log_index_error(e: &InfraError, message: &str) {
    tracing::error!(
        error.category = log_error::category::EXTERNAL_SERVICE,
        error.kind = log_error::kind::SEARCH_INDEX,
        status = ?e.status(),
        error = %e,
        "{message}"
    );
}

#[async_trait]
impl WorkflowStep for DeleteProductsFromIndexStep {
    type Input = DeleteProductsFromIndexInput;
    type Output = ();
    type CompensationData = Vec<IndexRecord>;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    #[tracing::instrument(
        skip_all,
        fields(step = DeleteProductsFromIndexStep::NAME, count = input.ids.len())
    )]
    async fn invoke(
        &self,
        input: DeleteProductsFromIndexInput,
        ctx: &StepContext,
    ) -> Result<StepResponse<(), Vec<IndexRecord>>, WorkflowError> {
        let index = search_index(ctx)?;

        let existing = index
            .retrieve_from_index(&input.ids, IndexRecordType::Product)
            .await
            .inspect_err(|e| log_index_error(e, "削除前のレコード取得に失敗"))?;
        index
            .delete_from_index(&input.ids, IndexRecordType::Product)
            .await
            .inspect_err(|e| log_index_error(e, "検索インデックスからの削除に失敗"))?;

        log_business_event!(
            event.category = event::category::SEARCH_INDEX,
            event.action = event::action::INDEX_RECORDS_DELETED,
            event.entity_type = event::entity_type::INDEX_RECORD,
            event.result = event::result::SUCCESS,
            requested = input.ids.len(),
            snapshot = existing.len(),
            "検索インデックスから商品を削除"
        );

        Ok(StepResponse::new((), existing))
    }

    #[tracing::instrument(skip_all, fields(step = DeleteProductsFromIndexStep::NAME))]
    async fn compensate(
        &self,
        data: Option<Vec<IndexRecord>>,
        ctx: &StepContext,
    ) -> Result<(), WorkflowError> {
        let Some(records) = data.filter(|records| !records.is_empty()) else {
            tracing::debug!("補償対象のレコードがないためスキップ");
            return Ok(());
        };

        let index = search_index(ctx)?;
        index
            .index_data(&records, IndexRecordType::Product)
            .await
            .inspect_err(|e| log_index_error(e, "検索インデックスへの書き戻しに失敗"))?;

        log_business_event!(
            event.category = event::category::SEARCH_INDEX,
            event.action = event::action::INDEX_RECORDS_RESTORED,
            event.entity_type = event::entity_type::INDEX_RECORD,
            event.result = event::result::SUCCESS,
            restored = records.len(),
            "検索インデックスの商品を復元"
        );

        Ok(())
    }
}
