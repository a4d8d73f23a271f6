//! # 検索インデックス
//!
//! ホスティング型検索インデックスへの読み取り・削除・書き込みを抽象化する。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: ワークフローステップは [`SearchIndexService`] にのみ依存する
//! - **存在しないレコードは無視**: 取得・削除ともに未登録の ID はエラーにしない
//! - **リトライなし**: 失敗は [`InfraError`] としてそのまま呼び出し側へ返す

mod algolia;

pub use algolia::{AlgoliaConfig, AlgoliaSearchIndex};
use async_trait::async_trait;
use marketlink_domain::search_index::{IndexRecord, IndexRecordType};

use crate::InfraError;

/// 検索インデックスサービス
#[async_trait]
pub trait SearchIndexService: Send + Sync {
    /// 指定 ID のレコードを取得する
    ///
    /// 存在しない ID は結果から除外される。順序は保証しない。
    async fn retrieve_from_index(
        &self,
        ids: &[String],
        record_type: IndexRecordType,
    ) -> Result<Vec<IndexRecord>, InfraError>;

    /// 指定 ID のレコードを削除する
    ///
    /// 存在しない ID は無視される。
    async fn delete_from_index(
        &self,
        ids: &[String],
        record_type: IndexRecordType,
    ) -> Result<(), InfraError>;

    /// レコードを書き込む（同じ `objectID` のレコードは置き換える）
    async fn index_data(
        &self,
        records: &[IndexRecord],
        record_type: IndexRecordType,
    ) -> Result<(), InfraError>;
}
