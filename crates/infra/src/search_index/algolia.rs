//! Algolia 検索インデックス実装
//!
//! Algolia REST API を `reqwest` で呼び出す。
//!
//! - 取得: `POST /1/indexes/*/objects`（読み取りホスト `{app_id}-dsn.algolia.net`）
//! - 削除・書き込み: `POST /1/indexes/{index}/batch`（書き込みホスト `{app_id}.algolia.net`）

use async_trait::async_trait;
use marketlink_domain::search_index::{IndexRecord, IndexRecordType};
use serde::{Deserialize, Serialize};

use super::SearchIndexService;
use crate::{InfraError, error::read_error_body};

/// Algolia 接続設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgoliaConfig {
    /// アプリケーション ID
    pub app_id:             String,
    /// API キー（書き込み権限が必要）
    pub api_key:            String,
    /// 商品インデックス名
    pub product_index_name: String,
    /// 読み書き両方のホストを置き換えるベース URL（テスト用）
    pub base_url:           Option<String>,
}

/// Algolia 検索インデックス
#[derive(Clone)]
pub struct AlgoliaSearchIndex {
    config:    AlgoliaConfig,
    read_url:  String,
    write_url: String,
    client:    reqwest::Client,
}

impl AlgoliaSearchIndex {
    pub fn new(config: AlgoliaConfig) -> Self {
        let (read_url, write_url) = match &config.base_url {
            Some(base_url) => {
                let base_url = base_url.trim_end_matches('/').to_string();
                (base_url.clone(), base_url)
            }
            None => (
                format!("https://{}-dsn.algolia.net", config.app_id),
                format!("https://{}.algolia.net", config.app_id),
            ),
        };

        Self {
            config,
            read_url,
            write_url,
            client: reqwest::Client::new(),
        }
    }

    fn index_name(&self, record_type: IndexRecordType) -> &str {
        match record_type {
            IndexRecordType::Product => &self.config.product_index_name,
        }
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<reqwest::Response, InfraError> {
        let response = self
            .client
            .post(url)
            .header("X-Algolia-Application-Id", &self.config.app_id)
            .header("X-Algolia-API-Key", &self.config.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = read_error_body(response).await;
        Err(InfraError::unexpected_status(status.as_u16(), body))
    }

    async fn batch(
        &self,
        index_name: &str,
        requests: Vec<BatchRequest<'_>>,
    ) -> Result<(), InfraError> {
        let url = format!("{}/1/indexes/{}/batch", self.write_url, index_name);
        self.post(&url, &BatchBody { requests }).await?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct GetObjectsBody<'a> {
    requests: Vec<GetObjectRequest<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GetObjectRequest<'a> {
    index_name: &'a str,
    #[serde(rename = "objectID")]
    object_id:  &'a str,
}

#[derive(Debug, Deserialize)]
struct GetObjectsResponse {
    results: Vec<Option<IndexRecord>>,
}

#[derive(Debug, Serialize)]
struct BatchBody<'a> {
    requests: Vec<BatchRequest<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "action", content = "body", rename_all = "camelCase")]
enum BatchRequest<'a> {
    DeleteObject(ObjectRef<'a>),
    UpdateObject(&'a IndexRecord),
}

#[derive(Debug, Serialize)]
struct ObjectRef<'a> {
    #[serde(rename = "objectID")]
    object_id: &'a str,
}

#[async_trait]
impl SearchIndexService for AlgoliaSearchIndex {
    #[tracing::instrument(skip_all, fields(count = ids.len(), record_type = %record_type))]
    async fn retrieve_from_index(
        &self,
        ids: &[String],
        record_type: IndexRecordType,
    ) -> Result<Vec<IndexRecord>, InfraError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let index_name = self.index_name(record_type);
        let body = GetObjectsBody {
            requests: ids
                .iter()
                .map(|id| GetObjectRequest {
                    index_name,
                    object_id: id,
                })
                .collect(),
        };
        let url = format!("{}/1/indexes/*/objects", self.read_url);

        let response = self.post(&url, &body).await?;
        let text = response.text().await?;
        let parsed: GetObjectsResponse = serde_json::from_str(&text)?;

        Ok(parsed.results.into_iter().flatten().collect())
    }

    #[tracing::instrument(skip_all, fields(count = ids.len(), record_type = %record_type))]
    async fn delete_from_index(
        &self,
        ids: &[String],
        record_type: IndexRecordType,
    ) -> Result<(), InfraError> {
        if ids.is_empty() {
            return Ok(());
        }

        let requests = ids
            .iter()
            .map(|id| BatchRequest::DeleteObject(ObjectRef { object_id: id }))
            .collect();
        self.batch(self.index_name(record_type), requests).await
    }

    #[tracing::instrument(skip_all, fields(count = records.len(), record_type = %record_type))]
    async fn index_data(
        &self,
        records: &[IndexRecord],
        record_type: IndexRecordType,
    ) -> Result<(), InfraError> {
        if records.is_empty() {
            return Ok(());
        }

        let requests = records.iter().map(BatchRequest::UpdateObject).collect();
        self.batch(self.index_name(record_type), requests).await
    }
}
