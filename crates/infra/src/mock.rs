//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! marketlink-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use marketlink_domain::{
    notification::{NotificationError, OutboundEmail, SentEmail},
    search_index::{IndexRecord, IndexRecordType},
};

use crate::{error::InfraError, notification::NotificationSender, search_index::SearchIndexService};

// ===== MockNotificationSender =====

/// 送信したメールを記録するモック送信
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent_emails: Arc<Mutex<Vec<OutboundEmail>>>,
    failure:     Arc<Mutex<Option<String>>>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以降の送信を指定メッセージで失敗させる
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().unwrap() = Some(message.into());
    }

    pub fn sent_emails(&self) -> Vec<OutboundEmail> {
        self.sent_emails.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &OutboundEmail) -> Result<SentEmail, NotificationError> {
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(NotificationError::SendFailed(message));
        }

        let mut sent = self.sent_emails.lock().unwrap();
        sent.push(email.clone());
        Ok(SentEmail {
            id: format!("mock-email-{}", sent.len()),
        })
    }
}

// ===== MockSearchIndexService =====

/// [`MockSearchIndexService`] への呼び出し記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchIndexCall {
    Retrieve(Vec<String>),
    Delete(Vec<String>),
    Index(Vec<String>),
}

/// 失敗させる操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchIndexOperation {
    Retrieve,
    Delete,
    Index,
}

/// レコードをメモリに保持するモック検索インデックス
#[derive(Clone, Default)]
pub struct MockSearchIndexService {
    records:  Arc<Mutex<Vec<IndexRecord>>>,
    calls:    Arc<Mutex<Vec<SearchIndexCall>>>,
    failures: Arc<Mutex<Vec<SearchIndexOperation>>>,
}

impl MockSearchIndexService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<IndexRecord>) -> Self {
        let mock = Self::new();
        *mock.records.lock().unwrap() = records;
        mock
    }

    /// 指定した操作を失敗させる
    pub fn fail_on(&self, operation: SearchIndexOperation) {
        self.failures.lock().unwrap().push(operation);
    }

    /// 現在のレコード（`objectID` 順）
    pub fn records(&self) -> Vec<IndexRecord> {
        let mut records = self.records.lock().unwrap().clone();
        records.sort_by(|a, b| a.object_id.cmp(&b.object_id));
        records
    }

    pub fn calls(&self) -> Vec<SearchIndexCall> {
        self.calls.lock().unwrap().clone()
    }

    fn check_failure(&self, operation: SearchIndexOperation) -> Result<(), InfraError> {
        if self.failures.lock().unwrap().contains(&operation) {
            return Err(InfraError::unexpected_status(
                503,
                format!("{operation:?} に失敗（モック）"),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SearchIndexService for MockSearchIndexService {
    async fn retrieve_from_index(
        &self,
        ids: &[String],
        _record_type: IndexRecordType,
    ) -> Result<Vec<IndexRecord>, InfraError> {
        self.calls
            .lock()
            .unwrap()
            .push(SearchIndexCall::Retrieve(ids.to_vec()));
        self.check_failure(SearchIndexOperation::Retrieve)?;

        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| ids.contains(&r.object_id))
            .cloned()
            .collect())
    }

    async fn delete_from_index(
        &self,
        ids: &[String],
        _record_type: IndexRecordType,
    ) -> Result<(), InfraError> {
        self.calls
            .lock()
            .unwrap()
            .push(SearchIndexCall::Delete(ids.to_vec()));
        self.check_failure(SearchIndexOperation::Delete)?;

        self.records
            .lock()
            .unwrap()
            .retain(|r| !ids.contains(&r.object_id));
        Ok(())
    }

    async fn index_data(
        &self,
        records: &[IndexRecord],
        _record_type: IndexRecordType,
    ) -> Result<(), InfraError> {
        self.calls.lock().unwrap().push(SearchIndexCall::Index(
            records.iter().map(|r| r.object_id.clone()).collect(),
        ));
        self.check_failure(SearchIndexOperation::Index)?;

        let mut stored = self.records.lock().unwrap();
        for record in records {
            stored.retain(|r| r.object_id != record.object_id);
            stored.push(record.clone());
        }
        Ok(())
    }
}
