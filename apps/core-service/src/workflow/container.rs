//! # モジュールコンテナ
//!
//! ワークフロー実行時に、ステップが名前でサービスを解決するためのコンテナ。
//! トレイトオブジェクトは `Arc<dyn Trait>` のまま登録・解決できる。

use std::{any::Any, collections::HashMap, sync::Arc};

use super::WorkflowError;

/// 検索インデックスサービスの登録キー
pub const SEARCH_INDEX_MODULE: &str = "search_index";

/// 名前をキーにしたサービスコンテナ
#[derive(Default)]
pub struct ModuleContainer {
    modules: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl ModuleContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// サービスを登録する（同じキーは置き換える）
    pub fn register<T>(&mut self, key: impl Into<String>, service: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.modules.insert(key.into(), Box::new(service));
    }

    /// サービスを解決する
    ///
    /// 登録時と同じ `T` を指定する必要がある。
    pub fn resolve<T>(&self, key: &str) -> Result<Arc<T>, WorkflowError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let module = self
            .modules
            .get(key)
            .ok_or_else(|| WorkflowError::ModuleNotRegistered(key.to_string()))?;

        module
            .downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or_else(|| WorkflowError::ModuleTypeMismatch(key.to_string()))
    }
}
