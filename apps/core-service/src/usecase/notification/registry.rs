//! # プロバイダーレジストリ
//!
//! 識別子をキーに通知プロバイダーを保持する。

use std::{collections::HashMap, sync::Arc};

use super::NotificationProvider;

/// 通知プロバイダーレジストリ
#[derive(Default)]
pub struct NotificationProviderRegistry {
    providers: HashMap<&'static str, Arc<dyn NotificationProvider>>,
}

impl NotificationProviderRegistry {
    /// 空のレジストリを生成する
    pub fn new() -> Self {
        Self::default()
    }

    /// プロバイダーを登録する
    ///
    /// 同じ識別子のプロバイダーが登録済みの場合は置き換える。
    pub fn register(&mut self, provider: Arc<dyn NotificationProvider>) {
        let identifier = provider.identifier();
        if self.providers.insert(identifier, provider).is_some() {
            tracing::warn!(identifier, "通知プロバイダーを置き換えました");
        }
    }

    pub fn get(&self, identifier: &str) -> Option<Arc<dyn NotificationProvider>> {
        self.providers.get(identifier).cloned()
    }

    /// 登録済みの識別子（昇順）
    pub fn registered_identifiers(&self) -> Vec<&'static str> {
        let mut identifiers: Vec<_> = self.providers.keys().copied().collect();
        identifiers.sort_unstable();
        identifiers
    }
}
