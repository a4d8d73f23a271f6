//! # ワークフローステップ
//!
//! 1 ステップは前進処理（`invoke`）と補償処理（`compensate`）の組で構成される。
//! エンジンは前進処理が成功したステップについてのみ、ロールバック時に
//! 補償処理を呼び出す。

use std::sync::Arc;

use async_trait::async_trait;

use super::{ModuleContainer, WorkflowError};

/// ステップ実行時のコンテキスト
#[derive(Clone)]
pub struct StepContext {
    /// サービス解決用のコンテナ
    pub container: Arc<ModuleContainer>,
}

impl StepContext {
    pub fn new(container: Arc<ModuleContainer>) -> Self {
        Self { container }
    }
}

/// 前進処理の結果
///
/// `compensation` はロールバック時にそのまま補償処理へ渡される。
#[derive(Debug, Clone, PartialEq)]
pub struct StepResponse<O, C> {
    /// 後続ステップへの出力
    pub output:       O,
    /// 補償処理に渡すデータ
    pub compensation: Option<C>,
}

impl<O, C> StepResponse<O, C> {
    pub fn new(output: O, compensation: C) -> Self {
        Self {
            output,
            compensation: Some(compensation),
        }
    }
}

/// ワークフローステップ
#[async_trait]
pub trait WorkflowStep: Send + Sync {
    type Input: Send + 'static;
    type Output: Send + 'static;
    type CompensationData: Send + Sync + 'static;

    /// エンジンに登録するステップ名
    fn name(&self) -> &'static str;

    /// 前進処理
    async fn invoke(
        &self,
        input: Self::Input,
        ctx: &StepContext,
    ) -> Result<StepResponse<Self::Output, Self::CompensationData>, WorkflowError>;

    /// 補償処理
    ///
    /// `data` は前進処理が返した補償データ。前進処理が補償データを返さなかった
    /// 場合は `None`。
    async fn compensate(
        &self,
        data: Option<Self::CompensationData>,
        ctx: &StepContext,
    ) -> Result<(), WorkflowError>;
}
