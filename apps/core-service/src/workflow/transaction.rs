//! # ワークフロートランザクション
//!
//! ステップを順に実行し、完了したステップの補償データを記録する。
//! [`rollback`](WorkflowTransaction::rollback) は記録を逆順にたどって補償処理を
//! 実行し、個別の補償が失敗しても残りの補償を継続する。

use std::sync::Arc;

use async_trait::async_trait;
use marketlink_shared::event_log::error as log_error;

use super::{StepContext, WorkflowError, WorkflowStep};

/// ロールバックの結果レポート
#[derive(Debug, Default)]
pub struct CompensationReport {
    /// 補償に成功したステップ名（実行順）
    pub compensated: Vec<&'static str>,
    /// 補償に失敗したステップ名とエラー
    pub failed:      Vec<(&'static str, WorkflowError)>,
}

impl CompensationReport {
    /// いずれかの補償が失敗したかどうか
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// 完了済みステップの補償待ち記録
#[async_trait]
trait PendingCompensation: Send {
    fn step_name(&self) -> &'static str;

    async fn run(self: Box<Self>, ctx: &StepContext) -> Result<(), WorkflowError>;
}

struct RecordedStep<S: WorkflowStep> {
    step: Arc<S>,
    data: Option<S::CompensationData>,
}

#[async_trait]
impl<S: WorkflowStep + 'static> PendingCompensation for RecordedStep<S> {
    fn step_name(&self) -> &'static str {
        self.step.name()
    }

    async fn run(self: Box<Self>, ctx: &StepContext) -> Result<(), WorkflowError> {
        let Self { step, data } = *self;
        step.compensate(data, ctx).await
    }
}

/// ワークフロートランザクション
pub struct WorkflowTransaction {
    context: StepContext,
    pending: Vec<Box<dyn PendingCompensation>>,
}

impl WorkflowTransaction {
    pub fn new(context: StepContext) -> Self {
        Self {
            context,
            pending: Vec::new(),
        }
    }

    /// 補償待ちのステップ数
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// ステップの前進処理を実行する
    ///
    /// 成功した場合のみ補償データを記録する。失敗したステップは補償対象にならない。
    pub async fn run_step<S>(
        &mut self,
        step: Arc<S>,
        input: S::Input,
    ) -> Result<S::Output, WorkflowError>
    where
        S: WorkflowStep + 'static,
    {
        let response = match step.invoke(input, &self.context).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(step = step.name(), error = %e, "ステップの前進処理に失敗");
                return Err(e);
            }
        };

        tracing::debug!(step = step.name(), "ステップ完了");
        self.pending.push(Box::new(RecordedStep {
            step,
            data: response.compensation,
        }));
        Ok(response.output)
    }

    /// 記録した補償を破棄して確定する
    pub fn commit(self) {
        tracing::debug!(steps = self.pending.len(), "ワークフロートランザクションを確定");
    }

    /// 完了済みステップを逆順に補償する
    pub async fn rollback(self) -> CompensationReport {
        let mut report = CompensationReport::default();

        for pending in self.pending.into_iter().rev() {
            let name = pending.step_name();
            match pending.run(&self.context).await {
                Ok(()) => report.compensated.push(name),
                Err(e) => {
                    tracing::error!(
                        error.category = log_error::category::WORKFLOW,
                        error.kind = log_error::kind::COMPENSATION,
                        step = name,
                        error = %e,
                        "補償処理に失敗"
                    );
                    report.failed.push((name, e));
                }
            }
        }

        report
    }
}
