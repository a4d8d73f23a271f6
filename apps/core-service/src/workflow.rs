//! # ワークフロー契約
//!
//! ホストのワークフローエンジンが要求するステップ契約を定義する。
//!
//! ## モジュール構成
//!
//! - [`step`] - ステップ trait（前進処理 + 補償処理）とレスポンス型
//! - [`container`] - 名前をキーにサービスを解決するモジュールコンテナ
//! - [`transaction`] - ステップを順に実行し、失敗時に逆順で補償するトランザクション
//!
//! ## 補償データ
//!
//! 前進処理から補償処理へ渡る状態は [`StepResponse::compensation`] のみ。
//! ステップ自身は状態を持たない。

pub mod container;
pub mod step;
pub mod transaction;

pub use container::{ModuleContainer, SEARCH_INDEX_MODULE};
use marketlink_infra::InfraError;
pub use step::{StepContext, StepResponse, WorkflowStep};
use thiserror::Error;
pub use transaction::{CompensationReport, WorkflowTransaction};

/// ワークフローステップのエラー
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// コンテナにモジュールが登録されていない
    #[error("モジュールが登録されていません: {0}")]
    ModuleNotRegistered(String),

    /// 登録されたモジュールの型が要求と異なる
    #[error("モジュールの型が一致しません: {0}")]
    ModuleTypeMismatch(String),

    /// 外部サービスの呼び出しに失敗
    #[error("外部サービスエラー: {0}")]
    Infra(#[from] InfraError),

    /// ステップ固有の失敗
    #[error("ステップ {step} が失敗しました: {reason}")]
    StepFailed {
        step:   &'static str,
        reason: String,
    },
}
