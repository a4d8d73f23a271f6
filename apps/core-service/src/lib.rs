//! # Core Service ライブラリ
//!
//! Core Service のユースケース、ワークフロー契約、ハンドラを公開する。
//! 統合テスト用に内部モジュールへのアクセスを提供する。

pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
pub mod workflow;
