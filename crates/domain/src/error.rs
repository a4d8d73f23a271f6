//! # ドメイン層エラー定義
//!
//! 起動時に検出される設定不備を表現する。送信時の失敗は
//! [`NotificationError`](crate::notification::NotificationError) で扱う。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// 不正な設定値
    ///
    /// プロバイダーの必須オプション（`api_key`, `from`）が欠けている場合など。
    /// アダプターの起動を止める致命的なエラーとして扱う。
    #[error("不正なデータ: {0}")]
    InvalidData(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dataのメッセージに詳細が含まれる() {
        let err = DomainError::InvalidData("`from` は必須です".to_string());

        assert_eq!(err.to_string(), "不正なデータ: `from` は必須です");
    }
}
