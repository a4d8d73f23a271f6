//! # API レスポンスエンベロープ
//!
//! 内部 API の成功レスポンスを `{ "data": T }` で包む。

use serde::{Deserialize, Serialize};

/// 内部 API の成功レスポンス
///
/// ```
/// use marketlink_shared::ApiResponse;
///
/// let response = ApiResponse::new(vec!["p1", "p2"]);
/// assert_eq!(response.data.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_dataキーで包んでシリアライズする() {
        let response = ApiResponse::new(json!({ "id": "email_123" }));

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value, json!({ "data": { "id": "email_123" } }));
    }

    #[test]
    fn test_空オブジェクトのdataもそのまま保持する() {
        let response: ApiResponse<serde_json::Value> =
            serde_json::from_str(r#"{"data": {}}"#).unwrap();

        assert_eq!(response.data, json!({}));
    }
}
