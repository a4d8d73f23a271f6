//! # 検索インデックス
//!
//! ホスティング型検索インデックスに保存されるレコードを定義する。
//! レコードの中身は商品カタログを写したもので、このクレートは解釈しない。
//! 読み取ったレコードをそのまま書き戻せることだけを保証する。

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// インデックスレコードの種別
///
/// 種別ごとに別のインデックスへ保存される。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IndexRecordType {
    /// 商品
    Product,
}

/// 検索インデックスのレコード
///
/// `objectID` をキーに、残りの属性を不透明なまま保持する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    /// レコード識別子
    #[serde(rename = "objectID")]
    pub object_id:  String,
    /// 商品カタログから写した属性
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl IndexRecord {
    pub fn new(
        object_id: impl Into<String>,
        attributes: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            object_id: object_id.into(),
            attributes,
        }
    }
}
