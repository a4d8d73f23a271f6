//! Algolia 検索インデックスの統合テスト
//!
//! wiremock で Algolia REST API を模したサーバーに対して呼び出す。
//!
//! 実行方法:
//! ```bash
//! cargo test -p marketlink-infra --test algolia_search_index_test
//! ```

mod common;

use marketlink_domain::search_index::{IndexRecord, IndexRecordType};
use marketlink_infra::{
    InfraErrorKind,
    search_index::{AlgoliaConfig, AlgoliaSearchIndex, SearchIndexService},
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::{
    Mock,
    MockServer,
    ResponseTemplate,
    matchers::{body_json, header, method, path},
};

fn create_index(server: &MockServer) -> AlgoliaSearchIndex {
    AlgoliaSearchIndex::new(AlgoliaConfig {
        app_id:             "APPID".to_string(),
        api_key:            "secret".to_string(),
        product_index_name: "products".to_string(),
        base_url:           Some(server.uri()),
    })
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
async fn test_取得は存在しないidを除外する() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/indexes/*/objects"))
        .and(header("X-Algolia-Application-Id", "APPID"))
        .and(header("X-Algolia-API-Key", "secret"))
        .and(body_json(json!({
            "requests": [
                { "indexName": "products", "objectID": "prod_01" },
                { "indexName": "products", "objectID": "prod_99" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "objectID": "prod_01", "title": "Camiseta", "handle": "camiseta" },
                null
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let index = create_index(&server);
    let records = index
        .retrieve_from_index(&ids(&["prod_01", "prod_99"]), IndexRecordType::Product)
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].object_id, "prod_01");
    assert_eq!(records[0].attributes["title"], json!("Camiseta"));
}

#[tokio::test]
async fn test_削除はdelete_objectのバッチを送る() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/indexes/products/batch"))
        .and(body_json(json!({
            "requests": [
                { "action": "deleteObject", "body": { "objectID": "prod_01" } },
                { "action": "deleteObject", "body": { "objectID": "prod_02" } }
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "taskID": 1, "objectIDs": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let index = create_index(&server);
    let result = index
        .delete_from_index(&ids(&["prod_01", "prod_02"]), IndexRecordType::Product)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_書き込みはレコード全体をupdate_objectで送る() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/indexes/products/batch"))
        .and(body_json(json!({
            "requests": [
                {
                    "action": "updateObject",
                    "body": { "objectID": "prod_01", "title": "Camiseta", "variants": [{ "sku": "CAM-M" }] }
                }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "taskID": 2 })))
        .expect(1)
        .mount(&server)
        .await;

    let record: IndexRecord = serde_json::from_value(json!({
        "objectID": "prod_01",
        "title": "Camiseta",
        "variants": [{ "sku": "CAM-M" }]
    }))
    .unwrap();

    let index = create_index(&server);
    let result = index
        .index_data(&[record], IndexRecordType::Product)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_成功以外のステータスはunexpected_statusになる() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/indexes/products/batch"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Invalid Application-ID or API key",
            "status": 403
        })))
        .mount(&server)
        .await;

    let index = create_index(&server);
    let err = index
        .delete_from_index(&ids(&["prod_01"]), IndexRecordType::Product)
        .await
        .unwrap_err();

    match err.kind() {
        InfraErrorKind::UnexpectedStatus { status, body } => {
            assert_eq!(*status, 403);
            assert!(body.contains("Invalid Application-ID"), "{body}");
        }
        other => panic!("UnexpectedStatus を期待: {other:?}"),
    }
}

#[tokio::test]
async fn test_エラーボディが読み取れない場合は読み取り失敗をボディに記録する() {
    let base_url = common::spawn_truncated_body_server("503 Service Unavailable").await;
    let index = AlgoliaSearchIndex::new(AlgoliaConfig {
        app_id:             "APPID".to_string(),
        api_key:            "secret".to_string(),
        product_index_name: "products".to_string(),
        base_url:           Some(base_url),
    });

    let err = index
        .delete_from_index(&ids(&["prod_01"]), IndexRecordType::Product)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    match err.kind() {
        InfraErrorKind::UnexpectedStatus { body, .. } => {
            assert!(body.starts_with("<ボディ読み取り失敗: "), "{body}");
        }
        other => panic!("UnexpectedStatus を期待: {other:?}"),
    }
}

#[tokio::test]
async fn test_空の入力ではapiを呼ばない() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let index = create_index(&server);

    assert!(
        index
            .retrieve_from_index(&[], IndexRecordType::Product)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        index
            .delete_from_index(&[], IndexRecordType::Product)
            .await
            .is_ok()
    );
    assert!(index.index_data(&[], IndexRecordType::Product).await.is_ok());
}
