//! メール通知プロバイダーの統合テスト
//!
//! プロバイダー → Resend 送信実装 → wiremock の Resend API までを通して確認する。

use std::{collections::HashMap, sync::Arc};

use marketlink_core_service::usecase::notification::{
    NotificationProvider,
    ResendNotificationProvider,
    TemplateRenderer,
};
use marketlink_domain::notification::{
    EmailProviderOptions,
    HtmlTemplateOverride,
    NotificationError,
    NotificationRequest,
    NotificationResult,
};
use marketlink_infra::notification::ResendNotificationSender;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::{
    Mock,
    MockServer,
    ResponseTemplate,
    matchers::{bearer_token, body_partial_json, method, path},
};

fn create_provider(
    server: &MockServer,
    html_templates: HashMap<String, HtmlTemplateOverride>,
) -> ResendNotificationProvider {
    ResendNotificationProvider::new(
        EmailProviderOptions {
            api_key: Some("re_test".to_string()),
            from: Some("Tienda <tienda@example.com>".to_string()),
            html_templates,
        },
        Arc::new(ResendNotificationSender::new("re_test", &server.uri())),
        Arc::new(TemplateRenderer::new().unwrap()),
    )
    .unwrap()
}

fn request(template: &str, data: serde_json::Value) -> NotificationRequest {
    NotificationRequest {
        to: "cliente@example.com".to_string(),
        template: template.to_string(),
        data,
    }
}

#[tokio::test]
async fn test_組み込みテンプレートを送信してidを返す() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(bearer_token("re_test"))
        .and(body_partial_json(json!({
            "from": "Tienda <tienda@example.com>",
            "to": ["cliente@example.com"],
            "subject": "Restablece tu contraseña"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "email_789" })))
        .expect(1)
        .mount(&server)
        .await;

    let sut = create_provider(&server, HashMap::new());
    let result = sut
        .send(&request(
            "reset-password",
            json!({ "url": "https://tienda.example.com/reset?token=abc" }),
        ))
        .await;

    assert_eq!(result, NotificationResult::sent("email_789"));

    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    // HTML 側は tera の自動エスケープを通るため `/` が実体参照になる
    assert!(body["html"].as_str().unwrap().contains(
        r#"href="https:&#x2F;&#x2F;tienda.example.com&#x2F;reset?token=abc""#
    ));
    assert!(
        body["text"]
            .as_str()
            .unwrap()
            .contains("https://tienda.example.com/reset?token=abc")
    );
}

#[tokio::test]
async fn test_上書きテンプレートは件名と本文をそのまま送る() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(body_partial_json(json!({
            "subject": "¡Oferta especial!",
            "html": "<h1>Promo</h1>"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "email_promo" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut overrides = HashMap::new();
    overrides.insert(
        "promo".to_string(),
        HtmlTemplateOverride {
            subject: Some("¡Oferta especial!".to_string()),
            content: "<h1>Promo</h1>".to_string(),
        },
    );
    let sut = create_provider(&server, overrides);

    let result = sut.send(&request("promo", json!(null))).await;

    assert_eq!(result.id.as_deref(), Some("email_promo"));
}

#[tokio::test]
async fn test_apiエラーは空の結果になりtry_sendでは区別できる() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "statusCode": 403,
            "name": "validation_error",
            "message": "The domain is not verified."
        })))
        .expect(2)
        .mount(&server)
        .await;

    let sut = create_provider(&server, HashMap::new());

    let result = sut.send(&request("order-placed", json!({}))).await;
    assert_eq!(result, NotificationResult::empty());

    let err = sut
        .try_send(&request("order-placed", json!({})))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        NotificationError::SendFailed(ref detail) if detail == "validation_error: The domain is not verified."
    ));
}

#[tokio::test]
async fn test_未知のテンプレートはapiを呼ばない() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let sut = create_provider(&server, HashMap::new());

    let result = sut.send(&request("welcome", json!({}))).await;

    assert_eq!(result, NotificationResult::empty());
}
