//! # Core Service サーバー
//!
//! マーケットプレイスのホストフレームワークから呼び出される内部サービス。
//!
//! ## 役割
//!
//! - **メール通知**: テンプレート解決とメール送信 API への送信
//! - **検索インデックス同期**: 商品削除時のインデックス削除と、失敗時の復元
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CORE_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `CORE_PORT` | **Yes** | ポート番号 |
//! | `NOTIFICATION_BACKEND` | No | `resend` / `smtp` / `noop`（デフォルト: `resend`） |
//! | `RESEND_API_KEY` | **Yes** | メール送信 API の API キー |
//! | `NOTIFICATION_FROM_ADDRESS` | **Yes** | 送信元アドレス |
//! | `NOTIFICATION_HTML_TEMPLATES` | No | テンプレート上書き（JSON） |
//! | `ALGOLIA_APP_ID` | **Yes** | 検索インデックスのアプリケーション ID |
//! | `ALGOLIA_API_KEY` | **Yes** | 検索インデックスの API キー |
//! | `ALGOLIA_PRODUCT_INDEX_NAME` | No | 商品インデックス名（デフォルト: `products`） |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p marketlink-core-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use axum::{
    Router,
    routing::{get, post},
};
use marketlink_core_service::{
    config::{CoreConfig, NotificationBackend, NotificationConfig},
    handler::{
        NotificationState,
        SearchIndexState,
        delete_products_from_index,
        health_check,
        send_notification,
    },
    usecase::notification::{
        NotificationProviderRegistry,
        ResendNotificationProvider,
        TemplateRenderer,
    },
    workflow::{ModuleContainer, SEARCH_INDEX_MODULE},
};
use marketlink_infra::{
    notification::{
        NoopNotificationSender,
        NotificationSender,
        ResendNotificationSender,
        SmtpNotificationSender,
    },
    search_index::{AlgoliaSearchIndex, SearchIndexService},
};
use marketlink_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Core Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("core-service"))?;

    let config = CoreConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Core Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // 通知プロバイダー
    let sender = create_notification_sender(&config.notification);
    let renderer = Arc::new(TemplateRenderer::new().context("テンプレートの初期化に失敗しました")?);
    let provider =
        ResendNotificationProvider::new(config.notification.provider_options(), sender, renderer)
            .context("通知プロバイダーのオプションが不正です")?;
    let mut registry = NotificationProviderRegistry::new();
    registry.register(Arc::new(provider));
    tracing::info!(
        providers = ?registry.registered_identifiers(),
        backend = %config.notification.backend,
        "通知プロバイダーを登録しました"
    );
    let notification_state = Arc::new(NotificationState { registry });

    // ワークフローステップが解決するモジュール
    let mut container = ModuleContainer::new();
    container.register::<dyn SearchIndexService>(
        SEARCH_INDEX_MODULE,
        Arc::new(AlgoliaSearchIndex::new(config.search_index.clone())),
    );
    let search_index_state = Arc::new(SearchIndexState {
        container: Arc::new(container),
    });

    // ルーター構築
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/internal/notifications", post(send_notification))
        .with_state(notification_state)
        .route(
            "/internal/search-index/products/delete",
            post(delete_products_from_index),
        )
        .with_state(search_index_state)
        .layer(TraceLayer::new_for_http());

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("有効なアドレスではありません")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Core Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// `NOTIFICATION_BACKEND` に応じてメール送信実装を選択する
fn create_notification_sender(config: &NotificationConfig) -> Arc<dyn NotificationSender> {
    match config.backend {
        NotificationBackend::Resend => Arc::new(ResendNotificationSender::new(
            config.resend_api_key.clone().unwrap_or_default(),
            &config.resend_base_url,
        )),
        NotificationBackend::Smtp => Arc::new(SmtpNotificationSender::new(
            &config.smtp_host,
            config.smtp_port,
        )),
        NotificationBackend::Noop => Arc::new(NoopNotificationSender),
    }
}
