// src/main.rs
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use subscription_backend::api::{app_router, AppState};
use subscription_backend::config::Config;
use subscription_backend::db;
use subscription_backend::logging::init_tracing;
use subscription_backend::repository::subscription_repository::{
    SubscriptionGateway, SubscriptionRepository,
};
use subscription_backend::service::subscription_service::SubscriptionService;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    tracing::info!("Starting Subscription Backend server...");

    // 設定を読み込む
    let app_config = Arc::new(Config::from_env()?);
    tracing::info!("Configuration loaded: {:?}", app_config);

    // データベース接続を作成（DB_SCHEMA 指定時はスキーマも用意する）
    // search_path は接続オプションで設定される
    let db_pool = db::connect(&app_config).await?;
    tracing::info!("Database pool created successfully.");

    if app_config.auto_migrate {
        tracing::info!("Running pending migrations...");
        Migrator::up(&db_pool, None).await?;
    }

    let db_pool = Arc::new(db_pool);
    let repository: Arc<dyn SubscriptionGateway> =
        Arc::new(SubscriptionRepository::new(Arc::clone(&db_pool)));
    let subscription_service = Arc::new(SubscriptionService::new(repository));

    // ルーターの設定
    let app_state = AppState::new(subscription_service, app_config.clone());
    let app = app_router(app_state);

    let listener = TcpListener::bind(&app_config.server_addr).await?;
    tracing::info!("Server listening on {}", app_config.server_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // ルーターが破棄された後なら接続を明示的に閉じる
    if let Ok(pool) = Arc::try_unwrap(db_pool) {
        pool.close().await?;
    }
    tracing::info!("Server stopped.");

    Ok(())
}

/// SIGINT / SIGTERM のどちらかを受け取るまで待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl+C received, shutting down."),
        _ = terminate => tracing::info!("SIGTERM received, shutting down."),
    }
}
