// src/api/mod.rs
use crate::config::Config;
use crate::logging::{inject_request_context, logging_middleware};
use crate::service::subscription_service::SubscriptionService;
use axum::{middleware, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub subscription_service: Arc<SubscriptionService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(subscription_service: Arc<SubscriptionService>, config: Arc<Config>) -> Self {
        Self {
            subscription_service,
            config,
        }
    }
}

/// 全ルートにロギングとタイムアウトを掛けたルーター
pub fn app_router(app_state: AppState) -> Router {
    let request_timeout = Duration::from_secs(app_state.config.request_timeout_secs);

    Router::new()
        .merge(handlers::subscription_handler::subscription_router(
            app_state.clone(),
        ))
        .merge(handlers::system_handler::system_router(app_state))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(inject_request_context))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
}
