// tests/common/app_helper.rs
use super::memory_gateway::MemoryGateway;
use axum::Router;
use std::sync::Arc;
use subscription_backend::api::{app_router, AppState};
use subscription_backend::config::Config;
use subscription_backend::service::subscription_service::SubscriptionService;

/// インメモリゲートウェイで組み立てたアプリ
pub fn setup_app() -> (Router, MemoryGateway) {
    super::init_test_env();

    let gateway = MemoryGateway::new();
    let service = Arc::new(SubscriptionService::new(Arc::new(gateway.clone())));
    let app_state = AppState::new(service, Arc::new(Config::for_testing()));

    (app_router(app_state), gateway)
}
