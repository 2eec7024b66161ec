// src/api/handlers/subscription_handler.rs
use crate::api::dto::subscription_dto::{
    AggregateResponseDto, AggregateSubscriptionDto, CreateSubscriptionDto, SubscriptionDto,
    SubscriptionListQuery, UpdateSubscriptionDto,
};
use crate::api::AppState;
use crate::error::AppResult;
use crate::extractors::{parse_optional_uuid, ValidatedJson, ValidatedUuid};
use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tracing::info;

// --- CRUD Handlers ---

pub async fn create_subscription_handler(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateSubscriptionDto>,
) -> AppResult<impl IntoResponse> {
    info!(
        user_id = %payload.user_id,
        service_name = %payload.service_name,
        "Creating new subscription"
    );

    let subscription = app_state
        .subscription_service
        .create(payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(SubscriptionDto::from(subscription))))
}

pub async fn get_subscription_handler(
    State(app_state): State<AppState>,
    ValidatedUuid(id): ValidatedUuid,
) -> AppResult<Json<SubscriptionDto>> {
    let subscription = app_state.subscription_service.get_by_id(id).await?;
    Ok(Json(subscription.into()))
}

pub async fn update_subscription_handler(
    State(app_state): State<AppState>,
    ValidatedUuid(id): ValidatedUuid,
    ValidatedJson(payload): ValidatedJson<UpdateSubscriptionDto>,
) -> AppResult<Json<SubscriptionDto>> {
    let subscription = app_state
        .subscription_service
        .update(id, payload.into())
        .await?;
    Ok(Json(subscription.into()))
}

pub async fn delete_subscription_handler(
    State(app_state): State<AppState>,
    ValidatedUuid(id): ValidatedUuid,
) -> AppResult<StatusCode> {
    app_state.subscription_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_subscriptions_handler(
    State(app_state): State<AppState>,
    Query(query): Query<SubscriptionListQuery>,
) -> AppResult<Json<Vec<SubscriptionDto>>> {
    let user_id = parse_optional_uuid("user_id", query.user_id.as_deref())?;

    let subscriptions = app_state
        .subscription_service
        .list(user_id, query.service_name)
        .await?;

    Ok(Json(
        subscriptions.into_iter().map(SubscriptionDto::from).collect(),
    ))
}

// --- Aggregation Handler ---

pub async fn aggregate_subscriptions_handler(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AggregateSubscriptionDto>,
) -> AppResult<Json<AggregateResponseDto>> {
    let total = app_state
        .subscription_service
        .aggregate(payload.into())
        .await?;
    Ok(Json(AggregateResponseDto { total }))
}

pub fn subscription_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/subscriptions",
            get(list_subscriptions_handler).post(create_subscription_handler),
        )
        .route(
            "/subscriptions/aggregate",
            post(aggregate_subscriptions_handler),
        )
        .route(
            "/subscriptions/{id}",
            get(get_subscription_handler)
                .put(update_subscription_handler)
                .delete(delete_subscription_handler),
        )
        .with_state(app_state)
}
