// src/api/dto/subscription_dto.rs
use crate::domain::subscription_model;
use crate::service::subscription_service::{
    AggregateSubscriptionInput, CreateSubscriptionInput, UpdateSubscriptionInput,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct CreateSubscriptionDto {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub service_name: String,

    #[validate(range(min = 1, message = "must be greater than 0"))]
    pub price: i32,

    pub user_id: Uuid,

    /// MM-YYYY
    pub start_date: String,

    /// MM-YYYY。省略時は継続中
    pub end_date: Option<String>,
}

/// 空文字・0 の項目は変更しない。ただし end_date を省略すると終了日はクリアされる
#[derive(Deserialize, Serialize, Debug, Clone, Default, Validate)]
pub struct UpdateSubscriptionDto {
    pub service_name: Option<String>,
    pub price: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct AggregateSubscriptionDto {
    pub start_date: String,
    pub end_date: String,
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
}

/// 一覧のクエリパラメータ。user_id はハンドラーで UUID として検証する
#[derive(Deserialize, Debug, Clone, Default)]
pub struct SubscriptionListQuery {
    pub user_id: Option<String>,
    pub service_name: Option<String>,
}

impl From<CreateSubscriptionDto> for CreateSubscriptionInput {
    fn from(dto: CreateSubscriptionDto) -> Self {
        Self {
            service_name: dto.service_name,
            price: dto.price,
            user_id: dto.user_id,
            start_date: dto.start_date,
            end_date: dto.end_date,
        }
    }
}

impl From<UpdateSubscriptionDto> for UpdateSubscriptionInput {
    fn from(dto: UpdateSubscriptionDto) -> Self {
        Self {
            service_name: dto.service_name,
            price: dto.price,
            start_date: dto.start_date,
            end_date: dto.end_date,
        }
    }
}

impl From<AggregateSubscriptionDto> for AggregateSubscriptionInput {
    fn from(dto: AggregateSubscriptionDto) -> Self {
        Self {
            start_date: dto.start_date,
            end_date: dto.end_date,
            user_id: dto.user_id,
            service_name: dto.service_name,
        }
    }
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionDto {
    pub id: Uuid,
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub end_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<subscription_model::Model> for SubscriptionDto {
    fn from(model: subscription_model::Model) -> Self {
        Self {
            id: model.id,
            start_date: model.start_month().to_string(),
            end_date: model.end_month().map(|m| m.to_string()),
            service_name: model.service_name,
            price: model.price,
            user_id: model.user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateResponseDto {
    pub total: i64,
}
