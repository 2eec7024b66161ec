// src/service/subscription_service.rs

use crate::domain::month_year::{AggregationWindow, MonthYear};
use crate::domain::subscription_model;
use crate::error::{AppError, AppResult};
use crate::repository::subscription_repository::{SubscriptionFilter, SubscriptionGateway};
use crate::utils::error_helper::{
    invalid_date_error, invalid_date_range_error, not_found_error, validation_error,
};
use chrono::Utc;
use sea_orm::DbErr;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

const CONTEXT: &str = "subscription_service";

#[derive(Debug, Clone)]
pub struct CreateSubscriptionInput {
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: String,
    pub end_date: Option<String>,
}

/// 部分更新の入力。`end_date` だけは未指定・空文字でも「終了日なし」に上書きされる
#[derive(Debug, Clone, Default)]
pub struct UpdateSubscriptionInput {
    pub service_name: Option<String>,
    pub price: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AggregateSubscriptionInput {
    pub start_date: String,
    pub end_date: String,
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
}

pub struct SubscriptionService {
    repo: Arc<dyn SubscriptionGateway>,
}

fn parse_month(field: &'static str, text: &str) -> AppResult<MonthYear> {
    text.parse::<MonthYear>()
        .map_err(|_| invalid_date_error(field, text, CONTEXT))
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}

fn persistence_error(operation: &str, id: Option<Uuid>, err: DbErr) -> AppError {
    error!(operation = %operation, subscription_id = ?id, error = %err, "Persistence call failed");
    AppError::DbErr(err)
}

impl SubscriptionService {
    pub fn new(repo: Arc<dyn SubscriptionGateway>) -> Self {
        Self { repo }
    }

    // --- CRUD ---
    pub async fn create(&self, input: CreateSubscriptionInput) -> AppResult<subscription_model::Model> {
        if input.service_name.is_empty() {
            return Err(validation_error("service_name", "must not be empty"));
        }
        if input.price <= 0 {
            return Err(validation_error("price", "must be greater than 0"));
        }

        let start = parse_month("start_date", &input.start_date)?;
        let end = match non_empty(input.end_date.as_deref()) {
            Some(text) => {
                let end = parse_month("end_date", text)?;
                if end < start {
                    return Err(invalid_date_range_error(start, end, CONTEXT));
                }
                Some(end)
            }
            None => None,
        };

        let now = Utc::now();
        let subscription = subscription_model::Model {
            id: Uuid::new_v4(),
            service_name: input.service_name,
            price: input.price,
            user_id: input.user_id,
            start_date: start.first_instant(),
            end_date: end.map(|m| m.first_instant()),
            created_at: now,
            updated_at: now,
        };
        let id = subscription.id;

        let created = self
            .repo
            .create(subscription)
            .await
            .map_err(|e| persistence_error("create", Some(id), e))?;

        info!(
            subscription_id = %created.id,
            user_id = %created.user_id,
            service_name = %created.service_name,
            price = created.price,
            "Subscription created"
        );
        Ok(created)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<subscription_model::Model> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| persistence_error("get_by_id", Some(id), e))?
            .ok_or_else(|| not_found_error("Subscription", &id.to_string(), CONTEXT))
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateSubscriptionInput,
    ) -> AppResult<subscription_model::Model> {
        let mut subscription = self.get_by_id(id).await?;
        let mut updated_fields: Vec<&str> = Vec::new();

        if let Some(service_name) = input.service_name.filter(|s| !s.is_empty()) {
            subscription.service_name = service_name;
            updated_fields.push("service_name");
        }

        if let Some(price) = input.price.filter(|p| *p > 0) {
            subscription.price = price;
            updated_fields.push("price");
        }

        if let Some(text) = non_empty(input.start_date.as_deref()) {
            subscription.start_date = parse_month("start_date", text)?.first_instant();
            updated_fields.push("start_date");
        }

        match non_empty(input.end_date.as_deref()) {
            Some(text) => {
                let end = parse_month("end_date", text)?;
                let start = subscription.start_month();
                if end < start {
                    return Err(invalid_date_range_error(start, end, CONTEXT));
                }
                subscription.end_date = Some(end.first_instant());
                updated_fields.push("end_date");
            }
            None => {
                // 終了日の指定がなければ常に継続中として扱う
                if subscription.end_date.is_some() {
                    info!(subscription_id = %id, "end_date_cleared");
                }
                subscription.end_date = None;
            }
        }

        let updated = match self.repo.update(subscription).await {
            Ok(model) => model,
            Err(DbErr::RecordNotUpdated) => {
                return Err(not_found_error("Subscription", &id.to_string(), CONTEXT))
            }
            Err(e) => return Err(persistence_error("update", Some(id), e)),
        };

        info!(
            subscription_id = %id,
            updated_fields = ?updated_fields,
            "Subscription updated"
        );
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let rows_affected = self
            .repo
            .delete(id)
            .await
            .map_err(|e| persistence_error("delete", Some(id), e))?;

        if rows_affected == 0 {
            return Err(not_found_error("Subscription", &id.to_string(), CONTEXT));
        }

        info!(subscription_id = %id, "Subscription deleted");
        Ok(())
    }

    pub async fn list(
        &self,
        user_id: Option<Uuid>,
        service_name: Option<String>,
    ) -> AppResult<Vec<subscription_model::Model>> {
        let filter = SubscriptionFilter::new(user_id, service_name);
        let subscriptions = self
            .repo
            .find_with_filter(&filter)
            .await
            .map_err(|e| persistence_error("list", None, e))?;

        info!(
            user_id = ?filter.user_id,
            service_name = ?filter.service_name,
            count = subscriptions.len(),
            "Subscriptions listed"
        );
        Ok(subscriptions)
    }

    // --- Aggregation ---
    pub async fn aggregate(&self, input: AggregateSubscriptionInput) -> AppResult<i64> {
        let start = parse_month("start_date", &input.start_date)?;
        let end = parse_month("end_date", &input.end_date)?;
        if end < start {
            return Err(invalid_date_range_error(start, end, CONTEXT));
        }

        let window = AggregationWindow::from_months(start, end);
        let filter = SubscriptionFilter::new(input.user_id, input.service_name);

        let total = self
            .repo
            .sum_price_in_window(&window, &filter)
            .await
            .map_err(|e| persistence_error("aggregate", None, e))?;

        info!(
            start_date = %start,
            end_date = %end,
            user_id = ?filter.user_id,
            service_name = ?filter.service_name,
            total,
            "Subscription cost aggregated"
        );
        Ok(total)
    }
}
