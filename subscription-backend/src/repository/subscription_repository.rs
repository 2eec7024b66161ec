// src/repository/subscription_repository.rs
use crate::domain::month_year::AggregationWindow;
use crate::domain::subscription_model::{
    self, ActiveModel as SubscriptionActiveModel, Entity as SubscriptionEntity,
};
use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, query::*, ActiveValue, DbConn, DbErr};
use sea_orm::{Condition, QueryFilter, QueryOrder};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

/// 一覧・集計で使う任意の絞り込み条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionFilter {
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
}

impl SubscriptionFilter {
    /// nil UUID と空文字は「条件なし」に正規化する
    pub fn new(user_id: Option<Uuid>, service_name: Option<String>) -> Self {
        Self {
            user_id: user_id.filter(|id| !id.is_nil()),
            service_name: service_name.filter(|name| !name.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.service_name.is_none()
    }

    fn condition(&self) -> Condition {
        let mut conditions = Condition::all();

        if let Some(user_id) = self.user_id {
            conditions = conditions.add(subscription_model::Column::UserId.eq(user_id));
        }

        if let Some(service_name) = &self.service_name {
            conditions =
                conditions.add(subscription_model::Column::ServiceName.eq(service_name.as_str()));
        }

        conditions
    }

    /// メモリ上のレコードに同じ条件を適用する
    pub fn matches(&self, model: &subscription_model::Model) -> bool {
        self.user_id.map_or(true, |id| model.user_id == id)
            && self
                .service_name
                .as_deref()
                .map_or(true, |name| model.service_name == name)
    }
}

/// サブスクリプションの永続化境界
#[async_trait]
pub trait SubscriptionGateway: Send + Sync {
    async fn create(
        &self,
        subscription: subscription_model::Model,
    ) -> Result<subscription_model::Model, DbErr>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<subscription_model::Model>, DbErr>;

    /// 全カラムを置き換える。対象行がなければ `DbErr::RecordNotUpdated`
    async fn update(
        &self,
        subscription: subscription_model::Model,
    ) -> Result<subscription_model::Model, DbErr>;

    /// 削除した行数を返す
    async fn delete(&self, id: Uuid) -> Result<u64, DbErr>;

    /// created_at の昇順
    async fn find_with_filter(
        &self,
        filter: &SubscriptionFilter,
    ) -> Result<Vec<subscription_model::Model>, DbErr>;

    async fn sum_price_in_window(
        &self,
        window: &AggregationWindow,
        filter: &SubscriptionFilter,
    ) -> Result<i64, DbErr>;
}

pub struct SubscriptionRepository {
    db: Arc<DbConn>,
}

impl SubscriptionRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionGateway for SubscriptionRepository {
    async fn create(
        &self,
        subscription: subscription_model::Model,
    ) -> Result<subscription_model::Model, DbErr> {
        let started = Instant::now();
        let id = subscription.id;

        let result = SubscriptionActiveModel::from(subscription)
            .reset_all()
            .insert(self.db.as_ref())
            .await;

        match &result {
            Ok(_) => debug!(
                subscription_id = %id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Subscription row inserted"
            ),
            Err(e) => warn!(subscription_id = %id, error = %e, "Subscription insert failed"),
        }
        result
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<subscription_model::Model>, DbErr> {
        SubscriptionEntity::find_by_id(id).one(self.db.as_ref()).await
    }

    async fn update(
        &self,
        subscription: subscription_model::Model,
    ) -> Result<subscription_model::Model, DbErr> {
        let started = Instant::now();
        let id = subscription.id;

        // 主キー以外をすべて Set にして全置換する
        let mut active = SubscriptionActiveModel::from(subscription).reset_all();
        active.id = ActiveValue::Unchanged(id);

        let result = active.update(self.db.as_ref()).await;

        match &result {
            Ok(_) => debug!(
                subscription_id = %id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Subscription row updated"
            ),
            Err(e) => warn!(subscription_id = %id, error = %e, "Subscription update failed"),
        }
        result
    }

    async fn delete(&self, id: Uuid) -> Result<u64, DbErr> {
        let result = SubscriptionEntity::delete_by_id(id).exec(self.db.as_ref()).await?;
        debug!(
            subscription_id = %id,
            rows_affected = result.rows_affected,
            "Subscription delete executed"
        );
        Ok(result.rows_affected)
    }

    async fn find_with_filter(
        &self,
        filter: &SubscriptionFilter,
    ) -> Result<Vec<subscription_model::Model>, DbErr> {
        let started = Instant::now();

        let subscriptions = SubscriptionEntity::find()
            .filter(filter.condition())
            .order_by_asc(subscription_model::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        debug!(
            user_id = ?filter.user_id,
            service_name = ?filter.service_name,
            count = subscriptions.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Subscriptions listed"
        );
        Ok(subscriptions)
    }

    async fn sum_price_in_window(
        &self,
        window: &AggregationWindow,
        filter: &SubscriptionFilter,
    ) -> Result<i64, DbErr> {
        let started = Instant::now();

        // 期間と重なる行: start_date <= window.end AND (end_date >= window.start OR end_date IS NULL)
        let overlap = Condition::all()
            .add(subscription_model::Column::StartDate.lte(window.end))
            .add(
                Condition::any()
                    .add(subscription_model::Column::EndDate.gte(window.start))
                    .add(subscription_model::Column::EndDate.is_null()),
            );

        let total = SubscriptionEntity::find()
            .select_only()
            .column_as(Expr::cust("COALESCE(SUM(price), 0)"), "total")
            .filter(overlap)
            .filter(filter.condition())
            .into_tuple::<i64>()
            .one(self.db.as_ref())
            .await?
            .unwrap_or(0);

        debug!(
            window_start = %window.start,
            window_end = %window.end,
            user_id = ?filter.user_id,
            service_name = ?filter.service_name,
            total,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Subscription prices summed"
        );
        Ok(total)
    }
}
