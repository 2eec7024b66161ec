// src/domain/subscription_model.rs
use super::month_year::MonthYear;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    /// 常に月初 00:00:00 UTC
    pub start_date: DateTime<Utc>,
    /// None は継続中（終了日なし）
    #[sea_orm(nullable)]
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.updated_at = Set(Utc::now());
        }
        Ok(self)
    }
}

impl Model {
    pub fn start_month(&self) -> MonthYear {
        MonthYear::from(self.start_date)
    }

    pub fn end_month(&self) -> Option<MonthYear> {
        self.end_date.map(MonthYear::from)
    }

    pub fn is_open_ended(&self) -> bool {
        self.end_date.is_none()
    }
}
