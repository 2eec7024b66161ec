// tests/common/memory_gateway.rs

use async_trait::async_trait;
use sea_orm::DbErr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use subscription_backend::domain::month_year::AggregationWindow;
use subscription_backend::domain::subscription_model::Model;
use subscription_backend::repository::subscription_repository::{
    SubscriptionFilter, SubscriptionGateway,
};
use uuid::Uuid;

/// テスト用のインメモリゲートウェイ
#[derive(Clone, Default)]
pub struct MemoryGateway {
    rows: Arc<Mutex<Vec<Model>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以降の呼び出しをすべて DbErr で失敗させる
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn get(&self, id: Uuid) -> Option<Model> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id == id)
            .cloned()
    }

    fn check(&self) -> Result<(), DbErr> {
        if self.failing.load(Ordering::SeqCst) {
            Err(DbErr::Custom("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SubscriptionGateway for MemoryGateway {
    async fn create(&self, subscription: Model) -> Result<Model, DbErr> {
        self.check()?;
        self.rows.lock().unwrap().push(subscription.clone());
        Ok(subscription)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Model>, DbErr> {
        self.check()?;
        Ok(self.get(id))
    }

    async fn update(&self, mut subscription: Model) -> Result<Model, DbErr> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|row| row.id == subscription.id)
            .ok_or(DbErr::RecordNotUpdated)?;
        subscription.updated_at = chrono::Utc::now();
        *row = subscription.clone();
        Ok(subscription)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, DbErr> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok((before - rows.len()) as u64)
    }

    async fn find_with_filter(&self, filter: &SubscriptionFilter) -> Result<Vec<Model>, DbErr> {
        self.check()?;
        let mut matched: Vec<Model> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect();
        matched.sort_by_key(|row| row.created_at);
        Ok(matched)
    }

    async fn sum_price_in_window(
        &self,
        window: &AggregationWindow,
        filter: &SubscriptionFilter,
    ) -> Result<i64, DbErr> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| filter.matches(row) && window.overlaps(row.start_date, row.end_date))
            .map(|row| i64::from(row.price))
            .sum())
    }
}
