// tests/common/test_data.rs
use subscription_backend::service::subscription_service::{
    AggregateSubscriptionInput, CreateSubscriptionInput,
};
use uuid::Uuid;

pub fn create_input(
    service_name: &str,
    price: i32,
    user_id: Uuid,
    start_date: &str,
    end_date: Option<&str>,
) -> CreateSubscriptionInput {
    CreateSubscriptionInput {
        service_name: service_name.to_string(),
        price,
        user_id,
        start_date: start_date.to_string(),
        end_date: end_date.map(str::to_string),
    }
}

/// Netflix 1000円、07-2025〜10-2025
pub fn netflix(user_id: Uuid) -> CreateSubscriptionInput {
    create_input("Netflix", 1000, user_id, "07-2025", Some("10-2025"))
}

/// Spotify 500円、09-2025〜（終了なし）
pub fn spotify(user_id: Uuid) -> CreateSubscriptionInput {
    create_input("Spotify", 500, user_id, "09-2025", None)
}

pub fn aggregate_input(
    start_date: &str,
    end_date: &str,
    user_id: Option<Uuid>,
    service_name: Option<&str>,
) -> AggregateSubscriptionInput {
    AggregateSubscriptionInput {
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
        user_id,
        service_name: service_name.map(str::to_string),
    }
}
