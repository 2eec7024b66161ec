use crate::error::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

/// URLパスからUUIDパラメータ名を推測するヘルパー関数
fn extract_uuid_param_name(path: &str) -> &'static str {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    // UUID の直前のセグメントからパラメータ名を推測
    match segments.len().checked_sub(2).map(|i| segments[i]) {
        Some("subscriptions") => "subscription_id",
        Some("users") => "user_id",
        _ => "id",
    }
}

/// 統一UUID Extractor
/// パスパラメータからUUIDを抽出し、不正な値はドメインロジックに到達する前に 400 で拒否する
#[derive(Debug, Clone, Copy)]
pub struct ValidatedUuid(pub Uuid);

impl<S> FromRequestParts<S> for ValidatedUuid
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let param_name = extract_uuid_param_name(parts.uri.path());

        let Path(uuid_str) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                AppError::BadRequest(format!("Missing path parameter '{}': {}", param_name, e))
            })?;

        let uuid = Uuid::parse_str(&uuid_str).map_err(|_| {
            AppError::BadRequest(format!(
                "Invalid UUID format for '{}': '{}'",
                param_name, uuid_str
            ))
        })?;

        Ok(ValidatedUuid(uuid))
    }
}

/// クエリ文字列などの任意 UUID をパースする（空文字は未指定扱い）
pub fn parse_optional_uuid(name: &str, value: Option<&str>) -> Result<Option<Uuid>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Uuid::parse_str(raw).map(Some).map_err(|_| {
            AppError::BadRequest(format!("Invalid UUID format for '{}': '{}'", name, raw))
        }),
    }
}
