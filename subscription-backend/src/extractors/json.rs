use crate::error::AppError;
use crate::utils::error_helper::convert_validation_errors;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON ボディを取り出して validator で検証する Extractor
///
/// axum の `Json` は不正なボディを 422 で拒否するが、この API では
/// 入力不備はすべて 400 として返す。
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| convert_validation_errors(errors, "request body"))?;

        Ok(ValidatedJson(value))
    }
}
