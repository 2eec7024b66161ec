// src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid {field}: '{value}' (expected MM-YYYY)")]
    InvalidDate { field: &'static str, value: String },

    #[error("end_date ({end}) must not be before start_date ({start})")]
    InvalidDateRange { start: String, end: String },

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Multiple validation errors")]
    ValidationErrors(Vec<String>),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidDate { .. }
            | AppError::InvalidDateRange { .. }
            | AppError::ValidationError(_)
            | AppError::ValidationErrors(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DbErr(DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated) => {
                StatusCode::NOT_FOUND
            }
            AppError::DbErr(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// axum でエラーをHTTPレスポンスに変換するための実装
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let display = self.to_string();

        let error_response = match self {
            AppError::InvalidDate { field, value } => ErrorResponse::new(display, "invalid_date")
                .with_details(json!({ "field": field, "value": value })),
            AppError::InvalidDateRange { start, end } => {
                ErrorResponse::new(display, "invalid_date_range")
                    .with_details(json!({ "start_date": start, "end_date": end }))
            }
            AppError::NotFound(message) => ErrorResponse::new(message, "not_found"),
            AppError::DbErr(db_err) => {
                // サーバーログには詳細を出す
                tracing::error!(error = ?db_err, "Database error");

                match &db_err {
                    DbErr::RecordNotFound(entity) => ErrorResponse::new(
                        "The requested resource was not found".to_string(),
                        "not_found",
                    )
                    .with_details(json!({ "entity": entity })),
                    DbErr::RecordNotUpdated => ErrorResponse::new(
                        "The requested resource was not found".to_string(),
                        "not_found",
                    ),
                    _ => ErrorResponse::new(
                        "A database error occurred".to_string(),
                        "database_error",
                    ),
                }
            }
            AppError::ValidationError(message) => {
                ErrorResponse::new(message, "validation_error")
            }
            AppError::ValidationErrors(errors) => {
                let mut field_errors = HashMap::new();
                for error in &errors {
                    if let Some((field, message)) = error.split_once(": ") {
                        field_errors
                            .entry(field.to_string())
                            .or_insert_with(Vec::new)
                            .push(message.to_string());
                    }
                }
                let errors_array: Vec<serde_json::Value> =
                    errors.iter().map(|e| json!({ "message": e })).collect();

                let mut response =
                    ErrorResponse::new("Validation failed".to_string(), "validation_errors");
                response.validation_errors = Some(field_errors);
                response.errors = Some(errors_array);
                response
            }
            AppError::BadRequest(message) => ErrorResponse::new(message, "bad_request"),
        };

        (status, Json(error_response)).into_response()
    }
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;

/// 統一的なエラーレスポンス構造
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<HashMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<serde_json::Value>>,
    pub error_type: String,
}

impl ErrorResponse {
    fn new(message: String, error_type: &str) -> Self {
        Self {
            success: false,
            error: message.clone(),
            message,
            details: None,
            validation_errors: None,
            errors: None,
            error_type: error_type.to_string(),
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
