// subscription-backend/src/utils/error_helper.rs

//! エラーハンドリングの統一化ヘルパー
//!
//! サービス層とハンドラー層で共通して使用するエラー処理パターンを提供します。

use crate::error::AppError;
use tracing::warn;
use validator::ValidationErrors;

// =============================================================================
// バリデーションエラー処理の統一
// =============================================================================

/// validatorのValidationErrorsをAppErrorに変換する統一処理
///
/// # Arguments
/// * `validation_errors` - validator crate からのバリデーションエラー
/// * `context` - エラーが発生したコンテキスト（ログ用）
pub fn convert_validation_errors(validation_errors: ValidationErrors, context: &str) -> AppError {
    warn!(
        context = %context,
        error_count = validation_errors.field_errors().len(),
        "Validation failed"
    );

    let mut errors: Vec<String> = validation_errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| "Invalid value".to_string(), |cow| cow.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();
    errors.sort();

    AppError::ValidationErrors(errors)
}

/// 単一のバリデーションエラーメッセージを生成
pub fn validation_error(field: &str, message: &str) -> AppError {
    AppError::ValidationError(format!("{}: {}", field, message))
}

/// `MM-YYYY` として解釈できない日付のエラーをログ付きで生成
pub fn invalid_date_error(field: &'static str, value: &str, context: &str) -> AppError {
    warn!(
        context = %context,
        field = %field,
        value = %value,
        "Failed to parse month-year date"
    );
    AppError::InvalidDate {
        field,
        value: value.to_string(),
    }
}

/// 終了月が開始月より前の場合のエラーをログ付きで生成
pub fn invalid_date_range_error(
    start: impl ToString,
    end: impl ToString,
    context: &str,
) -> AppError {
    let (start, end) = (start.to_string(), end.to_string());
    warn!(
        context = %context,
        start_date = %start,
        end_date = %end,
        "End date is before start date"
    );
    AppError::InvalidDateRange { start, end }
}

/// リソース未発見エラーをログ付きで生成
pub fn not_found_error(resource: &str, identifier: &str, context: &str) -> AppError {
    warn!(
        context = %context,
        resource = %resource,
        identifier = %identifier,
        "Resource not found"
    );
    AppError::NotFound(format!(
        "{} with identifier {} not found",
        resource, identifier
    ))
}

// =============================================================================
// テスト
// =============================================================================
