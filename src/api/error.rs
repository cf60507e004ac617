use crate::application::lending::LendingError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(LendingError);

impl From<LendingError> for ApiError {
    fn from(err: LendingError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self.0 {
            // 400 Bad Request - 入力検証エラー
            LendingError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),

            // 404 Not Found - リクエストされたリソースが存在しない
            LendingError::MemberNotFound => (StatusCode::NOT_FOUND, "MEMBER_NOT_FOUND"),
            LendingError::BookNotFound => (StatusCode::NOT_FOUND, "BOOK_NOT_FOUND"),
            LendingError::LoanNotFound => (StatusCode::NOT_FOUND, "LOAN_NOT_FOUND"),

            // 409 Conflict - 書籍が貸出中
            LendingError::BookNotAvailable => (StatusCode::CONFLICT, "BOOK_NOT_AVAILABLE"),

            // 422 Unprocessable Entity - 貸出上限
            LendingError::LoanLimitExceeded { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "LOAN_LIMIT_EXCEEDED")
            }

            // 500 Internal Server Error - 保存先の障害
            // 詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            LendingError::Repository { operation, source } => {
                tracing::error!("Repository error during {}: {}", operation, source);
                let body = Json(ErrorResponse::new(
                    "REPOSITORY_ERROR",
                    format!("Failed to {}", operation),
                ));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
        };

        let body = Json(ErrorResponse::new(error_type, self.0.to_string()));
        (status, body).into_response()
    }
}
