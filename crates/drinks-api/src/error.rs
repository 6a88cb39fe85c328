//! 통합 API 에러 응답 타입.
//!
//! 모든 실패 응답은 같은 형식의 JSON 본문을 사용합니다.
//!
//! ```json
//! {
//!   "success": false,
//!   "error": 404,
//!   "message": "Not Found"
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::AuthError;

/// 실패 응답 본문.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    /// 항상 false
    pub success: bool,
    /// HTTP 상태 코드
    pub error: u16,
    /// 사람이 읽을 수 있는 짧은 메시지
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: status.as_u16(),
            message: message.into(),
        }
    }
}

/// API 에러.
///
/// 핸들러는 이 타입을 반환하고, 응답 변환은 [`IntoResponse`]에서 한 번만 일어납니다.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Not Found")]
    NotFound,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Unprocessable")]
    Unprocessable,
}

impl ApiError {
    /// HTTP 상태 코드.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Auth(e) => e.status(),
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let ApiError::Auth(e) = &self {
            tracing::debug!(code = e.code(), status = status.as_u16(), "인증 실패");
        }

        (status, Json(ErrorEnvelope::new(status, self.to_string()))).into_response()
    }
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;

/// 등록되지 않은 경로용 fallback.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// 경로는 있지만 메서드가 맞지 않을 때의 fallback.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
