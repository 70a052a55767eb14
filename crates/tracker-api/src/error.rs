//! API 에러 타입.
//!
//! 모든 핸들러가 공유하는 단일 에러 표면입니다. 각 변형은 정책 위반
//! 지점에서 명시적으로 생성되어 `?`로 응답 매핑까지 전파됩니다.
//! 어디에도 재시도는 없습니다.
//!
//! 실패 응답 본문은 항상 `{"error": "<메시지>"}` 형태입니다.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// API 에러.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400 - 누락/형식 오류/범위 밖 입력
    #[error("{0}")]
    Validation(String),

    /// 401 - 잘못된 자격증명 (원인 구분 없이 동일한 메시지)
    #[error("{0}")]
    Auth(String),

    /// 403 - 인증됐지만 역할/소유권 부족
    #[error("{0}")]
    Forbidden(String),

    /// 404 - 참조 대상 없음
    #[error("{0}")]
    NotFound(String),

    /// 409 - 유니크 제약 위반
    #[error("{0}")]
    Conflict(String),

    /// 400 - 관리자 자기 자신에 대한 강등/삭제 시도
    #[error("{0}")]
    SelfModification(String),

    /// 500 - 예기치 못한 스토어 실패. 상세는 서버 로그에만 남깁니다.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        ApiError::Auth(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn self_modification(message: impl Into<String>) -> Self {
        ApiError::SelfModification(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    /// HTTP 상태 코드 매핑.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::SelfModification(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        // 내부 SQL 에러를 클라이언트에 노출하지 않습니다
        tracing::error!(error = %err, "Database error");
        ApiError::internal("Internal Server Error")
    }
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;
