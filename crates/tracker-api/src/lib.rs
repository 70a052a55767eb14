//! # Tracker API
//!
//! 역할 기반 암호화폐 포트폴리오 트래커의 REST API 서버입니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (회원가입/로그인, 자산 CRUD, 사용자 관리)
//! - JWT 인증 및 역할 기반 접근 제어
//! - 헬스 체크 엔드포인트
//! - OpenAPI 문서 및 Swagger UI
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: JWT 인증, 비밀번호 해싱, 권한 관리
//! - [`repository`]: 데이터베이스 접근 계층
//! - [`error`]: 단일 API 에러 표면
//! - [`openapi`]: OpenAPI 문서 및 Swagger UI

pub mod auth;
pub mod error;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod state;

pub use auth::{
    authenticate, authorize_admin, hash_password, verify_password, AdminAuth, Claims, JwtAuth,
    Role,
};
pub use error::{ApiError, ApiResult};
pub use routes::create_api_router;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
