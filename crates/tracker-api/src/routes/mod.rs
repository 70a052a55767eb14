//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness / readiness)
//! - `/auth/register`, `/auth/login` - 인증 (토큰 불필요)
//! - `/assets` - 자산 CRUD (토큰 필요, 소유자 범위)
//! - `/admin/users` - 사용자 관리 (관리자 전용)

pub mod admin;
pub mod assets;
pub mod auth;
pub mod health;

pub use admin::{admin_router, RoleUpdateRequest, RoleUpdateResponse, UsersListResponse};
pub use assets::{
    assets_router, AdminAssetListResponse, AdminAssetView, AssetInput, AssetListResponse,
    AssetResponse, OwnerSummary,
};
pub use auth::{auth_router, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};

use std::sync::Arc;

use axum::Router;
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// 메시지만 담는 성공 응답 (삭제 계열 엔드포인트에서 사용).
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/health", health_router())
        .nest("/auth", auth_router())
        .nest("/assets", assets_router())
        .nest("/admin/users", admin_router())
}
