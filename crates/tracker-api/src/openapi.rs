//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui`, 스펙 JSON은 `/api-docs/openapi.json`
//! 경로에서 사용 가능합니다.

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::Role;
use crate::repository::{AssetRecord, PublicUser};
use crate::routes::{
    AdminAssetListResponse, AdminAssetView, AssetInput, AssetListResponse, AssetResponse,
    ComponentHealth, ComponentStatus, HealthResponse, LoginRequest, LoginResponse,
    MessageResponse, OwnerSummary, RegisterRequest, RegisterResponse, RoleUpdateRequest,
    RoleUpdateResponse, UsersListResponse,
};

/// CryptoTrack API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CryptoTrack API",
        description = "역할 기반 암호화폐 포트폴리오 트래커 REST API",
        license(name = "MIT")
    ),
    paths(
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::assets::list_assets,
        crate::routes::assets::create_asset,
        crate::routes::assets::update_asset,
        crate::routes::assets::delete_asset,
        crate::routes::admin::list_users,
        crate::routes::admin::update_user_role,
        crate::routes::admin::delete_user,
        crate::routes::health::health_check,
        crate::routes::health::health_ready,
    ),
    components(schemas(
        Role,
        PublicUser,
        AssetRecord,
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        LoginResponse,
        AssetInput,
        AssetResponse,
        AssetListResponse,
        AdminAssetListResponse,
        AdminAssetView,
        OwnerSummary,
        UsersListResponse,
        RoleUpdateRequest,
        RoleUpdateResponse,
        MessageResponse,
        HealthResponse,
        ComponentHealth,
        ComponentStatus,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "회원가입 및 로그인"),
        (name = "assets", description = "소유자 범위 자산 CRUD"),
        (name = "admin", description = "사용자 관리 (관리자 전용)"),
        (name = "health", description = "헬스 체크")
    )
)]
pub struct ApiDoc;

/// Bearer 토큰 보안 스키마 등록.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Swagger UI 라우터 생성.
pub fn swagger_ui_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
