//! 사용자 관리 API 라우트 (관리자 전용)
//!
//! # 엔드포인트
//!
//! - `GET /admin/users` - 전체 사용자 목록
//! - `PUT /admin/users/{id}` - 사용자 역할 변경
//! - `DELETE /admin/users/{id}` - 사용자 삭제
//!
//! # 자기 보호 규칙
//!
//! 관리자는 이 엔드포인트로 자기 자신을 강등하거나 삭제할 수 없습니다.
//! 자기 자신을 `admin`으로 다시 지정하는 것(사실상 no-op)은 막지
//! 않습니다.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::{AdminAuth, Role};
use crate::error::{ApiError, ApiResult};
use crate::repository::{PublicUser, UserRepository};
use crate::routes::MessageResponse;
use crate::state::AppState;

// ================================================================================================
// Request/Response Types
// ================================================================================================

/// 사용자 목록 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct UsersListResponse {
    /// 전체 사용자 (최신 생성 순, 비밀번호 제외)
    pub users: Vec<PublicUser>,
}

/// 역할 변경 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RoleUpdateRequest {
    /// 새 역할 ("user" | "admin")
    #[serde(default)]
    pub role: Option<String>,
}

/// 역할 변경 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoleUpdateResponse {
    pub message: String,
    pub user: PublicUser,
}

// ================================================================================================
// Policy
// ================================================================================================

/// 자기 강등 금지 확인.
///
/// 대상이 호출자 본인이면서 새 역할이 `user`인 경우만 거부합니다.
/// 본인을 `admin`으로 유지하는 요청은 허용됩니다.
fn ensure_not_self_demotion(target: Uuid, caller: Uuid, new_role: Role) -> ApiResult<()> {
    if target == caller && new_role == Role::User {
        Err(ApiError::self_modification("Cannot demote your own account"))
    } else {
        Ok(())
    }
}

/// 자기 삭제 금지 확인.
fn ensure_not_self_deletion(target: Uuid, caller: Uuid) -> ApiResult<()> {
    if target == caller {
        Err(ApiError::self_modification("Cannot delete your own account"))
    } else {
        Ok(())
    }
}

// ================================================================================================
// Handlers
// ================================================================================================

/// GET /admin/users - 전체 사용자 목록
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "admin",
    responses(
        (status = 200, description = "전체 사용자 목록", body = UsersListResponse),
        (status = 403, description = "관리자 아님")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AdminAuth(claims): AdminAuth,
) -> ApiResult<Json<UsersListResponse>> {
    debug!(admin_id = %claims.sub, "사용자 목록 조회");

    let pool = state.db()?;
    let users = UserRepository::list_all(pool).await?;

    Ok(Json(UsersListResponse { users }))
}

/// PUT /admin/users/{id} - 사용자 역할 변경
#[utoipa::path(
    put,
    path = "/admin/users/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "사용자 ID")),
    request_body = RoleUpdateRequest,
    responses(
        (status = 200, description = "역할 변경됨", body = RoleUpdateResponse),
        (status = 400, description = "잘못된 역할 또는 자기 강등 시도"),
        (status = 403, description = "관리자 아님"),
        (status = 404, description = "사용자 없음")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user_role(
    State(state): State<Arc<AppState>>,
    AdminAuth(claims): AdminAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<RoleUpdateRequest>,
) -> ApiResult<Json<RoleUpdateResponse>> {
    let role = request
        .role
        .as_deref()
        .and_then(Role::parse)
        .ok_or_else(|| ApiError::validation("Valid role (user or admin) is required"))?;

    let pool = state.db()?;

    let user = UserRepository::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    ensure_not_self_demotion(user.id, claims.sub, role)?;

    let updated = UserRepository::update_role(pool, id, role)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    info!(admin_id = %claims.sub, user_id = %id, role = %role, "사용자 역할 변경");

    Ok(Json(RoleUpdateResponse {
        message: "User role updated successfully".to_string(),
        user: updated,
    }))
}

/// DELETE /admin/users/{id} - 사용자 삭제
///
/// 해당 사용자의 자산은 삭제하지 않습니다. 자산의 owner 참조는 댕글링
/// 상태로 남고 관리자 목록에서 "Deleted User"로 표시됩니다.
#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "사용자 ID")),
    responses(
        (status = 200, description = "사용자 삭제됨", body = MessageResponse),
        (status = 400, description = "자기 삭제 시도"),
        (status = 403, description = "관리자 아님"),
        (status = 404, description = "사용자 없음")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    AdminAuth(claims): AdminAuth,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let pool = state.db()?;

    let user = UserRepository::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    ensure_not_self_deletion(user.id, claims.sub)?;

    UserRepository::delete(pool, id).await?;

    info!(admin_id = %claims.sub, user_id = %id, "사용자 삭제");

    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}

// ================================================================================================
// Router
// ================================================================================================

/// Admin 사용자 관리 라우터 생성.
pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_users))
        .route("/{id}", put(update_user_role).delete(delete_user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{create_token, Claims};
    use crate::state::create_test_state;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

    #[test]
    fn test_self_demotion_is_blocked() {
        let admin = Uuid::new_v4();
        let result = ensure_not_self_demotion(admin, admin, Role::User);
        assert!(matches!(result, Err(ApiError::SelfModification(_))));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Cannot demote your own account"
        );
    }

    #[test]
    fn test_self_promotion_is_allowed() {
        // 본인을 admin으로 다시 지정하는 것은 no-op이지만 막지 않음
        let admin = Uuid::new_v4();
        assert!(ensure_not_self_demotion(admin, admin, Role::Admin).is_ok());
    }

    #[test]
    fn test_demoting_another_admin_is_allowed() {
        let caller = Uuid::new_v4();
        let target = Uuid::new_v4();
        assert!(ensure_not_self_demotion(target, caller, Role::User).is_ok());
    }

    #[test]
    fn test_self_deletion_is_blocked() {
        let admin = Uuid::new_v4();
        let result = ensure_not_self_deletion(admin, admin);
        assert!(matches!(result, Err(ApiError::SelfModification(_))));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Cannot delete your own account"
        );

        assert!(ensure_not_self_deletion(Uuid::new_v4(), admin).is_ok());
    }

    fn test_app() -> Router {
        Router::new()
            .nest("/admin/users", admin_router())
            .with_state(Arc::new(create_test_state()))
    }

    async fn body_error(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        json["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_list_users_without_token_returns_403() {
        // 관리자 라우트는 미인증도 401이 아닌 403
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/admin/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_error(response).await,
            "Forbidden: Admin access required"
        );
    }

    #[tokio::test]
    async fn test_list_users_with_user_role_returns_403() {
        let token = create_token(&Claims::new(Uuid::new_v4(), Role::User), TEST_SECRET).unwrap();

        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/admin/users")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_update_role_with_invalid_role_returns_400() {
        let token = create_token(&Claims::new(Uuid::new_v4(), Role::Admin), TEST_SECRET).unwrap();

        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::PUT)
                    .uri(format!("/admin/users/{}", Uuid::new_v4()))
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"role": "superuser"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_error(response).await,
            "Valid role (user or admin) is required"
        );
    }
}
