//! 인증 API 라우트
//!
//! 회원가입 및 로그인을 제공합니다. 이 라우트만 토큰 없이 호출 가능합니다.
//!
//! # 엔드포인트
//!
//! - `POST /auth/register` - 회원가입 (역할은 항상 `user`로 강제)
//! - `POST /auth/login` - 로그인, JWT 토큰 발급

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::auth::{create_token, hash_password, verify_password, Claims, Role};
use crate::error::{ApiError, ApiResult};
use crate::repository::{NewUser, PublicUser, UserRepository};
use crate::state::AppState;

// ================================================================================================
// Request/Response Types
// ================================================================================================

/// 회원가입 요청.
///
/// 필드 누락을 422가 아닌 400으로 응답하기 위해 모든 필드를 Option으로
/// 받고 핸들러에서 직접 검증합니다.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// 회원가입 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    /// 생성된 사용자 (공개 투영)
    pub user: PublicUser,
}

/// 로그인 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// 로그인 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer 토큰 (7일 만료)
    pub token: String,
    /// 사용자 정보 (공개 투영)
    pub user: PublicUser,
}

// ================================================================================================
// Handlers
// ================================================================================================

/// POST /auth/register - 회원가입
///
/// 요청이 역할을 지정할 방법은 없으며 항상 `user`로 생성됩니다.
/// 관리자 계정은 `create-admin` CLI로만 프로비저닝합니다.
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "사용자 생성됨", body = RegisterResponse),
        (status = 400, description = "필수 필드 누락"),
        (status = 409, description = "이미 존재하는 이메일")
    )
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let (username, email, password) = match (
        request.username.filter(|s| !s.is_empty()),
        request.email.filter(|s| !s.is_empty()),
        request.password.filter(|s| !s.is_empty()),
    ) {
        (Some(u), Some(e), Some(p)) => (u, e, p),
        _ => {
            return Err(ApiError::validation(
                "username, email, and password are required",
            ))
        }
    };

    let pool = state.db()?;

    if UserRepository::find_by_email(pool, &email).await?.is_some() {
        return Err(ApiError::conflict("User already exists"));
    }

    let password_hash = hash_password(&password).map_err(|e| {
        tracing::error!(error = %e, "비밀번호 해싱 실패");
        ApiError::internal("Internal Server Error")
    })?;

    let record = UserRepository::insert(
        pool,
        NewUser {
            username,
            email,
            password_hash,
            role: Role::User,
        },
    )
    .await
    .map_err(|e| {
        // 사전 조회와 삽입 사이의 레이스는 유니크 인덱스가 잡아줍니다
        if e.to_string().contains("users_email_key") {
            ApiError::conflict("User already exists")
        } else {
            ApiError::from(e)
        }
    })?;

    info!(user_id = %record.id, "새 사용자 등록");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: record.into(),
        }),
    ))
}

/// POST /auth/login - 로그인
///
/// 이메일 미존재와 비밀번호 불일치를 구분하지 않고 동일한 401 메시지를
/// 반환합니다.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = LoginResponse),
        (status = 400, description = "필수 필드 누락"),
        (status = 401, description = "잘못된 자격증명")
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let (email, password) = match (
        request.email.filter(|s| !s.is_empty()),
        request.password.filter(|s| !s.is_empty()),
    ) {
        (Some(e), Some(p)) => (e, p),
        _ => return Err(ApiError::validation("email and password are required")),
    };

    let pool = state.db()?;

    let user = UserRepository::find_by_email(pool, &email)
        .await?
        .ok_or_else(|| ApiError::auth("Invalid credentials"))?;

    if !verify_password(&password, &user.password_hash) {
        return Err(ApiError::auth("Invalid credentials"));
    }

    let claims = Claims::new(user.id, user.role);
    let token = create_token(&claims, &state.jwt_secret).map_err(|e| {
        tracing::error!(error = %e, "토큰 발급 실패");
        ApiError::internal("Internal Server Error")
    })?;

    info!(user_id = %user.id, "로그인 성공");

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}

// ================================================================================================
// Router
// ================================================================================================

/// Auth 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn test_app() -> Router {
        Router::new()
            .nest("/auth", auth_router())
            .with_state(Arc::new(create_test_state()))
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_register_missing_fields_returns_400() {
        let response = test_app()
            .oneshot(json_post(
                "/auth/register",
                r#"{"username": "alice", "email": "a@x.com"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "username, email, and password are required");
    }

    #[tokio::test]
    async fn test_register_empty_fields_returns_400() {
        let response = test_app()
            .oneshot(json_post(
                "/auth/register",
                r#"{"username": "", "email": "a@x.com", "password": "secret1"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_missing_fields_returns_400() {
        let response = test_app()
            .oneshot(json_post("/auth/login", r#"{"email": "a@x.com"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "email and password are required");
    }

    #[tokio::test]
    async fn test_register_rejects_get_with_allow_header() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/auth/register")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(response.headers().contains_key(header::ALLOW));
    }
}
