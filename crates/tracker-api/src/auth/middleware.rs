//! 접근 제어 게이트.
//!
//! 요청 헤더에서 Bearer 토큰을 꺼내 검증하는 순수 함수와, 핸들러에서
//! 사용하는 Axum 추출기를 제공합니다.
//!
//! - [`JwtAuth`]: 인증 실패 시 401
//! - [`AdminAuth`]: 미인증/비관리자 모두 403
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! async fn protected_handler(JwtAuth(claims): JwtAuth) -> impl IntoResponse {
//!     format!("user: {}", claims.sub)
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::{decode_token, Claims};
use crate::error::ApiError;
use crate::state::AppState;

/// Authorization 헤더에서 Bearer 토큰 추출.
///
/// 헤더 이름 매칭은 HTTP 규약대로 대소문자를 구분하지 않습니다.
/// `Bearer ` 접두사가 없거나 토큰이 비어 있으면 `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// 요청 헤더에서 인증된 신원 도출.
///
/// 헤더 누락, 형식 오류, 서명 불일치, 만료 등 어떤 실패든 `None`을
/// 반환합니다. 요청을 변경하지 않는 순수 읽기입니다.
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Option<Claims> {
    let token = bearer_token(headers)?;
    decode_token(token, secret).ok().map(|data| data.claims)
}

/// 관리자 신원 도출.
///
/// [`authenticate`]와 동일하되, 역할이 정확히 `admin`이 아니면 `None`.
pub fn authorize_admin(headers: &HeaderMap, secret: &str) -> Option<Claims> {
    authenticate(headers, secret).filter(|claims| claims.role.is_admin())
}

/// JWT 인증 추출기.
///
/// 인증 실패는 401 `{"error": "Unauthorized"}`로 매핑됩니다.
#[derive(Debug, Clone)]
pub struct JwtAuth(pub Claims);

impl FromRequestParts<Arc<AppState>> for JwtAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        authenticate(&parts.headers, &state.jwt_secret)
            .map(JwtAuth)
            .ok_or_else(|| ApiError::auth("Unauthorized"))
    }
}

/// 관리자 권한 추출기.
///
/// 토큰이 없는 경우와 역할이 부족한 경우를 구분하지 않고 모두
/// 403 `{"error": "Forbidden: Admin access required"}`로 매핑합니다.
#[derive(Debug, Clone)]
pub struct AdminAuth(pub Claims);

impl FromRequestParts<Arc<AppState>> for AdminAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        authorize_admin(&parts.headers, &state.jwt_secret)
            .map(AdminAuth)
            .ok_or_else(|| ApiError::forbidden("Forbidden: Admin access required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{create_token, Role};
    use axum::http::HeaderValue;
    use uuid::Uuid;

    const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

    fn headers_with_token(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    fn token_for(role: Role) -> String {
        create_token(&Claims::new(Uuid::new_v4(), role), TEST_SECRET).unwrap()
    }

    #[test]
    fn test_bearer_token_extraction() {
        let headers = headers_with_token("abc.def.ghi");
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_bearer_token_empty_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer   "));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_authenticate_valid_token() {
        let user_id = Uuid::new_v4();
        let token = create_token(&Claims::new(user_id, Role::User), TEST_SECRET).unwrap();
        let headers = headers_with_token(&token);

        let claims = authenticate(&headers, TEST_SECRET).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::User);
    }

    #[test]
    fn test_authenticate_rejects_tampered_token() {
        let token = token_for(Role::User);
        let tampered = format!("{}x", token);
        let headers = headers_with_token(&tampered);

        assert!(authenticate(&headers, TEST_SECRET).is_none());
    }

    #[test]
    fn test_authenticate_rejects_missing_header() {
        assert!(authenticate(&HeaderMap::new(), TEST_SECRET).is_none());
    }

    #[test]
    fn test_authorize_admin_requires_admin_role() {
        let user_headers = headers_with_token(&token_for(Role::User));
        assert!(authorize_admin(&user_headers, TEST_SECRET).is_none());

        let admin_headers = headers_with_token(&token_for(Role::Admin));
        let claims = authorize_admin(&admin_headers, TEST_SECRET).unwrap();
        assert!(claims.role.is_admin());
    }

    #[test]
    fn test_authorize_admin_rejects_missing_token() {
        assert!(authorize_admin(&HeaderMap::new(), TEST_SECRET).is_none());
    }
}
