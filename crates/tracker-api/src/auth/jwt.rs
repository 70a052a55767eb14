//! JWT 토큰 처리.
//!
//! 토큰은 `sub`(사용자 ID)와 `role` 클레임을 포함하는 서명된 HS256
//! 문자열이며, 만료는 발급 시점으로부터 고정 7일입니다. 서버 측 세션
//! 상태는 없습니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Role;

/// 토큰 만료 기간 (일). 고정값입니다.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// JWT 페이로드.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 ID
    pub sub: Uuid,
    /// 사용자 역할
    pub role: Role,
    /// Issued At (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// 새로운 Claims 생성. 만료는 [`TOKEN_TTL_DAYS`]일 후입니다.
    pub fn new(user_id: Uuid, role: Role) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role,
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        }
    }

    /// 토큰이 만료되었는지 확인.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// JWT 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("토큰 인코딩 실패: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("유효하지 않은 토큰")]
    InvalidToken,
}

/// 토큰 생성.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(JwtError::from)
}

/// 토큰 디코딩 및 검증.
///
/// 서명과 만료를 모두 검증합니다. 변조/만료/형식 오류는 전부 에러로
/// 반환되며, 접근 제어 게이트는 이를 `None`으로 변환합니다.
pub fn decode_token(token: &str, secret: &str) -> Result<TokenData<Claims>, JwtError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        _ => JwtError::InvalidToken,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

    #[test]
    fn test_create_and_decode_token() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, Role::User);

        let token = create_token(&claims, TEST_SECRET).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let decoded = decode_token(&token, TEST_SECRET).unwrap();
        assert_eq!(decoded.claims.sub, user_id);
        assert_eq!(decoded.claims.role, Role::User);
        assert!(!decoded.claims.is_expired());
    }

    #[test]
    fn test_token_expiry_is_seven_days() {
        let claims = Claims::new(Uuid::new_v4(), Role::Admin);
        let ttl = claims.exp - claims.iat;
        assert_eq!(ttl, TOKEN_TTL_DAYS * 24 * 3600);
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let claims = Claims::new(Uuid::new_v4(), Role::User);
        let token = create_token(&claims, TEST_SECRET).unwrap();

        // 서명 마지막 문자를 변조
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(decode_token(&tampered, TEST_SECRET).is_err());
    }

    #[test]
    fn test_payload_mutation_is_rejected() {
        let claims = Claims::new(Uuid::new_v4(), Role::User);
        let token = create_token(&claims, TEST_SECRET).unwrap();

        // 페이로드 세그먼트의 한 문자를 변조해도 서명 검증에 걸립니다
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let mut payload: Vec<u8> = parts[1].clone().into_bytes();
        payload[0] = if payload[0] == b'a' { b'b' } else { b'a' };
        parts[1] = String::from_utf8(payload).unwrap();

        assert!(decode_token(&parts.join("."), TEST_SECRET).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let claims = Claims::new(Uuid::new_v4(), Role::Admin);
        let token = create_token(&claims, TEST_SECRET).unwrap();

        let result = decode_token(&token, "another-secret-key-for-testing-minimum-32ch");
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: Role::User,
            iat: (now - Duration::days(8)).timestamp(),
            exp: (now - Duration::days(1)).timestamp(),
        };
        let token = create_token(&claims, TEST_SECRET).unwrap();

        let result = decode_token(&token, TEST_SECRET);
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(decode_token("not.a.token", TEST_SECRET).is_err());
        assert!(decode_token("", TEST_SECRET).is_err());
    }
}
