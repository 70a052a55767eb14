//! 인증 및 권한 부여.
//!
//! JWT 기반 인증 및 역할 기반 접근 제어(RBAC)를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`Claims`]: JWT 페이로드 (subject + 역할 + 만료)
//! - [`Role`]: 사용자 역할 (`user` | `admin`)
//! - [`JwtAuth`] / [`AdminAuth`]: Axum 핸들러용 인증 추출기
//! - 비밀번호 해싱/검증 (Argon2id)

mod jwt;
mod middleware;
mod password;
mod roles;

pub use jwt::{create_token, decode_token, Claims, JwtError, TOKEN_TTL_DAYS};
pub use middleware::{authenticate, authorize_admin, bearer_token, AdminAuth, JwtAuth};
pub use password::{hash_password, verify_password, PasswordError};
pub use roles::Role;
