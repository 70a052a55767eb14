//! 역할 기반 접근 제어 (RBAC).
//!
//! 사용자 역할은 `user`와 `admin` 두 가지뿐입니다. 역할은 토큰 검증 시
//! 서버가 서명된 클레임에서 다시 도출하며, 클라이언트가 선언한 역할은
//! 절대 신뢰하지 않습니다.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 사용자 역할.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    /// 일반 사용자 - 본인 소유 자산만 조회/변경
    #[default]
    User,
    /// 관리자 - 사용자 관리 및 전체 자산 조회
    Admin,
}

impl Role {
    /// 관리자 여부 확인.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// 문자열에서 역할 파싱. 알 수 없는 값은 `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::User => "user",
            Role::Admin => "admin",
        };
        write!(f, "{}", s)
    }
}
