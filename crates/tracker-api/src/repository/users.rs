//! User Repository
//!
//! 사용자 레코드 관련 데이터베이스 연산을 담당합니다.
//! 비밀번호 해시는 [`UserRecord`]에만 존재하며, 응답 직렬화에는
//! [`PublicUser`] 투영만 사용됩니다.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::Role;

// ================================================================================================
// Types
// ================================================================================================

/// 사용자 레코드 (내부용, 비밀번호 해시 포함).
///
/// 의도적으로 `Serialize`를 구현하지 않습니다. 응답에는 [`PublicUser`]를
/// 사용하세요.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 사용자 공개 투영 (비밀번호 제외).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for PublicUser {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
            role: record.role,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// 새 사용자 입력.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

// ================================================================================================
// Repository
// ================================================================================================

/// User Repository
pub struct UserRepository;

impl UserRepository {
    /// 이메일로 사용자 조회.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?;

        Ok(record)
    }

    /// ID로 사용자 조회.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(record)
    }

    /// 사용자 생성.
    pub async fn insert(pool: &PgPool, input: NewUser) -> Result<UserRecord, sqlx::Error> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&input.username)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(input.role)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// 전체 사용자 목록 조회 (최신 생성 순, 비밀번호 제외).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<PublicUser>, sqlx::Error> {
        let records = sqlx::query_as::<_, PublicUser>(
            r#"
            SELECT id, username, email, role, created_at, updated_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// 사용자 역할 변경.
    pub async fn update_role(
        pool: &PgPool,
        id: Uuid,
        role: Role,
    ) -> Result<Option<PublicUser>, sqlx::Error> {
        let record = sqlx::query_as::<_, PublicUser>(
            r#"
            UPDATE users
            SET role = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, role, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(role)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 사용자 삭제.
    ///
    /// 해당 사용자의 자산은 삭제하지 않습니다. 남은 자산의 owner 참조는
    /// 의도적으로 댕글링 상태가 됩니다.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            role: Role::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_public_projection_drops_password() {
        let record = sample_record();
        let public = PublicUser::from(record.clone());

        let json = serde_json::to_value(&public).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["role"], "user");
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert_eq!(public.id, record.id);
    }

    #[test]
    fn test_public_user_serializes_camel_case() {
        let public = PublicUser::from(sample_record());
        let json = serde_json::to_value(&public).unwrap();

        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
