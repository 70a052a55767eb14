//! Asset Repository
//!
//! 자산 레코드 관련 데이터베이스 연산을 담당합니다. 모든 목록 조회는
//! 최신 생성 순입니다.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;
use uuid::Uuid;

// ================================================================================================
// Types
// ================================================================================================

/// 자산 레코드.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub id: Uuid,
    pub ticker: String,
    pub name: String,
    pub target_price: Decimal,
    pub quantity: Decimal,
    pub buy_price: Decimal,
    /// 소유자 사용자 ID. 소유자 삭제 후에는 댕글링 참조가 됩니다.
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 검증 완료된 새 자산 입력.
#[derive(Debug, Clone)]
pub struct NewAsset {
    pub ticker: String,
    pub name: String,
    pub target_price: Decimal,
    pub quantity: Decimal,
    pub buy_price: Decimal,
}

/// 검증 완료된 자산 수정 입력 (다섯 필드 전체 교체).
#[derive(Debug, Clone)]
pub struct AssetUpdate {
    pub ticker: String,
    pub name: String,
    pub target_price: Decimal,
    pub quantity: Decimal,
    pub buy_price: Decimal,
}

/// 관리자 목록용 소유자 조인 행.
///
/// 소유자 레코드가 이미 삭제된 경우 `owner_username`/`owner_email`이
/// NULL로 내려옵니다.
#[derive(Debug, Clone, FromRow)]
pub struct AssetWithOwnerRow {
    pub id: Uuid,
    pub ticker: String,
    pub name: String,
    pub target_price: Decimal,
    pub quantity: Decimal,
    pub buy_price: Decimal,
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_username: Option<String>,
    pub owner_email: Option<String>,
}

// ================================================================================================
// Repository
// ================================================================================================

/// Asset Repository
pub struct AssetRepository;

impl AssetRepository {
    /// 자산 생성.
    pub async fn insert(
        pool: &PgPool,
        owner: Uuid,
        input: NewAsset,
    ) -> Result<AssetRecord, sqlx::Error> {
        let record = sqlx::query_as::<_, AssetRecord>(
            r#"
            INSERT INTO assets (ticker, name, target_price, quantity, buy_price, owner)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&input.ticker)
        .bind(&input.name)
        .bind(input.target_price)
        .bind(input.quantity)
        .bind(input.buy_price)
        .bind(owner)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// ID로 자산 조회.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<AssetRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, AssetRecord>("SELECT * FROM assets WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(record)
    }

    /// 특정 소유자의 자산 목록 조회.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner: Uuid,
    ) -> Result<Vec<AssetRecord>, sqlx::Error> {
        let records = sqlx::query_as::<_, AssetRecord>(
            r#"
            SELECT * FROM assets
            WHERE owner = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// 전체 자산 목록 조회 (소유자 정보 조인, 관리자용).
    pub async fn list_all_with_owner(pool: &PgPool) -> Result<Vec<AssetWithOwnerRow>, sqlx::Error> {
        let records = sqlx::query_as::<_, AssetWithOwnerRow>(
            r#"
            SELECT
                a.id, a.ticker, a.name, a.target_price, a.quantity, a.buy_price,
                a.owner, a.created_at, a.updated_at,
                u.username AS owner_username, u.email AS owner_email
            FROM assets a
            LEFT JOIN users u ON u.id = a.owner
            ORDER BY a.created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// 자산 수정 (다섯 필드 전체 교체).
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        input: AssetUpdate,
    ) -> Result<Option<AssetRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, AssetRecord>(
            r#"
            UPDATE assets
            SET ticker = $2, name = $3, target_price = $4, quantity = $5, buy_price = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.ticker)
        .bind(&input.name)
        .bind(input.target_price)
        .bind(input.quantity)
        .bind(input.buy_price)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 자산 삭제.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_asset_record_serializes_camel_case_numbers() {
        let record = AssetRecord {
            id: Uuid::new_v4(),
            ticker: "btc".to_string(),
            name: "Bitcoin".to_string(),
            target_price: dec!(50000),
            quantity: dec!(0.5),
            buy_price: dec!(42000),
            owner: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["ticker"], "btc");
        assert_eq!(json["targetPrice"], 50000.0);
        assert_eq!(json["quantity"], 0.5);
        assert_eq!(json["buyPrice"], 42000.0);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("target_price").is_none());
        // 비관리자 응답에서 owner는 확장 없이 ID 문자열로 나갑니다
        assert!(json["owner"].is_string());
    }
}
