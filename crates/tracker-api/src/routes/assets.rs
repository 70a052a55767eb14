//! Asset API 라우트
//!
//! 소유자 범위의 자산 CRUD를 제공합니다.
//!
//! # 엔드포인트
//!
//! - `GET /assets` - 자산 목록 (관리자: 전체 + 소유자 확장, 일반: 본인 것만)
//! - `POST /assets` - 자산 생성
//! - `PUT /assets/{id}` - 자산 수정 (소유자만, 관리자 오버라이드 없음)
//! - `DELETE /assets/{id}` - 자산 삭제 (소유자만, 관리자 오버라이드 없음)
//!
//! # 검증 규칙
//!
//! 생성과 수정의 검증 규칙은 의도적으로 다릅니다:
//! - 생성: 숫자 필드 0 이상 허용, 티커는 입력 그대로 저장
//! - 수정: 숫자 필드 양수만 허용, 티커는 대문자로 정규화

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::{Claims, JwtAuth};
use crate::error::{ApiError, ApiResult};
use crate::repository::{AssetRecord, AssetRepository, AssetUpdate, AssetWithOwnerRow, NewAsset};
use crate::routes::MessageResponse;
use crate::state::AppState;

// ================================================================================================
// Request/Response Types
// ================================================================================================

/// 자산 생성/수정 요청 본문.
///
/// 필드 누락을 422가 아닌 400으로 응답하기 위해 모든 필드를 Option으로
/// 받고 핸들러에서 직접 검증합니다.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetInput {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub target_price: Option<Decimal>,
    #[serde(default)]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub buy_price: Option<Decimal>,
}

/// 단일 자산 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct AssetResponse {
    pub asset: AssetRecord,
}

/// 일반 사용자용 자산 목록 응답 (owner는 ID 그대로).
#[derive(Debug, Serialize, ToSchema)]
pub struct AssetListResponse {
    pub assets: Vec<AssetRecord>,
}

/// 관리자용 자산 목록 응답 (owner 확장).
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminAssetListResponse {
    pub assets: Vec<AdminAssetView>,
}

/// 소유자 요약 (관리자 뷰).
#[derive(Debug, Serialize, ToSchema)]
pub struct OwnerSummary {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

/// 관리자 뷰의 자산 항목.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminAssetView {
    pub id: Uuid,
    pub ticker: String,
    pub name: String,
    pub target_price: Decimal,
    pub quantity: Decimal,
    pub buy_price: Decimal,
    pub owner: OwnerSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AssetWithOwnerRow> for AdminAssetView {
    fn from(row: AssetWithOwnerRow) -> Self {
        // 소유자 레코드가 삭제되어 조인이 비면 자리표시자로 렌더링
        let owner = match (row.owner_username, row.owner_email) {
            (Some(username), Some(email)) => OwnerSummary {
                id: row.owner,
                username,
                email,
            },
            _ => OwnerSummary {
                id: row.owner,
                username: "Deleted User".to_string(),
                email: "N/A".to_string(),
            },
        };

        Self {
            id: row.id,
            ticker: row.ticker,
            name: row.name,
            target_price: row.target_price,
            quantity: row.quantity,
            buy_price: row.buy_price,
            owner,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// ================================================================================================
// Validation
// ================================================================================================

/// 생성 입력 검증. 숫자 필드는 0 이상이면 허용하고 티커는 입력 그대로
/// 유지합니다.
fn validate_create(input: AssetInput) -> ApiResult<NewAsset> {
    let ticker = input.ticker.filter(|s| !s.is_empty());
    let name = input.name.filter(|s| !s.is_empty());

    match (
        ticker,
        name,
        input.target_price,
        input.quantity,
        input.buy_price,
    ) {
        (Some(ticker), Some(name), Some(target_price), Some(quantity), Some(buy_price))
            if target_price >= Decimal::ZERO
                && quantity >= Decimal::ZERO
                && buy_price >= Decimal::ZERO =>
        {
            Ok(NewAsset {
                ticker,
                name,
                target_price,
                quantity,
                buy_price,
            })
        }
        _ => Err(ApiError::validation(
            "ticker, name, targetPrice, quantity, and buyPrice are required",
        )),
    }
}

/// 수정 입력 검증. 다섯 필드 전부 필수이며 숫자 필드는 양수만 허용,
/// 티커는 대문자로 정규화합니다.
fn validate_update(input: AssetInput) -> ApiResult<AssetUpdate> {
    let ticker = input.ticker.filter(|s| !s.is_empty());
    let name = input.name.filter(|s| !s.is_empty());

    let (Some(ticker), Some(name), Some(target_price), Some(quantity), Some(buy_price)) = (
        ticker,
        name,
        input.target_price,
        input.quantity,
        input.buy_price,
    ) else {
        return Err(ApiError::validation("All fields are required"));
    };

    if target_price <= Decimal::ZERO || quantity <= Decimal::ZERO || buy_price <= Decimal::ZERO {
        return Err(ApiError::validation("Prices and quantity must be positive"));
    }

    Ok(AssetUpdate {
        ticker: ticker.to_uppercase(),
        name,
        target_price,
        quantity,
        buy_price,
    })
}

/// 소유권 확인.
///
/// 역할은 보지 않습니다. 관리자도 타인 자산의 수정/삭제는 거부됩니다.
fn ensure_owner(asset: &AssetRecord, claims: &Claims) -> ApiResult<()> {
    if asset.owner == claims.sub {
        Ok(())
    } else {
        Err(ApiError::forbidden(
            "Forbidden: You can only modify your own assets",
        ))
    }
}

// ================================================================================================
// Handlers
// ================================================================================================

/// GET /assets - 자산 목록 조회
///
/// 관리자는 전체 자산을 소유자 정보와 함께, 일반 사용자는 본인 자산만
/// 조회합니다. 정렬은 최신 생성 순입니다.
#[utoipa::path(
    get,
    path = "/assets",
    tag = "assets",
    responses(
        (status = 200, description = "역할에 따라 범위가 결정된 자산 목록", body = AssetListResponse),
        (status = 401, description = "미인증")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_assets(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
) -> ApiResult<Response> {
    debug!(user_id = %claims.sub, role = %claims.role, "자산 목록 조회");

    let pool = state.db()?;

    if claims.role.is_admin() {
        let rows = AssetRepository::list_all_with_owner(pool).await?;
        let assets: Vec<AdminAssetView> = rows.into_iter().map(Into::into).collect();
        Ok(Json(AdminAssetListResponse { assets }).into_response())
    } else {
        let assets = AssetRepository::list_by_owner(pool, claims.sub).await?;
        Ok(Json(AssetListResponse { assets }).into_response())
    }
}

/// POST /assets - 자산 생성
///
/// 소유자는 토큰의 subject로 강제됩니다.
#[utoipa::path(
    post,
    path = "/assets",
    tag = "assets",
    request_body = AssetInput,
    responses(
        (status = 201, description = "자산 생성됨", body = AssetResponse),
        (status = 400, description = "필수 필드 누락 또는 음수 값"),
        (status = 401, description = "미인증")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_asset(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Json(input): Json<AssetInput>,
) -> ApiResult<(StatusCode, Json<AssetResponse>)> {
    let new_asset = validate_create(input)?;
    let pool = state.db()?;

    let asset = AssetRepository::insert(pool, claims.sub, new_asset).await?;

    info!(asset_id = %asset.id, owner = %claims.sub, ticker = %asset.ticker, "자산 생성");

    Ok((StatusCode::CREATED, Json(AssetResponse { asset })))
}

/// PUT /assets/{id} - 자산 수정
///
/// 소유자만 가능합니다. 관리자 오버라이드는 없습니다.
#[utoipa::path(
    put,
    path = "/assets/{id}",
    tag = "assets",
    params(("id" = Uuid, Path, description = "자산 ID")),
    request_body = AssetInput,
    responses(
        (status = 200, description = "자산 수정됨", body = AssetResponse),
        (status = 400, description = "필드 누락 또는 0 이하 값"),
        (status = 401, description = "미인증"),
        (status = 403, description = "소유자가 아님"),
        (status = 404, description = "자산 없음")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_asset(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(id): Path<Uuid>,
    Json(input): Json<AssetInput>,
) -> ApiResult<Json<AssetResponse>> {
    let pool = state.db()?;

    let asset = AssetRepository::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Asset not found"))?;

    ensure_owner(&asset, &claims)?;

    let update = validate_update(input)?;

    let updated = AssetRepository::update(pool, id, update)
        .await?
        .ok_or_else(|| ApiError::not_found("Asset not found"))?;

    info!(asset_id = %id, owner = %claims.sub, "자산 수정");

    Ok(Json(AssetResponse { asset: updated }))
}

/// DELETE /assets/{id} - 자산 삭제
///
/// 소유자만 가능합니다. 관리자 오버라이드는 없습니다.
#[utoipa::path(
    delete,
    path = "/assets/{id}",
    tag = "assets",
    params(("id" = Uuid, Path, description = "자산 ID")),
    responses(
        (status = 200, description = "자산 삭제됨", body = MessageResponse),
        (status = 401, description = "미인증"),
        (status = 403, description = "소유자가 아님"),
        (status = 404, description = "자산 없음")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_asset(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let pool = state.db()?;

    let asset = AssetRepository::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Asset not found"))?;

    ensure_owner(&asset, &claims)?;

    AssetRepository::delete(pool, id).await?;

    info!(asset_id = %id, owner = %claims.sub, "자산 삭제");

    Ok(Json(MessageResponse {
        message: "Asset deleted".to_string(),
    }))
}

// ================================================================================================
// Router
// ================================================================================================

/// Assets 라우터 생성.
pub fn assets_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_assets).post(create_asset))
        .route("/{id}", put(update_asset).delete(delete_asset))
}
