//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! `AppState`는 컴포지션 루트(`main`)에서 한 번 구성되어 `Arc`로 감싼 뒤
//! Axum의 State extractor로 핸들러에 주입됩니다. 전역 변수나 지연 초기화
//! 커넥션 캐시는 없습니다.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::{ApiError, ApiResult};

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 풀 (미설정 시 스토어 의존 핸들러는 500 반환)
    pub pool: Option<PgPool>,

    /// JWT 서명 시크릿 (기동 시 필수 확인됨)
    pub jwt_secret: String,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: DateTime<Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            pool: None,
            jwt_secret: jwt_secret.into(),
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 데이터베이스 연결 풀 설정.
    pub fn with_pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// 스토어 접근용 풀 반환.
    ///
    /// 풀이 구성되지 않은 경우 500으로 매핑되는 에러를 반환합니다.
    pub fn db(&self) -> ApiResult<&PgPool> {
        self.pool
            .as_ref()
            .ok_or_else(|| ApiError::internal("Internal Server Error"))
    }

    /// 데이터베이스 연결 상태 확인.
    pub async fn is_db_healthy(&self) -> bool {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").fetch_one(pool).await.is_ok()
        } else {
            false
        }
    }

    /// 서버 업타임(초) 반환.
    pub fn uptime_secs(&self) -> i64 {
        Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }
}

/// 테스트용 AppState 생성 헬퍼.
///
/// 실제 DB 연결 없이 라우터 수준 테스트를 할 수 있는 최소 상태입니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    AppState::new("test-secret-key-for-jwt-testing-minimum-32-chars")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_without_pool() {
        let state = create_test_state();
        assert!(state.pool.is_none());
        assert!(state.db().is_err());
        assert!(!state.version.is_empty());
        assert!(state.uptime_secs() >= 0);
    }

    #[tokio::test]
    async fn test_db_health_without_pool() {
        let state = create_test_state();
        assert!(!state.is_db_healthy().await);
    }
}
