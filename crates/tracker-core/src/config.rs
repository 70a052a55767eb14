//! 설정 관리.
//!
//! 모든 설정은 환경변수에서 로드됩니다. `.env` 파일 로드는 각 바이너리의
//! 진입점에서 수행합니다 (`dotenvy`).

use serde::{Deserialize, Serialize};

/// 설정 로드 에러.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 필수 환경변수 누락. 서버는 이 에러로 즉시 종료합니다.
    #[error("필수 환경변수가 설정되지 않았습니다: {0}")]
    MissingVar(&'static str),
}

/// 애플리케이션 설정.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP 서버 설정
    pub server: ServerConfig,
    /// 데이터베이스 설정
    pub database: DatabaseConfig,
    /// 인증 설정
    pub auth: AuthConfig,
}

impl AppConfig {
    /// 환경변수에서 전체 설정 로드.
    ///
    /// # Errors
    ///
    /// `JWT_SECRET`이 없으면 [`ConfigError::MissingVar`]를 반환합니다.
    /// 토큰 서명 키 없이 기동하는 것은 치명적 설정 오류로 취급합니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env()?,
        })
    }
}

/// HTTP 서버 설정.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// 환경변수에서 서버 설정 로드 (`API_HOST`, `API_PORT`).
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var("API_HOST").unwrap_or(defaults.host);
        let port = std::env::var("API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        Self { host, port }
    }

    /// `host:port` 형태의 바인드 주소 반환.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL 연결 URL (미설정 시 DB 기능 비활성)
    pub url: Option<String>,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 획득 타임아웃 (초)
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            acquire_timeout_secs: 10,
        }
    }
}

impl DatabaseConfig {
    /// 환경변수에서 데이터베이스 설정 로드
    /// (`DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`, `DATABASE_ACQUIRE_TIMEOUT_SECS`).
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            url: std::env::var("DATABASE_URL").ok(),
            max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            acquire_timeout_secs: std::env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.acquire_timeout_secs),
        }
    }
}

/// 인증 설정.
///
/// JWT 서명 시크릿은 필수입니다. 시크릿이 없는 상태로 발급/검증을
/// 시도하는 것은 요청 단위 에러가 아니라 기동 실패입니다.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT 서명 시크릿
    pub jwt_secret: String,
}

impl AuthConfig {
    /// 환경변수에서 인증 설정 로드 (`JWT_SECRET`).
    ///
    /// # Errors
    ///
    /// `JWT_SECRET`이 비어 있거나 설정되지 않은 경우 에러를 반환합니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingVar("JWT_SECRET"))?;

        Ok(Self { jwt_secret })
    }
}
