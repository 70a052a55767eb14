//! # Tracker Core
//!
//! 포트폴리오 트래커의 공용 인프라를 제공합니다:
//! - 환경변수 기반 설정 관리
//! - 로깅 부트스트랩
//!
//! API 서버(`tracker-api`)와 관리용 CLI(`create-admin`)가 이 크레이트를
//! 통해 동일한 설정/로깅 규약을 공유합니다.

pub mod config;
pub mod logging;

pub use config::{AppConfig, AuthConfig, ConfigError, DatabaseConfig, ServerConfig};
pub use logging::{init_logging, init_logging_from_env, LogConfig, LogFormat};
