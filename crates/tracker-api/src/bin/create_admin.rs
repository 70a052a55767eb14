//! 관리자 계정 프로비저닝 CLI.
//!
//! 회원가입 API는 역할을 항상 `user`로 강제하므로, 관리자 계정은 이
//! 바이너리로만 만듭니다.
//!
//! # 사용 예시
//!
//! ```bash
//! # 기본 자격증명으로 생성 (admin / admin@cryptotrack.com / admin123)
//! cargo run --bin create-admin
//!
//! # 환경변수로 재정의
//! ADMIN_EMAIL=ops@example.com ADMIN_PASSWORD=s3cret1 cargo run --bin create-admin
//! ```

use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use tracker_api::auth::{hash_password, Role};
use tracker_api::repository::{NewUser, UserRepository};
use tracker_core::logging::init_logging_from_env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    init_logging_from_env()?;

    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@cryptotrack.com".to_string());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| "DATABASE_URL environment variable is not defined")?;

    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    if UserRepository::find_by_email(&pool, &email).await?.is_some() {
        warn!(%email, "해당 이메일의 사용자가 이미 존재합니다. 다른 이메일을 사용하세요.");
        return Ok(());
    }

    let password_hash = hash_password(&password)?;

    let admin = UserRepository::insert(
        &pool,
        NewUser {
            username,
            email,
            password_hash,
            role: Role::Admin,
        },
    )
    .await?;

    info!(user_id = %admin.id, email = %admin.email, role = %admin.role, "관리자 계정 생성 완료");
    warn!("기본 비밀번호를 사용했다면 첫 로그인 후 반드시 변경하세요");

    Ok(())
}
