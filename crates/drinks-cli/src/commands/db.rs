//! 데이터베이스 관리 명령.

use anyhow::{Context, Result};
use drinks_api::config::DatabaseConfig;
use drinks_api::repository::{connect_pool, Drink, DrinkRepository};
use tracing::{info, warn};

/// 데이터베이스 명령 설정.
#[derive(Debug, Clone, Default)]
pub struct DbConfig {
    /// 데이터베이스 URL (없으면 환경변수 설정 사용)
    pub db_url: Option<String>,
}

impl DbConfig {
    fn database(&self) -> DatabaseConfig {
        let mut database = DatabaseConfig::from_env();
        if let Some(url) = &self.db_url {
            database.url = url.clone();
        }
        database
    }
}

/// 스키마 생성 (이미 있으면 아무것도 하지 않음).
pub async fn init_db(config: &DbConfig) -> Result<()> {
    let database = config.database();
    info!(url = %database.url, "Connecting to database...");

    let pool = connect_pool(&database)
        .await
        .with_context(|| format!("Failed to connect to {}", database.url))?;
    DrinkRepository::init_schema(&pool)
        .await
        .context("Failed to create drinks schema")?;

    info!("Schema ready");
    Ok(())
}

/// 스키마를 삭제하고 다시 생성. 모든 음료가 지워집니다.
pub async fn reset_db(config: &DbConfig) -> Result<()> {
    let database = config.database();
    warn!(url = %database.url, "Resetting drinks table");

    let pool = connect_pool(&database)
        .await
        .with_context(|| format!("Failed to connect to {}", database.url))?;
    DrinkRepository::reset_schema(&pool)
        .await
        .context("Failed to reset drinks schema")?;

    info!("Schema reset complete");
    Ok(())
}

/// 샘플 음료 추가. 이미 있으면 `None`을 반환합니다.
pub async fn seed_db(config: &DbConfig) -> Result<Option<Drink>> {
    let database = config.database();
    let pool = connect_pool(&database)
        .await
        .with_context(|| format!("Failed to connect to {}", database.url))?;
    DrinkRepository::init_schema(&pool)
        .await
        .context("Failed to create drinks schema")?;

    let seeded = DrinkRepository::seed(&pool)
        .await
        .context("Failed to seed drinks")?;

    match &seeded {
        Some(drink) => info!(id = drink.id, title = %drink.title, "Sample drink inserted"),
        None => info!("Sample drink already present, skipping"),
    }

    Ok(seeded)
}
