//! Repository pattern for database operations.
//!
//! 데이터베이스 접근 로직을 라우트 핸들러에서 분리하여 관리합니다.
//! 모든 Repository는 static methods 패턴을 사용합니다.

pub mod drinks;

pub use drinks::{
    Drink, DrinkPatch, DrinkRepository, Ingredient, ListOrder, LongDrink, NewDrink,
    RepositoryError, ShortDrink, ShortIngredient,
};

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::DatabaseConfig;

/// SQLite 연결 풀 생성. 데이터베이스 파일이 없으면 새로 만듭니다.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
}

/// 테스트용 인메모리 풀 (스키마 생성 완료 상태).
///
/// 인메모리 DB는 연결마다 독립적이므로 연결 하나만 유지합니다.
#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    DrinkRepository::init_schema(&pool)
        .await
        .expect("Failed to create drinks schema");

    pool
}
