//! Drinks Repository
//!
//! 음료 메뉴(drinks 테이블) 관련 데이터베이스 연산을 담당합니다.
//! 레시피는 JSON 텍스트 컬럼으로 저장되며 조회 시 역직렬화됩니다.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, info};
use utoipa::ToSchema;
use validator::Validate;

// ================================================================================================
// Types
// ================================================================================================

/// 레시피 재료 (long 표현).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Ingredient {
    /// 재료 이름 (예: "espresso")
    #[validate(length(min = 1))]
    pub name: String,
    /// 표시 색상 (예: "#6f4e37")
    #[validate(length(min = 1))]
    pub color: String,
    /// 배합 비율
    #[validate(range(min = 1))]
    pub parts: u32,
}

/// 재료 이름이 빠진 공개용 재료 표현 (short).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: u32,
}

/// 공개용 음료 표현. 재료 이름을 포함하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShortDrink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

/// 상세 음료 표현.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LongDrink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// drinks 테이블 로우
#[derive(Debug, Clone, FromRow)]
struct DrinkRow {
    id: i64,
    title: String,
    recipe: String,
}

/// 음료 레코드
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl Drink {
    /// 공개용 short 표현으로 변환.
    pub fn short(&self) -> ShortDrink {
        ShortDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|ingredient| ShortIngredient {
                    color: ingredient.color.clone(),
                    parts: ingredient.parts,
                })
                .collect(),
        }
    }

    /// 상세 long 표현으로 변환.
    pub fn long(&self) -> LongDrink {
        LongDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.clone(),
        }
    }
}

impl TryFrom<DrinkRow> for Drink {
    type Error = RepositoryError;

    fn try_from(row: DrinkRow) -> Result<Self, Self::Error> {
        let recipe = serde_json::from_str(&row.recipe).map_err(|source| {
            RepositoryError::CorruptRecipe {
                id: row.id,
                source,
            }
        })?;

        Ok(Self {
            id: row.id,
            title: row.title,
            recipe,
        })
    }
}

/// 새 음료 입력
#[derive(Debug, Clone)]
pub struct NewDrink {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl NewDrink {
    /// 초기 데이터용 샘플 음료 ("water").
    pub fn sample() -> Self {
        Self {
            title: "water".to_string(),
            recipe: vec![Ingredient {
                name: "water".to_string(),
                color: "blue".to_string(),
                parts: 1,
            }],
        }
    }
}

/// 음료 부분 업데이트 입력. `None` 필드는 기존 값을 유지합니다.
#[derive(Debug, Clone, Default)]
pub struct DrinkPatch {
    pub title: Option<String>,
    pub recipe: Option<Vec<Ingredient>>,
}

/// 목록 조회 정렬 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOrder {
    /// 저장소 기본 순서
    #[default]
    Unspecified,
    /// id 오름차순
    ById,
}

/// 음료 저장소 에러
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("데이터베이스 오류: {0}")]
    Database(#[from] sqlx::Error),
    #[error("레시피 직렬화 실패: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("음료 {id}의 레시피가 손상되었습니다: {source}")]
    CorruptRecipe {
        id: i64,
        #[source]
        source: serde_json::Error,
    },
    #[error("음료를 찾을 수 없습니다: {0}")]
    NotFound(i64),
}

impl RepositoryError {
    /// title UNIQUE 제약 위반 여부.
    pub fn is_duplicate_title(&self) -> bool {
        match self {
            RepositoryError::Database(sqlx::Error::Database(e)) => e.is_unique_violation(),
            _ => false,
        }
    }
}

// ================================================================================================
// Repository
// ================================================================================================

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS drinks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL UNIQUE,
        recipe TEXT NOT NULL
    )
"#;

/// Drinks Repository
pub struct DrinkRepository;

impl DrinkRepository {
    // ============================================================================================
    // Schema
    // ============================================================================================

    /// drinks 테이블이 없으면 생성 (기존 데이터 유지)
    pub async fn init_schema(pool: &SqlitePool) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_TABLE).execute(pool).await?;
        debug!("drinks 스키마 확인 완료");
        Ok(())
    }

    /// drinks 테이블 삭제 후 재생성. 모든 레코드가 사라집니다.
    pub async fn reset_schema(pool: &SqlitePool) -> Result<(), RepositoryError> {
        sqlx::query("DROP TABLE IF EXISTS drinks")
            .execute(pool)
            .await?;
        sqlx::query(CREATE_TABLE).execute(pool).await?;
        info!("drinks 테이블 초기화 완료");
        Ok(())
    }

    /// 샘플 음료 추가. 같은 title이 이미 있으면 `None`.
    pub async fn seed(pool: &SqlitePool) -> Result<Option<Drink>, RepositoryError> {
        let sample = NewDrink::sample();

        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM drinks WHERE title = ?")
            .bind(&sample.title)
            .fetch_optional(pool)
            .await?;

        if existing.is_some() {
            return Ok(None);
        }

        Self::create(pool, &sample).await.map(Some)
    }

    // ============================================================================================
    // Queries
    // ============================================================================================

    /// 모든 음료 조회
    pub async fn list(pool: &SqlitePool, order: ListOrder) -> Result<Vec<Drink>, RepositoryError> {
        let sql = match order {
            ListOrder::Unspecified => "SELECT id, title, recipe FROM drinks",
            ListOrder::ById => "SELECT id, title, recipe FROM drinks ORDER BY id",
        };

        let rows = sqlx::query_as::<_, DrinkRow>(sql).fetch_all(pool).await?;

        rows.into_iter().map(Drink::try_from).collect()
    }

    /// id로 음료 조회
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Drink>, RepositoryError> {
        let row = sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        row.map(Drink::try_from).transpose()
    }

    // ============================================================================================
    // Mutations
    // ============================================================================================

    /// 음료 생성. id는 저장소가 부여합니다.
    pub async fn create(pool: &SqlitePool, input: &NewDrink) -> Result<Drink, RepositoryError> {
        let recipe = serde_json::to_string(&input.recipe)?;

        let row = sqlx::query_as::<_, DrinkRow>(
            r#"
            INSERT INTO drinks (title, recipe)
            VALUES (?, ?)
            RETURNING id, title, recipe
            "#,
        )
        .bind(&input.title)
        .bind(&recipe)
        .fetch_one(pool)
        .await?;

        Drink::try_from(row)
    }

    /// 음료 부분 업데이트. 주어진 필드만 교체합니다.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        patch: &DrinkPatch,
    ) -> Result<Drink, RepositoryError> {
        let recipe = patch
            .recipe
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let row = sqlx::query_as::<_, DrinkRow>(
            r#"
            UPDATE drinks
            SET title = COALESCE(?, title), recipe = COALESCE(?, recipe)
            WHERE id = ?
            RETURNING id, title, recipe
            "#,
        )
        .bind(patch.title.as_deref())
        .bind(recipe)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(RepositoryError::NotFound(id))?;

        Drink::try_from(row)
    }

    /// 음료 삭제
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }

        Ok(())
    }
}
