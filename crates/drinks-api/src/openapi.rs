//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 문서를 생성합니다.
//! 문서는 `/api-docs/openapi.json` 경로에서 제공됩니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::{routing::get, Json, Router};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::error::ErrorEnvelope;
use crate::repository::{Ingredient, LongDrink, ShortDrink, ShortIngredient};
use crate::routes::{
    DrinkCreatedResponse, DrinkDeletedResponse, DrinkRequest, HealthResponse, LongDrinkList,
    RecipeInput, ShortDrinkList,
};

// ==================== OpenAPI 문서 정의 ====================

/// Coffee Shop Drinks API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Coffee Shop Drinks API",
        description = r#"
# Coffee Shop Drinks API

음료 메뉴를 조회하고 관리하는 REST API입니다.

## 인증

`/drinks` 목록 조회를 제외한 모든 엔드포인트는 Bearer JWT가 필요하며,
토큰의 `permissions` 클레임에 엔드포인트별 권한이 있어야 합니다.

- `get:drinks-detail`
- `post:drinks`
- `patch:drinks`
- `delete:drinks`
"#
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "헬스 체크"),
        (name = "drinks", description = "음료 메뉴 관리")
    ),
    components(schemas(
        ErrorEnvelope,
        HealthResponse,
        Ingredient,
        ShortIngredient,
        ShortDrink,
        LongDrink,
        RecipeInput,
        DrinkRequest,
        ShortDrinkList,
        LongDrinkList,
        DrinkCreatedResponse,
        DrinkDeletedResponse,
    )),
    paths(
        crate::routes::health::health_check,
        crate::routes::drinks::list_drinks,
        crate::routes::drinks::list_drink_details,
        crate::routes::drinks::create_drink,
        crate::routes::drinks::update_drink,
        crate::routes::drinks::delete_drink,
    )
)]
pub struct ApiDoc;

/// `bearer_auth` 보안 스키마 등록.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

// ==================== 문서 라우터 ====================

/// OpenAPI JSON 라우터 생성.
///
/// `/api-docs/openapi.json` 경로에 문서를 마운트합니다.
pub fn openapi_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}

// ==================== 테스트 ====================
