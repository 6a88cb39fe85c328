//! Drinks API 라우트
//!
//! 음료 메뉴 CRUD API를 제공합니다.
//!
//! # 엔드포인트
//!
//! - `GET /drinks` - 음료 목록 (short, 공개)
//! - `GET /drinks-detail` - 음료 목록 (long, `get:drinks-detail`)
//! - `POST /drinks` - 음료 생성 (`post:drinks`)
//! - `PATCH /drinks/{id}` - 음료 수정 (`patch:drinks`)
//! - `DELETE /drinks/{id}` - 음료 삭제 (`delete:drinks`)

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::{DeleteDrinks, GetDrinksDetail, PatchDrinks, PostDrinks, RequirePermission};
use crate::error::{ApiError, ApiResult, ErrorEnvelope};
use crate::repository::{
    DrinkPatch, DrinkRepository, Ingredient, ListOrder, LongDrink, NewDrink, RepositoryError,
    ShortDrink,
};
use crate::state::AppState;

// ================================================================================================
// Request/Response Types
// ================================================================================================

/// 레시피 입력. 재료 하나만 보내면 한 개짜리 목록으로 취급합니다.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RecipeInput {
    Many(Vec<Ingredient>),
    One(Ingredient),
}

impl RecipeInput {
    pub fn into_ingredients(self) -> Vec<Ingredient> {
        match self {
            RecipeInput::Many(ingredients) => ingredients,
            RecipeInput::One(ingredient) => vec![ingredient],
        }
    }
}

/// 음료 생성/수정 요청
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DrinkRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub recipe: Option<RecipeInput>,
}

/// 음료 목록 응답 (short)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShortDrinkList {
    pub success: bool,
    pub drinks: Vec<ShortDrink>,
}

/// 음료 목록 응답 (long)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LongDrinkList {
    pub success: bool,
    pub drinks: Vec<LongDrink>,
}

/// 음료 생성 응답
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DrinkCreatedResponse {
    pub success: bool,
    pub drinks: LongDrink,
}

/// 음료 삭제 응답. `drinks`는 삭제된 id입니다.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DrinkDeletedResponse {
    pub success: bool,
    pub drinks: i64,
}

// ================================================================================================
// Helpers
// ================================================================================================

/// 저장소 에러를 API 에러로 변환. 원인은 로그에만 남깁니다.
fn storage_failure(action: &'static str) -> impl Fn(RepositoryError) -> ApiError {
    move |e| match e {
        RepositoryError::NotFound(id) => {
            debug!(action, id, "음료를 찾을 수 없습니다");
            ApiError::NotFound
        }
        other => {
            error!(
                action,
                duplicate_title = other.is_duplicate_title(),
                error = %other,
                "음료 저장소 작업 실패"
            );
            ApiError::Unprocessable
        }
    }
}

/// 경로의 id 파싱. 디코딩할 수 없거나 정수가 아니면 존재하지 않는 음료로 취급합니다.
fn parse_id(path: Result<Path<String>, PathRejection>) -> ApiResult<i64> {
    let Path(raw) = path.map_err(|rejection| {
        debug!(error = %rejection, "경로 파라미터 파싱 실패");
        ApiError::NotFound
    })?;
    raw.parse().map_err(|_| ApiError::NotFound)
}

fn read_body(payload: Result<Json<DrinkRequest>, JsonRejection>) -> ApiResult<DrinkRequest> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        warn!(error = %rejection, "요청 본문 파싱 실패");
        ApiError::Unprocessable
    })
}

fn validate_recipe(recipe: &[Ingredient]) -> ApiResult<()> {
    if recipe.is_empty() {
        warn!("빈 레시피");
        return Err(ApiError::Unprocessable);
    }

    for ingredient in recipe {
        ingredient.validate().map_err(|e| {
            warn!(error = %e, "레시피 검증 실패");
            ApiError::Unprocessable
        })?;
    }

    Ok(())
}

/// 빈 문자열 title은 값이 없는 것으로 취급
fn present_title(title: Option<String>) -> Option<String> {
    title.filter(|t| !t.trim().is_empty())
}

/// 빈 레시피는 값이 없는 것으로 취급
fn present_recipe(recipe: Option<RecipeInput>) -> Option<Vec<Ingredient>> {
    recipe
        .map(RecipeInput::into_ingredients)
        .filter(|ingredients| !ingredients.is_empty())
}

// ================================================================================================
// Handlers
// ================================================================================================

/// GET /drinks - 음료 목록 (재료 이름 제외)
#[utoipa::path(
    get,
    path = "/drinks",
    tag = "drinks",
    responses(
        (status = 200, description = "음료 목록", body = ShortDrinkList),
        (status = 422, description = "저장소 오류", body = ErrorEnvelope)
    )
)]
pub async fn list_drinks(State(state): State<Arc<AppState>>) -> ApiResult<Json<ShortDrinkList>> {
    let drinks = DrinkRepository::list(&state.db_pool, ListOrder::Unspecified)
        .await
        .map_err(storage_failure("list"))?;

    debug!(count = drinks.len(), "음료 목록 조회");

    Ok(Json(ShortDrinkList {
        success: true,
        drinks: drinks.iter().map(|d| d.short()).collect(),
    }))
}

/// GET /drinks-detail - 음료 상세 목록 (id 순)
#[utoipa::path(
    get,
    path = "/drinks-detail",
    tag = "drinks",
    security(("bearer_auth" = ["get:drinks-detail"])),
    responses(
        (status = 200, description = "음료 상세 목록", body = LongDrinkList),
        (status = 401, description = "인증 실패", body = ErrorEnvelope),
        (status = 403, description = "권한 없음", body = ErrorEnvelope),
        (status = 422, description = "저장소 오류", body = ErrorEnvelope)
    )
)]
pub async fn list_drink_details(
    State(state): State<Arc<AppState>>,
    RequirePermission(_claims, _): RequirePermission<GetDrinksDetail>,
) -> ApiResult<Json<LongDrinkList>> {
    let drinks = DrinkRepository::list(&state.db_pool, ListOrder::ById)
        .await
        .map_err(storage_failure("list_detail"))?;

    Ok(Json(LongDrinkList {
        success: true,
        drinks: drinks.iter().map(|d| d.long()).collect(),
    }))
}

/// POST /drinks - 음료 생성
#[utoipa::path(
    post,
    path = "/drinks",
    tag = "drinks",
    request_body = DrinkRequest,
    security(("bearer_auth" = ["post:drinks"])),
    responses(
        (status = 200, description = "생성된 음료", body = DrinkCreatedResponse),
        (status = 401, description = "인증 실패", body = ErrorEnvelope),
        (status = 403, description = "권한 없음", body = ErrorEnvelope),
        (status = 422, description = "입력 또는 저장소 오류", body = ErrorEnvelope)
    )
)]
pub async fn create_drink(
    State(state): State<Arc<AppState>>,
    RequirePermission(claims, _): RequirePermission<PostDrinks>,
    payload: Result<Json<DrinkRequest>, JsonRejection>,
) -> ApiResult<Json<DrinkCreatedResponse>> {
    let body = read_body(payload)?;

    let title = present_title(body.title).ok_or_else(|| {
        warn!("title 누락");
        ApiError::Unprocessable
    })?;
    let recipe = body
        .recipe
        .map(RecipeInput::into_ingredients)
        .ok_or_else(|| {
            warn!("recipe 누락");
            ApiError::Unprocessable
        })?;
    validate_recipe(&recipe)?;

    let drink = DrinkRepository::create(&state.db_pool, &NewDrink { title, recipe })
        .await
        .map_err(storage_failure("create"))?;

    info!(
        id = drink.id,
        title = %drink.title,
        sub = claims.sub.as_deref().unwrap_or("-"),
        "음료 생성"
    );

    Ok(Json(DrinkCreatedResponse {
        success: true,
        drinks: drink.long(),
    }))
}

/// PATCH /drinks/{id} - 음료 부분 수정
#[utoipa::path(
    patch,
    path = "/drinks/{id}",
    tag = "drinks",
    params(("id" = i64, Path, description = "음료 id")),
    request_body = DrinkRequest,
    security(("bearer_auth" = ["patch:drinks"])),
    responses(
        (status = 200, description = "수정된 음료", body = LongDrinkList),
        (status = 401, description = "인증 실패", body = ErrorEnvelope),
        (status = 403, description = "권한 없음", body = ErrorEnvelope),
        (status = 404, description = "음료 없음", body = ErrorEnvelope),
        (status = 422, description = "입력 또는 저장소 오류", body = ErrorEnvelope)
    )
)]
pub async fn update_drink(
    State(state): State<Arc<AppState>>,
    RequirePermission(claims, _): RequirePermission<PatchDrinks>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<DrinkRequest>, JsonRejection>,
) -> ApiResult<Json<LongDrinkList>> {
    let id = parse_id(path)?;

    // 존재 여부를 먼저 확인 (본문과 무관하게 404)
    DrinkRepository::find_by_id(&state.db_pool, id)
        .await
        .map_err(storage_failure("update_lookup"))?
        .ok_or(ApiError::NotFound)?;

    let body = read_body(payload)?;
    let patch = DrinkPatch {
        title: present_title(body.title),
        recipe: present_recipe(body.recipe),
    };
    if let Some(recipe) = &patch.recipe {
        validate_recipe(recipe)?;
    }

    let drink = DrinkRepository::update(&state.db_pool, id, &patch)
        .await
        .map_err(storage_failure("update"))?;

    info!(
        id,
        title = %drink.title,
        sub = claims.sub.as_deref().unwrap_or("-"),
        "음료 수정"
    );

    Ok(Json(LongDrinkList {
        success: true,
        drinks: vec![drink.long()],
    }))
}

/// DELETE /drinks/{id} - 음료 삭제
#[utoipa::path(
    delete,
    path = "/drinks/{id}",
    tag = "drinks",
    params(("id" = i64, Path, description = "음료 id")),
    security(("bearer_auth" = ["delete:drinks"])),
    responses(
        (status = 200, description = "삭제된 음료 id", body = DrinkDeletedResponse),
        (status = 401, description = "인증 실패", body = ErrorEnvelope),
        (status = 403, description = "권한 없음", body = ErrorEnvelope),
        (status = 404, description = "음료 없음", body = ErrorEnvelope),
        (status = 422, description = "저장소 오류", body = ErrorEnvelope)
    )
)]
pub async fn delete_drink(
    State(state): State<Arc<AppState>>,
    RequirePermission(claims, _): RequirePermission<DeleteDrinks>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<DrinkDeletedResponse>> {
    let id = parse_id(path)?;

    DrinkRepository::find_by_id(&state.db_pool, id)
        .await
        .map_err(storage_failure("delete_lookup"))?
        .ok_or(ApiError::NotFound)?;

    DrinkRepository::delete(&state.db_pool, id)
        .await
        .map_err(storage_failure("delete"))?;

    info!(id, sub = claims.sub.as_deref().unwrap_or("-"), "음료 삭제");

    Ok(Json(DrinkDeletedResponse {
        success: true,
        drinks: id,
    }))
}

// ================================================================================================
// Router
// ================================================================================================

/// Drinks 라우터 생성.
pub fn drinks_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/drinks", get(list_drinks).post(create_drink))
        .route("/drinks-detail", get(list_drink_details))
        .route("/drinks/{id}", patch(update_drink).delete(delete_drink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::routes::create_api_router;
    use crate::state::{create_test_state, mint_test_token};

    const MANAGER: &[&str] = &[
        "get:drinks-detail",
        "post:drinks",
        "patch:drinks",
        "delete:drinks",
    ];
    const BARISTA: &[&str] = &["get:drinks-detail"];

    async fn app() -> Router {
        app_with_pool().await.0
    }

    async fn app_with_pool() -> (Router, sqlx::SqlitePool) {
        let state = create_test_state().await;
        let pool = state.db_pool.clone();
        (create_api_router().with_state(Arc::new(state)), pool)
    }

    fn unprocessable() -> Value {
        json!({"success": false, "error": 422, "message": "Unprocessable"})
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response: Response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }

    fn water() -> Value {
        json!({
            "title": "Water",
            "recipe": [{"name": "water", "color": "blue", "parts": 1}]
        })
    }

    async fn create(app: &Router, body: Value) -> Value {
        let token = mint_test_token(MANAGER);
        let (status, json) = send(app, request("POST", "/drinks", Some(&token), Some(body))).await;
        assert_eq!(status, StatusCode::OK, "create failed: {json}");
        json
    }

    #[tokio::test]
    async fn test_list_drinks_is_public_and_short() {
        let app = app().await;
        create(&app, water()).await;

        let (status, json) = send(&app, request("GET", "/drinks", None, None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["drinks"][0]["title"], "Water");
        assert_eq!(json["drinks"][0]["recipe"][0], json!({"color": "blue", "parts": 1}));
        assert!(!json.to_string().contains("\"name\""));
    }

    #[tokio::test]
    async fn test_create_then_detail_round_trip() {
        let app = app().await;
        let created = create(&app, water()).await;

        assert_eq!(created["success"], true);
        assert_eq!(created["drinks"]["title"], "Water");
        assert!(created["drinks"]["id"].as_i64().unwrap() > 0);

        let token = mint_test_token(BARISTA);
        let (status, json) = send(&app, request("GET", "/drinks-detail", Some(&token), None)).await;

        assert_eq!(status, StatusCode::OK);
        let drinks: Vec<LongDrink> = serde_json::from_value(json["drinks"].clone()).unwrap();
        assert_eq!(drinks.len(), 1);
        assert_eq!(drinks[0].title, "Water");
        assert_eq!(
            drinks[0].recipe,
            vec![Ingredient {
                name: "water".to_string(),
                color: "blue".to_string(),
                parts: 1,
            }]
        );
    }

    #[tokio::test]
    async fn test_detail_requires_permission() {
        let app = app().await;

        let (status, json) = send(&app, request("GET", "/drinks-detail", None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json, json!({
            "success": false,
            "error": 401,
            "message": "Authorization header is expected."
        }));

        let token = mint_test_token(&["post:drinks"]);
        let (status, json) = send(&app, request("GET", "/drinks-detail", Some(&token), None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["error"], 403);
    }

    #[tokio::test]
    async fn test_malformed_and_invalid_tokens() {
        let app = app().await;

        let malformed = Request::builder()
            .method("GET")
            .uri("/drinks-detail")
            .header(header::AUTHORIZATION, "Token abc")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, malformed).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, json) = send(
            &app,
            request("GET", "/drinks-detail", Some("not.a.jwt"), None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Unable to parse authentication token.");
    }

    #[tokio::test]
    async fn test_permissions_per_route() {
        let app = app().await;
        let barista = mint_test_token(BARISTA);

        let (status, _) = send(&app, request("POST", "/drinks", Some(&barista), Some(water()))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let created = create(&app, water()).await;
        let id = created["drinks"]["id"].as_i64().unwrap();

        let (status, _) = send(
            &app,
            request("PATCH", &format!("/drinks/{id}"), Some(&barista), Some(json!({"title": "x"}))),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, request("DELETE", &format!("/drinks/{id}"), Some(&barista), None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_create_accepts_single_ingredient() {
        let app = app().await;

        let created = create(
            &app,
            json!({
                "title": "Espresso",
                "recipe": {"name": "espresso", "color": "#6f4e37", "parts": 1}
            }),
        )
        .await;

        assert_eq!(created["drinks"]["recipe"].as_array().unwrap().len(), 1);
        assert_eq!(created["drinks"]["recipe"][0]["name"], "espresso");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let app = app().await;
        let token = mint_test_token(MANAGER);

        let cases = [
            json!({"recipe": [{"name": "water", "color": "blue", "parts": 1}]}),
            json!({"title": "Water"}),
            json!({"title": "Water", "recipe": []}),
            json!({"title": "Water", "recipe": [{"name": "water", "color": "blue", "parts": 0}]}),
        ];

        for body in cases {
            let (status, json) = send(&app, request("POST", "/drinks", Some(&token), Some(body))).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(json["message"], "Unprocessable");
        }

        let garbage = Request::builder()
            .method("POST")
            .uri("/drinks")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, _) = send(&app, garbage).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_create_duplicate_title_is_unprocessable() {
        let app = app().await;
        create(&app, water()).await;

        let token = mint_test_token(MANAGER);
        let (status, json) = send(&app, request("POST", "/drinks", Some(&token), Some(water()))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], 422);
    }

    #[tokio::test]
    async fn test_patch_updates_fields() {
        let app = app().await;
        let created = create(&app, water()).await;
        let id = created["drinks"]["id"].as_i64().unwrap();
        let token = mint_test_token(MANAGER);

        let (status, json) = send(
            &app,
            request("PATCH", &format!("/drinks/{id}"), Some(&token), Some(json!({"title": "Sparkling Water"}))),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["drinks"][0]["id"], id);
        assert_eq!(json["drinks"][0]["title"], "Sparkling Water");
        assert_eq!(json["drinks"][0]["recipe"][0]["name"], "water");

        let (status, json) = send(
            &app,
            request(
                "PATCH",
                &format!("/drinks/{id}"),
                Some(&token),
                Some(json!({"title": "", "recipe": [{"name": "soda", "color": "white", "parts": 2}]})),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["drinks"][0]["title"], "Sparkling Water");
        assert_eq!(json["drinks"][0]["recipe"][0]["name"], "soda");
        assert_eq!(json["drinks"][0]["recipe"][0]["parts"], 2);
    }

    #[tokio::test]
    async fn test_patch_missing_drink_is_not_found() {
        let app = app().await;
        let token = mint_test_token(MANAGER);

        for body in [Some(json!({"title": "anything"})), Some(json!([1, 2, 3])), None] {
            let (status, json) = send(&app, request("PATCH", "/drinks/9999", Some(&token), body)).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(json["message"], "Not Found");
        }

        let (status, _) = send(&app, request("PATCH", "/drinks/abc", Some(&token), Some(json!({})))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_removes_drink() {
        let app = app().await;
        let created = create(&app, water()).await;
        let id = created["drinks"]["id"].as_i64().unwrap();
        let token = mint_test_token(MANAGER);

        let (status, json) = send(&app, request("DELETE", &format!("/drinks/{id}"), Some(&token), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"success": true, "drinks": id}));

        let (_, listing) = send(&app, request("GET", "/drinks", None, None)).await;
        assert!(listing["drinks"].as_array().unwrap().is_empty());

        let (status, _) = send(&app, request("DELETE", &format!("/drinks/{id}"), Some(&token), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_undecodable_id_is_not_found() {
        let app = app().await;
        let token = mint_test_token(MANAGER);

        let (status, json) = send(&app, request("DELETE", "/drinks/%FF", Some(&token), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json, json!({"success": false, "error": 404, "message": "Not Found"}));

        let (status, json) = send(
            &app,
            request("PATCH", "/drinks/%FF", Some(&token), Some(json!({"title": "x"}))),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Not Found");
    }

    #[tokio::test]
    async fn test_patch_to_existing_title_is_unprocessable() {
        let app = app().await;
        create(&app, water()).await;
        let latte = create(
            &app,
            json!({
                "title": "Latte",
                "recipe": [{"name": "milk", "color": "white", "parts": 3}]
            }),
        )
        .await;
        let id = latte["drinks"]["id"].as_i64().unwrap();
        let token = mint_test_token(MANAGER);

        let (status, json) = send(
            &app,
            request("PATCH", &format!("/drinks/{id}"), Some(&token), Some(json!({"title": "Water"}))),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json, unprocessable());
    }

    #[tokio::test]
    async fn test_patch_with_invalid_recipe_is_unprocessable() {
        let app = app().await;
        let created = create(&app, water()).await;
        let id = created["drinks"]["id"].as_i64().unwrap();
        let token = mint_test_token(MANAGER);

        let bad_recipes = [
            json!([{"name": "water", "color": "blue", "parts": 0}]),
            json!([{"name": "", "color": "blue", "parts": 1}]),
        ];

        for recipe in bad_recipes {
            let (status, json) = send(
                &app,
                request("PATCH", &format!("/drinks/{id}"), Some(&token), Some(json!({"recipe": recipe}))),
            )
            .await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(json, unprocessable());
        }

        let barista = mint_test_token(BARISTA);
        let (_, detail) = send(&app, request("GET", "/drinks-detail", Some(&barista), None)).await;
        assert_eq!(detail["drinks"][0]["recipe"][0]["parts"], 1);
        assert_eq!(detail["drinks"][0]["recipe"][0]["name"], "water");
    }

    #[tokio::test]
    async fn test_corrupt_row_makes_listing_unprocessable() {
        let (app, pool) = app_with_pool().await;
        sqlx::query("INSERT INTO drinks (title, recipe) VALUES ('broken', 'not json')")
            .execute(&pool)
            .await
            .unwrap();

        let (status, json) = send(&app, request("GET", "/drinks", None, None)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json, unprocessable());
    }

    #[test]
    fn test_recipe_input_shapes() {
        let many: RecipeInput =
            serde_json::from_value(json!([{"name": "a", "color": "red", "parts": 1}])).unwrap();
        let one: RecipeInput =
            serde_json::from_value(json!({"name": "a", "color": "red", "parts": 1})).unwrap();

        assert_eq!(many.into_ingredients(), one.into_ingredients());
        assert!(present_recipe(Some(RecipeInput::Many(vec![]))).is_none());
        assert!(present_title(Some("  ".to_string())).is_none());
    }
}
