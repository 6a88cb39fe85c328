//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/healthz` - 헬스 체크 (liveness)
//! - `/drinks`, `/drinks-detail`, `/drinks/{id}` - 음료 메뉴 관리
//! - `/api-docs/openapi.json` - OpenAPI 문서
//!
//! 등록되지 않은 경로와 메서드도 같은 에러 본문(404/405)으로 응답합니다.

pub mod drinks;
pub mod health;

pub use drinks::{
    drinks_router, DrinkCreatedResponse, DrinkDeletedResponse, DrinkRequest, LongDrinkList,
    RecipeInput, ShortDrinkList,
};
pub use health::{health_router, HealthResponse};

use axum::Router;
use std::sync::Arc;

use crate::error::{method_not_allowed, not_found};
use crate::openapi::openapi_router;
use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
/// fallback은 병합 이후에 등록해야 모든 경로에 적용됩니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health_router())
        .merge(drinks_router())
        .merge(openapi_router())
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
}
