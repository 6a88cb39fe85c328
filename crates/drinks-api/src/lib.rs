//! Coffee Shop Drinks REST API.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 음료 메뉴 CRUD API
//! - JWT 권한(permission) 기반 인증
//! - SQLite 저장소
//! - OpenAPI 문서
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: JWT 검증 및 권한 확인
//! - [`repository`]: 음료 저장소
//! - [`config`]: 환경변수 설정
//! - [`error`]: 통합 에러 응답
//! - [`openapi`]: OpenAPI 문서

pub mod auth;
pub mod config;
pub mod error;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod state;

pub use auth::{AuthError, Claims, RequirePermission, TokenVerifier};
pub use config::AppConfig;
pub use error::{ApiError, ApiResult, ErrorEnvelope};
pub use repository::{Drink, DrinkRepository, Ingredient};
pub use routes::create_api_router;
pub use state::AppState;
