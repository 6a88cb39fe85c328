//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 시작 시 한 번 구성되어 Axum의 State extractor로 주입됩니다.
//! 전역 싱글턴 없이 연결 풀과 토큰 검증기를 명시적으로 전달합니다.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::TokenVerifier;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 풀 (SQLite)
    pub db_pool: SqlitePool,

    /// JWT 검증기 (JWKS 캐시 포함)
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    /// 새로운 AppState 생성.
    ///
    /// # 인자
    /// * `db_pool` - 스키마가 준비된 연결 풀
    /// * `verifier` - 토큰 검증기
    pub fn new(db_pool: SqlitePool, verifier: TokenVerifier) -> Self {
        Self {
            db_pool,
            verifier: Arc::new(verifier),
        }
    }
}

/// 테스트용 공유 비밀 키
#[cfg(test)]
pub const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";
/// 테스트용 audience
#[cfg(test)]
pub const TEST_AUDIENCE: &str = "drinks-test";
/// 테스트용 issuer
#[cfg(test)]
pub const TEST_ISSUER: &str = "https://coffee-shop.test/";

/// 테스트용 AppState 생성.
///
/// 인메모리 SQLite와 HS256 공유 비밀 키 검증기를 사용합니다.
#[cfg(test)]
pub async fn create_test_state() -> AppState {
    use crate::auth::{AuthConfig, KeySource};

    let verifier = TokenVerifier::new(AuthConfig {
        audience: TEST_AUDIENCE.to_string(),
        issuer: TEST_ISSUER.to_string(),
        key_source: KeySource::SharedSecret(TEST_SECRET.to_string()),
        jwks_cache_ttl: std::time::Duration::from_secs(300),
    });

    AppState::new(crate::repository::memory_pool().await, verifier)
}

/// 주어진 권한을 가진 테스트 토큰 발급 (1시간 유효).
#[cfg(test)]
pub fn mint_test_token(permissions: &[&str]) -> String {
    use jsonwebtoken::{encode, get_current_timestamp, EncodingKey, Header};

    let claims = serde_json::json!({
        "sub": "auth0|test-user",
        "iss": TEST_ISSUER,
        "aud": TEST_AUDIENCE,
        "iat": get_current_timestamp(),
        "exp": get_current_timestamp() + 3600,
        "permissions": permissions,
    });

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to mint test token")
}
