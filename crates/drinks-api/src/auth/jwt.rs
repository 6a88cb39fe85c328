//! JWT 토큰 검증.
//!
//! 외부 인증 서버(Auth0 등)가 발급한 Access Token을 검증합니다.
//! 서명 키는 JWKS 엔드포인트에서 가져와 캐시하며, 개발/테스트 환경에서는
//! HS256 공유 비밀 키를 사용할 수 있습니다.

use std::sync::Arc;
use std::time::{Duration, Instant};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use super::AuthError;

/// 캐시가 유효할 때 JWKS를 다시 받아오는 최소 간격
const MIN_JWKS_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// JWT Access Token 페이로드.
///
/// 표준 클레임과 함께 인증 서버가 부여한 `permissions` 목록을 포함합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Audience (문자열 또는 문자열 배열)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Value>,
    /// Expiration (Unix timestamp)
    pub exp: u64,
    /// Issued At (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    /// 부여된 권한 목록 (예: "post:drinks")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    /// 특정 권한 문자열을 가지는지 확인.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_deref()
            .is_some_and(|granted| granted.iter().any(|p| p == permission))
    }
}

/// 서명 키 출처.
#[derive(Debug, Clone)]
pub enum KeySource {
    /// RS256 공개 키 집합 (JWKS) URL
    Jwks { url: String },
    /// HS256 공유 비밀 키 (개발/테스트 전용)
    SharedSecret(String),
}

/// 토큰 검증 설정.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// 기대하는 `aud` 값
    pub audience: String,
    /// 기대하는 `iss` 값
    pub issuer: String,
    /// 서명 키 출처
    pub key_source: KeySource,
    /// JWKS 캐시 유지 시간
    pub jwks_cache_ttl: Duration,
}

#[derive(Debug, Clone)]
struct CachedJwks {
    set: Arc<JwkSet>,
    fetched_at: Instant,
}

impl CachedJwks {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// JWT 검증기.
///
/// 요청마다 공유되며, JWKS 캐시 외의 상태는 갖지 않습니다.
#[derive(Debug)]
pub struct TokenVerifier {
    config: AuthConfig,
    jwks_cache: RwLock<Option<CachedJwks>>,
    last_refresh: Mutex<Option<Instant>>,
    http: reqwest::Client,
}

impl TokenVerifier {
    /// 새로운 검증기 생성.
    pub fn new(config: AuthConfig) -> Self {
        let http = match reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                warn!(error = %e, "Failed to configure reqwest client; using defaults");
                reqwest::Client::new()
            }
        };

        Self {
            config,
            jwks_cache: RwLock::new(None),
            last_refresh: Mutex::new(None),
            http,
        }
    }

    /// 설정 반환.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// 토큰 서명과 표준 클레임(exp, aud, iss)을 검증하고 Claims를 반환.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        match &self.config.key_source {
            KeySource::SharedSecret(secret) => decode::<Claims>(
                token,
                &DecodingKey::from_secret(secret.as_bytes()),
                &self.validation_for(Algorithm::HS256),
            )
            .map(|data| data.claims)
            .map_err(classify),
            KeySource::Jwks { url } => self.decode_with_jwks(token, url).await,
        }
    }

    async fn decode_with_jwks(&self, token: &str, url: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::InvalidToken)?;
        let kid = header.kid.ok_or(AuthError::KeyNotFound)?;

        let jwk = self.get_jwk(url, &kid).await?.ok_or_else(|| {
            debug!(kid = %kid, "JWKS에 일치하는 키가 없습니다");
            AuthError::KeyNotFound
        })?;

        let decoding_key = DecodingKey::from_jwk(&jwk).map_err(|_| AuthError::KeyNotFound)?;

        decode::<Claims>(token, &decoding_key, &self.validation_for(Algorithm::RS256))
            .map(|data| data.claims)
            .map_err(classify)
    }

    fn validation_for(&self, algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        validation.set_audience(&[self.config.audience.as_str()]);
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);
        validation
    }

    async fn get_jwk(&self, url: &str, kid: &str) -> Result<Option<Jwk>, AuthError> {
        if let Some(jwk) = self.cached_jwk(kid).await {
            return Ok(Some(jwk));
        }

        // 갱신은 한 번에 하나만
        let mut last_refresh = self.last_refresh.lock().await;
        if let Some(jwk) = self.cached_jwk(kid).await {
            return Ok(Some(jwk));
        }

        // 캐시가 유효하면 모르는 kid로 갱신을 반복하지 않음
        let recently_refreshed =
            last_refresh.is_some_and(|at| at.elapsed() < MIN_JWKS_REFRESH_INTERVAL);
        if recently_refreshed && self.cache_is_fresh().await {
            debug!(kid, "최근 JWKS를 갱신했으므로 재조회를 생략합니다");
            return Ok(None);
        }

        *last_refresh = Some(Instant::now());
        self.refresh_jwks(url).await?;
        Ok(self.cached_jwk(kid).await)
    }

    async fn cache_is_fresh(&self) -> bool {
        self.jwks_cache
            .read()
            .await
            .as_ref()
            .is_some_and(|cached| cached.is_fresh(self.config.jwks_cache_ttl))
    }

    async fn cached_jwk(&self, kid: &str) -> Option<Jwk> {
        let cache = self.jwks_cache.read().await;
        let set = match cache.as_ref() {
            Some(cached) if cached.is_fresh(self.config.jwks_cache_ttl) => Arc::clone(&cached.set),
            _ => return None,
        };
        drop(cache);

        set.keys
            .iter()
            .find(|k| k.common.key_id.as_deref() == Some(kid))
            .cloned()
    }

    async fn refresh_jwks(&self, url: &str) -> Result<(), AuthError> {
        let set = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                warn!(error = %e, url, "JWKS 조회 실패");
                AuthError::KeyNotFound
            })?
            .json::<JwkSet>()
            .await
            .map_err(|e| {
                warn!(error = %e, url, "JWKS 파싱 실패");
                AuthError::KeyNotFound
            })?;

        debug!(keys = set.keys.len(), "JWKS 갱신 완료");

        *self.jwks_cache.write().await = Some(CachedJwks {
            set: Arc::new(set),
            fetched_at: Instant::now(),
        });
        Ok(())
    }
}

/// jsonwebtoken 에러를 인증 에러로 분류.
fn classify(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidAudience
        | ErrorKind::InvalidIssuer
        | ErrorKind::InvalidSubject
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
        _ => AuthError::InvalidToken,
    }
}
