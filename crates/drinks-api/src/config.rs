//! 환경변수 기반 설정 모듈.
//!
//! 시작 시 `.env` 파일(있는 경우)과 프로세스 환경변수에서 한 번 읽어
//! [`AppConfig`]를 만들고, 이후에는 명시적으로 전달합니다.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::auth::{AuthConfig, KeySource};

/// 기본 API 포트
const DEFAULT_PORT: u16 = 5000;
/// 기본 audience
const DEFAULT_AUDIENCE: &str = "id_access";
/// 기본 데이터베이스 파일 이름
const DEFAULT_DATABASE_FILENAME: &str = "database.db";
/// 기본 JWKS 캐시 유지 시간 (초)
const DEFAULT_JWKS_TTL_SECS: u64 = 300;

/// 설정 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("AUTH0_DOMAIN 또는 JWT_HS256_SECRET 환경변수가 필요합니다")]
    MissingAuthSource,
    #[error("소켓 주소 설정이 유효하지 않습니다 ({addr}): {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// 서버 전체 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP 서버 설정
    pub server: ServerConfig,
    /// 데이터베이스 설정
    pub database: DatabaseConfig,
    /// 토큰 검증 설정
    pub auth: AuthConfig,
    /// 허용 CORS origin 목록 (`None`이면 모두 허용)
    pub cors_origins: Option<Vec<String>>,
}

/// HTTP 서버 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 바인딩할 호스트 주소
    pub host: String,
    /// 바인딩할 포트
    pub port: u16,
}

/// 데이터베이스 설정
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// sqlx 연결 URL
    pub url: String,
    /// 연결 풀 최대 크기
    pub max_connections: u32,
}

impl AppConfig {
    /// `.env`와 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 임의의 키-값 조회 함수로 설정 구성
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let cors_origins = non_empty(&lookup, "CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        Ok(Self {
            server: ServerConfig {
                host: non_empty(&lookup, "API_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
                port: parse_or(&lookup, "API_PORT", DEFAULT_PORT),
            },
            database: DatabaseConfig::from_lookup(&lookup),
            auth: auth_from_lookup(&lookup)?,
            cors_origins,
        })
    }
}

impl ServerConfig {
    /// 소켓 주소 반환.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|source| ConfigError::InvalidAddress { addr, source })
    }
}

impl DatabaseConfig {
    /// `.env`와 환경변수에서 데이터베이스 설정만 로드
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `DATABASE_URL`이 있으면 그대로 쓰고, 없으면
    /// `DATABASE_DIR`(기본: 크레이트 디렉터리)과 `DATABASE_FILENAME`으로 SQLite 경로를 만듭니다.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let url = non_empty(&lookup, "DATABASE_URL").unwrap_or_else(|| {
            let dir = non_empty(&lookup, "DATABASE_DIR")
                .unwrap_or_else(|| env!("CARGO_MANIFEST_DIR").to_string());
            let filename = non_empty(&lookup, "DATABASE_FILENAME")
                .unwrap_or_else(|| DEFAULT_DATABASE_FILENAME.to_string());
            let path = Path::new(&dir).join(filename.trim_start_matches('/'));
            format!("sqlite://{}", path.display())
        });

        Self {
            url,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5),
        }
    }
}

/// 토큰 검증 설정 구성.
///
/// `JWT_HS256_SECRET`이 있으면 공유 비밀 키 검증을, 없으면 `AUTH0_DOMAIN`의 JWKS를 사용합니다.
fn auth_from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<AuthConfig, ConfigError> {
    let domain = non_empty(lookup, "AUTH0_DOMAIN")
        .map(|d| d.trim_start_matches("https://").trim_end_matches('/').to_string());

    let key_source = match (non_empty(lookup, "JWT_HS256_SECRET"), &domain) {
        (Some(secret), _) => KeySource::SharedSecret(secret),
        (None, Some(domain)) => KeySource::Jwks {
            url: format!("https://{domain}/.well-known/jwks.json"),
        },
        (None, None) => return Err(ConfigError::MissingAuthSource),
    };

    let issuer = non_empty(lookup, "AUTH_ISSUER")
        .or_else(|| domain.as_ref().map(|d| format!("https://{d}/")))
        .ok_or(ConfigError::MissingAuthSource)?;

    Ok(AuthConfig {
        audience: non_empty(lookup, "API_AUDIENCE").unwrap_or_else(|| DEFAULT_AUDIENCE.to_string()),
        issuer,
        key_source,
        jwks_cache_ttl: Duration::from_secs(parse_or(
            lookup,
            "AUTH_JWKS_CACHE_TTL_SECS",
            DEFAULT_JWKS_TTL_SECS,
        )),
    })
}

/// 빈 문자열을 제외한 값 조회
fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

/// 값을 파싱 (실패 시 기본값 사용)
fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
