//! Axum용 JWT 인증 추출기.
//!
//! Authorization 헤더에서 Bearer 토큰을 꺼내 검증하고,
//! 라우트가 요구하는 권한이 토큰에 있는지 확인합니다.

use std::marker::PhantomData;
use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::{Claims, Scope};
use crate::error::ApiError;
use crate::state::AppState;

/// 인증/인가 에러.
///
/// 메시지는 응답 본문의 `message` 필드로 그대로 노출됩니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    MissingHeader,
    #[error("{0}")]
    MalformedHeader(&'static str),
    #[error("Token expired.")]
    TokenExpired,
    #[error("Incorrect claims. Please, check the audience and issuer.")]
    InvalidClaims,
    #[error("Unable to parse authentication token.")]
    InvalidToken,
    #[error("Unable to find the appropriate key.")]
    KeyNotFound,
    #[error("Permissions not included in JWT.")]
    PermissionsMissing,
    #[error("Permission not found.")]
    PermissionDenied,
}

impl AuthError {
    /// HTTP 상태 코드.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::PermissionsMissing | AuthError::PermissionDenied => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// 로그용 에러 코드.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "authorization_header_missing",
            AuthError::MalformedHeader(_) => "invalid_header",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaims => "invalid_claims",
            AuthError::InvalidToken => "invalid_token",
            AuthError::KeyNotFound => "key_not_found",
            AuthError::PermissionsMissing => "permissions_missing",
            AuthError::PermissionDenied => "unauthorized",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

/// Authorization 헤더에서 Bearer 토큰 추출.
///
/// 헤더는 `Bearer ` 로 시작해야 하며 그 뒤에 토큰 하나만 있어야 합니다.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader("Authorization header must be valid ASCII."))?;

    let token = value.strip_prefix("Bearer ").ok_or(AuthError::MalformedHeader(
        "Authorization header must start with \"Bearer\".",
    ))?;

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MalformedHeader("Token not found."));
    }
    if token.contains(char::is_whitespace) {
        return Err(AuthError::MalformedHeader(
            "Authorization header must be bearer token.",
        ));
    }

    Ok(token)
}

/// Claims에 권한 문자열이 있는지 확인.
pub fn check_permission(claims: &Claims, permission: &str) -> Result<(), AuthError> {
    if claims.permissions.is_none() {
        return Err(AuthError::PermissionsMissing);
    }

    if claims.has_permission(permission) {
        Ok(())
    } else {
        Err(AuthError::PermissionDenied)
    }
}

/// 특정 권한을 요구하는 추출기.
///
/// 토큰 검증과 권한 확인을 모두 통과하면 Claims를 핸들러에 넘겨줍니다.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn create_drink(
///     RequirePermission(claims, _): RequirePermission<PostDrinks>,
/// ) -> impl IntoResponse {
///     format!("Hello, {:?}!", claims.sub)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequirePermission<P: Scope>(pub Claims, pub PhantomData<P>);

impl<P> FromRequestParts<Arc<AppState>> for RequirePermission<P>
where
    P: Scope,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let claims = state.verifier.verify(token).await?;
        check_permission(&claims, P::PERMISSION)?;

        debug!(
            permission = P::PERMISSION,
            sub = claims.sub.as_deref().unwrap_or("-"),
            "권한 확인 완료"
        );

        Ok(RequirePermission(claims, PhantomData))
    }
}
