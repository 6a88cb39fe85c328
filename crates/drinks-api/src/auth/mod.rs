//! 인증 및 권한 부여.
//!
//! 외부 인증 서버가 발급한 JWT를 검증하고, 토큰의 `permissions` 클레임으로
//! 라우트별 접근을 제어합니다.
//!
//! # 구성 요소
//!
//! - [`Claims`]: JWT 페이로드 구조체
//! - [`TokenVerifier`]: JWKS/공유 비밀 키 기반 토큰 검증기
//! - [`RequirePermission`]: 권한을 요구하는 Axum 추출기
//! - [`Scope`]: 라우트별 권한 문자열
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! async fn protected_handler(
//!     RequirePermission(claims, _): RequirePermission<GetDrinksDetail>,
//! ) -> impl IntoResponse {
//!     format!("Hello, {:?}!", claims.sub)
//! }
//! ```

mod jwt;
mod middleware;
mod scopes;

pub use jwt::{AuthConfig, Claims, KeySource, TokenVerifier};
pub use middleware::{bearer_token, check_permission, AuthError, RequirePermission};
pub use scopes::{DeleteDrinks, GetDrinksDetail, PatchDrinks, PostDrinks, Scope};
