//! 권한(permission) 스코프 정의.
//!
//! 인증 서버가 토큰의 `permissions` 클레임에 담아 주는 문자열과
//! 보호된 라우트를 연결합니다.

/// 라우트가 요구하는 권한 문자열.
///
/// [`RequirePermission`](super::RequirePermission) 추출기의 타입 인자로 사용됩니다.
pub trait Scope: Send + Sync + 'static {
    /// 토큰의 `permissions`에 포함되어야 하는 문자열
    const PERMISSION: &'static str;
}

/// 음료 상세(레시피 재료 이름 포함) 조회
#[derive(Debug, Clone, Copy)]
pub struct GetDrinksDetail;

impl Scope for GetDrinksDetail {
    const PERMISSION: &'static str = "get:drinks-detail";
}

/// 음료 생성
#[derive(Debug, Clone, Copy)]
pub struct PostDrinks;

impl Scope for PostDrinks {
    const PERMISSION: &'static str = "post:drinks";
}

/// 음료 수정
#[derive(Debug, Clone, Copy)]
pub struct PatchDrinks;

impl Scope for PatchDrinks {
    const PERMISSION: &'static str = "patch:drinks";
}

/// 음료 삭제
#[derive(Debug, Clone, Copy)]
pub struct DeleteDrinks;

impl Scope for DeleteDrinks {
    const PERMISSION: &'static str = "delete:drinks";
}
