//! Drinks 관리 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 스키마 생성
//! - 스키마 초기화 (모든 데이터 삭제)
//! - 샘플 음료 시드

pub mod commands;
