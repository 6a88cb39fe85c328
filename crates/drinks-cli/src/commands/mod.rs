//! CLI 명령어 구현 모듈.

pub mod db;

pub use db::{init_db, reset_db, seed_db, DbConfig};
