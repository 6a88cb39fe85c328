//! Drinks 관리 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 스키마 생성
//! drinks-admin init
//!
//! # 샘플 음료 추가
//! drinks-admin seed
//!
//! # 모든 음료 삭제 후 스키마 재생성
//! drinks-admin reset --yes
//!
//! # 다른 데이터베이스 지정
//! drinks-admin --db-url sqlite:///tmp/drinks.db seed
//! ```

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use drinks_cli::commands::{init_db, reset_db, seed_db, DbConfig};

#[derive(Parser, Debug)]
#[command(name = "drinks-admin")]
#[command(about = "Coffee shop drinks database administration", long_about = None)]
#[command(version)]
struct Cli {
    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// 데이터베이스 URL (기본: DATABASE_URL 또는 DATABASE_DIR/DATABASE_FILENAME)
    #[arg(long, global = true)]
    db_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// drinks 테이블 생성 (이미 있으면 유지)
    Init,

    /// drinks 테이블 삭제 후 재생성 (모든 데이터 삭제)
    Reset {
        /// 삭제 확인
        #[arg(long)]
        yes: bool,
    },

    /// 샘플 음료 추가
    Seed,
}

/// `--yes` 없이 reset을 실행하지 않도록 확인.
fn confirm_reset(yes: bool) -> anyhow::Result<()> {
    if yes {
        Ok(())
    } else {
        anyhow::bail!("reset deletes every drink; re-run with --yes to confirm")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::new(format!(
            "drinks_cli={0},drinks_api={0}",
            cli.log_level
        )))
        .init();

    let config = DbConfig { db_url: cli.db_url };

    let result = match cli.command {
        Commands::Init => init_db(&config).await,
        Commands::Reset { yes } => match confirm_reset(yes) {
            Ok(()) => reset_db(&config).await,
            Err(e) => Err(e),
        },
        Commands::Seed => seed_db(&config).await.map(|_| ()),
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    } else {
        info!("Done");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["drinks-admin", "init"]).unwrap();
        assert_eq!(cli.command, Commands::Init);
        assert_eq!(cli.log_level, "info");

        let cli = Cli::try_parse_from(["drinks-admin", "reset", "--yes"]).unwrap();
        assert_eq!(cli.command, Commands::Reset { yes: true });

        let cli = Cli::try_parse_from([
            "drinks-admin",
            "seed",
            "--db-url",
            "sqlite::memory:",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.command, Commands::Seed);
        assert_eq!(cli.db_url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["drinks-admin", "drop"]).is_err());
        assert!(Cli::try_parse_from(["drinks-admin"]).is_err());
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let cli = Cli::try_parse_from(["drinks-admin", "reset"]).unwrap();
        assert_eq!(cli.command, Commands::Reset { yes: false });

        assert!(confirm_reset(false).is_err());
        assert!(confirm_reset(true).is_ok());
    }
}
