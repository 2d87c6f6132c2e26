//! # artpick-app
//!
//! ARTPICK 터미널 클라이언트 진입점.
//! 설정 로드, 로깅 초기화, 어댑터 조립 후 대화형 셸 실행.

mod command;
mod presenter;
mod shell;

use anyhow::Result;
use artpick_core::config_manager::ConfigManager;
use artpick_core::models::page::PageSize;
use artpick_network::http_client::HttpPageFetcher;
use artpick_selection::controller::{FetchOutcome, ViewController};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// ARTPICK 작품 선택 클라이언트
///
/// 페이지 단위로 작품을 조회하고, 페이지를 넘나들며 선택을 유지한다.
#[derive(Parser, Debug)]
#[command(name = "artpick")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 서버 URL 지정 (기본: 설정 파일의 server.base_url)
    #[arg(long, short = 's')]
    server: Option<String>,

    /// 페이지 크기 (10, 20, 30)
    #[arg(long, short = 'p')]
    page_size: Option<u32>,

    /// 설정 파일 경로 (기본: 플랫폼별 설정 디렉토리)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 표 출력과 섞이지 않도록 로그는 stderr
    let log_filter = format!(
        "artpick={0},artpick_core={0},artpick_network={0},artpick_selection={0}",
        args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_manager = match args.config {
        Some(path) => ConfigManager::with_path(path)?,
        None => ConfigManager::new()?,
    };
    info!("설정 파일: {}", config_manager.config_path().display());

    let mut config = config_manager.get();
    if let Some(server) = args.server {
        config.server.base_url = server;
    }
    let page_size = match args.page_size {
        Some(rows) => PageSize::try_from(rows)?,
        None => config.view.default_page_size,
    };

    let fetcher = HttpPageFetcher::new(&config.server.base_url, config.request_timeout())?
        .with_fields(config.server.fields.clone());
    info!(
        "ARTPICK 시작: server={}, page_size={page_size}",
        config.server.base_url
    );

    let controller = ViewController::new(Arc::new(fetcher), page_size);
    if controller.mount().await == FetchOutcome::Failed {
        // 셸은 계속 띄운다: 상태 줄에 실패가 표시되고 다시 이동하면 재시도
        warn!("첫 페이지 조회 실패");
    }

    shell::run(&controller).await?;

    controller.unmount();
    info!("ARTPICK 종료");
    Ok(())
}
