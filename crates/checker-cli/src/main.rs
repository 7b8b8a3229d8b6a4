//! 캔들스틱 패턴 검사기 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 비트코인 일봉 패턴 스캔 (2020-01-01부터)
//! checker scan -s BTC-USD -f 2020-01-01
//!
//! # 최근 1년, 3% 기준, 10일 관찰
//! checker scan -s AAPL -p 1y --threshold 0.03 --lookahead 10
//!
//! # 다운로드 후 오프라인 스캔
//! checker download -s BTC-USD -f 2020-01-01 -o data/btc.csv
//! checker scan -s BTC-USD --csv data/btc.csv --json
//!
//! # 지원 패턴 목록
//! checker patterns
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, error};

use checker_cli::commands::download::run_download;
use checker_cli::commands::patterns::print_patterns;
use checker_cli::commands::scan::{run_scan, ScanOptions};
use checker_cli::commands::{EvaluationArgs, FetchArgs};
use checker_core::{init_logging, AppConfig, LogConfig};

#[derive(Parser)]
#[command(name = "checker")]
#[command(about = "Candlestick pattern checker - 패턴 감지 및 성공률 분석", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로 (기본: config/checker.toml, 없으면 기본값)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 디버그 로그 출력
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 패턴 감지 및 성공률 요약
    Scan {
        #[command(flatten)]
        fetch: FetchArgs,

        #[command(flatten)]
        evaluation: EvaluationArgs,

        /// Yahoo Finance 대신 CSV 파일에서 읽기
        #[arg(long)]
        csv: Option<PathBuf>,

        /// 요약을 JSON으로 출력
        #[arg(long)]
        json: bool,

        /// 차트 데이터 출력 경로 (설정의 chart.output 대체)
        #[arg(long)]
        chart: Option<String>,

        /// 차트 제목
        #[arg(long)]
        title: Option<String>,

        /// 차트 데이터 파일을 만들지 않음
        #[arg(long)]
        no_chart: bool,
    },

    /// 가격 이력을 CSV로 다운로드
    Download {
        #[command(flatten)]
        fetch: FetchArgs,

        /// 출력 파일 경로 (기본: data/{ticker}_{interval}_{span}.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 지원 패턴 목록 보기
    Patterns,
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(Some(path.as_path()))
            .with_context(|| format!("설정 파일 로드 실패: {}", path.display())),
        None => AppConfig::load_default().context("기본 설정 로드 실패"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;

    let mut log_config = LogConfig::from_settings(&config.logging);
    if cli.verbose {
        log_config.level = "debug".to_string();
    }
    init_logging(log_config).map_err(|e| anyhow!("로깅 초기화 실패: {}", e))?;

    let result = match cli.command {
        Commands::Scan {
            fetch,
            evaluation,
            csv,
            json,
            chart,
            title,
            no_chart,
        } => {
            fetch.apply(&mut config.fetch)?;
            evaluation.apply(&mut config.evaluation)?;
            if let Some(chart) = chart {
                config.chart.output = chart;
            }
            if title.is_some() {
                config.chart.title = title;
            }
            config.validate()?;
            debug!(?config, "설정 적용");

            let options = ScanOptions {
                csv,
                json,
                write_chart: !no_chart,
            };
            run_scan(&config, &options).await
        }
        Commands::Download { fetch, output } => {
            fetch.apply(&mut config.fetch)?;
            config.validate()?;
            run_download(&config, output).await
        }
        Commands::Patterns => {
            print_patterns();
            Ok(())
        }
    };

    if let Err(e) = &result {
        error!("명령 실행 실패: {:#}", e);
    }
    result
}
