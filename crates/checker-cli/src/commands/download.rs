//! 가격 이력 다운로드 명령어.
//!
//! Yahoo Finance에서 OHLC 데이터를 받아 CSV로 저장합니다.
//! 저장된 파일은 `scan --csv`로 오프라인 분석에 사용할 수 있습니다.

use std::path::PathBuf;

use anyhow::Result;

use checker_core::AppConfig;
use checker_data::{write_csv, FetchRequest, FetchSpan, YahooFinanceProvider};

use super::fetch_with_spinner;

/// 다운로드 실행.
pub async fn run_download(config: &AppConfig, output: Option<PathBuf>) -> Result<()> {
    let request = FetchRequest::from_config(&config.fetch)?;
    let provider = YahooFinanceProvider::new()?;

    let table = fetch_with_spinner(&provider, &request).await?;
    let path = output.unwrap_or_else(|| default_output_path(&request));
    let rows = write_csv(&path, &table)?;

    println!(
        "Downloaded {} bars for {} ({}) to {}",
        rows,
        request.ticker,
        request.span,
        path.display()
    );
    Ok(())
}

/// 기본 출력 경로: `data/{ticker}_{interval}_{span}.csv`
pub fn default_output_path(request: &FetchRequest) -> PathBuf {
    let span = match &request.span {
        FetchSpan::Range { start, end: Some(end) } => {
            format!("{}_{}", start.format("%Y%m%d"), end.format("%Y%m%d"))
        }
        FetchSpan::Range { start, end: None } => format!("{}", start.format("%Y%m%d")),
        FetchSpan::Period(period) => period.clone(),
    };
    let ticker = request.ticker.replace(['/', '\\'], "_");

    PathBuf::from("data").join(format!("{}_{}_{}.csv", ticker, request.interval, span))
}
