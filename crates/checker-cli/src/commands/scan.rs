//! 패턴 스캔 명령어.
//!
//! 가격 이력 조회 → 패턴 감지/평가 → 요약 출력 → 차트 데이터 저장.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use checker_analytics::{PatternChart, PatternPipeline, PipelineOutput};
use checker_core::{AppConfig, ChartConfig, PriceTable};
use checker_data::{CsvPriceProvider, FetchRequest, PriceHistoryProvider, YahooFinanceProvider};

use super::fetch_with_spinner;

/// 스캔 옵션.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Yahoo Finance 대신 읽을 CSV 파일
    pub csv: Option<PathBuf>,
    /// 요약을 JSON으로 출력
    pub json: bool,
    /// 차트 데이터 파일 생성 여부
    pub write_chart: bool,
}

/// 스캔 실행.
pub async fn run_scan(config: &AppConfig, options: &ScanOptions) -> Result<()> {
    let request = FetchRequest::from_config(&config.fetch)?;

    let table = match &options.csv {
        Some(path) => {
            let provider = CsvPriceProvider::new(path);
            provider
                .fetch(&request)
                .await
                .with_context(|| format!("CSV 읽기 실패: {}", path.display()))?
        }
        None => {
            let provider = YahooFinanceProvider::new()?;
            fetch_with_spinner(&provider, &request).await?
        }
    };

    if table.is_empty() {
        warn!(ticker = %request.ticker, span = %request.span, "조회된 가격 데이터가 없습니다");
    }

    let output = scan_table(config, &table)?;

    if options.json {
        println!("{}", output.summary.to_json()?);
    } else {
        print!("{}", output.summary);
    }

    if options.write_chart {
        let path = PathBuf::from(&config.chart.output);
        let markers = write_chart(&output, &config.chart, &path)?;
        println!("Chart data saved to {} ({} markers)", path.display(), markers);
    }

    Ok(())
}

/// 이미 로드된 테이블에 대해 패턴 파이프라인을 실행합니다.
pub fn scan_table(config: &AppConfig, table: &PriceTable) -> Result<PipelineOutput> {
    let pipeline = PatternPipeline::from_config(&config.evaluation)?;
    let output = pipeline.run(table)?;
    Ok(output)
}

/// 파이프라인 결과로 차트 JSON을 저장하고 마커 수를 반환합니다.
pub fn write_chart(output: &PipelineOutput, chart: &ChartConfig, path: &Path) -> Result<usize> {
    let kinds: Vec<_> = output.table.pattern_kinds().collect();
    let mut data = PatternChart::from_table(&output.table, &kinds)?;
    if let Some(title) = &chart.title {
        data = data.with_title(title.clone());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("디렉토리 생성 실패: {}", parent.display()))?;
    }
    fs::write(path, data.to_json()?)
        .with_context(|| format!("차트 저장 실패: {}", path.display()))?;

    info!(path = %path.display(), markers = data.marker_count(), "차트 데이터 저장");
    Ok(data.marker_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use checker_core::{PatternKind, PriceBar};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn bar(day: i64, open: Decimal, high: Decimal, low: Decimal, close: Decimal) -> PriceBar {
        let ts = Utc.timestamp_opt(1_704_067_200 + day * 86_400, 0).unwrap();
        PriceBar::new(ts, open, high, low, close)
    }

    fn engulfing_table() -> PriceTable {
        PriceTable::new(
            "TEST",
            vec![
                bar(0, dec!(10), dec!(11), dec!(9), dec!(9.5)),
                bar(1, dec!(9), dec!(12), dec!(8.5), dec!(11)),
                bar(2, dec!(11), dec!(12.5), dec!(10.5), dec!(12)),
            ],
        )
    }

    #[test]
    fn test_scan_table_uses_config_patterns() {
        let mut config = AppConfig::default();
        config.evaluation.patterns = vec!["bullish_engulfing".to_string()];
        config.evaluation.threshold = dec!(0.05);

        let output = scan_table(&config, &engulfing_table()).unwrap();

        assert_eq!(output.summary.stats.len(), 1);
        let stats = output.summary.get(PatternKind::BullishEngulfing).unwrap();
        assert_eq!(stats.occurrences, 1);
        // 11 → 12 (+9.09%)
        assert_eq!(stats.successes, 1);
    }

    #[test]
    fn test_write_chart_with_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("chart.json");
        let chart = ChartConfig {
            output: path.display().to_string(),
            title: Some("My Chart".to_string()),
        };

        let output = scan_table(&AppConfig::default(), &engulfing_table()).unwrap();
        let markers = write_chart(&output, &chart, &path).unwrap();

        let json = fs::read_to_string(&path).unwrap();
        let restored: PatternChart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.title, "My Chart");
        assert_eq!(restored.markers.len(), PatternKind::ALL.len());
        assert_eq!(restored.marker_count(), markers);
        assert!(markers >= 1);
    }
}
