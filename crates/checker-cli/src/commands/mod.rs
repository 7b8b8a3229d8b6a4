//! CLI 명령어 구현 모듈.

pub mod download;
pub mod patterns;
pub mod scan;

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;

use checker_core::{EvaluationConfig, FetchConfig, PriceTable};
use checker_data::{FetchRequest, PriceHistoryProvider};

/// 가격 이력 조회 옵션 (설정 파일 값을 덮어씀).
#[derive(Debug, Clone, Default, Args)]
pub struct FetchArgs {
    /// 종목 심볼 (예: BTC-USD, AAPL, 005930.KS)
    #[arg(short = 's', long)]
    pub ticker: Option<String>,

    /// 샘플링 간격 (1d, 1wk, 1mo, 1h, ...)
    #[arg(short, long)]
    pub interval: Option<String>,

    /// 시작 날짜 (YYYY-MM-DD)
    #[arg(short = 'f', long)]
    pub from: Option<String>,

    /// 종료 날짜 (YYYY-MM-DD, 배타적)
    #[arg(short = 't', long)]
    pub to: Option<String>,

    /// 조회 기간 (1mo, 1y, 5y, max 등). 날짜 범위 대신 사용
    #[arg(short, long, conflicts_with_all = ["from", "to"])]
    pub period: Option<String>,
}

impl FetchArgs {
    /// 지정된 옵션을 설정에 반영합니다.
    pub fn apply(&self, config: &mut FetchConfig) -> Result<()> {
        if let Some(ticker) = &self.ticker {
            config.ticker = ticker.to_uppercase();
        }
        if let Some(interval) = &self.interval {
            config.interval = interval.clone();
        }
        if let Some(from) = &self.from {
            config.start = Some(parse_date(from)?);
            config.period = None;
        }
        if let Some(to) = &self.to {
            config.end = Some(parse_date(to)?);
            config.period = None;
        }
        if let Some(period) = &self.period {
            config.period = Some(period.clone());
        }
        Ok(())
    }
}

/// 패턴 평가 옵션 (설정 파일 값을 덮어씀).
#[derive(Debug, Clone, Default, Args)]
pub struct EvaluationArgs {
    /// 전방 관찰 기간 (일)
    #[arg(long)]
    pub lookahead: Option<i64>,

    /// 성공 판정 변동률 (0.05 = 5%)
    #[arg(long)]
    pub threshold: Option<String>,

    /// 평가할 패턴 (쉼표로 구분, 기본: 전체)
    #[arg(long = "pattern", value_delimiter = ',')]
    pub patterns: Vec<String>,
}

impl EvaluationArgs {
    /// 지정된 옵션을 설정에 반영합니다.
    pub fn apply(&self, config: &mut EvaluationConfig) -> Result<()> {
        if let Some(days) = self.lookahead {
            config.lookahead_days = days;
        }
        if let Some(threshold) = &self.threshold {
            config.threshold = Decimal::from_str(threshold)
                .with_context(|| format!("Invalid threshold: {}", threshold))?;
        }
        if !self.patterns.is_empty() {
            config.patterns = self.patterns.clone();
        }
        Ok(())
    }
}

/// 날짜 문자열 파싱 (YYYY-MM-DD)
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format: {}. Expected YYYY-MM-DD", s))
}

/// 스피너를 표시하며 가격 이력을 조회합니다.
pub async fn fetch_with_spinner(
    provider: &dyn PriceHistoryProvider,
    request: &FetchRequest,
) -> Result<PriceTable> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!(
        "Fetching {} ({}, {}) from {}...",
        request.ticker,
        request.interval,
        request.span,
        provider.name()
    ));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = provider.fetch(request).await;
    pb.finish_and_clear();

    result.with_context(|| format!("{} 가격 이력 조회 실패", request.ticker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fetch_args_apply() {
        let mut config = FetchConfig::default();
        let args = FetchArgs {
            ticker: Some("aapl".to_string()),
            from: Some("2023-01-01".to_string()),
            to: Some("2023-06-30".to_string()),
            ..Default::default()
        };
        args.apply(&mut config).unwrap();

        assert_eq!(config.ticker, "AAPL");
        assert_eq!(config.start, NaiveDate::from_ymd_opt(2023, 1, 1));
        assert_eq!(config.end, NaiveDate::from_ymd_opt(2023, 6, 30));
        assert_eq!(config.interval, "1d");
    }

    #[test]
    fn test_date_flags_override_config_period() {
        let mut config = FetchConfig {
            period: Some("1y".to_string()),
            ..Default::default()
        };
        let args = FetchArgs {
            to: Some("2023-06-30".to_string()),
            ..Default::default()
        };
        args.apply(&mut config).unwrap();

        assert_eq!(config.period, None);
        assert_eq!(config.end, NaiveDate::from_ymd_opt(2023, 6, 30));
    }

    #[test]
    fn test_fetch_args_bad_date() {
        let args = FetchArgs {
            from: Some("2023/01/01".to_string()),
            ..Default::default()
        };
        assert!(args.apply(&mut FetchConfig::default()).is_err());
    }

    #[test]
    fn test_evaluation_args_apply() {
        let mut config = EvaluationConfig::default();
        let args = EvaluationArgs {
            lookahead: Some(10),
            threshold: Some("0.03".to_string()),
            patterns: vec!["doji".to_string()],
        };
        args.apply(&mut config).unwrap();

        assert_eq!(config.lookahead_days, 10);
        assert_eq!(config.threshold, dec!(0.03));
        assert_eq!(config.patterns, vec!["doji".to_string()]);
    }
}
