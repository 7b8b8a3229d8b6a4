//! 설정 관리.
//!
//! 설정 파일(TOML, 선택)과 `CHECKER__` 접두사 환경 변수에서 애플리케이션 설정을
//! 로드합니다. 모든 섹션에 기본값이 있어 설정 파일 없이도 실행됩니다.

use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::PatternKind;
use crate::error::{CheckerError, CheckerResult};
use crate::types::Interval;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 가격 이력 조회 설정
    #[serde(default)]
    pub fetch: FetchConfig,
    /// 패턴 결과 평가 설정
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    /// 차트 출력 설정
    #[serde(default)]
    pub chart: ChartConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// 가격 이력 조회 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// 종목 심볼 (Yahoo Finance 형식, 예: "BTC-USD", "AAPL", "005930.KS")
    pub ticker: String,
    /// 샘플링 간격 (1d, 1wk, 1h, ...)
    pub interval: String,
    /// 시작 날짜 (YYYY-MM-DD)
    #[serde(default)]
    pub start: Option<NaiveDate>,
    /// 종료 날짜 (YYYY-MM-DD, 없으면 오늘)
    #[serde(default)]
    pub end: Option<NaiveDate>,
    /// 조회 기간 (1mo, 1y, max 등). 지정하면 날짜 범위보다 우선합니다.
    #[serde(default)]
    pub period: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            ticker: "BTC-USD".to_string(),
            interval: "1d".to_string(),
            start: NaiveDate::from_ymd_opt(2020, 1, 1),
            end: None,
            period: None,
        }
    }
}

impl FetchConfig {
    /// 간격 문자열을 파싱합니다.
    pub fn interval(&self) -> CheckerResult<Interval> {
        Interval::from_str(&self.interval).map_err(CheckerError::Config)
    }
}

/// 전방 관찰 기간 상한 (일).
pub const MAX_LOOKAHEAD_DAYS: i64 = 36_500;

/// 기본 성공 판정 변동률 (50%).
pub const DEFAULT_THRESHOLD: Decimal = dec!(0.5);

/// 패턴 결과 평가 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// 전방 관찰 기간 (달력 기준 일수)
    pub lookahead_days: i64,
    /// 성공으로 판정할 최소 가격 변동 비율 (0.5 = 50%)
    pub threshold: Decimal,
    /// 평가할 패턴 목록 (비어 있으면 전체)
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            lookahead_days: 5,
            threshold: DEFAULT_THRESHOLD,
            patterns: Vec::new(),
        }
    }
}

impl EvaluationConfig {
    /// 전방 관찰 기간.
    ///
    /// 음수이거나 `MAX_LOOKAHEAD_DAYS`를 넘으면 `CheckerError::Config`.
    pub fn lookahead(&self) -> CheckerResult<chrono::Duration> {
        if !(0..=MAX_LOOKAHEAD_DAYS).contains(&self.lookahead_days) {
            return Err(CheckerError::Config(format!(
                "lookahead_days는 0 이상 {} 이하여야 합니다: {}",
                MAX_LOOKAHEAD_DAYS, self.lookahead_days
            )));
        }
        chrono::Duration::try_days(self.lookahead_days).ok_or_else(|| {
            CheckerError::Config(format!(
                "lookahead_days 범위 초과: {}",
                self.lookahead_days
            ))
        })
    }

    /// 패턴 이름 목록을 파싱합니다. 비어 있으면 전체 패턴을 반환합니다.
    pub fn pattern_kinds(&self) -> CheckerResult<Vec<PatternKind>> {
        if self.patterns.is_empty() {
            return Ok(PatternKind::ALL.to_vec());
        }
        self.patterns
            .iter()
            .map(|name| PatternKind::from_str(name).map_err(CheckerError::Config))
            .collect()
    }
}

/// 차트 출력 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartConfig {
    /// 차트 JSON 출력 경로
    pub output: String,
    /// 차트 제목 (없으면 종목 심볼 사용)
    #[serde(default)]
    pub title: Option<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output: "charts/patterns.json".to_string(),
            title: None,
        }
    }
}

impl AppConfig {
    /// 설정 파일(선택)과 환경 변수에서 설정을 로드합니다.
    pub fn load(path: Option<&Path>) -> CheckerResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        // 환경 변수로 오버라이드 (예: CHECKER__FETCH__TICKER=AAPL)
        builder = builder.add_source(
            config::Environment::with_prefix("CHECKER")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다. 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load_default() -> CheckerResult<Self> {
        let path = Path::new("config/checker.toml");
        Self::load(path.exists().then_some(path))
    }

    /// 설정 유효성 검사.
    pub fn validate(&self) -> CheckerResult<()> {
        if self.fetch.ticker.trim().is_empty() {
            return Err(CheckerError::Config("ticker가 비어 있습니다".to_string()));
        }
        self.fetch.interval()?;

        if let (Some(start), Some(end)) = (self.fetch.start, self.fetch.end) {
            if start > end {
                return Err(CheckerError::Config(format!(
                    "시작 날짜({})가 종료 날짜({})보다 늦습니다",
                    start, end
                )));
            }
        }

        self.evaluation.lookahead()?;
        if self.evaluation.threshold.is_sign_negative() {
            return Err(CheckerError::Config(format!(
                "threshold는 0 이상이어야 합니다: {}",
                self.evaluation.threshold
            )));
        }
        self.evaluation.pattern_kinds()?;

        Ok(())
    }
}
