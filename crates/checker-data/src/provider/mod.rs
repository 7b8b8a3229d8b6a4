//! 가격 이력 Provider 모듈.
//!
//! 외부 소스에서 가격 봉 시퀀스를 가져오는 Provider들을 정의합니다.
//!
//! ## Yahoo Finance
//! - `YahooFinanceProvider`: 날짜 범위 또는 기간(range) 문자열로 조회
//!
//! ## CSV 파일
//! - `CsvPriceProvider`: `date,open,high,low,close[,volume]` 형식 파일 읽기
//! - `write_csv`: 같은 형식으로 저장 (`download` 명령에서 사용)

pub mod csv_file;
pub mod yahoo;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use checker_core::{FetchConfig, Interval, PriceTable};

use crate::error::{DataError, DataResult};

pub use csv_file::{write_csv, CsvPriceProvider};
pub use yahoo::YahooFinanceProvider;

/// 조회 구간.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchSpan {
    /// 날짜 범위. `end`가 없으면 오늘까지 조회합니다.
    Range {
        start: NaiveDate,
        end: Option<NaiveDate>,
    },
    /// Yahoo Finance 기간 문자열 (`5d`, `1mo`, `1y`, `max` 등)
    Period(String),
}

impl std::fmt::Display for FetchSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchSpan::Range { start, end: Some(end) } => write!(f, "{} ~ {}", start, end),
            FetchSpan::Range { start, end: None } => write!(f, "{} ~", start),
            FetchSpan::Period(period) => write!(f, "{}", period),
        }
    }
}

/// 가격 이력 조회 요청.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    /// 종목 심볼 (예: "BTC-USD", "AAPL")
    pub ticker: String,
    /// 샘플링 간격
    pub interval: Interval,
    /// 조회 구간
    pub span: FetchSpan,
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self {
            ticker: "BTC-USD".to_string(),
            interval: Interval::D1,
            span: FetchSpan::Range {
                start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
                end: None,
            },
        }
    }
}

impl FetchRequest {
    /// 날짜 범위 조회 요청을 생성합니다.
    pub fn range(
        ticker: impl Into<String>,
        interval: Interval,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            interval,
            span: FetchSpan::Range { start, end },
        }
    }

    /// 기간 문자열 조회 요청을 생성합니다.
    pub fn period(ticker: impl Into<String>, interval: Interval, period: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            interval,
            span: FetchSpan::Period(period.into()),
        }
    }

    /// 설정의 `[fetch]` 섹션에서 요청을 생성합니다.
    ///
    /// `period`가 있으면 날짜 범위보다 우선하며, 둘 다 없으면 전체 기간(`max`)을 조회합니다.
    pub fn from_config(config: &FetchConfig) -> DataResult<Self> {
        let interval = config
            .interval()
            .map_err(|e| DataError::InvalidData(e.to_string()))?;

        let span = match (&config.period, config.start) {
            (Some(period), _) => FetchSpan::Period(period.clone()),
            (None, Some(start)) => FetchSpan::Range {
                start,
                end: config.end,
            },
            (None, None) => FetchSpan::Period("max".to_string()),
        };

        let request = Self {
            ticker: config.ticker.clone(),
            interval,
            span,
        };
        request.validate()?;
        Ok(request)
    }

    /// 요청 유효성 검사.
    pub fn validate(&self) -> DataResult<()> {
        if self.ticker.trim().is_empty() {
            return Err(DataError::InvalidData("ticker가 비어 있습니다".to_string()));
        }
        match &self.span {
            FetchSpan::Range {
                start,
                end: Some(end),
            } if start > end => Err(DataError::InvalidData(format!(
                "시작 날짜({})가 종료 날짜({})보다 늦습니다",
                start, end
            ))),
            FetchSpan::Period(period) if period.trim().is_empty() => {
                Err(DataError::InvalidData("기간 문자열이 비어 있습니다".to_string()))
            }
            _ => Ok(()),
        }
    }
}

/// 가격 이력 Provider.
///
/// 하나의 종목에 대한 가격 봉 시퀀스를 조회합니다. 빈 결과나 일부만 채워진
/// 결과도 에러 없이 반환될 수 있으며, 호출 측은 이를 검증하지 않습니다.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Provider 이름 (로그용).
    fn name(&self) -> &'static str;

    /// 요청한 구간의 가격 테이블을 조회합니다.
    ///
    /// # Errors
    ///
    /// - `DataError::FetchError`: 외부 소스 호출 실패
    /// - `DataError::ParseError`: 응답/파일 파싱 실패
    /// - `DataError::InvalidData`: 잘못된 요청
    async fn fetch(&self, request: &FetchRequest) -> DataResult<PriceTable>;
}
