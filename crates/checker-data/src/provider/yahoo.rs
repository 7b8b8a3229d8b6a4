//! Yahoo Finance 가격 이력 Provider.
//!
//! 날짜 범위 조회는 `get_quote_history_interval`, 기간 문자열 조회는
//! `get_quote_range`를 사용합니다. 종료 날짜는 배타적입니다.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::{debug, warn};
use yahoo_finance_api::{Quote, YahooConnector};

use checker_core::{PriceBar, PriceTable};

use super::{FetchRequest, FetchSpan, PriceHistoryProvider};
use crate::error::{DataError, DataResult};

/// Yahoo Finance Provider.
pub struct YahooFinanceProvider {
    connector: YahooConnector,
}

impl YahooFinanceProvider {
    /// 새 Provider를 생성합니다.
    pub fn new() -> DataResult<Self> {
        let connector = YahooConnector::new()
            .map_err(|e| DataError::FetchError(format!("Yahoo Finance 연결 실패: {}", e)))?;
        Ok(Self { connector })
    }
}

#[async_trait]
impl PriceHistoryProvider for YahooFinanceProvider {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    async fn fetch(&self, request: &FetchRequest) -> DataResult<PriceTable> {
        request.validate()?;

        let ticker = request.ticker.as_str();
        let interval = request.interval.to_yahoo_interval();

        if request.interval.is_intraday() {
            debug!(ticker = ticker, interval = interval, "장중 간격은 최근 구간만 제공됩니다");
        }

        let response = match &request.span {
            FetchSpan::Range { start, end } => {
                let end_date = end.unwrap_or_else(|| Utc::now().date_naive());
                let start_dt = naive_date_to_offset_datetime(*start)?;
                let end_dt = naive_date_to_offset_datetime(end_date)?;

                debug!(
                    ticker = ticker,
                    interval = interval,
                    start = %start,
                    end = %end_date,
                    "Yahoo Finance API 날짜 범위 호출"
                );

                self.connector
                    .get_quote_history_interval(ticker, start_dt, end_dt, interval)
                    .await
            }
            FetchSpan::Period(range) => {
                debug!(
                    ticker = ticker,
                    interval = interval,
                    range = %range,
                    "Yahoo Finance API 기간 호출"
                );

                self.connector
                    .get_quote_range(ticker, interval, range)
                    .await
            }
        }
        .map_err(|e| DataError::FetchError(format!("Yahoo Finance API 오류 ({}): {}", ticker, e)))?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::ParseError(format!("Quote 파싱 오류: {}", e)))?;

        let total = quotes.len();
        let bars: Vec<PriceBar> = quotes.iter().filter_map(quote_to_bar).collect();
        if bars.len() < total {
            warn!(
                ticker = ticker,
                skipped = total - bars.len(),
                "변환할 수 없는 Quote를 건너뜀"
            );
        }

        debug!(ticker = ticker, rows = bars.len(), "Yahoo Finance 가격 이력 수신");

        Ok(PriceTable::new(ticker, bars))
    }
}

/// Quote를 가격 봉으로 변환합니다. 유한하지 않은 가격이 있으면 `None`.
fn quote_to_bar(q: &Quote) -> Option<PriceBar> {
    bar_from_parts(
        q.timestamp,
        [q.open, q.high, q.low, q.close],
        Decimal::from(q.volume),
    )
}

fn bar_from_parts(timestamp: i64, [open, high, low, close]: [f64; 4], volume: Decimal) -> Option<PriceBar> {
    let timestamp = Utc.timestamp_opt(timestamp, 0).single()?;
    let bar = PriceBar::new(
        timestamp,
        Decimal::from_f64(open)?,
        Decimal::from_f64(high)?,
        Decimal::from_f64(low)?,
        Decimal::from_f64(close)?,
    );
    Some(bar.with_volume(volume))
}

/// NaiveDate를 OffsetDateTime(UTC 자정)으로 변환.
fn naive_date_to_offset_datetime(date: NaiveDate) -> DataResult<OffsetDateTime> {
    let month = time::Month::try_from(date.month() as u8)
        .map_err(|e| DataError::InvalidData(format!("잘못된 월 ({}): {}", date, e)))?;
    let day = time::Date::from_calendar_date(date.year(), month, date.day() as u8)
        .map_err(|e| DataError::InvalidData(format!("잘못된 날짜 ({}): {}", date, e)))?;
    Ok(day.midnight().assume_utc())
}
