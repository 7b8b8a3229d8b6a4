//! CSV 파일 가격 이력 Provider.
//!
//! `date,open,high,low,close[,volume]` 헤더를 가진 파일을 읽고 씁니다.
//! Yahoo Finance에서 내려받은 파일의 대문자 헤더(`Date,Open,...`)도 허용하며,
//! 알 수 없는 컬럼(`Adj Close` 등)은 무시합니다.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use checker_core::{PriceBar, PriceTable};

use super::{FetchRequest, FetchSpan, PriceHistoryProvider};
use crate::error::{DataError, DataResult};

/// CSV 한 행.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Date", alias = "Datetime", alias = "timestamp")]
    date: String,
    #[serde(alias = "Open")]
    open: Decimal,
    #[serde(alias = "High")]
    high: Decimal,
    #[serde(alias = "Low")]
    low: Decimal,
    #[serde(alias = "Close")]
    close: Decimal,
    #[serde(default, alias = "Volume")]
    volume: Option<Decimal>,
}

/// 로컬 CSV 파일에서 가격 이력을 읽는 Provider.
#[derive(Debug, Clone)]
pub struct CsvPriceProvider {
    path: PathBuf,
}

impl CsvPriceProvider {
    /// 파일 경로로 Provider를 생성합니다.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 파일 경로.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 임의의 reader에서 가격 봉 목록을 읽습니다.
    ///
    /// 행 순서는 유지되며 정렬과 중복 제거는 [`PriceTable::new`]가 담당합니다.
    pub fn read_bars<R: Read>(reader: R) -> DataResult<Vec<PriceBar>> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut bars = Vec::new();
        for (line, result) in reader.deserialize::<CsvRow>().enumerate() {
            let row = result?;
            let timestamp = parse_timestamp(&row.date).map_err(|e| {
                DataError::ParseError(format!("{}번째 행: {}", line + 1, e))
            })?;

            let mut bar = PriceBar::new(timestamp, row.open, row.high, row.low, row.close);
            if let Some(volume) = row.volume {
                bar = bar.with_volume(volume);
            }
            bars.push(bar);
        }

        Ok(bars)
    }

    /// 임의의 reader에서 가격 테이블을 읽습니다.
    pub fn read_table<R: Read>(ticker: impl Into<String>, reader: R) -> DataResult<PriceTable> {
        Ok(PriceTable::new(ticker, Self::read_bars(reader)?))
    }
}

#[async_trait]
impl PriceHistoryProvider for CsvPriceProvider {
    fn name(&self) -> &'static str {
        "csv"
    }

    /// 파일 전체를 읽은 뒤 날짜 범위로 거릅니다.
    ///
    /// 기간 문자열(`FetchSpan::Period`)은 파일 전체를 의미합니다.
    async fn fetch(&self, request: &FetchRequest) -> DataResult<PriceTable> {
        request.validate()?;

        let content = tokio::fs::read(&self.path).await.map_err(|e| {
            DataError::FetchError(format!("{} 읽기 실패: {}", self.path.display(), e))
        })?;
        let mut bars = Self::read_bars(content.as_slice())?;
        let total = bars.len();

        if let FetchSpan::Range { start, end } = &request.span {
            let start = midnight_utc(*start);
            let end = end.map(midnight_utc);
            bars.retain(|b| b.timestamp >= start && end.map_or(true, |end| b.timestamp < end));
        }

        debug!(
            path = %self.path.display(),
            total = total,
            kept = bars.len(),
            span = %request.span,
            "CSV 가격 이력 로드"
        );

        Ok(PriceTable::new(request.ticker.clone(), bars))
    }
}

/// 가격 테이블의 기본 가격 컬럼을 CSV로 씁니다.
pub fn write_csv_to<W: Write>(writer: W, table: &PriceTable) -> DataResult<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["date", "open", "high", "low", "close", "volume"])?;

    for bar in table.bars() {
        writer.write_record([
            format_timestamp(bar.timestamp),
            bar.open.to_string(),
            bar.high.to_string(),
            bar.low.to_string(),
            bar.close.to_string(),
            bar.volume.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(table.len())
}

/// 가격 테이블을 CSV 파일로 저장합니다. 상위 디렉토리가 없으면 생성합니다.
pub fn write_csv(path: &Path, table: &PriceTable) -> DataResult<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let written = write_csv_to(BufWriter::new(file), table)?;

    info!(
        ticker = table.ticker(),
        rows = written,
        path = %path.display(),
        "가격 이력 CSV 저장"
    );
    Ok(written)
}

/// 날짜 문자열 파싱.
///
/// 허용 형식: RFC 3339, `YYYY-MM-DD HH:MM:SS±HH:MM`, `YYYY-MM-DD HH:MM:SS` (UTC),
/// `YYYY-MM-DD` (UTC 자정).
pub fn parse_timestamp(s: &str) -> DataResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%:z") {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(midnight_utc)
        .map_err(|_| DataError::ParseError(format!("알 수 없는 날짜 형식: {}", s)))
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    if ts.time() == NaiveTime::MIN {
        ts.format("%Y-%m-%d").to_string()
    } else {
        ts.to_rfc3339()
    }
}
