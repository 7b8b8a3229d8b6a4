//! 가격 이력 데이터 소스.
//!
//! 이 crate는 다음을 제공합니다:
//! - 공통 조회 인터페이스 ([`PriceHistoryProvider`])
//! - Yahoo Finance 일봉/분봉 조회
//! - 로컬 CSV 파일 읽기/쓰기

pub mod error;
pub mod provider;

pub use error::{DataError, DataResult};
pub use provider::{
    write_csv, CsvPriceProvider, FetchRequest, FetchSpan, PriceHistoryProvider,
    YahooFinanceProvider,
};
