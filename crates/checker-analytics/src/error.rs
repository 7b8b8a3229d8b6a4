//! 분석 모듈 에러 타입.

use checker_core::CheckerError;
use thiserror::Error;

/// 패턴 분석 에러.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),

    /// 테이블에 필요한 컬럼이 없음
    #[error("컬럼이 없습니다: {0}")]
    MissingColumn(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 테이블 조작 에러
    #[error(transparent)]
    Core(#[from] CheckerError),
}

impl From<serde_json::Error> for AnalyticsError {
    fn from(err: serde_json::Error) -> Self {
        AnalyticsError::Serialization(err.to_string())
    }
}

/// 분석 작업을 위한 Result 타입.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
