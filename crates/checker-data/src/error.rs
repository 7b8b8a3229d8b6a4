//! 데이터 모듈 오류 타입.

use checker_core::CheckerError;
use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 데이터 가져오기 오류 (외부 소스)
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 잘못된 데이터 형식
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 직렬화/역직렬화 오류
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(_) => DataError::FetchError(err.to_string()),
            _ => DataError::ParseError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Serialization(err.to_string())
    }
}

impl From<DataError> for CheckerError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::FetchError(msg) => CheckerError::Network(msg),
            DataError::Io(e) => CheckerError::Io(e),
            other => CheckerError::Data(other.to_string()),
        }
    }
}

/// 데이터 작업을 위한 Result 타입.
pub type DataResult<T> = std::result::Result<T, DataError>;
