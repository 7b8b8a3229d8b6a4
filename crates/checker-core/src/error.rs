//! 패턴 검사기의 에러 타입.
//!
//! 핵심 파이프라인은 잘 구성된 숫자 입력을 가정하므로, 여기 정의된 에러는
//! 주로 설정 로드와 테이블 구성 단계에서 발생합니다.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum CheckerError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 데이터 에러
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 네트워크 에러
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(#[from] std::io::Error),
}

/// 핵심 작업을 위한 Result 타입.
pub type CheckerResult<T> = Result<T, CheckerError>;

impl From<serde_json::Error> for CheckerError {
    fn from(err: serde_json::Error) -> Self {
        CheckerError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for CheckerError {
    fn from(err: config::ConfigError) -> Self {
        CheckerError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CheckerError::Config("threshold".to_string());
        assert_eq!(err.to_string(), "설정 에러: threshold");
    }
}
