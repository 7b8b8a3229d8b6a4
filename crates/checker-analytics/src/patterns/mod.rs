//! 캔들 패턴 감지와 결과 평가.
//!
//! - [`PatternDetector`]: 봉마다 패턴 플래그 컬럼을 계산
//! - [`OutcomeEvaluator`]: 감지된 봉의 전방 윈도우에서 목표 가격 변동 달성 여부를 라벨링

pub mod detector;
pub mod outcome;

pub use detector::PatternDetector;
pub use outcome::{OutcomeEvaluator, OutcomeParams};
