//! 캔들 패턴 분석 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 캔들 패턴 감지 (장악형, 도지, 반전형)
//! - 전방 윈도우 기반 패턴 성공 라벨링
//! - 패턴별 성공률 요약
//! - 대시보드용 차트 데이터
//!
//! # Re-exports
//!
//! - [`patterns`]: 패턴 감지와 결과 평가 (PatternDetector, OutcomeEvaluator)
//! - [`pipeline`]: 감지 → 평가 → 요약 실행 (PatternPipeline)

pub mod chart;
pub mod error;
pub mod patterns;
pub mod pipeline;
pub mod summary;

pub use chart::{default_color, ChartPoint, MarkerSeries, PatternChart};
pub use error::{AnalyticsError, AnalyticsResult};
pub use patterns::{OutcomeEvaluator, OutcomeParams, PatternDetector};
pub use pipeline::{PatternPipeline, PipelineOutput};
pub use summary::{PatternStats, PatternSummary};
