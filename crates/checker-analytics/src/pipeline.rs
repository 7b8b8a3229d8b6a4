//! 패턴 분석 파이프라인.
//!
//! 가격 테이블 → 패턴 감지 → 결과 평가 → 요약 순서로 실행합니다.
//! 각 단계는 이전 단계의 테이블만 입력으로 받습니다.

use tracing::info;

use checker_core::{pipeline_span, EvaluationConfig, PriceTable};

use crate::error::AnalyticsResult;
use crate::patterns::{OutcomeEvaluator, OutcomeParams, PatternDetector};
use crate::summary::PatternSummary;

/// 파이프라인 실행 결과.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// 패턴/성공 컬럼이 붙은 테이블
    pub table: PriceTable,
    /// 패턴별 성공률 요약
    pub summary: PatternSummary,
}

/// 패턴 분석 파이프라인.
#[derive(Debug, Clone, Default)]
pub struct PatternPipeline {
    detector: PatternDetector,
    evaluator: OutcomeEvaluator,
}

impl PatternPipeline {
    /// 새 파이프라인을 생성합니다.
    pub fn new(detector: PatternDetector, evaluator: OutcomeEvaluator) -> Self {
        Self {
            detector,
            evaluator,
        }
    }

    /// 설정의 `[evaluation]` 섹션으로 파이프라인을 생성합니다.
    pub fn from_config(config: &EvaluationConfig) -> AnalyticsResult<Self> {
        let detector = PatternDetector::with_kinds(config.pattern_kinds()?);
        let params = OutcomeParams::from_config(config)?;
        params.validate()?;
        Ok(Self::new(detector, OutcomeEvaluator::new(params)))
    }

    /// 패턴 감지기.
    pub fn detector(&self) -> &PatternDetector {
        &self.detector
    }

    /// 결과 평가기.
    pub fn evaluator(&self) -> &OutcomeEvaluator {
        &self.evaluator
    }

    /// 파이프라인을 실행합니다.
    pub fn run(&self, table: &PriceTable) -> AnalyticsResult<PipelineOutput> {
        let span = pipeline_span!("pattern_pipeline", table.ticker());
        let _guard = span.enter();

        let detected = self.detector.detect(table)?;
        let evaluated = self.evaluator.evaluate(&detected, self.detector.kinds())?;
        let summary = PatternSummary::from_table(&evaluated);

        info!(
            rows = evaluated.len(),
            patterns = summary.stats.len(),
            lookahead_days = self.evaluator.params().lookahead.num_days(),
            threshold = %self.evaluator.params().threshold,
            "패턴 분석 완료"
        );

        Ok(PipelineOutput {
            table: evaluated,
            summary,
        })
    }
}
