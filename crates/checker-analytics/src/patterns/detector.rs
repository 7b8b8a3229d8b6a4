//! 캔들 패턴 감지기.
//!
//! 각 봉과 직전 봉의 시가/종가만으로 다섯 가지 패턴을 판정합니다.
//! 패턴 플래그는 서로 독립적이라 한 봉이 여러 패턴에 동시에 해당할 수 있습니다.
//!
//! ## 판정 조건 (`[prev]`는 직전 봉)
//! - **강세 장악형**: `open[prev] > close[prev]`, `open < close`,
//!   `open < close[prev]`, `close > open[prev]`
//! - **약세 장악형**: 강세 장악형의 대칭
//! - **도지**: `|close - open| <= 0.001 * close`, `high - low > 2 * |close - open|`
//! - **강세 반전**: `close > open`, `low < open`, `high - close <= 0.5 * (close - open)`
//! - **약세 반전**: `open > close`, `high > open`, `low - close <= 0.5 * (open - close)`

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use checker_core::{PatternKind, PriceBar, PriceTable};

use crate::error::AnalyticsResult;

/// 도지 몸통 허용 비율 (종가 대비).
const DOJI_BODY_RATIO: Decimal = dec!(0.001);

/// 반전형 반대쪽 꼬리 허용 비율 (몸통 대비).
const REVERSAL_WICK_RATIO: Decimal = dec!(0.5);

/// 캔들 패턴 감지기.
#[derive(Debug, Clone)]
pub struct PatternDetector {
    kinds: Vec<PatternKind>,
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector {
    /// 모든 패턴을 감지하는 감지기를 생성합니다.
    pub fn new() -> Self {
        Self {
            kinds: PatternKind::ALL.to_vec(),
        }
    }

    /// 지정한 패턴만 감지하는 감지기를 생성합니다. 중복은 제거됩니다.
    pub fn with_kinds(kinds: impl IntoIterator<Item = PatternKind>) -> Self {
        let mut unique = Vec::new();
        for kind in kinds {
            if !unique.contains(&kind) {
                unique.push(kind);
            }
        }
        Self { kinds: unique }
    }

    /// 감지 대상 패턴.
    pub fn kinds(&self) -> &[PatternKind] {
        &self.kinds
    }

    /// 단일 봉이 패턴에 해당하는지 판정합니다.
    ///
    /// 2봉 패턴은 `prev`가 없으면 항상 `false`입니다.
    pub fn matches(kind: PatternKind, prev: Option<&PriceBar>, current: &PriceBar) -> bool {
        let (open, high, low, close) = (current.open, current.high, current.low, current.close);

        match kind {
            PatternKind::BullishEngulfing => prev.is_some_and(|p| {
                p.open > p.close && open < close && open < p.close && close > p.open
            }),
            PatternKind::BearishEngulfing => prev.is_some_and(|p| {
                p.open < p.close && open > close && open > p.close && close < p.open
            }),
            PatternKind::Doji => {
                let body = current.body_size();
                body <= DOJI_BODY_RATIO * close && current.range() > body * Decimal::TWO
            }
            PatternKind::BullishReversal => {
                close > open && low < open && high - close <= REVERSAL_WICK_RATIO * (close - open)
            }
            PatternKind::BearishReversal => {
                open > close && high > open && low - close <= REVERSAL_WICK_RATIO * (open - close)
            }
        }
    }

    /// 단일 봉에서 감지된 패턴 목록 (감지 대상 순서).
    pub fn detect_bar(&self, prev: Option<&PriceBar>, current: &PriceBar) -> Vec<PatternKind> {
        self.kinds
            .iter()
            .copied()
            .filter(|&kind| Self::matches(kind, prev, current))
            .collect()
    }

    /// 테이블 전체에 패턴 플래그 컬럼을 추가한 새 테이블을 반환합니다.
    ///
    /// 기존 패턴/성공 컬럼은 버리고 기본 가격 컬럼에서 다시 계산하므로
    /// 자신의 출력에 다시 적용해도 같은 결과가 나옵니다.
    pub fn detect(&self, table: &PriceTable) -> AnalyticsResult<PriceTable> {
        let mut output = table.base();
        let bars = table.bars();

        for &kind in &self.kinds {
            let column: Vec<bool> = bars
                .iter()
                .enumerate()
                .map(|(i, bar)| {
                    let prev = i.checked_sub(1).map(|p| &bars[p]);
                    Self::matches(kind, prev, bar)
                })
                .collect();

            debug!(
                ticker = table.ticker(),
                pattern = %kind,
                hits = column.iter().filter(|&&flag| flag).count(),
                "패턴 감지"
            );
            output.insert_pattern_column(kind, column)?;
        }

        debug!(
            ticker = table.ticker(),
            rows = bars.len(),
            kinds = self.kinds.len(),
            "패턴 감지 완료"
        );

        Ok(output)
    }
}
