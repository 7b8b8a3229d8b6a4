//! 패턴 결과 평가.
//!
//! 패턴이 감지된 봉마다 `[t_i, t_i + lookahead]` 전방 윈도우(양끝 포함)의
//! 종가를 살펴 목표 변동률(`threshold`) 달성 여부를 라벨링합니다.
//!
//! - 강세 패턴: `(max(close) - c_i) / c_i >= threshold`
//! - 약세 패턴: `(c_i - min(close)) / c_i >= threshold`
//! - 중립 패턴(도지): 성공 기준이 없으므로 항상 `false`
//!
//! 테이블 끝에 가까운 봉은 윈도우가 짧아지며, 남은 봉만으로 평가합니다.

use chrono::Duration;
use rust_decimal::Decimal;
use tracing::debug;

use checker_core::{
    EvaluationConfig, PatternBias, PatternKind, PriceBar, PriceTable, Ratio, DEFAULT_THRESHOLD,
    MAX_LOOKAHEAD_DAYS,
};

use crate::error::{AnalyticsError, AnalyticsResult};

/// 결과 평가 파라미터.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeParams {
    /// 전방 관찰 기간 (달력 시간)
    pub lookahead: Duration,
    /// 성공으로 판정할 최소 변동 비율 (0.5 = 50%)
    pub threshold: Ratio,
}

impl Default for OutcomeParams {
    fn default() -> Self {
        Self {
            lookahead: Duration::days(5),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl OutcomeParams {
    /// 새 파라미터를 생성합니다.
    pub fn new(lookahead: Duration, threshold: Ratio) -> Self {
        Self {
            lookahead,
            threshold,
        }
    }

    /// 설정의 `[evaluation]` 섹션에서 생성합니다.
    pub fn from_config(config: &EvaluationConfig) -> AnalyticsResult<Self> {
        Ok(Self::new(config.lookahead()?, config.threshold))
    }

    /// 파라미터 유효성 검사.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.lookahead < Duration::zero() || self.lookahead.num_days() > MAX_LOOKAHEAD_DAYS {
            return Err(AnalyticsError::InvalidParameter(format!(
                "lookahead는 0 이상 {}일 이하여야 합니다: {}",
                MAX_LOOKAHEAD_DAYS, self.lookahead
            )));
        }
        if self.threshold.is_sign_negative() && !self.threshold.is_zero() {
            return Err(AnalyticsError::InvalidParameter(format!(
                "threshold는 0 이상이어야 합니다: {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// 패턴 결과 평가기.
#[derive(Debug, Clone, Default)]
pub struct OutcomeEvaluator {
    params: OutcomeParams,
}

impl OutcomeEvaluator {
    /// 새 평가기를 생성합니다.
    pub fn new(params: OutcomeParams) -> Self {
        Self { params }
    }

    /// 평가 파라미터.
    pub fn params(&self) -> &OutcomeParams {
        &self.params
    }

    /// 패턴 방향으로의 최대 전방 변동률.
    ///
    /// 중립 패턴이거나 기준 종가가 0이면 `None`을 반환합니다.
    pub fn forward_move(window: &[PriceBar], close: Decimal, bias: PatternBias) -> Option<Ratio> {
        if close.is_zero() {
            return None;
        }
        let closes = window.iter().map(|b| b.close);
        match bias {
            PatternBias::Bullish => closes.max().map(|max| (max - close) / close),
            PatternBias::Bearish => closes.min().map(|min| (close - min) / close),
            PatternBias::Neutral => None,
        }
    }

    /// `index` 행의 패턴이 성공했는지 판정합니다. 플래그 여부는 확인하지 않습니다.
    pub fn is_success(&self, table: &PriceTable, index: usize, kind: PatternKind) -> bool {
        let Some(bar) = table.bars().get(index) else {
            return false;
        };
        let window = table.forward_window(index, self.params.lookahead);

        Self::forward_move(window, bar.close, kind.bias())
            .is_some_and(|change| change >= self.params.threshold)
    }

    /// 지정한 패턴마다 성공 라벨 컬럼을 추가한 새 테이블을 반환합니다.
    ///
    /// # Errors
    ///
    /// - `AnalyticsError::InvalidParameter`: 음수 lookahead 또는 threshold
    /// - `AnalyticsError::MissingColumn`: 패턴 플래그 컬럼이 없는 패턴을 평가하려는 경우
    pub fn evaluate(
        &self,
        table: &PriceTable,
        kinds: &[PatternKind],
    ) -> AnalyticsResult<PriceTable> {
        self.params.validate()?;

        let mut output = table.clone();
        for &kind in kinds {
            let flags = table
                .pattern_column(kind)
                .ok_or_else(|| AnalyticsError::MissingColumn(kind.column_name().to_string()))?;

            let successes: Vec<bool> = flags
                .iter()
                .enumerate()
                .map(|(i, &flagged)| flagged && self.is_success(table, i, kind))
                .collect();

            debug!(
                ticker = table.ticker(),
                pattern = %kind,
                occurrences = flags.iter().filter(|&&f| f).count(),
                successes = successes.iter().filter(|&&s| s).count(),
                "패턴 결과 평가"
            );
            output.insert_success_column(kind, successes)?;
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn table_with_closes(closes: &[Decimal]) -> PriceTable {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(day, &close)| {
                let ts = Utc.timestamp_opt(1_704_067_200 + day as i64 * 86_400, 0).unwrap();
                PriceBar::new(ts, close, close, close, close)
            })
            .collect();
        PriceTable::new("TEST", bars)
    }

    fn five_percent() -> OutcomeEvaluator {
        OutcomeEvaluator::new(OutcomeParams::new(Duration::days(5), dec!(0.05)))
    }

    fn flag_first(table: &mut PriceTable, kind: PatternKind) {
        let mut column = vec![false; table.len()];
        column[0] = true;
        table.insert_pattern_column(kind, column).unwrap();
    }

    #[test]
    fn test_bullish_threshold() {
        let evaluator = five_percent();

        let mut hit = table_with_closes(&[dec!(100), dec!(103), dec!(106), dec!(101)]);
        flag_first(&mut hit, PatternKind::BullishReversal);
        let out = evaluator.evaluate(&hit, &[PatternKind::BullishReversal]).unwrap();
        assert_eq!(
            out.success_column(PatternKind::BullishReversal),
            Some(&[true, false, false, false][..])
        );

        let mut miss = table_with_closes(&[dec!(100), dec!(103), dec!(104), dec!(101)]);
        flag_first(&mut miss, PatternKind::BullishReversal);
        let out = evaluator.evaluate(&miss, &[PatternKind::BullishReversal]).unwrap();
        assert!(!out.success_column(PatternKind::BullishReversal).unwrap()[0]);
    }

    #[test]
    fn test_bearish_uses_minimum() {
        let mut table = table_with_closes(&[dec!(100), dec!(98), dec!(95), dec!(99)]);
        flag_first(&mut table, PatternKind::BearishEngulfing);

        let out = five_percent()
            .evaluate(&table, &[PatternKind::BearishEngulfing])
            .unwrap();
        assert!(out.success_column(PatternKind::BearishEngulfing).unwrap()[0]);
    }

    #[test]
    fn test_move_outside_window_is_ignored() {
        // 6일째 종가는 5일 윈도우 밖
        let closes = [100, 100, 100, 100, 100, 100, 120].map(Decimal::from);
        let mut table = table_with_closes(&closes);
        flag_first(&mut table, PatternKind::BullishEngulfing);

        let out = five_percent()
            .evaluate(&table, &[PatternKind::BullishEngulfing])
            .unwrap();
        assert!(!out.success_column(PatternKind::BullishEngulfing).unwrap()[0]);
    }

    #[test]
    fn test_neutral_is_always_false() {
        let mut table = table_with_closes(&[dec!(100), dec!(200), dec!(10)]);
        flag_first(&mut table, PatternKind::Doji);

        let out = OutcomeEvaluator::new(OutcomeParams::new(Duration::days(5), Decimal::ZERO))
            .evaluate(&table, &[PatternKind::Doji])
            .unwrap();
        assert_eq!(out.success_column(PatternKind::Doji), Some(&[false, false, false][..]));
    }

    #[test]
    fn test_zero_close_is_not_success() {
        let mut table = table_with_closes(&[Decimal::ZERO, dec!(10)]);
        flag_first(&mut table, PatternKind::BullishReversal);

        let out = OutcomeEvaluator::default()
            .evaluate(&table, &[PatternKind::BullishReversal])
            .unwrap();
        assert!(!out.success_column(PatternKind::BullishReversal).unwrap()[0]);
    }

    #[test]
    fn test_missing_column() {
        let table = table_with_closes(&[dec!(100)]);
        let result = OutcomeEvaluator::default().evaluate(&table, &[PatternKind::Doji]);

        assert!(matches!(result, Err(AnalyticsError::MissingColumn(name)) if name == "Doji"));
    }

    #[test]
    fn test_invalid_params() {
        let params = OutcomeParams::new(Duration::days(-1), dec!(0.05));
        assert!(params.validate().is_err());

        let params = OutcomeParams::new(Duration::days(5), dec!(-0.01));
        assert!(matches!(
            params.validate(),
            Err(AnalyticsError::InvalidParameter(_))
        ));
        assert!(OutcomeParams::default().validate().is_ok());

        let params = OutcomeParams::new(Duration::days(MAX_LOOKAHEAD_DAYS + 1), dec!(0.05));
        assert!(matches!(
            params.validate(),
            Err(AnalyticsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_default_params() {
        let params = OutcomeParams::default();

        assert_eq!(params.lookahead, Duration::days(5));
        assert_eq!(params.threshold, dec!(0.5));
    }

    #[test]
    fn test_horizon_past_datetime_range_covers_rest_of_table() {
        let mut table = table_with_closes(&[dec!(100), dec!(101), dec!(160)]);
        flag_first(&mut table, PatternKind::BullishReversal);

        // 검증을 거치지 않은 평가에서도 패닉 없이 테이블 끝까지 평가
        let evaluator =
            OutcomeEvaluator::new(OutcomeParams::new(Duration::days(100_000_000), dec!(0.5)));
        assert!(evaluator.is_success(&table, 0, PatternKind::BullishReversal));
    }

    #[test]
    fn test_from_config_rejects_oversized_lookahead() {
        let config = EvaluationConfig {
            lookahead_days: 1_000_000_000_000_000,
            ..Default::default()
        };

        assert!(matches!(
            OutcomeParams::from_config(&config),
            Err(AnalyticsError::Core(_))
        ));
    }
}
