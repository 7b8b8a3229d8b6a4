//! 패턴별 성공률 요약.
//!
//! 성공 라벨 컬럼에서 패턴마다 발생 횟수, 성공 횟수, 성공률을 집계합니다.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use checker_core::{DecimalExt, PatternKind, PriceTable, Ratio};

use crate::error::AnalyticsResult;

/// 단일 패턴 통계.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternStats {
    /// 패턴 종류
    pub kind: PatternKind,
    /// 패턴이 감지된 봉 수
    pub occurrences: usize,
    /// 성공한 봉 수
    pub successes: usize,
    /// 성공률 (발생이 없으면 `None`)
    pub success_rate: Option<Ratio>,
}

impl PatternStats {
    /// 플래그/성공 컬럼에서 통계를 계산합니다.
    pub fn from_columns(kind: PatternKind, flags: &[bool], successes: &[bool]) -> Self {
        let occurrences = flags.iter().filter(|&&f| f).count();
        let successes = flags
            .iter()
            .zip(successes)
            .filter(|&(&flagged, &success)| flagged && success)
            .count();

        let success_rate = (occurrences > 0)
            .then(|| Decimal::from(successes as u64) / Decimal::from(occurrences as u64));

        Self {
            kind,
            occurrences,
            successes,
            success_rate,
        }
    }

    /// 성공률 문자열 (예: "12.34%", 발생이 없으면 "N/A").
    pub fn rate_string(&self) -> String {
        self.success_rate
            .map(|rate| rate.to_percentage_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

impl fmt::Display for PatternStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Success Rate: {}", self.kind, self.rate_string())
    }
}

/// 패턴별 성공률 요약.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSummary {
    /// 종목 심볼
    pub ticker: String,
    /// 전체 봉 수
    pub rows: usize,
    /// 패턴별 통계 (패턴 정렬 순서)
    pub stats: Vec<PatternStats>,
}

impl PatternSummary {
    /// 성공 컬럼이 있는 모든 패턴에 대해 요약을 계산합니다.
    pub fn from_table(table: &PriceTable) -> Self {
        let stats = table
            .success_kinds()
            .filter_map(|kind| {
                let flags = table.pattern_column(kind)?;
                let successes = table.success_column(kind)?;
                Some(PatternStats::from_columns(kind, flags, successes))
            })
            .collect();

        Self {
            ticker: table.ticker().to_string(),
            rows: table.len(),
            stats,
        }
    }

    /// 패턴 통계 조회.
    pub fn get(&self, kind: PatternKind) -> Option<&PatternStats> {
        self.stats.iter().find(|s| s.kind == kind)
    }

    /// JSON 문자열로 직렬화합니다.
    pub fn to_json(&self) -> AnalyticsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for PatternSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} bars)", self.ticker, self.rows)?;
        writeln!(
            f,
            "{:<20} {:>11} {:>9} {:>12}",
            "Pattern", "Occurrences", "Successes", "Success Rate"
        )?;
        writeln!(f, "{}", "-".repeat(55))?;
        for stat in &self.stats {
            writeln!(
                f,
                "{:<20} {:>11} {:>9} {:>12}",
                stat.kind.column_name(),
                stat.occurrences,
                stat.successes,
                stat.rate_string()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_stats_rate() {
        let flags = [true, false, true, true, false, true];
        let successes = [true, false, false, true, false, false];
        let stats = PatternStats::from_columns(PatternKind::BullishEngulfing, &flags, &successes);

        assert_eq!(stats.occurrences, 4);
        assert_eq!(stats.successes, 2);
        assert_eq!(stats.success_rate, Some(dec!(0.5)));
        assert_eq!(stats.to_string(), "Bullish_Engulfing Success Rate: 50.00%");
    }

    #[test]
    fn test_stats_without_occurrences() {
        let stats = PatternStats::from_columns(PatternKind::Doji, &[false, false], &[false, false]);

        assert_eq!(stats.success_rate, None);
        assert_eq!(stats.rate_string(), "N/A");
    }

    #[test]
    fn test_rate_rounding() {
        let flags = [true; 3];
        let successes = [true, false, false];
        let stats = PatternStats::from_columns(PatternKind::BearishReversal, &flags, &successes);

        assert_eq!(stats.rate_string(), "33.33%");
    }

    #[test]
    fn test_summary_table_layout() {
        let summary = PatternSummary {
            ticker: "BTC-USD".to_string(),
            rows: 10,
            stats: vec![PatternStats::from_columns(
                PatternKind::Doji,
                &[true, false],
                &[false, false],
            )],
        };
        let text = summary.to_string();

        assert!(text.starts_with("BTC-USD (10 bars)\n"));
        assert!(text.contains("Success Rate"));
        assert!(text.contains("Doji"));
        assert!(text.contains("0.00%"));
        assert!(summary.to_json().unwrap().contains("\"doji\""));
    }
}
