//! 시간 인덱스 가격 테이블.
//!
//! 가격 봉 시퀀스에 파이프라인 단계마다 불리언 컬럼이 덧붙는 구조입니다:
//! - 패턴 감지 단계: 패턴 종류별 플래그 컬럼
//! - 결과 평가 단계: 패턴 종류별 성공 라벨 컬럼
//!
//! 모든 컬럼은 봉 개수와 같은 길이를 유지합니다.

use std::collections::BTreeMap;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::{PatternKind, PriceBar};
use crate::error::{CheckerError, CheckerResult};
use crate::types::pct_change;

/// 시간 인덱스 가격 테이블.
///
/// 봉은 타임스탬프 오름차순이며 타임스탬프는 유일합니다.
/// 역직렬화도 같은 불변식을 검사합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceTable")]
pub struct PriceTable {
    ticker: String,
    bars: Vec<PriceBar>,
    patterns: BTreeMap<PatternKind, Vec<bool>>,
    successes: BTreeMap<PatternKind, Vec<bool>>,
}

/// 검증 전 역직렬화 형태.
#[derive(Deserialize)]
struct RawPriceTable {
    ticker: String,
    bars: Vec<PriceBar>,
    #[serde(default)]
    patterns: BTreeMap<PatternKind, Vec<bool>>,
    #[serde(default)]
    successes: BTreeMap<PatternKind, Vec<bool>>,
}

impl TryFrom<RawPriceTable> for PriceTable {
    type Error = CheckerError;

    fn try_from(raw: RawPriceTable) -> CheckerResult<Self> {
        if raw.bars.windows(2).any(|w| w[0].timestamp >= w[1].timestamp) {
            return Err(CheckerError::InvalidInput(
                "봉 타임스탬프가 오름차순이 아니거나 중복됩니다".to_string(),
            ));
        }

        let mut table = Self::new(raw.ticker, raw.bars);
        for (kind, values) in raw.patterns {
            table.insert_pattern_column(kind, values)?;
        }
        for (kind, values) in raw.successes {
            table.insert_success_column(kind, values)?;
        }
        Ok(table)
    }
}

impl PriceTable {
    /// 가격 봉 목록으로 테이블을 생성합니다.
    ///
    /// 봉은 타임스탬프 순으로 정렬되며, 같은 타임스탬프가 여러 번 나오면
    /// 마지막 봉을 사용합니다. 변화율(`pct_return`)은 다시 계산됩니다.
    pub fn new(ticker: impl Into<String>, mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.timestamp);

        let mut unique: Vec<PriceBar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match unique.last_mut() {
                Some(last) if last.timestamp == bar.timestamp => *last = bar,
                _ => unique.push(bar),
            }
        }

        let mut table = Self {
            ticker: ticker.into(),
            bars: unique,
            patterns: BTreeMap::new(),
            successes: BTreeMap::new(),
        };
        table.compute_returns();
        table
    }

    /// 빈 테이블을 생성합니다.
    pub fn empty(ticker: impl Into<String>) -> Self {
        Self::new(ticker, Vec::new())
    }

    /// 종목 심볼.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// 가격 봉 슬라이스.
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// 행 개수.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// 비어 있는지 여부.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// 덧붙은 컬럼을 제외한 기본 가격 컬럼만 가진 복사본.
    pub fn base(&self) -> Self {
        Self {
            ticker: self.ticker.clone(),
            bars: self.bars.clone(),
            patterns: BTreeMap::new(),
            successes: BTreeMap::new(),
        }
    }

    /// 패턴 플래그 컬럼.
    pub fn pattern_column(&self, kind: PatternKind) -> Option<&[bool]> {
        self.patterns.get(&kind).map(Vec::as_slice)
    }

    /// 성공 라벨 컬럼.
    pub fn success_column(&self, kind: PatternKind) -> Option<&[bool]> {
        self.successes.get(&kind).map(Vec::as_slice)
    }

    /// 패턴 컬럼이 있는 패턴 종류 (정렬 순서).
    pub fn pattern_kinds(&self) -> impl Iterator<Item = PatternKind> + '_ {
        self.patterns.keys().copied()
    }

    /// 성공 컬럼이 있는 패턴 종류 (정렬 순서).
    pub fn success_kinds(&self) -> impl Iterator<Item = PatternKind> + '_ {
        self.successes.keys().copied()
    }

    /// 패턴 플래그 컬럼을 추가하거나 교체합니다.
    pub fn insert_pattern_column(
        &mut self,
        kind: PatternKind,
        values: Vec<bool>,
    ) -> CheckerResult<()> {
        self.check_column_len(kind.column_name(), values.len())?;
        self.patterns.insert(kind, values);
        Ok(())
    }

    /// 성공 라벨 컬럼을 추가하거나 교체합니다.
    pub fn insert_success_column(
        &mut self,
        kind: PatternKind,
        values: Vec<bool>,
    ) -> CheckerResult<()> {
        self.check_column_len(&kind.success_column_name(), values.len())?;
        self.successes.insert(kind, values);
        Ok(())
    }

    /// 패턴이 감지된 행 인덱스.
    pub fn flagged_indices(&self, kind: PatternKind) -> Vec<usize> {
        self.pattern_column(kind)
            .map(|column| {
                column
                    .iter()
                    .enumerate()
                    .filter_map(|(i, &flag)| flag.then_some(i))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `index` 행부터 `lookahead` 이내의 전방 윈도우.
    ///
    /// 타임스탬프가 `[t_i, t_i + lookahead]` 구간(양끝 포함)에 있는 봉들을
    /// 반환합니다. 테이블 끝을 넘어서면 남은 봉만 포함됩니다.
    /// 구간 끝이 표현 범위를 넘으면 테이블 끝까지로 봅니다.
    pub fn forward_window(&self, index: usize, lookahead: Duration) -> &[PriceBar] {
        let Some(start) = self.bars.get(index) else {
            return &[];
        };
        let end = match start.timestamp.checked_add_signed(lookahead) {
            Some(horizon) => self.bars.partition_point(|b| b.timestamp <= horizon),
            None => self.bars.len(),
        };
        &self.bars[index..end.max(index)]
    }

    fn check_column_len(&self, name: &str, len: usize) -> CheckerResult<()> {
        if len != self.bars.len() {
            return Err(CheckerError::InvalidInput(format!(
                "컬럼 {} 길이 불일치: 행 {}개, 값 {}개",
                name,
                self.bars.len(),
                len
            )));
        }
        Ok(())
    }

    fn compute_returns(&mut self) {
        let mut prev_close = None;
        for bar in &mut self.bars {
            bar.pct_return = prev_close.and_then(|prev| pct_change(prev, bar.close));
            prev_close = Some(bar.close);
        }
    }
}
