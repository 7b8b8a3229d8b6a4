//! 캔들 패턴 종류.
//!
//! ## 지원 패턴
//! - **강세 장악형 (Bullish Engulfing)**: 음봉 다음 양봉이 이전 몸통을 감싸는 2봉 패턴
//! - **약세 장악형 (Bearish Engulfing)**: 양봉 다음 음봉이 이전 몸통을 감싸는 2봉 패턴
//! - **도지 (Doji)**: 시가와 종가가 거의 같은 봉, 방향성 없음
//! - **강세 반전 (Bullish Reversal)**: 망치형과 유사한 하단 꼬리 양봉
//! - **약세 반전 (Bearish Reversal)**: 유성형과 유사한 상단 꼬리 음봉

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 캔들 패턴 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// 강세 장악형.
    BullishEngulfing,
    /// 약세 장악형.
    BearishEngulfing,
    /// 도지.
    Doji,
    /// 강세 반전 (망치형 계열).
    BullishReversal,
    /// 약세 반전 (유성형 계열).
    BearishReversal,
}

/// 패턴이 암시하는 가격 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternBias {
    /// 상승 암시
    Bullish,
    /// 하락 암시
    Bearish,
    /// 방향성 없음
    Neutral,
}

impl fmt::Display for PatternBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternBias::Bullish => write!(f, "bullish"),
            PatternBias::Bearish => write!(f, "bearish"),
            PatternBias::Neutral => write!(f, "neutral"),
        }
    }
}

impl PatternKind {
    /// 지원하는 모든 패턴 (출력 순서).
    pub const ALL: [PatternKind; 5] = [
        PatternKind::BullishEngulfing,
        PatternKind::BearishEngulfing,
        PatternKind::Doji,
        PatternKind::BullishReversal,
        PatternKind::BearishReversal,
    ];

    /// 테이블 컬럼 이름.
    pub fn column_name(&self) -> &'static str {
        match self {
            PatternKind::BullishEngulfing => "Bullish_Engulfing",
            PatternKind::BearishEngulfing => "Bearish_Engulfing",
            PatternKind::Doji => "Doji",
            PatternKind::BullishReversal => "Bullish_Reversal",
            PatternKind::BearishReversal => "Bearish_Reversal",
        }
    }

    /// 성공 라벨 컬럼 이름.
    pub fn success_column_name(&self) -> String {
        format!("{}_Success", self.column_name())
    }

    /// 패턴이 암시하는 방향.
    pub fn bias(&self) -> PatternBias {
        match self {
            PatternKind::BullishEngulfing | PatternKind::BullishReversal => PatternBias::Bullish,
            PatternKind::BearishEngulfing | PatternKind::BearishReversal => PatternBias::Bearish,
            PatternKind::Doji => PatternBias::Neutral,
        }
    }

    /// 판정에 필요한 봉 개수 (현재 봉 포함).
    pub fn bar_span(&self) -> usize {
        match self {
            PatternKind::BullishEngulfing | PatternKind::BearishEngulfing => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

impl FromStr for PatternKind {
    type Err = String;

    /// 컬럼 이름, snake_case, kebab-case 모두 허용합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        PatternKind::ALL
            .into_iter()
            .find(|kind| kind.column_name().to_lowercase() == normalized)
            .ok_or_else(|| format!("Unknown pattern: {}", s))
    }
}
