//! OHLC 가격 봉.
//!
//! 테이블의 한 행을 나타냅니다. 패턴 판정에 필요한 몸통/그림자 크기 계산을
//! 함께 제공합니다.

use crate::types::{Price, Quantity, Ratio};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// OHLC 가격 봉.
///
/// `low <= open, close <= high` 관계는 상위 데이터에서 보장된다고 가정하며
/// 여기서 검증하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// 봉 시작 시간 (테이블 인덱스)
    pub timestamp: DateTime<Utc>,
    /// 시가
    pub open: Price,
    /// 고가
    pub high: Price,
    /// 저가
    pub low: Price,
    /// 종가
    pub close: Price,
    /// 거래량 (패턴 판정에는 사용하지 않음)
    #[serde(default)]
    pub volume: Quantity,
    /// 직전 봉 대비 종가 변화율. 첫 봉은 `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pct_return: Option<Ratio>,
}

impl PriceBar {
    /// 새 가격 봉을 생성합니다.
    pub fn new(
        timestamp: DateTime<Utc>,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume: Decimal::ZERO,
            pct_return: None,
        }
    }

    /// 거래량을 설정합니다.
    pub fn with_volume(mut self, volume: Quantity) -> Self {
        self.volume = volume;
        self
    }

    /// 몸통 크기(절대값).
    pub fn body_size(&self) -> Decimal {
        (self.close - self.open).abs()
    }

    /// 범위(고가 - 저가).
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }

    /// 양봉(종가 > 시가) 여부.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// 음봉(종가 < 시가) 여부.
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_bar_shape() {
        let bar = PriceBar::new(Utc::now(), dec!(100), dec!(104), dec!(98), dec!(103));

        assert!(bar.is_bullish());
        assert!(!bar.is_bearish());
        assert_eq!(bar.body_size(), dec!(3));
        assert_eq!(bar.range(), dec!(6));
        assert_eq!(bar.pct_return, None);
    }

    #[test]
    fn test_flat_bar_is_neither_direction() {
        let bar = PriceBar::new(Utc::now(), dec!(50), dec!(51), dec!(49), dec!(50));

        assert!(!bar.is_bullish());
        assert!(!bar.is_bearish());
        assert_eq!(bar.body_size(), Decimal::ZERO);
    }
}
