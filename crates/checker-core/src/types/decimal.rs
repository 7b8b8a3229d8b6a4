//! 정밀한 가격 계산을 위한 Decimal 유틸리티.
//!
//! 패턴 판정은 가격 간 경계 비교(예: 도지의 `|종가 - 시가| <= 0.001 * 종가`)에
//! 민감하므로 부동소수점 대신 `Decimal`을 사용합니다.

use rust_decimal::Decimal;

/// 가격 타입.
pub type Price = Decimal;

/// 거래량 타입.
pub type Quantity = Decimal;

/// 비율 타입 (0.01 = 1%).
pub type Ratio = Decimal;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 퍼센트 문자열로 변환합니다 (예: "5.25%").
    fn to_percentage_string(&self) -> String;

    /// 지정된 소수점 자릿수로 반올림합니다 (0.5는 0에서 먼 쪽으로).
    fn round_half_up(&self, dp: u32) -> Decimal;
}

impl DecimalExt for Decimal {
    fn to_percentage_string(&self) -> String {
        let pct = (*self * Decimal::ONE_HUNDRED).round_half_up(2);
        format!("{:.2}%", pct)
    }

    fn round_half_up(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    }
}

/// `from`에서 `to`로의 변화율을 계산합니다.
///
/// `from`이 0이면 비율이 정의되지 않으므로 `None`을 반환합니다.
pub fn pct_change(from: Decimal, to: Decimal) -> Option<Ratio> {
    if from.is_zero() {
        return None;
    }
    (to - from).checked_div(from)
}
