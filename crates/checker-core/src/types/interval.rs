//! 가격 이력 샘플링 간격 정의.
//!
//! Yahoo Finance가 제공하는 간격만 정의합니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 가격 봉 샘플링 간격.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    /// 1분봉
    #[serde(rename = "1m")]
    M1,
    /// 5분봉
    #[serde(rename = "5m")]
    M5,
    /// 15분봉
    #[serde(rename = "15m")]
    M15,
    /// 30분봉
    #[serde(rename = "30m")]
    M30,
    /// 1시간봉
    #[serde(rename = "1h")]
    H1,
    /// 일봉
    #[serde(rename = "1d")]
    D1,
    /// 주봉
    #[serde(rename = "1wk")]
    W1,
    /// 월봉
    #[serde(rename = "1mo")]
    MN1,
}

impl Default for Interval {
    fn default() -> Self {
        Self::D1
    }
}

impl Interval {
    /// 봉 하나의 명목 기간을 반환합니다.
    pub fn duration(&self) -> chrono::Duration {
        match self {
            Interval::M1 => chrono::Duration::minutes(1),
            Interval::M5 => chrono::Duration::minutes(5),
            Interval::M15 => chrono::Duration::minutes(15),
            Interval::M30 => chrono::Duration::minutes(30),
            Interval::H1 => chrono::Duration::hours(1),
            Interval::D1 => chrono::Duration::days(1),
            Interval::W1 => chrono::Duration::weeks(1),
            Interval::MN1 => chrono::Duration::days(30), // 근사값
        }
    }

    /// Yahoo Finance 간격 문자열로 변환합니다.
    pub fn to_yahoo_interval(&self) -> &'static str {
        match self {
            Interval::M1 => "1m",
            Interval::M5 => "5m",
            Interval::M15 => "15m",
            Interval::M30 => "30m",
            Interval::H1 => "1h",
            Interval::D1 => "1d",
            Interval::W1 => "1wk",
            Interval::MN1 => "1mo",
        }
    }

    /// 분봉/시간봉 여부.
    ///
    /// Yahoo Finance는 장중 간격을 최근 60일까지만 제공합니다.
    pub fn is_intraday(&self) -> bool {
        matches!(
            self,
            Interval::M1 | Interval::M5 | Interval::M15 | Interval::M30 | Interval::H1
        )
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_yahoo_interval())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(Interval::M1),
            "5m" => Ok(Interval::M5),
            "15m" => Ok(Interval::M15),
            "30m" => Ok(Interval::M30),
            "1h" | "60m" => Ok(Interval::H1),
            "1d" | "d" | "daily" => Ok(Interval::D1),
            "1wk" | "1w" | "weekly" => Ok(Interval::W1),
            "1mo" | "monthly" => Ok(Interval::MN1),
            _ => Err(format!("Invalid interval: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_parsing() {
        assert_eq!("1d".parse::<Interval>().unwrap(), Interval::D1);
        assert_eq!("1w".parse::<Interval>().unwrap(), Interval::W1);
        assert_eq!("60m".parse::<Interval>().unwrap(), Interval::H1);
        assert!("3d".parse::<Interval>().is_err());
    }

    #[test]
    fn test_interval_yahoo_string_round_trips() {
        for interval in [
            Interval::M1,
            Interval::M5,
            Interval::M15,
            Interval::M30,
            Interval::H1,
            Interval::D1,
            Interval::W1,
            Interval::MN1,
        ] {
            assert_eq!(interval.to_yahoo_interval().parse::<Interval>(), Ok(interval));
        }
    }

    #[test]
    fn test_intraday() {
        assert!(Interval::H1.is_intraday());
        assert!(!Interval::D1.is_intraday());
        assert_eq!(Interval::D1.duration(), chrono::Duration::days(1));
    }
}
