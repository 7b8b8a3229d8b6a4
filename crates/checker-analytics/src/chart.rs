//! 패턴 차트 데이터 구조
//!
//! 웹 대시보드에서 그릴 수 있도록 종가 라인과 패턴별 마커 시리즈를 생성합니다.
//! 패턴 플래그만 사용하며 성공 라벨은 차트에 나타나지 않습니다.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use checker_core::{PatternKind, PriceTable};

use crate::error::{AnalyticsError, AnalyticsResult};

/// 차트 데이터 포인트
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// X축 값 (타임스탬프, 밀리초)
    pub x: i64,

    /// Y축 값
    pub y: Decimal,

    /// 레이블 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ChartPoint {
    /// 새로운 차트 포인트를 생성합니다.
    pub fn new(timestamp: DateTime<Utc>, value: Decimal) -> Self {
        Self {
            x: timestamp.timestamp_millis(),
            y: value,
            label: None,
        }
    }

    /// 레이블이 있는 차트 포인트를 생성합니다.
    pub fn with_label(timestamp: DateTime<Utc>, value: Decimal, label: impl Into<String>) -> Self {
        Self {
            x: timestamp.timestamp_millis(),
            y: value,
            label: Some(label.into()),
        }
    }
}

/// 패턴 마커 시리즈 (산점도)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSeries {
    /// 패턴 종류
    pub kind: PatternKind,

    /// 범례 이름
    pub name: String,

    /// 마커 색상 (hex)
    pub color: String,

    /// 패턴이 감지된 봉의 종가 위치
    pub points: Vec<ChartPoint>,
}

/// 패턴 차트
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternChart {
    /// 차트 제목
    pub title: String,

    /// 종목 심볼
    pub ticker: String,

    /// 종가 라인 시리즈
    pub price: Vec<ChartPoint>,

    /// 패턴별 마커 시리즈
    pub markers: Vec<MarkerSeries>,
}

/// 패턴 마커 기본 색상.
pub fn default_color(kind: PatternKind) -> &'static str {
    match kind {
        PatternKind::BullishEngulfing => "#2ca02c", // green
        PatternKind::BearishEngulfing => "#d62728", // red
        PatternKind::Doji => "#7f7f7f",             // gray
        PatternKind::BullishReversal => "#1f77b4",  // blue
        PatternKind::BearishReversal => "#ff7f0e",  // orange
    }
}

impl PatternChart {
    /// 패턴 컬럼이 붙은 테이블에서 차트 데이터를 생성합니다.
    ///
    /// 제목은 종목 심볼로 초기화됩니다.
    ///
    /// # Errors
    ///
    /// `kinds` 중 패턴 컬럼이 없는 것이 있으면 `AnalyticsError::MissingColumn`.
    pub fn from_table(table: &PriceTable, kinds: &[PatternKind]) -> AnalyticsResult<Self> {
        let bars = table.bars();
        let price = bars
            .iter()
            .map(|bar| ChartPoint::new(bar.timestamp, bar.close))
            .collect();

        let markers = kinds
            .iter()
            .map(|&kind| {
                let flags = table
                    .pattern_column(kind)
                    .ok_or_else(|| AnalyticsError::MissingColumn(kind.column_name().to_string()))?;

                let points = bars
                    .iter()
                    .zip(flags)
                    .filter(|(_, &flagged)| flagged)
                    .map(|(bar, _)| ChartPoint::with_label(bar.timestamp, bar.close, kind.column_name()))
                    .collect();

                Ok(MarkerSeries {
                    kind,
                    name: kind.column_name().replace('_', " "),
                    color: default_color(kind).to_string(),
                    points,
                })
            })
            .collect::<AnalyticsResult<Vec<_>>>()?;

        Ok(Self {
            title: format!("{} Candlestick Patterns", table.ticker()),
            ticker: table.ticker().to_string(),
            price,
            markers,
        })
    }

    /// 차트 제목을 설정합니다.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// 패턴 마커 시리즈 조회.
    pub fn marker_series(&self, kind: PatternKind) -> Option<&MarkerSeries> {
        self.markers.iter().find(|m| m.kind == kind)
    }

    /// 전체 마커 개수.
    pub fn marker_count(&self) -> usize {
        self.markers.iter().map(|m| m.points.len()).sum()
    }

    /// JSON 문자열로 직렬화합니다.
    pub fn to_json(&self) -> AnalyticsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
