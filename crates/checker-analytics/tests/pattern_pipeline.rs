//! 패턴 파이프라인 통합 테스트
//!
//! 대표 시나리오와 임의 가격 시퀀스에 대한 불변 조건을 검증합니다.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use checker_analytics::{
    OutcomeEvaluator, OutcomeParams, PatternChart, PatternDetector, PatternPipeline,
};
use checker_core::{PatternKind, PriceBar, PriceTable};

fn day(n: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_577_836_800 + n * 86_400, 0).unwrap()
}

fn ohlc(n: i64, open: Decimal, high: Decimal, low: Decimal, close: Decimal) -> PriceBar {
    PriceBar::new(day(n), open, high, low, close)
}

/// 시가/종가가 같은 평평한 봉 (어떤 패턴에도 해당하지 않음)
fn flat(n: i64, close: Decimal) -> PriceBar {
    ohlc(n, close, close, close, close)
}

#[test]
fn scenario_a_bullish_engulfing() {
    let table = PriceTable::new(
        "A",
        vec![
            ohlc(0, dec!(10), dec!(11), dec!(9), dec!(9.5)),
            ohlc(1, dec!(9), dec!(12), dec!(8.5), dec!(11)),
        ],
    );
    let detected = PatternDetector::new().detect(&table).unwrap();

    assert_eq!(
        detected.pattern_column(PatternKind::BullishEngulfing),
        Some(&[false, true][..])
    );
    assert_eq!(
        detected.pattern_column(PatternKind::BearishEngulfing),
        Some(&[false, false][..])
    );
}

#[test]
fn scenario_b_doji() {
    let table = PriceTable::new(
        "B",
        vec![ohlc(0, dec!(100.00), dec!(100.30), dec!(99.90), dec!(100.05))],
    );
    let detected = PatternDetector::new().detect(&table).unwrap();

    assert_eq!(detected.pattern_column(PatternKind::Doji), Some(&[true][..]));
}

#[test]
fn scenario_c_bullish_success_threshold() {
    // 0일: 강세 장악형 (이전 봉 음봉, 종가 100)
    let build = |peak: Decimal| {
        PriceTable::new(
            "C",
            vec![
                ohlc(-1, dec!(99), dec!(99.5), dec!(97), dec!(97.5)),
                ohlc(0, dec!(97), dec!(100.5), dec!(96.5), dec!(100)),
                flat(1, dec!(101)),
                flat(3, peak),
                flat(5, dec!(102)),
                flat(9, dec!(130)),
            ],
        )
    };
    let pipeline = PatternPipeline::new(
        PatternDetector::with_kinds([PatternKind::BullishEngulfing]),
        OutcomeEvaluator::new(OutcomeParams::new(Duration::days(5), dec!(0.05))),
    );

    let hit = pipeline.run(&build(dec!(106))).unwrap();
    assert!(hit.table.pattern_column(PatternKind::BullishEngulfing).unwrap()[1]);
    assert!(hit.table.success_column(PatternKind::BullishEngulfing).unwrap()[1]);
    assert_eq!(
        hit.summary.get(PatternKind::BullishEngulfing).unwrap().rate_string(),
        "100.00%"
    );

    let miss = pipeline.run(&build(dec!(104))).unwrap();
    assert!(!miss.table.success_column(PatternKind::BullishEngulfing).unwrap()[1]);
    assert_eq!(
        miss.summary.get(PatternKind::BullishEngulfing).unwrap().success_rate,
        Some(Decimal::ZERO)
    );
}

#[test]
fn scenario_d_empty_table() {
    let detector = PatternDetector::new();
    let detected = detector.detect(&PriceTable::empty("D")).unwrap();
    let evaluated = OutcomeEvaluator::default()
        .evaluate(&detected, detector.kinds())
        .unwrap();

    assert_eq!(evaluated.len(), 0);
    for kind in PatternKind::ALL {
        assert_eq!(evaluated.pattern_column(kind).map(<[bool]>::len), Some(0));
        assert_eq!(evaluated.success_column(kind).map(<[bool]>::len), Some(0));
    }
}

#[test]
fn last_bar_is_evaluated_over_itself() {
    // 마지막 봉의 윈도우는 자기 자신뿐이므로 양수 threshold에서는 실패
    let table = PriceTable::new(
        "TAIL",
        vec![
            ohlc(0, dec!(10), dec!(11), dec!(9), dec!(9.5)),
            ohlc(1, dec!(9), dec!(12), dec!(8.5), dec!(11)),
        ],
    );
    let output = PatternPipeline::default().run(&table).unwrap();

    assert_eq!(
        output.table.success_column(PatternKind::BullishEngulfing),
        Some(&[false, false][..])
    );
}

#[test]
fn chart_uses_pattern_flags() {
    let table = PriceTable::new(
        "CHART",
        vec![
            ohlc(0, dec!(10), dec!(11), dec!(9), dec!(9.5)),
            ohlc(1, dec!(9), dec!(12), dec!(8.5), dec!(11)),
        ],
    );
    let output = PatternPipeline::default().run(&table).unwrap();
    let chart = PatternChart::from_table(&output.table, &PatternKind::ALL).unwrap();

    assert_eq!(chart.markers.len(), 5);
    let engulfing = chart.marker_series(PatternKind::BullishEngulfing).unwrap();
    assert_eq!(engulfing.points.len(), 1);
    assert_eq!(engulfing.points[0].y, dec!(11));
    assert_eq!(engulfing.color, "#2ca02c");
}

/// 임의 OHLC 봉 시퀀스 생성 (low <= open, close <= high)
fn arb_bars() -> impl Strategy<Value = Vec<PriceBar>> {
    proptest::collection::vec(
        (1u32..10_000, 1u32..10_000, 0u32..500, 0u32..500, 0i64..3),
        0..60,
    )
    .prop_map(|rows| {
        let mut t = 0;
        rows.into_iter()
            .map(|(open, close, up, down, gap)| {
                t += 1 + gap;
                let open = Decimal::new(open as i64, 2);
                let close = Decimal::new(close as i64, 2);
                let high = open.max(close) + Decimal::new(up as i64, 2);
                let low = open.min(close) - Decimal::new(down as i64, 2);
                ohlc(t, open, high, low, close)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn first_row_never_engulfing(bars in arb_bars()) {
        let detected = PatternDetector::new().detect(&PriceTable::new("P", bars)).unwrap();

        if !detected.is_empty() {
            prop_assert!(!detected.pattern_column(PatternKind::BullishEngulfing).unwrap()[0]);
            prop_assert!(!detected.pattern_column(PatternKind::BearishEngulfing).unwrap()[0]);
        }
    }

    #[test]
    fn engulfing_flags_are_exclusive(bars in arb_bars()) {
        let detected = PatternDetector::new().detect(&PriceTable::new("P", bars)).unwrap();
        let bullish = detected.pattern_column(PatternKind::BullishEngulfing).unwrap();
        let bearish = detected.pattern_column(PatternKind::BearishEngulfing).unwrap();

        prop_assert!(bullish.iter().zip(bearish).all(|(&b, &s)| !(b && s)));
    }

    #[test]
    fn success_implies_flag(bars in arb_bars(), lookahead in 0i64..10, threshold in 0u32..20) {
        let pipeline = PatternPipeline::new(
            PatternDetector::new(),
            OutcomeEvaluator::new(OutcomeParams::new(
                Duration::days(lookahead),
                Decimal::new(threshold as i64, 2),
            )),
        );
        let output = pipeline.run(&PriceTable::new("P", bars)).unwrap();

        for kind in PatternKind::ALL {
            let flags = output.table.pattern_column(kind).unwrap();
            let successes = output.table.success_column(kind).unwrap();
            prop_assert_eq!(flags.len(), successes.len());
            prop_assert!(flags.iter().zip(successes).all(|(&f, &s)| f || !s));
        }
        let doji = output.table.success_column(PatternKind::Doji).unwrap();
        prop_assert!(doji.iter().all(|&s| !s));
    }

    #[test]
    fn detection_is_idempotent(bars in arb_bars()) {
        let detector = PatternDetector::new();
        let once = detector.detect(&PriceTable::new("P", bars)).unwrap();
        let evaluated = OutcomeEvaluator::default().evaluate(&once, detector.kinds()).unwrap();
        let twice = detector.detect(&evaluated).unwrap();

        prop_assert_eq!(once, twice);
    }
}
