//! CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 패턴 스캔 (조회 → 감지 → 평가 → 요약/차트)
//! - 가격 이력 CSV 다운로드
//! - 지원 패턴 목록

pub mod commands;
