//! # Checker Core
//!
//! 캔들스틱 패턴 검사기의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 가격 봉(`PriceBar`) 및 시간 인덱스 테이블(`PriceTable`)
//! - 캔들 패턴 종류와 방향성
//! - 샘플링 간격 정의
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
