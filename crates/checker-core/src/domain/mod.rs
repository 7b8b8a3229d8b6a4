//! 가격 시계열과 패턴 라벨링을 위한 도메인 모델.

mod pattern;
mod price_bar;
mod table;

pub use pattern::*;
pub use price_bar::*;
pub use table::*;
