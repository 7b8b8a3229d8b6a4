//! 지원 패턴 목록 명령어.

use std::fmt::Write;

use checker_analytics::default_color;
use checker_core::PatternKind;

/// 지원 패턴 표를 문자열로 만듭니다.
pub fn render_patterns() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<20} {:<8} {:>4} {:<8}", "Pattern", "Bias", "Bars", "Color");
    let _ = writeln!(out, "{}", "-".repeat(43));
    for kind in PatternKind::ALL {
        let _ = writeln!(
            out,
            "{:<20} {:<8} {:>4} {:<8}",
            kind.column_name(),
            kind.bias(),
            kind.bar_span(),
            default_color(kind)
        );
    }
    out
}

/// 지원 패턴 표 출력.
pub fn print_patterns() {
    print!("{}", render_patterns());
}
