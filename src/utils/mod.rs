mod logger;

pub use logger::init_logger;

use unicode_width::UnicodeWidthChar;

/// 計算字符串的視覺寬度（考慮寬字元）
/// 中文字元等寬字元會正確計算為 2，ASCII 字元計算為 1
pub fn visual_width(s: &str) -> usize {
    s.chars()
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(1))
        .sum()
}

/// 產生對齊到 `line` 第 `col` 個字符、長度 `len` 個字符的 `^` 標記
pub fn underline(line: &str, col: usize, len: usize) -> String {
    let prefix: String = line.chars().take(col).collect();
    let marked: String = line.chars().skip(col).take(len).collect();
    format!(
        "{}{}",
        " ".repeat(visual_width(&prefix)),
        "^".repeat(visual_width(&marked).max(1))
    )
}
