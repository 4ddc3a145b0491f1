// Title Classifier
// Decides whether a single line is a chapter/section heading. Shared by
// chapter detection and paragraph rebuilding.

use regex::Regex;
use std::sync::OnceLock;

/// Numeral class accepted in headings: Arabic digits plus the CJK numeral
/// ideographs through 万.
pub(crate) const HEADING_NUMERALS: &str = "0-9一二三四五六七八九十百千万";

/// Ordinal unit ideographs that close a Chinese chapter marker (章/节/卷/集/部/篇).
pub(crate) const HEADING_UNITS: &str = "章节卷集部篇";

/// The three heading pattern families, in priority order:
/// 1. Chinese ordinal markers ("第三章", "第 12 节")
/// 2. Latin chapter headings ("Chapter 7", case-insensitive)
/// 3. Enumerated headings ("1. Title", "一、引言")
fn heading_patterns() -> &'static [Regex; 3] {
    static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(&format!(
                r"^\s*第\s*[{HEADING_NUMERALS}]+\s*[{HEADING_UNITS}]"
            ))
            .unwrap(),
            Regex::new(r"(?i)^\s*chapter\s*[0-9]+").unwrap(),
            Regex::new(&format!(r"^\s*[{HEADING_NUMERALS}]+[.、]\s*.+")).unwrap(),
        ]
    })
}

/// True when the line matches any heading pattern family.
/// Pure and total: empty or non-matching input returns false.
pub fn is_heading(line: &str) -> bool {
    if line.is_empty() {
        return false;
    }
    heading_patterns().iter().any(|re| re.is_match(line))
}
