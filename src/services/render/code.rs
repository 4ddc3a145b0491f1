// Code disguise: the raw chapter text as a numbered source listing.

use crate::models::RenderedBlock;

/// One numbered block per raw line, trimmed, starting at line 1. Blank
/// lines keep their number, matching a real editor gutter. Empty input
/// yields no lines.
pub fn code_lines(chapter_text: &str) -> Vec<RenderedBlock> {
    if chapter_text.is_empty() {
        return Vec::new();
    }

    chapter_text
        .split('\n')
        .enumerate()
        .map(|(index, line)| RenderedBlock::CodeLine {
            line_number: index + 1,
            text: line.trim().to_string(),
        })
        .collect()
}
