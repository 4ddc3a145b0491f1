// Paragraph Builder
// Rebuilds coherent paragraphs from text with noisy line breaks (OCR or
// hand-wrapped sources often split mid-sentence).

use super::title_classifier::is_heading;
use crate::models::{Paragraph, ParagraphKind};

/// A fragment shorter than this many chars may be a spurious line break.
const MERGE_MAX_CHARS: usize = 5;

/// Sentence-terminal characters that rule out a mid-sentence break.
const TERMINAL_CHARS: [char; 4] = ['。', '！', '？', '”'];

fn ends_with_terminal(line: &str) -> bool {
    line.chars()
        .last()
        .map(|c| TERMINAL_CHARS.contains(&c))
        .unwrap_or(false)
}

fn flush(paragraphs: &mut Vec<Paragraph>, accumulator: &mut String) {
    if accumulator.is_empty() {
        return;
    }
    let text = std::mem::take(accumulator);
    let kind = if is_heading(&text) {
        ParagraphKind::Heading
    } else {
        ParagraphKind::Body
    };
    paragraphs.push(Paragraph { text, kind });
}

/// Reconstruct paragraphs from raw chapter text.
///
/// Line endings are normalized to `\n`, then lines are folded into
/// paragraphs with a single accumulator: blank lines flush, heading lines
/// stand alone, and a short fragment without terminal punctuation is
/// treated as a broken line and concatenated onto the open paragraph.
/// Empty input yields an empty list; body paragraphs are never blank.
pub fn reconstruct_paragraphs(text: &str) -> Vec<Paragraph> {
    if text.is_empty() {
        return Vec::new();
    }

    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut paragraphs = Vec::new();
    let mut accumulator = String::new();

    for line in normalized.split('\n') {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            flush(&mut paragraphs, &mut accumulator);
            continue;
        }

        if is_heading(trimmed) {
            flush(&mut paragraphs, &mut accumulator);
            paragraphs.push(Paragraph::heading(trimmed));
            continue;
        }

        if !accumulator.is_empty()
            && trimmed.chars().count() < MERGE_MAX_CHARS
            && !ends_with_terminal(trimmed)
        {
            accumulator.push_str(trimmed);
            continue;
        }

        flush(&mut paragraphs, &mut accumulator);
        accumulator.push_str(trimmed);
    }

    flush(&mut paragraphs, &mut accumulator);
    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(reconstruct_paragraphs("").is_empty());
    }

    #[test]
    fn test_short_fragments_merge() {
        let paragraphs = reconstruct_paragraphs("ab\ncd\n完整的句子。");
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text, "abcd");
        assert_eq!(paragraphs[0].kind, ParagraphKind::Body);
        assert_eq!(paragraphs[1].text, "完整的句子。");
    }

    #[test]
    fn test_blank_line_separates_paragraphs() {
        let paragraphs = reconstruct_paragraphs("第一段内容。\n\n第二段内容。");
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text, "第一段内容。");
        assert_eq!(paragraphs[1].text, "第二段内容。");
    }

    #[test]
    fn test_heading_stands_alone() {
        let paragraphs = reconstruct_paragraphs("前文\n第一章 开端\n正文开始了。");
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[1].text, "第一章 开端");
        assert_eq!(paragraphs[1].kind, ParagraphKind::Heading);
        assert_eq!(paragraphs[0].kind, ParagraphKind::Body);
        assert_eq!(paragraphs[2].kind, ParagraphKind::Body);
    }

    #[test]
    fn test_terminal_punctuation_blocks_merge() {
        // "好。" is short but sentence-final, so it starts a new paragraph.
        let paragraphs = reconstruct_paragraphs("开头的句子\n好。\n这是新的一段内容。");
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[0].text, "开头的句子");
        assert_eq!(paragraphs[1].text, "好。");
        assert_eq!(paragraphs[2].text, "这是新的一段内容。");
    }

    #[test]
    fn test_closing_quote_blocks_merge() {
        let paragraphs = reconstruct_paragraphs("他说\n走？”\n第二句足够长不会合并。");
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[1].text, "走？”");
    }

    #[test]
    fn test_crlf_normalization() {
        let paragraphs = reconstruct_paragraphs("第一段。\r\n\r\n第二段。\r第三段。");
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[2].text, "第三段。");
    }

    #[test]
    fn test_no_blank_body_paragraphs() {
        let paragraphs = reconstruct_paragraphs("  \n\n\t\n正文。\n   \n");
        assert_eq!(paragraphs.len(), 1);
        assert!(paragraphs.iter().all(|p| !p.text.trim().is_empty()));
    }

    #[test]
    fn test_merged_fragments_forming_heading_are_tagged() {
        // Fragments that only form a heading once merged are re-classified
        // at flush time.
        let paragraphs = reconstruct_paragraphs("第一\n章x\n正文内容在这里。");
        assert_eq!(paragraphs[0].text, "第一章x");
        assert_eq!(paragraphs[0].kind, ParagraphKind::Heading);
    }

    #[test]
    fn test_long_lines_never_merge() {
        let paragraphs = reconstruct_paragraphs("这是一行足够长的文字\n这也是足够长的一行");
        assert_eq!(paragraphs.len(), 2);
    }
}
