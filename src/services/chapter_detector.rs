// Chapter Detector
// Scans raw novel text for heading candidates and produces an ordered list
// of chapter spans covering the whole text.

use super::title_classifier::{HEADING_NUMERALS, HEADING_UNITS};
use crate::models::ChapterSpan;
use regex::Regex;
use std::sync::OnceLock;
use tracing::info;

/// Title of the single fallback span when no headings are found.
pub const FULL_TEXT_TITLE: &str = "Full Text";

/// Title of the leading span when text precedes the first heading.
pub const PREFACE_TITLE: &str = "Preface";

#[derive(Debug, Clone, Copy, Default)]
pub struct DetectorOptions {
    /// Collapse candidates from different pattern families that landed on
    /// the same offset, keeping the first. Off by default: duplicate hits
    /// are preserved as found, each extra hit yielding a zero-length span.
    pub collapse_same_offset: bool,
}

#[derive(Debug, Clone)]
struct HeadingCandidate {
    offset: usize,
    title: String,
}

/// Find-all forms of the heading families. Unanchored (a marker anywhere
/// in the text counts, trading precision for recall) but bounded to one
/// line, so a candidate's title is the rest of its heading line.
fn candidate_patterns() -> &'static [Regex; 3] {
    static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(&format!(
                r"第[ \t]*[{HEADING_NUMERALS}]+[ \t]*[{HEADING_UNITS}][^\n]*"
            ))
            .unwrap(),
            Regex::new(r"(?i)chapter[ \t]*[0-9]+[^\n]*").unwrap(),
            Regex::new(&format!(r"[{HEADING_NUMERALS}]+[.、][ \t]*[^\n]+")).unwrap(),
        ]
    })
}

/// Collect every pattern hit as a candidate heading. Candidates from all
/// families are merged and stably sorted by offset; hits from different
/// families over the same region are NOT deduplicated.
fn find_heading_candidates(text: &str) -> Vec<HeadingCandidate> {
    let mut candidates = Vec::new();
    for re in candidate_patterns() {
        for m in re.find_iter(text) {
            candidates.push(HeadingCandidate {
                offset: m.start(),
                title: m.as_str().trim().to_string(),
            });
        }
    }
    candidates.sort_by_key(|c| c.offset);
    candidates
}

/// Detect chapter spans with default options.
pub fn detect_chapters(text: &str) -> Vec<ChapterSpan> {
    detect_chapters_with(text, &DetectorOptions::default())
}

/// Detect chapter spans.
///
/// Guarantees: spans are returned in ascending `start` order and their
/// union covers `[0, text.len())` exactly once in aggregate. Offsets are
/// UTF-8 byte offsets. Empty text yields the single "Full Text" span.
pub fn detect_chapters_with(text: &str, options: &DetectorOptions) -> Vec<ChapterSpan> {
    if text.is_empty() {
        return vec![ChapterSpan {
            title: FULL_TEXT_TITLE.to_string(),
            start: 0,
            end: 0,
        }];
    }

    let mut candidates = find_heading_candidates(text);
    if options.collapse_same_offset {
        candidates.dedup_by_key(|c| c.offset);
    }

    if candidates.is_empty() {
        return vec![ChapterSpan {
            title: FULL_TEXT_TITLE.to_string(),
            start: 0,
            end: text.len(),
        }];
    }

    let mut spans = Vec::with_capacity(candidates.len() + 1);

    if candidates[0].offset > 0 {
        spans.push(ChapterSpan {
            title: PREFACE_TITLE.to_string(),
            start: 0,
            end: candidates[0].offset,
        });
    }

    for (i, candidate) in candidates.iter().enumerate() {
        let end = candidates
            .get(i + 1)
            .map(|next| next.offset)
            .unwrap_or(text.len());
        spans.push(ChapterSpan {
            title: candidate.title.clone(),
            start: candidate.offset,
            end,
        });
    }

    info!(
        "[chapters] {} heading candidates -> {} spans",
        candidates.len(),
        spans.len()
    );

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covers(text: &str, spans: &[ChapterSpan]) {
        assert_eq!(spans.first().unwrap().start, 0);
        assert_eq!(spans.last().unwrap().end, text.len());
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_chinese_chapters_no_preface() {
        let text = "第一章 开端\n内容A\n第二章 发展\n内容B";
        let spans = detect_chapters(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].title, "第一章 开端");
        assert_eq!(spans[1].title, "第二章 发展");
        assert_eq!(spans[0].start, 0);
        assert_covers(text, &spans);
    }

    #[test]
    fn test_preface_before_first_heading() {
        let text = "intro text\nChapter 1\nbody";
        let spans = detect_chapters(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].title, PREFACE_TITLE);
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[0].end, text.find("Chapter").unwrap());
        assert_eq!(spans[1].title, "Chapter 1");
        assert_covers(text, &spans);
    }

    #[test]
    fn test_no_headings_fallback() {
        let text = "只是一段没有任何章节标记的文本。";
        let spans = detect_chapters(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].title, FULL_TEXT_TITLE);
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[0].end, text.len());
    }

    #[test]
    fn test_empty_text_fallback() {
        let spans = detect_chapters("");
        assert_eq!(
            spans,
            vec![ChapterSpan {
                title: FULL_TEXT_TITLE.to_string(),
                start: 0,
                end: 0,
            }]
        );
    }

    #[test]
    fn test_idempotence() {
        let text = "前言\n第一章 A\n正文\n第二章 B\n正文";
        assert_eq!(detect_chapters(text), detect_chapters(text));
    }

    #[test]
    fn test_ascending_order() {
        let text = "Chapter 1\nfoo\n第二章 bar\nbaz\n3. qux\nquux";
        let spans = detect_chapters(text);
        for pair in spans.windows(2) {
            assert!(pair[0].start < pair[1].start);
        }
        assert_covers(text, &spans);
    }

    #[test]
    fn test_overlapping_families_are_kept() {
        // "一、" matches the enumerated family at the line start while the
        // ordinal family matches three bytes in; both hits survive.
        let text = "一、第一章 开端\n正文内容";
        let spans = detect_chapters(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].title, "一、第一章 开端");
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[0].end, "一、".len());
        assert_eq!(spans[1].title, "第一章 开端");
        assert_covers(text, &spans);
    }

    #[test]
    fn test_collapse_same_offset_option() {
        let options = DetectorOptions {
            collapse_same_offset: true,
        };
        // No same-offset duplicates here, so the result matches the default.
        let text = "第一章 A\nbody\n第二章 B\nbody";
        assert_eq!(detect_chapters_with(text, &options), detect_chapters(text));
    }

    #[test]
    fn test_marker_inside_line_is_still_found() {
        // Recall over precision: a marker mid-text is treated as a heading.
        let text = "说明：请看第三章 高潮部分。\n其他内容";
        let spans = detect_chapters(text);
        assert_eq!(spans[0].title, PREFACE_TITLE);
        assert!(spans.iter().any(|s| s.title.starts_with("第三章")));
    }
}
