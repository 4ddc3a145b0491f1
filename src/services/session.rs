// Reader Session
// The explicit session value that threads the imported novel, its chapter
// spans and the reading position through the pipeline. All state lives in
// this value; there is no ambient singleton.

use super::chapter_detector::{detect_chapters_with, DetectorOptions};
use super::paragraph_builder::reconstruct_paragraphs;
use super::render::{render, StyleContext};
use crate::models::{ChapterSpan, DisguiseMode, Novel, ReadingPosition, RenderedOutput};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReaderError {
    #[error("chapter index {index} out of range ({count} chapters)")]
    ChapterOutOfRange { index: usize, count: usize },
}

/// Slice a byte range out of `text`, clamping both ends onto char
/// boundaries so a stale offset can never split a UTF-8 sequence.
fn slice_by_bytes(text: &str, start: usize, end: usize) -> &str {
    let len = text.len();
    let mut s = start.min(len);
    let mut e = end.min(len);
    if s >= e {
        return "";
    }
    while s < e && !text.is_char_boundary(s) {
        s += 1;
    }
    while e > s && !text.is_char_boundary(e) {
        e -= 1;
    }
    text.get(s..e).unwrap_or("")
}

/// One chapter rendered for display.
#[derive(Debug, Clone)]
pub struct ChapterView {
    pub index: usize,
    pub title: String,
    pub output: RenderedOutput,
}

/// A loaded novel plus derived chapter spans and the current reading
/// position. Spans are computed once at import and only replaced wholesale
/// by the next import.
///
/// Invariant: `position.chapter_index` is always a valid chapter index
/// (the detector returns at least one span, and every mutation below is
/// bounds-checked).
#[derive(Debug, Clone)]
pub struct ReaderSession {
    novel: Novel,
    chapters: Vec<ChapterSpan>,
    position: ReadingPosition,
}

impl ReaderSession {
    /// Import a novel and detect its chapters.
    pub fn import(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::import_with(title, content, &DetectorOptions::default())
    }

    pub fn import_with(
        title: impl Into<String>,
        content: impl Into<String>,
        options: &DetectorOptions,
    ) -> Self {
        let novel = Novel::new(title, content);
        let chapters = detect_chapters_with(&novel.content, options);
        info!(
            "[session] imported '{}': {} bytes, {} chapters",
            novel.title,
            novel.content.len(),
            chapters.len()
        );
        Self {
            novel,
            chapters,
            position: ReadingPosition::default(),
        }
    }

    pub fn novel(&self) -> &Novel {
        &self.novel
    }

    pub fn chapters(&self) -> &[ChapterSpan] {
        &self.chapters
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn position(&self) -> ReadingPosition {
        self.position
    }

    /// Record the scroll offset reported by the presentation layer.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.position.scroll_offset = offset;
    }

    /// Restore a previously saved position, e.g. across application runs.
    /// Fails if the stored chapter index does not fit the current novel.
    pub fn restore_position(&mut self, position: ReadingPosition) -> Result<(), ReaderError> {
        self.check_index(position.chapter_index)?;
        self.position = position;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), ReaderError> {
        if index >= self.chapters.len() {
            return Err(ReaderError::ChapterOutOfRange {
                index,
                count: self.chapters.len(),
            });
        }
        Ok(())
    }

    /// Jump to a chapter. Out-of-range indices are rejected, never clamped
    /// or wrapped. Selecting a chapter resets the scroll offset.
    pub fn select_chapter(&mut self, index: usize) -> Result<(), ReaderError> {
        self.check_index(index)?;
        self.position = ReadingPosition {
            chapter_index: index,
            scroll_offset: 0.0,
        };
        Ok(())
    }

    /// Advance to the next chapter; stays put at the last one.
    pub fn next_chapter(&mut self) -> bool {
        if self.position.chapter_index + 1 < self.chapters.len() {
            self.position.chapter_index += 1;
            self.position.scroll_offset = 0.0;
            true
        } else {
            false
        }
    }

    /// Go back one chapter; stays put at the first one.
    pub fn prev_chapter(&mut self) -> bool {
        if self.position.chapter_index > 0 {
            self.position.chapter_index -= 1;
            self.position.scroll_offset = 0.0;
            true
        } else {
            false
        }
    }

    pub fn current_chapter(&self) -> &ChapterSpan {
        &self.chapters[self.position.chapter_index]
    }

    /// Raw text of the current chapter.
    pub fn chapter_text(&self) -> &str {
        let span = self.current_chapter();
        slice_by_bytes(&self.novel.content, span.start, span.end)
    }

    /// Raw text of an arbitrary chapter.
    pub fn chapter_text_at(&self, index: usize) -> Result<&str, ReaderError> {
        self.check_index(index)?;
        let span = &self.chapters[index];
        Ok(slice_by_bytes(&self.novel.content, span.start, span.end))
    }

    /// Render the current chapter in the given disguise.
    pub fn render_current(&self, mode: DisguiseMode, style: &StyleContext) -> RenderedOutput {
        let text = self.chapter_text();
        let paragraphs = reconstruct_paragraphs(text);
        render(mode, text, &paragraphs, style)
    }

    /// Render an arbitrary chapter in the given disguise.
    pub fn view_chapter(
        &self,
        index: usize,
        mode: DisguiseMode,
        style: &StyleContext,
    ) -> Result<ChapterView, ReaderError> {
        let text = self.chapter_text_at(index)?;
        let paragraphs = reconstruct_paragraphs(text);
        Ok(ChapterView {
            index,
            title: self.chapters[index].title.clone(),
            output: render(mode, text, &paragraphs, style),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RenderedBlock;

    const NOVEL: &str = "前言部分。\n第一章 开端\n开端的正文在这里。\n第二章 发展\n发展的正文在这里。";

    #[test]
    fn test_import_detects_chapters() {
        let session = ReaderSession::import("测试小说", NOVEL);
        assert_eq!(session.chapter_count(), 3);
        assert_eq!(session.chapters()[0].title, "Preface");
        assert_eq!(session.chapters()[1].title, "第一章 开端");
        assert_eq!(session.position().chapter_index, 0);
    }

    #[test]
    fn test_select_chapter_rejects_out_of_range() {
        let mut session = ReaderSession::import("测试小说", NOVEL);
        assert_eq!(
            session.select_chapter(99),
            Err(ReaderError::ChapterOutOfRange {
                index: 99,
                count: 3
            })
        );
        assert!(session.select_chapter(2).is_ok());
        assert_eq!(session.position().chapter_index, 2);
    }

    #[test]
    fn test_navigation_stops_at_bounds() {
        let mut session = ReaderSession::import("测试小说", NOVEL);
        assert!(!session.prev_chapter());
        assert!(session.next_chapter());
        assert!(session.next_chapter());
        assert!(!session.next_chapter());
        assert_eq!(session.position().chapter_index, 2);
        assert!(session.prev_chapter());
        assert_eq!(session.position().chapter_index, 1);
    }

    #[test]
    fn test_navigation_resets_scroll() {
        let mut session = ReaderSession::import("测试小说", NOVEL);
        session.set_scroll_offset(120.5);
        assert_eq!(session.position().scroll_offset, 120.5);
        session.next_chapter();
        assert_eq!(session.position().scroll_offset, 0.0);
    }

    #[test]
    fn test_chapter_text_slices_current_span() {
        let mut session = ReaderSession::import("测试小说", NOVEL);
        assert_eq!(session.chapter_text(), "前言部分。\n");
        session.select_chapter(1).unwrap();
        assert!(session.chapter_text().starts_with("第一章 开端"));
        assert!(session.chapter_text().contains("开端的正文在这里。"));
        assert!(!session.chapter_text().contains("第二章"));
    }

    #[test]
    fn test_restore_position_validates_index() {
        let mut session = ReaderSession::import("测试小说", NOVEL);
        let stale = ReadingPosition {
            chapter_index: 7,
            scroll_offset: 10.0,
        };
        assert!(session.restore_position(stale).is_err());
        let good = ReadingPosition {
            chapter_index: 1,
            scroll_offset: 10.0,
        };
        assert!(session.restore_position(good).is_ok());
        assert_eq!(session.position().scroll_offset, 10.0);
    }

    #[test]
    fn test_view_chapter_renders_document_blocks() {
        let session = ReaderSession::import("测试小说", NOVEL);
        let view = session
            .view_chapter(1, DisguiseMode::Document, &StyleContext::default())
            .unwrap();
        assert_eq!(view.title, "第一章 开端");
        assert_eq!(
            view.output.blocks[0],
            RenderedBlock::Heading {
                text: "第一章 开端".to_string()
            }
        );
        assert_eq!(
            view.output.blocks[1],
            RenderedBlock::Body {
                text: "开端的正文在这里。".to_string()
            }
        );
    }

    #[test]
    fn test_view_chapter_out_of_range() {
        let session = ReaderSession::import("测试小说", NOVEL);
        assert!(session
            .view_chapter(3, DisguiseMode::Code, &StyleContext::default())
            .is_err());
    }

    #[test]
    fn test_empty_import_renders_placeholder() {
        let session = ReaderSession::import("空白", "");
        assert_eq!(session.chapter_count(), 1);
        assert_eq!(session.chapter_text(), "");
        let output = session.render_current(DisguiseMode::Excel, &StyleContext::default());
        assert!(output.is_placeholder());
    }

    #[test]
    fn test_slice_by_bytes_clamps_to_char_boundaries() {
        let text = "第一章";
        assert_eq!(slice_by_bytes(text, 0, 3), "第");
        // Offsets inside a UTF-8 sequence shrink to the nearest boundary.
        assert_eq!(slice_by_bytes(text, 1, 3), "");
        assert_eq!(slice_by_bytes(text, 0, 4), "第");
        assert_eq!(slice_by_bytes(text, 0, 100), text);
    }
}
