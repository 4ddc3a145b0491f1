// Disguise Renderer
// Turns a chapter's text and paragraphs into a renderable block tree for
// one of the disguise variants:
// - document: styled heading/body blocks
// - code: a numbered source listing
// - spreadsheet: a two-column row grid
// Materializing the tree into actual UI elements is the caller's concern.

pub mod code;
pub mod document;
pub mod spreadsheet;
pub mod theme;

use crate::models::{DisguiseMode, PageStyle, Paragraph, RenderedBlock, RenderedOutput};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use theme::{adjust_color, theme_for};

/// Shown instead of an empty chapter, in every disguise.
pub const EMPTY_CHAPTER_MESSAGE: &str = "本章节内容为空";

/// Styling inputs supplied by the caller: the sampled ambient page style
/// plus the configured font family ("auto" keeps the sampled font).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleContext {
    pub font_family: String,
    pub page: PageStyle,
}

impl StyleContext {
    pub fn new(font_family: impl Into<String>, page: PageStyle) -> Self {
        Self {
            font_family: font_family.into(),
            page,
        }
    }

    /// The explicit font override, if one is configured.
    pub fn font_override(&self) -> Option<&str> {
        let font = self.font_family.trim();
        if font.is_empty() || font.eq_ignore_ascii_case("auto") {
            None
        } else {
            Some(font)
        }
    }
}

impl Default for StyleContext {
    fn default() -> Self {
        Self {
            font_family: "auto".to_string(),
            page: PageStyle::default(),
        }
    }
}

/// Render one chapter in the given disguise.
///
/// Pure transformation: empty or whitespace-only chapter text yields a
/// single placeholder block rather than an error or empty output.
pub fn render(
    mode: DisguiseMode,
    chapter_text: &str,
    paragraphs: &[Paragraph],
    style: &StyleContext,
) -> RenderedOutput {
    let theme = theme_for(mode, style);
    let variant = mode.variant();

    if chapter_text.trim().is_empty() {
        return RenderedOutput {
            mode: variant,
            theme,
            blocks: vec![placeholder()],
        };
    }

    let blocks = match mode {
        DisguiseMode::Code => code::code_lines(chapter_text),
        DisguiseMode::Excel => spreadsheet::table_rows(paragraphs),
        DisguiseMode::Auto | DisguiseMode::Document => document::document_blocks(paragraphs),
    };

    let blocks = if blocks.is_empty() {
        vec![placeholder()]
    } else {
        blocks
    };

    debug!(
        "[render] mode={} blocks={}",
        mode.as_str(),
        blocks.len()
    );

    RenderedOutput {
        mode: variant,
        theme,
        blocks,
    }
}

fn placeholder() -> RenderedBlock {
    RenderedBlock::Placeholder {
        message: EMPTY_CHAPTER_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RenderMode;
    use crate::services::paragraph_builder::reconstruct_paragraphs;

    #[test]
    fn test_empty_chapter_yields_placeholder_in_every_mode() {
        for mode in [
            DisguiseMode::Auto,
            DisguiseMode::Code,
            DisguiseMode::Excel,
            DisguiseMode::Document,
        ] {
            let output = render(mode, "", &[], &StyleContext::default());
            assert!(output.is_placeholder(), "mode {:?}", mode);
        }
    }

    #[test]
    fn test_whitespace_only_chapter_yields_placeholder() {
        let output = render(DisguiseMode::Code, "  \n\t\n ", &[], &StyleContext::default());
        assert!(output.is_placeholder());
    }

    #[test]
    fn test_mode_maps_to_render_variant() {
        let paragraphs = reconstruct_paragraphs("一些正文内容。");
        let output = render(
            DisguiseMode::Excel,
            "一些正文内容。",
            &paragraphs,
            &StyleContext::default(),
        );
        assert_eq!(output.mode, RenderMode::Spreadsheet);

        let output = render(
            DisguiseMode::Auto,
            "一些正文内容。",
            &paragraphs,
            &StyleContext::default(),
        );
        assert_eq!(output.mode, RenderMode::Document);
    }

    #[test]
    fn test_font_override_resolution() {
        let auto = StyleContext::default();
        assert_eq!(auto.font_override(), None);

        let explicit = StyleContext::new("Georgia", PageStyle::default());
        assert_eq!(explicit.font_override(), Some("Georgia"));

        let blank = StyleContext::new("  ", PageStyle::default());
        assert_eq!(blank.font_override(), None);
    }
}
