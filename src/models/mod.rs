// Infiltra Data Models
// Shared types for the segmentation and disguise-rendering pipeline

use serde::{Deserialize, Serialize};

// ============ Novel & Chapters ============

/// An imported novel: immutable raw text plus a display title.
/// Replaced wholesale on re-import, never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Novel {
    pub title: String,
    pub content: String,
}

impl Novel {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// 章节范围：标题 + 半开区间
/// `start`/`end` are UTF-8 byte offsets (0-based, end-exclusive) into the
/// novel content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterSpan {
    pub title: String,
    pub start: usize,
    pub end: usize,
}

impl ChapterSpan {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

// ============ Paragraphs ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphKind {
    Heading,
    Body,
}

/// A trimmed, non-empty run of text produced by paragraph reconstruction.
/// Derived per chapter view on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    pub kind: ParagraphKind,
}

impl Paragraph {
    pub fn heading(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ParagraphKind::Heading,
        }
    }

    pub fn body(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ParagraphKind::Body,
        }
    }

    pub fn is_heading(&self) -> bool {
        self.kind == ParagraphKind::Heading
    }
}

// ============ Disguise modes ============

/// Config-level disguise selection, as stored in `ReaderConfig`.
/// `Auto` renders as a document themed from the sampled page style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisguiseMode {
    Auto,
    Code,
    Excel,
    Document,
}

impl DisguiseMode {
    /// Parse a stored mode string; unknown values fall back to `Auto`.
    pub fn from_str(val: &str) -> Self {
        match val.trim().to_lowercase().as_str() {
            "code" => Self::Code,
            "excel" => Self::Excel,
            "document" => Self::Document,
            _ => Self::Auto,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Code => "code",
            Self::Excel => "excel",
            Self::Document => "document",
        }
    }

    /// The rendering variant this mode maps to.
    pub fn variant(self) -> RenderMode {
        match self {
            Self::Code => RenderMode::Code,
            Self::Excel => RenderMode::Spreadsheet,
            Self::Auto | Self::Document => RenderMode::Document,
        }
    }
}

impl Default for DisguiseMode {
    fn default() -> Self {
        Self::Auto
    }
}

/// Which rendering variant applies. Orthogonal to chapter/paragraph data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Document,
    Code,
    Spreadsheet,
}

// ============ Reading position ============

/// Mutable session state owned by the surrounding application. The core
/// reads and returns it as an explicit value only; it holds no ambient
/// position state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReadingPosition {
    pub chapter_index: usize,
    pub scroll_offset: f64,
}

// ============ Sampled page style ============

/// The ambient style parameters inferred from the surrounding page, used
/// to theme the document disguise in automatic mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStyle {
    pub font_family: String,
    pub font_size: String,
    pub color: String,
    pub background_color: String,
    pub line_height: String,
}

impl Default for PageStyle {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: "14px".to_string(),
            color: "#333".to_string(),
            background_color: "#fff".to_string(),
            line_height: "1.5".to_string(),
        }
    }
}

// ============ Disguise theme ============

/// Chrome colors and typography for one disguise variant. Built-in per
/// mode, or derived from a `PageStyle` in automatic mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisguiseTheme {
    pub header_background: String,
    pub header_color: String,
    pub header_border: String,
    pub background: String,
    pub border: String,
    pub content_color: String,
    pub content_font_family: String,
    pub content_font_size: String,
    pub content_line_height: String,
}

// ============ Rendered output ============

/// One styled block of the renderable tree. Materializing blocks into an
/// actual presentation surface is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum RenderedBlock {
    /// Centered bold chapter/section heading (document disguise).
    Heading { text: String },
    /// Indented justified body paragraph (document disguise).
    Body { text: String },
    /// One numbered source line (code disguise). Blank lines keep their
    /// line number.
    CodeLine { line_number: usize, text: String },
    /// Fixed column-header row (spreadsheet disguise).
    HeaderRow { cells: Vec<String> },
    /// One data row with a dense 1-based row index (spreadsheet disguise).
    DataRow { row_number: usize, text: String },
    /// Informational block shown instead of empty content.
    Placeholder { message: String },
}

/// The renderable result for one chapter in one disguise: an ordered block
/// list plus the theme to draw it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedOutput {
    pub mode: RenderMode,
    pub theme: DisguiseTheme,
    pub blocks: Vec<RenderedBlock>,
}

impl RenderedOutput {
    /// True when the output consists solely of the empty-content
    /// placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.blocks.as_slice(), [RenderedBlock::Placeholder { .. }])
    }
}
