// Document disguise: one styled block per paragraph.

use crate::models::{Paragraph, ParagraphKind, RenderedBlock};

/// Headings become centered bold blocks, body paragraphs indented
/// justified blocks. Blank paragraphs are dropped.
pub fn document_blocks(paragraphs: &[Paragraph]) -> Vec<RenderedBlock> {
    paragraphs
        .iter()
        .filter(|p| !p.text.trim().is_empty())
        .map(|p| match p.kind {
            ParagraphKind::Heading => RenderedBlock::Heading {
                text: p.text.clone(),
            },
            ParagraphKind::Body => RenderedBlock::Body {
                text: p.text.clone(),
            },
        })
        .collect()
}
