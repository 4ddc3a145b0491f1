// Spreadsheet disguise: paragraphs as a two-column row grid.

use crate::models::{Paragraph, RenderedBlock};

/// Column headers of the fixed first row.
pub const HEADER_CELLS: [&str; 2] = ["行号", "内容"];

/// A fixed header row followed by one data row per non-blank paragraph.
/// Row indices are 1-based and dense: skipped blank paragraphs do not
/// consume an index.
pub fn table_rows(paragraphs: &[Paragraph]) -> Vec<RenderedBlock> {
    let mut blocks = Vec::with_capacity(paragraphs.len() + 1);
    blocks.push(RenderedBlock::HeaderRow {
        cells: HEADER_CELLS.iter().map(|c| c.to_string()).collect(),
    });

    let mut row_number = 0;
    for paragraph in paragraphs {
        if paragraph.text.trim().is_empty() {
            continue;
        }
        row_number += 1;
        blocks.push(RenderedBlock::DataRow {
            row_number,
            text: paragraph.text.clone(),
        });
    }

    blocks
}
