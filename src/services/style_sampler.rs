// Page Style Sampler
// Frequency-mode voting over caller-supplied element styles, used to blend
// the document disguise into its surroundings in automatic mode.

use crate::models::PageStyle;
use serde::{Deserialize, Serialize};

/// Elements with less visible text than this are ignored as style evidence.
const MIN_SAMPLE_TEXT_CHARS: usize = 10;

/// Computed style of one candidate element, harvested by the caller. The
/// core never inspects a live presentation tree.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyleSample {
    /// Visible text content of the element (used only for the length gate).
    pub text: String,
    pub color: String,
    pub font_family: String,
    pub background_color: String,
    pub font_size: String,
    pub line_height: String,
}

/// Occurrence tally that keeps first-seen order, so ties resolve to the
/// value encountered first.
#[derive(Debug, Default)]
struct Tally {
    counts: Vec<(String, usize)>,
}

impl Tally {
    fn bump(&mut self, value: &str) {
        if value.is_empty() {
            return;
        }
        if let Some(entry) = self.counts.iter_mut().find(|(v, _)| v == value) {
            entry.1 += 1;
        } else {
            self.counts.push((value.to_string(), 1));
        }
    }

    fn mode(&self) -> Option<String> {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.counts {
            if best.map_or(true, |b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(value, _)| value.clone())
    }
}

fn is_transparent(background: &str) -> bool {
    background == "transparent" || background == "rgba(0, 0, 0, 0)"
}

/// Pick the most frequent value of each style attribute across the
/// samples, falling back to fixed defaults when no evidence exists.
/// Pure aggregation; the input is not mutated.
pub fn sample_page_style(samples: &[ElementStyleSample]) -> PageStyle {
    let mut colors = Tally::default();
    let mut font_families = Tally::default();
    let mut background_colors = Tally::default();
    let mut font_sizes = Tally::default();
    let mut line_heights = Tally::default();

    for sample in samples {
        if sample.text.trim().chars().count() < MIN_SAMPLE_TEXT_CHARS {
            continue;
        }

        colors.bump(&sample.color);
        font_families.bump(&sample.font_family);
        if !is_transparent(&sample.background_color) {
            background_colors.bump(&sample.background_color);
        }
        font_sizes.bump(&sample.font_size);
        if sample.line_height != "normal" && sample.line_height != "auto" {
            line_heights.bump(&sample.line_height);
        }
    }

    let defaults = PageStyle::default();
    PageStyle {
        color: colors.mode().unwrap_or(defaults.color),
        font_family: font_families.mode().unwrap_or(defaults.font_family),
        background_color: background_colors
            .mode()
            .unwrap_or(defaults.background_color),
        font_size: font_sizes.mode().unwrap_or(defaults.font_size),
        line_height: line_heights.mode().unwrap_or(defaults.line_height),
    }
}
