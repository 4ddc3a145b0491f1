// Disguise Themes
// Chrome palette and typography for each disguise variant. The automatic
// theme derives its shades from the sampled page style so the panel blends
// into its surroundings.

use super::StyleContext;
use crate::models::{DisguiseMode, DisguiseTheme, PageStyle};
use regex::Regex;
use std::sync::OnceLock;

fn rgb_pattern() -> &'static Regex {
    static RGB: OnceLock<Regex> = OnceLock::new();
    RGB.get_or_init(|| Regex::new(r"rgb\((\d+),\s*(\d+),\s*(\d+)\)").unwrap())
}

/// Lighten (positive amount) or darken (negative amount) a CSS color given
/// as `rgb(r, g, b)` or `#rrggbb`. Unparseable input falls back to plain
/// white or grey depending on direction.
pub fn adjust_color(color: &str, amount: i32) -> String {
    let channels = if let Some(caps) = rgb_pattern().captures(color) {
        let parse = |i: usize| caps[i].parse::<i32>().ok();
        match (parse(1), parse(2), parse(3)) {
            (Some(r), Some(g), Some(b)) => Some((r, g, b)),
            _ => None,
        }
    } else if let Some(hex) = color.strip_prefix('#') {
        if hex.len() == 6 {
            let parse = |range: std::ops::Range<usize>| i32::from_str_radix(&hex[range], 16).ok();
            match (parse(0..2), parse(2..4), parse(4..6)) {
                (Some(r), Some(g), Some(b)) => Some((r, g, b)),
                _ => None,
            }
        } else {
            None
        }
    } else {
        None
    };

    match channels {
        Some((r, g, b)) => {
            let r = (r + amount).clamp(0, 255);
            let g = (g + amount).clamp(0, 255);
            let b = (b + amount).clamp(0, 255);
            format!("#{r:02x}{g:02x}{b:02x}")
        }
        None => {
            if amount > 0 {
                "#ffffff".to_string()
            } else {
                "#dddddd".to_string()
            }
        }
    }
}

/// Code-editor chrome: dark background, monospace listing.
pub fn code_theme() -> DisguiseTheme {
    DisguiseTheme {
        header_background: "#1e1e1e".to_string(),
        header_color: "#d4d4d4".to_string(),
        header_border: "#333".to_string(),
        background: "#1e1e1e".to_string(),
        border: "#333".to_string(),
        content_color: "#d4d4d4".to_string(),
        content_font_family: "Consolas, Monaco, \"Courier New\", monospace".to_string(),
        content_font_size: "14px".to_string(),
        content_line_height: "1.6".to_string(),
    }
}

/// Spreadsheet chrome: green header bar over a white grid.
pub fn excel_theme() -> DisguiseTheme {
    DisguiseTheme {
        header_background: "#217346".to_string(),
        header_color: "white".to_string(),
        header_border: "#185a34".to_string(),
        background: "white".to_string(),
        border: "#d4d4d4".to_string(),
        content_color: "#333".to_string(),
        content_font_family: "Calibri, Arial, sans-serif".to_string(),
        content_font_size: "12px".to_string(),
        content_line_height: "1.5".to_string(),
    }
}

/// Plain-document chrome: light header, serif body text.
pub fn document_theme() -> DisguiseTheme {
    DisguiseTheme {
        header_background: "#F5F5F5".to_string(),
        header_color: "#333".to_string(),
        header_border: "#e0e0e0".to_string(),
        background: "white".to_string(),
        border: "#e0e0e0".to_string(),
        content_color: "#333".to_string(),
        content_font_family: "\"Times New Roman\", Georgia, serif".to_string(),
        content_font_size: "14px".to_string(),
        content_line_height: "1.8".to_string(),
    }
}

/// Theme derived from the sampled page style: the header and borders are
/// slightly darker shades of the ambient background, and the configured
/// font override replaces the sampled font family when present.
pub fn auto_theme(page: &PageStyle, font_override: Option<&str>) -> DisguiseTheme {
    let header_background = adjust_color(&page.background_color, -15);
    let header_border = adjust_color(&header_background, -10);
    let border = adjust_color(&page.background_color, -20);

    DisguiseTheme {
        header_color: page.color.clone(),
        header_background,
        header_border,
        background: page.background_color.clone(),
        border,
        content_color: page.color.clone(),
        content_font_family: font_override.unwrap_or(&page.font_family).to_string(),
        content_font_size: page.font_size.clone(),
        content_line_height: page.line_height.clone(),
    }
}

/// Resolve the theme for a disguise mode and style context.
pub fn theme_for(mode: DisguiseMode, style: &StyleContext) -> DisguiseTheme {
    match mode {
        DisguiseMode::Auto => auto_theme(&style.page, style.font_override()),
        DisguiseMode::Code => code_theme(),
        DisguiseMode::Excel => excel_theme(),
        DisguiseMode::Document => document_theme(),
    }
}
