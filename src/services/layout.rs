// Panel Layout
// Pure transition functions for the reader panel's position and size. The
// surrounding application feeds gestures in and applies (and persists) the
// returned layout; nothing here touches a live surface.

use serde::{Deserialize, Serialize};

/// Distance from a viewport edge at which a dropped panel sticks to it.
pub const SNAP_THRESHOLD: f64 = 20.0;
/// Margin used by the position presets.
pub const PRESET_MARGIN: f64 = 20.0;
pub const MIN_PANEL_WIDTH: f64 = 250.0;
pub const MIN_PANEL_HEIGHT: f64 = 200.0;
pub const DEFAULT_PANEL_WIDTH: f64 = 350.0;
pub const DEFAULT_PANEL_HEIGHT: f64 = 500.0;

/// Persisted CSS-style panel position (sides are set only when pinned).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PanelPosition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
}

/// Persisted CSS-style panel size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PanelSize {
    pub width: String,
    pub height: String,
}

/// Pixel-space panel layout used by the transition functions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for PanelRect {
    fn default() -> Self {
        Self {
            left: PRESET_MARGIN,
            top: 100.0,
            width: DEFAULT_PANEL_WIDTH,
            height: DEFAULT_PANEL_HEIGHT,
        }
    }
}

impl PanelRect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Persistable position value ("<n>px" per pinned side).
    pub fn to_position(&self) -> PanelPosition {
        PanelPosition {
            left: Some(format!("{}px", self.left.round() as i64)),
            top: Some(format!("{}px", self.top.round() as i64)),
            right: None,
            bottom: None,
        }
    }

    /// Persistable size value.
    pub fn to_size(&self) -> PanelSize {
        PanelSize {
            width: format!("{}px", self.width.round() as i64),
            height: format!("{}px", self.height.round() as i64),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionPreset {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

/// Move the panel so its top-left corner tracks a drag point, kept fully
/// inside the viewport.
pub fn drag_to(rect: PanelRect, viewport: Viewport, x: f64, y: f64) -> PanelRect {
    let max_left = (viewport.width - rect.width).max(0.0);
    let max_top = (viewport.height - rect.height).max(0.0);
    PanelRect {
        left: x.clamp(0.0, max_left),
        top: y.clamp(0.0, max_top),
        ..rect
    }
}

/// Stick the panel to any viewport edge it was dropped near.
pub fn snap_to_edges(rect: PanelRect, viewport: Viewport) -> PanelRect {
    let mut snapped = rect;

    if rect.left < SNAP_THRESHOLD {
        snapped.left = 0.0;
    } else if viewport.width - rect.right() < SNAP_THRESHOLD {
        snapped.left = viewport.width - rect.width;
    }

    if rect.top < SNAP_THRESHOLD {
        snapped.top = 0.0;
    } else if viewport.height - rect.bottom() < SNAP_THRESHOLD {
        snapped.top = viewport.height - rect.height;
    }

    snapped
}

/// Resize the panel; a dimension below the minimum keeps its old value,
/// so dragging past the limit just stops the edge there.
pub fn resize_to(rect: PanelRect, width: f64, height: f64) -> PanelRect {
    PanelRect {
        width: if width >= MIN_PANEL_WIDTH {
            width
        } else {
            rect.width
        },
        height: if height >= MIN_PANEL_HEIGHT {
            height
        } else {
            rect.height
        },
        ..rect
    }
}

/// Jump the panel to one of the preset positions.
pub fn apply_preset(rect: PanelRect, viewport: Viewport, preset: PositionPreset) -> PanelRect {
    let far_left = viewport.width - rect.width - PRESET_MARGIN;
    let far_top = viewport.height - rect.height - PRESET_MARGIN;

    let (left, top) = match preset {
        PositionPreset::TopLeft => (PRESET_MARGIN, PRESET_MARGIN),
        PositionPreset::TopRight => (far_left, PRESET_MARGIN),
        PositionPreset::BottomLeft => (PRESET_MARGIN, far_top),
        PositionPreset::BottomRight => (far_left, far_top),
        PositionPreset::Center => (
            (viewport.width - rect.width) / 2.0,
            (viewport.height - rect.height) / 2.0,
        ),
    };

    PanelRect { left, top, ..rect }
}
