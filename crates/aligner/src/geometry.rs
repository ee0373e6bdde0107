use serde::{Deserialize, Serialize};

/// Client-space rectangle, as reported by the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Rect {
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Size of the visible reading area
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether the rect lies entirely inside the viewport
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.top >= 0.0 && rect.left >= 0.0 && rect.bottom <= self.height && rect.right <= self.width
    }
}

/// Anchor nearest to the top of the viewport
///
/// Only anchors fully inside the viewport compete, plus the last anchor,
/// which is always a candidate so a reader past every excerpt stays on the
/// final one. Ties keep the earlier anchor.
pub fn closest_to_top(anchors: &[Rect], viewport: Viewport) -> Option<usize> {
    let last = anchors.len().checked_sub(1)?;
    let mut best: Option<(usize, f64)> = None;

    for (idx, rect) in anchors.iter().enumerate() {
        if !(viewport.contains(rect) || idx == last) {
            continue;
        }
        let distance = rect.top.abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((idx, distance)),
        }
    }

    best.map(|(idx, _)| idx)
}

/// Scroll offset that vertically centers `line` inside `panel`
pub fn centered_scroll_top(panel: Rect, line: Rect, scroll_top: f64) -> f64 {
    scroll_top + (line.top - panel.top - (panel.height() - line.height()) / 2.0)
}
