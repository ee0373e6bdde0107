//! In-memory [`PanelSurface`] that records what a rendering surface would do.

use crate::excerpt::LineRange;
use crate::sync::PanelSurface;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    Show(usize),
    Hide(usize),
    Highlight(usize, LineRange, String),
    Clear(usize, LineRange),
    Center(usize, LineRange),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
    visible: BTreeSet<usize>,
    highlights: BTreeMap<usize, Vec<(LineRange, String)>>,
    centered: Option<(usize, LineRange)>,
}

impl RecordingSurface {
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn is_visible(&self, panel: usize) -> bool {
        self.visible.contains(&panel)
    }

    /// Ranges currently highlighted on a panel, oldest first
    pub fn highlighted(&self, panel: usize) -> Vec<(LineRange, String)> {
        self.highlights.get(&panel).cloned().unwrap_or_default()
    }

    /// Last centering request
    pub fn centered(&self) -> Option<(usize, LineRange)> {
        self.centered
    }
}

impl PanelSurface for RecordingSurface {
    fn set_panel_visible(&mut self, panel: usize, visible: bool) {
        if visible {
            self.visible.insert(panel);
            self.ops.push(SurfaceOp::Show(panel));
        } else {
            self.visible.remove(&panel);
            self.ops.push(SurfaceOp::Hide(panel));
        }
    }

    fn highlight(&mut self, panel: usize, range: LineRange, color: &str) {
        self.highlights
            .entry(panel)
            .or_default()
            .push((range, color.to_string()));
        self.ops
            .push(SurfaceOp::Highlight(panel, range, color.to_string()));
    }

    fn clear_highlight(&mut self, panel: usize, range: LineRange) {
        if let Some(ranges) = self.highlights.get_mut(&panel) {
            ranges.retain(|(existing, _)| *existing != range);
        }
        self.ops.push(SurfaceOp::Clear(panel, range));
    }

    fn center_on(&mut self, panel: usize, range: LineRange) {
        self.centered = Some((panel, range));
        self.ops.push(SurfaceOp::Center(panel, range));
    }
}
