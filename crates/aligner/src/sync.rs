use crate::excerpt::{Excerpt, LineRange};
use crate::geometry::{closest_to_top, Rect, Viewport};
use serde::Serialize;

/// Rendering seam for the paired source panels
///
/// Panels are addressed by source listing ordinal.
pub trait PanelSurface {
    fn set_panel_visible(&mut self, panel: usize, visible: bool);

    fn highlight(&mut self, panel: usize, range: LineRange, color: &str);

    fn clear_highlight(&mut self, panel: usize, range: LineRange);

    /// Scroll the panel container so the range is vertically centered
    fn center_on(&mut self, panel: usize, range: LineRange);
}

/// What the reader currently sees highlighted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighlightState {
    /// Ordinal of the active excerpt
    pub active: Option<usize>,

    /// Forced range on the displayed panel, independent of the excerpt
    pub override_range: Option<LineRange>,

    /// Color of the forced range
    pub color: Option<String>,
}

/// Keeps the source panels in step with the excerpt the reader is looking at
pub struct ViewportSynchronizer<S: PanelSurface> {
    excerpts: Vec<Excerpt>,
    surface: S,
    color: String,
    displayed: Option<usize>,
    state: HighlightState,
}

impl<S: PanelSurface> ViewportSynchronizer<S> {
    /// Hide every bound panel except the first excerpt's, with nothing active yet
    pub fn new(excerpts: Vec<Excerpt>, mut surface: S, color: impl Into<String>) -> Self {
        let displayed = excerpts.first().map(Excerpt::source);
        for panel in bound_panels(&excerpts) {
            surface.set_panel_visible(panel, Some(panel) == displayed);
        }
        Self {
            excerpts,
            surface,
            color: color.into(),
            displayed,
            state: HighlightState::default(),
        }
    }

    pub fn excerpts(&self) -> &[Excerpt] {
        &self.excerpts
    }

    pub fn state(&self) -> &HighlightState {
        &self.state
    }

    /// Panel currently shown, if any
    pub fn displayed_panel(&self) -> Option<usize> {
        self.displayed
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Excerpt whose anchor sits closest to the top of the reading area
    ///
    /// `anchors[i]` is the on-screen rect of excerpt `i`'s annotation.
    pub fn current_visible(&self, anchors: &[Rect], viewport: Viewport) -> Option<usize> {
        let len = anchors.len().min(self.excerpts.len());
        closest_to_top(&anchors[..len], viewport)
    }

    /// Re-activate when scrolling brought a different excerpt to the top
    pub fn on_scroll(&mut self, anchors: &[Rect], viewport: Viewport) -> Option<usize> {
        let visible = self.current_visible(anchors, viewport)?;
        if self.state.active != Some(visible) {
            self.activate(visible);
        }
        Some(visible)
    }

    /// Show only the excerpt's panel, highlight its range and center it
    ///
    /// Returns `false` for an unknown ordinal.
    pub fn activate(&mut self, ordinal: usize) -> bool {
        let Some(target) = self.excerpts.get(ordinal).cloned() else {
            log::debug!("No excerpt {ordinal} to activate");
            return false;
        };

        self.clear_override();
        for excerpt in &self.excerpts {
            self.surface.clear_highlight(excerpt.source(), excerpt.range());
        }
        for panel in bound_panels(&self.excerpts) {
            if panel != target.source() {
                self.surface.set_panel_visible(panel, false);
            }
        }

        self.surface.set_panel_visible(target.source(), true);
        self.surface
            .highlight(target.source(), target.range(), &self.color);
        self.surface.center_on(target.source(), target.range());

        self.displayed = Some(target.source());
        self.state.active = Some(ordinal);
        true
    }

    /// Force a highlight on the displayed panel without changing the active excerpt
    ///
    /// Returns `false` when no panel is displayed.
    pub fn override_highlight(&mut self, start: usize, end: usize, color: &str) -> bool {
        let Some(panel) = self.displayed else {
            return false;
        };
        self.clear_override();

        let range = LineRange::new(start.min(end), start.max(end));
        self.surface.highlight(panel, range, color);
        self.state.override_range = Some(range);
        self.state.color = Some(color.to_string());
        true
    }

    fn clear_override(&mut self) {
        if let (Some(panel), Some(range)) = (self.displayed, self.state.override_range.take()) {
            self.surface.clear_highlight(panel, range);
        }
        self.state.color = None;
    }
}

/// Distinct bound panels in first-bound order
fn bound_panels(excerpts: &[Excerpt]) -> Vec<usize> {
    let mut panels = Vec::new();
    for excerpt in excerpts {
        if !panels.contains(&excerpt.source()) {
            panels.push(excerpt.source());
        }
    }
    panels
}
