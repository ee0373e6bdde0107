use doctrace_aligner::{Excerpt, PanelSurface, ViewportSynchronizer};
use serde::{Deserialize, Serialize};

/// Presentation settings for the overlay and its context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Address contexts in the reduced single-function view
    pub single_function_view: bool,

    /// Highlight color for an active excerpt's range
    pub excerpt_highlight_color: String,

    /// Highlight color for the faulting line
    pub fault_highlight_color: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            single_function_view: true,
            excerpt_highlight_color: "#d2dc0024".to_string(),
            fault_highlight_color: "rgba(210, 220, 0, 0.14)".to_string(),
        }
    }
}

impl OverlayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.excerpt_highlight_color.trim().is_empty() {
            return Err("excerpt_highlight_color must not be empty".to_string());
        }
        if self.fault_highlight_color.trim().is_empty() {
            return Err("fault_highlight_color must not be empty".to_string());
        }
        Ok(())
    }

    /// Split-view reader that highlights excerpts in the configured color
    pub fn synchronizer<S: PanelSurface>(
        &self,
        excerpts: Vec<Excerpt>,
        surface: S,
    ) -> ViewportSynchronizer<S> {
        ViewportSynchronizer::new(excerpts, surface, self.excerpt_highlight_color.clone())
    }
}
