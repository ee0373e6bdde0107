//! # Doctrace Aligner
//!
//! Binds prose excerpts to the source listings they quote and keeps a
//! split-view reader in step with the prose.
//!
//! Matching and geometry are pure ([`align_excerpts`], [`closest_to_top`],
//! [`centered_scroll_top`]); every visible effect goes through a
//! [`PanelSurface`] owned by the [`ViewportSynchronizer`].

mod excerpt;
mod geometry;
mod sync;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use excerpt::{align_excerpts, locate_excerpt, strip_whitespace, Excerpt, LineRange};
pub use geometry::{centered_scroll_top, closest_to_top, Rect, Viewport};
pub use sync::{HighlightState, PanelSurface, ViewportSynchronizer};
