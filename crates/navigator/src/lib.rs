//! # Doctrace Navigator
//!
//! Steps through the resolved frames of a trace while an isolated rendering
//! context shows one function at a time.
//!
//! ```text
//!  host overlay                                  isolated context
//! ┌──────────────────────────┐   Locator        ┌──────────────────────────┐
//! │ OverlayController        │ ───────────────> │ page at /route/?iframe.. │
//! │  └─ NavigationSession    │   "ERROR: ..."   │ FrameView                │
//! │      current + history   │ ───────────────> │  re-parses the trace,    │
//! │                          │                  │  marks the fault line    │
//! │  run(subscription)       │ <─────────────── │ ContextControls          │
//! └──────────────────────────┘ "next"/"previous"└──────────────────────────┘
//! ```
//!
//! Nothing but the locator and the one-shot trace payload crosses the
//! boundary; each side re-derives what it needs.

mod channel;
mod config;
mod controller;
mod error;
mod frame_view;
mod protocol;
mod session;
mod summary;

pub use channel::{MessageChannel, Subscription, SubscriptionId};
pub use config::OverlayConfig;
pub use controller::{ContextSurface, OverlayController};
pub use error::{NavigatorError, Result};
pub use frame_view::{ContextControls, FaultMark, FrameView, ListingLine};
pub use protocol::{Locator, Signal, TRACE_PREFIX};
pub use session::{NavigationSession, Step};
pub use summary::FunctionSummary;
