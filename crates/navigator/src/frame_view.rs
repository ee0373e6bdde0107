use crate::channel::MessageChannel;
use crate::config::OverlayConfig;
use crate::protocol::{Locator, Signal};
use doctrace_aligner::{PanelSurface, ViewportSynchronizer};
use doctrace_resolver::{parse_trace, TraceFrame};
use serde::Serialize;

/// One line of the in-context error listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingLine {
    pub text: String,
    /// Set on the line carrying the current frame's signature
    pub highlighted: bool,
}

/// Faulting line and the color it is marked with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaultMark {
    pub line: usize,
    pub color: String,
}

/// Context side of the overlay: the frame a context was addressed at
///
/// Built from the locator and the trace payload alone; nothing else crosses
/// from the host.
#[derive(Debug, Clone)]
pub struct FrameView {
    trace: String,
    frame: TraceFrame,
}

impl FrameView {
    /// Accept the host's trace payload
    ///
    /// `None` for anything that is not a trace payload, or when the locator's
    /// cursor is past the parsed frames.
    pub fn receive(locator: &Locator, message: &str) -> Option<Self> {
        let Some(Signal::Trace(trace)) = Signal::decode(message) else {
            return None;
        };
        let Some(frame) = parse_trace(&trace).into_iter().nth(locator.cursor) else {
            log::debug!(
                "Cursor {} is outside the received trace; leaving the view as is",
                locator.cursor
            );
            return None;
        };
        Some(Self { trace, frame })
    }

    pub fn frame(&self) -> &TraceFrame {
        &self.frame
    }

    pub fn fault_line(&self) -> usize {
        self.frame.line_number
    }

    /// The trace text with the current frame's signature line marked
    pub fn listing(&self) -> Vec<ListingLine> {
        self.trace
            .lines()
            .map(|line| ListingLine {
                text: line.to_string(),
                highlighted: line.trim() == self.frame.signature,
            })
            .collect()
    }

    pub fn fault_mark(&self, config: &OverlayConfig) -> FaultMark {
        FaultMark {
            line: self.fault_line(),
            color: config.fault_highlight_color.clone(),
        }
    }

    /// Mark the faulting line on the displayed panel
    pub fn mark_fault<S: PanelSurface>(
        &self,
        sync: &mut ViewportSynchronizer<S>,
        config: &OverlayConfig,
    ) -> bool {
        let mark = self.fault_mark(config);
        sync.override_highlight(mark.line, mark.line, &mark.color)
    }
}

/// Previous/Next controls rendered inside the context
#[derive(Debug, Clone)]
pub struct ContextControls {
    host: MessageChannel,
}

impl ContextControls {
    pub fn new(host: MessageChannel) -> Self {
        Self { host }
    }

    pub fn next(&self) -> usize {
        self.host.post(Signal::Next.encode())
    }

    pub fn previous(&self) -> usize {
        self.host.post(Signal::Previous.encode())
    }
}
