use crate::channel::{MessageChannel, Subscription};
use crate::config::OverlayConfig;
use crate::error::{NavigatorError, Result};
use crate::protocol::{Locator, Signal};
use crate::session::{NavigationSession, Step};
use doctrace_catalog::SourceCatalog;
use doctrace_resolver::parse_trace;
use std::sync::Arc;

/// Whatever hosts the isolated context
pub trait ContextSurface {
    /// Replace the context's address
    fn navigate(&mut self, locator: &Locator);
}

/// Host side of the overlay: owns the session and drives the context
pub struct OverlayController<S: ContextSurface> {
    catalog: Arc<SourceCatalog>,
    session: NavigationSession,
    trace: String,
    config: OverlayConfig,
    surface: S,
    context: MessageChannel,
}

impl<S: ContextSurface> OverlayController<S> {
    /// Parse the trace and address the context at the first resolvable frame
    ///
    /// `Ok(None)` when no frame resolves; the overlay is not opened then.
    pub fn open(
        trace: impl Into<String>,
        catalog: Arc<SourceCatalog>,
        config: OverlayConfig,
        surface: S,
        context: MessageChannel,
    ) -> Result<Option<Self>> {
        config.validate().map_err(NavigatorError::InvalidConfig)?;

        let trace = trace.into();
        let frames = parse_trace(&trace);
        let Some(session) = NavigationSession::start(frames, &catalog) else {
            log::info!("No frame of the trace resolves against the catalog");
            return Ok(None);
        };

        let mut controller = Self {
            catalog,
            session,
            trace,
            config,
            surface,
            context,
        };
        controller.readdress();
        Ok(Some(controller))
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn session(&self) -> &NavigationSession {
        &self.session
    }

    pub fn locator(&self) -> Locator {
        Locator::for_frame(self.session.current(), self.config.single_function_view)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Send the trace payload once the context has loaded
    pub fn on_context_loaded(&self) -> Result<usize> {
        let delivered = self.context.post(Signal::Trace(self.trace.clone()).encode());
        if delivered == 0 {
            return Err(NavigatorError::ContextDetached);
        }
        Ok(delivered)
    }

    /// Apply one signal
    ///
    /// `Next` re-addresses only when the session moved; `Previous` always
    /// re-addresses, which reloads the starting frame when pinned.
    pub fn handle(&mut self, signal: &Signal) -> Step {
        match signal {
            Signal::Next => {
                let step = self.session.advance(&self.catalog);
                if step == Step::Moved {
                    self.readdress();
                }
                step
            }
            Signal::Previous => {
                let step = self.session.retreat();
                self.readdress();
                step
            }
            Signal::Trace(_) => {
                log::debug!("Ignoring trace payload sent to the host");
                Step::Held
            }
        }
    }

    /// Decode and apply a raw message; unrecognized messages are ignored
    pub fn handle_message(&mut self, message: &str) -> Option<Step> {
        match Signal::decode(message) {
            Some(signal) => Some(self.handle(&signal)),
            None => {
                log::debug!("Ignoring unrecognized message: {:?}", message);
                None
            }
        }
    }

    /// Process host-channel messages in arrival order until unsubscribed
    ///
    /// Returns the number of recognized signals.
    pub async fn run(&mut self, mut subscription: Subscription) -> usize {
        let mut handled = 0;
        while let Some(message) = subscription.recv().await {
            if self.handle_message(&message).is_some() {
                handled += 1;
            }
        }
        log::debug!("Host channel closed after {} signals", handled);
        handled
    }

    fn readdress(&mut self) {
        let locator = self.locator();
        log::debug!("Addressing context at {}", locator);
        self.surface.navigate(&locator);
    }
}
