use doctrace_catalog::SourceCatalog;
use doctrace_resolver::{FrameResolver, ResolvedFrame, TraceFrame};

/// Outcome of a navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The current frame changed
    Moved,
    /// The current frame stayed put
    Held,
}

/// Position within a trace's resolvable frames
///
/// `history` is the stack of frames visited before `current`. It starts out
/// holding the first resolved frame, so the bottom entry is always the
/// starting point and [`NavigationSession::retreat`] can never empty it.
#[derive(Debug, Clone)]
pub struct NavigationSession {
    frames: Vec<TraceFrame>,
    current: ResolvedFrame,
    history: Vec<ResolvedFrame>,
}

impl NavigationSession {
    /// Resolve the first frame that binds; `None` when nothing does
    pub fn start(frames: Vec<TraceFrame>, catalog: &SourceCatalog) -> Option<Self> {
        let first = FrameResolver::new(catalog).resolve(&frames, 0)?;
        log::debug!(
            "Navigation starts at frame {} ({})",
            first.ordinal(),
            first.descriptor().name
        );
        Some(Self {
            frames,
            history: vec![first.clone()],
            current: first,
        })
    }

    pub fn current(&self) -> &ResolvedFrame {
        &self.current
    }

    pub fn history(&self) -> &[ResolvedFrame] {
        &self.history
    }

    pub fn frames(&self) -> &[TraceFrame] {
        &self.frames
    }

    /// Move to the next frame that resolves
    pub fn advance(&mut self, catalog: &SourceCatalog) -> Step {
        let last = self.frames.len().saturating_sub(1);
        let resume = (self.current.ordinal() + 1).min(last);

        match FrameResolver::new(catalog).resolve(&self.frames, resume) {
            Some(next) if next.ordinal() != self.current.ordinal() => {
                log::debug!(
                    "Advancing from frame {} to frame {}",
                    self.current.ordinal(),
                    next.ordinal()
                );
                let previous = std::mem::replace(&mut self.current, next);
                self.history.push(previous);
                Step::Moved
            }
            _ => Step::Held,
        }
    }

    /// Return to the frame visited before the current one
    ///
    /// With a single history entry the session is pinned to it.
    pub fn retreat(&mut self) -> Step {
        let before = self.current.ordinal();
        if self.history.len() > 1 {
            if let Some(previous) = self.history.pop() {
                self.current = previous;
            }
        } else if let Some(first) = self.history.first() {
            self.current = first.clone();
        }

        if self.current.ordinal() == before {
            Step::Held
        } else {
            Step::Moved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doctrace_catalog::{FunctionCatalog, FunctionDescriptor, LanguageFamily, Page};
    use doctrace_resolver::parse_trace;
    use pretty_assertions::assert_eq;

    fn go_page(route: &str, names: &[&str]) -> Page {
        let mut functions = FunctionCatalog::new();
        for name in names {
            functions.push(FunctionDescriptor::new(
                *name,
                Vec::new(),
                None,
                format!("func {}()", name),
                LanguageFamily::Go,
            ));
        }
        Page {
            route: route.to_string(),
            text: String::new(),
            regions: Vec::new(),
            functions,
        }
    }

    fn catalog() -> SourceCatalog {
        SourceCatalog::from_pages(vec![
            go_page("/app/", &["main", "run"]),
            go_page("/db/", &["Query"]),
        ])
    }

    const TRACE: &str = "panic: boom\n\
\n\
db.Query()\n\
\t/src/app/db/query.go:9\n\
app.run()\n\
\t/src/app/run.go:14\n\
main.main()\n\
\t/src/app/main.go:3\n";

    fn session() -> NavigationSession {
        NavigationSession::start(parse_trace(TRACE), &catalog()).expect("session")
    }

    #[test]
    fn test_start_seeds_history() {
        let session = session();
        assert_eq!(session.current().ordinal(), 0);
        assert_eq!(session.current().descriptor().name, "main");
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_advance_then_retreat() {
        let catalog = catalog();
        let mut session = session();

        assert_eq!(session.advance(&catalog), Step::Moved);
        assert_eq!(session.current().descriptor().name, "run");
        assert_eq!(session.history().len(), 2);

        assert_eq!(session.retreat(), Step::Moved);
        assert_eq!(session.current().ordinal(), 0);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_advance_holds_at_last_frame() {
        let catalog = catalog();
        let mut session = session();
        session.advance(&catalog);
        session.advance(&catalog);
        assert_eq!(session.current().descriptor().name, "Query");
        let depth = session.history().len();

        assert_eq!(session.advance(&catalog), Step::Held);
        assert_eq!(session.current().descriptor().name, "Query");
        assert_eq!(session.history().len(), depth);
    }

    #[test]
    fn test_retreat_pinned_at_start() {
        let mut session = session();
        assert_eq!(session.retreat(), Step::Held);
        assert_eq!(session.retreat(), Step::Held);
        assert_eq!(session.current().ordinal(), 0);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_start_without_resolvable_frames() {
        let frames = parse_trace("Traceback\n  File /x/y.py:3\n");
        assert!(NavigationSession::start(frames, &catalog()).is_none());
    }
}
