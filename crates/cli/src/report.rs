use doctrace_aligner::{align_excerpts, Excerpt};
use doctrace_catalog::{LanguageFamily, SourceCatalog};
use doctrace_navigator::{
    ContextSurface, FaultMark, FrameView, FunctionSummary, Locator, MessageChannel,
    OverlayConfig, OverlayController, Result, Signal, Step,
};
use doctrace_resolver::{
    detect_trace_language, headline, parse_trace, search_query, ResolvedFrame, TraceFrame,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct StepReport {
    /// `open`, `next` or `previous`
    pub signal: String,
    pub moved: bool,
    /// Address the context holds after the step
    pub locator: String,
    pub frame: ResolvedFrame,
    pub summary: FunctionSummary,
    /// Line the context marks, as it derives it from the trace payload
    pub fault: Option<FaultMark>,
}

#[derive(Debug, Serialize)]
pub struct ResolveReport {
    pub headline: String,
    pub language: LanguageFamily,
    pub search_query: String,
    pub frames: Vec<TraceFrame>,
    pub steps: Vec<StepReport>,
}

#[derive(Debug, Serialize)]
pub struct AlignReport {
    pub excerpts: Vec<Excerpt>,
    /// Annotation positions that matched no source
    pub unmatched: Vec<usize>,
}

#[derive(Default)]
struct AddressLog(Vec<String>);

impl ContextSurface for AddressLog {
    fn navigate(&mut self, locator: &Locator) {
        self.0.push(locator.to_url());
    }
}

fn step_report(
    signal: String,
    step: Step,
    payload: &str,
    controller: &OverlayController<AddressLog>,
) -> StepReport {
    let current = controller.session().current();
    let locator = controller.surface().0.last().cloned().unwrap_or_default();
    let fault = Locator::parse(&locator)
        .and_then(|parsed| FrameView::receive(&parsed, payload))
        .map(|view| view.fault_mark(controller.config()));
    StepReport {
        signal,
        moved: step == Step::Moved,
        locator,
        frame: current.clone(),
        summary: FunctionSummary::from_descriptor(current.descriptor()),
        fault,
    }
}

/// Open an overlay on the trace and replay `signals` against it
///
/// `steps` stays empty when no frame resolves.
pub fn resolve_report(
    trace: &str,
    catalog: Arc<SourceCatalog>,
    overlay: &OverlayConfig,
    signals: &[Signal],
) -> Result<ResolveReport> {
    let mut report = ResolveReport {
        headline: headline(trace).to_string(),
        language: detect_trace_language(trace),
        search_query: search_query(trace),
        frames: parse_trace(trace),
        steps: Vec::new(),
    };

    let Some(mut controller) = OverlayController::open(
        trace,
        catalog,
        overlay.clone(),
        AddressLog::default(),
        MessageChannel::new(),
    )? else {
        return Ok(report);
    };

    let payload = Signal::Trace(trace.to_string()).encode();
    report.steps.push(step_report(
        "open".to_string(),
        Step::Moved,
        &payload,
        &controller,
    ));
    for signal in signals {
        let step = controller.handle(signal);
        report
            .steps
            .push(step_report(signal.encode(), step, &payload, &controller));
    }
    Ok(report)
}

/// Split annotation text into blocks separated by blank lines
pub fn split_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }
    blocks
}

pub fn align_report(annotations: &[String], sources: &[String]) -> AlignReport {
    let excerpts = align_excerpts(annotations, sources);
    let unmatched = (0..annotations.len())
        .filter(|idx| !excerpts.iter().any(|e| e.annotation_index() == *idx))
        .collect();
    AlignReport {
        excerpts,
        unmatched,
    }
}
