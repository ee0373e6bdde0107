use doctrace_catalog::normalize_route;
use doctrace_resolver::ResolvedFrame;
use std::fmt;

/// Prefix of the one-shot trace payload sent into a context
pub const TRACE_PREFIX: &str = "ERROR: ";

const NEXT: &str = "next";
const PREVIOUS: &str = "previous";

/// Messages exchanged between the overlay and its context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Context → host: step forward
    Next,
    /// Context → host: step back
    Previous,
    /// Host → context: the full trace text
    Trace(String),
}

impl Signal {
    pub fn encode(&self) -> String {
        match self {
            Signal::Next => NEXT.to_string(),
            Signal::Previous => PREVIOUS.to_string(),
            Signal::Trace(text) => format!("{}{}", TRACE_PREFIX, text),
        }
    }

    /// Decode a raw message; unrecognized text yields `None`
    pub fn decode(message: &str) -> Option<Self> {
        match message {
            NEXT => Some(Signal::Next),
            PREVIOUS => Some(Signal::Previous),
            _ => message
                .strip_prefix(TRACE_PREFIX)
                .map(|text| Signal::Trace(text.to_string())),
        }
    }
}

/// Address of one function within one page
///
/// Rendered as `/<route>/?iframe=true&index=<cursor>#<anchor>`. The
/// `iframe` flag selects the reduced single-function view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub route: String,
    pub single_function: bool,
    /// Ordinal of the frame within the parsed trace
    pub cursor: usize,
    pub anchor: String,
}

impl Locator {
    pub fn for_frame(frame: &ResolvedFrame, single_function: bool) -> Self {
        Self {
            route: normalize_route(frame.route()).to_string(),
            single_function,
            cursor: frame.ordinal(),
            anchor: frame.descriptor().anchor(),
        }
    }

    pub fn to_url(&self) -> String {
        let path = if self.route.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", self.route)
        };
        let query = if self.single_function {
            format!("?iframe=true&index={}", self.cursor)
        } else {
            format!("?index={}", self.cursor)
        };
        format!("{}{}#{}", path, query, self.anchor)
    }

    /// Parse a rendered locator; the `index` parameter is required
    pub fn parse(url: &str) -> Option<Self> {
        let (rest, anchor) = url.split_once('#').unwrap_or((url, ""));
        let (path, query) = rest.split_once('?')?;

        let mut single_function = false;
        let mut cursor = None;
        for pair in query.split('&') {
            match pair.split_once('=') {
                Some(("iframe", value)) => single_function = value == "true",
                Some(("index", value)) => cursor = value.parse().ok(),
                _ => {}
            }
        }

        Some(Self {
            route: normalize_route(path).to_string(),
            single_function,
            cursor: cursor?,
            anchor: anchor.to_string(),
        })
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}
