use crate::language::LanguageFamily;
use crate::types::{FunctionDescriptor, Parameter};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Extraction strategy for one language family
///
/// A strategy owns both the structural fingerprint used for detection and the
/// single-pass sweep that pulls descriptors out of a listing, so adding a
/// family means adding one implementation and registering it.
pub trait FunctionExtractor: Send + Sync {
    fn family(&self) -> LanguageFamily;

    /// Whether the listing carries this family's fingerprint
    fn matches(&self, code: &str) -> bool;

    /// Descriptors in source order (indices are assigned by the catalog)
    fn extract(&self, code: &str) -> Vec<FunctionDescriptor>;
}

/// Result of parsing a single code region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRegion {
    pub language: LanguageFamily,
    pub functions: Vec<FunctionDescriptor>,
}

/// Detects a region's family and runs the matching strategy
pub struct RegionParser {
    extractors: Vec<Box<dyn FunctionExtractor>>,
}

impl RegionParser {
    /// Parser with the built-in strategies in priority order
    pub fn new() -> Self {
        Self {
            extractors: vec![
                Box::new(JavaScriptExtractor),
                Box::new(PythonExtractor),
                Box::new(GoExtractor),
                Box::new(RustExtractor),
            ],
        }
    }

    /// First strategy whose fingerprint matches
    pub fn detect(&self, code: &str) -> LanguageFamily {
        self.extractors
            .iter()
            .find(|extractor| extractor.matches(code))
            .map(|extractor| extractor.family())
            .unwrap_or(LanguageFamily::Unknown)
    }

    pub fn parse(&self, code: &str) -> ParsedRegion {
        match self.extractors.iter().find(|extractor| extractor.matches(code)) {
            Some(extractor) => ParsedRegion {
                language: extractor.family(),
                functions: extractor.extract(code),
            },
            None => ParsedRegion {
                language: LanguageFamily::Unknown,
                functions: Vec::new(),
            },
        }
    }
}

impl Default for RegionParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the language family of a listing with the built-in strategies
pub fn detect_language(code: &str) -> LanguageFamily {
    static PARSER: Lazy<RegionParser> = Lazy::new(RegionParser::new);
    PARSER.detect(code)
}

static JS_FINGERPRINT: Lazy<Regex> = Lazy::new(|| compile(r"function"));
static JS_FUNCTION: Lazy<Regex> =
    Lazy::new(|| compile(r"(?:function\s+)?(\w+)\s*\((.*?)\)\s*\{"));

static PY_FINGERPRINT: Lazy<Regex> =
    Lazy::new(|| compile(r"def\s+\w+\(.*\)\s*(?:->[^:]*)?:"));
static PY_FUNCTION: Lazy<Regex> =
    Lazy::new(|| compile(r"def\s+(\w+)\((.*?)\)\s*(?:->\s*([^:]+?))?\s*:"));

static GO_FINGERPRINT: Lazy<Regex> =
    Lazy::new(|| compile(r"func(?:\s+|\s*\([^)]*\)\s*)\w+\(.*\)"));
static GO_FUNCTION: Lazy<Regex> =
    Lazy::new(|| compile(r"func\s*(?:\(([^)]*)\))?\s*(\w+)\(([^)]*)\)([^{]*)\{"));

static RS_FINGERPRINT: Lazy<Regex> = Lazy::new(|| compile(r"fn\s+\w+\(.*\)"));
static RS_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    compile(r"fn\s+(\w+)\s*(?:<[^>]*>)?\s*\(([^)]*)\)\s*(?:->\s*([^{;]+?))?\s*(?:\{|;|where\b)")
});

/// Control-flow keywords that the JavaScript sweep would otherwise take for names
const JS_NON_FUNCTIONS: &[&str] = &["if", "for", "while", "switch", "catch", "function", "return"];

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(err) => panic!("built-in extraction pattern {pattern:?} is invalid: {err}"),
    }
}

struct JavaScriptExtractor;

impl FunctionExtractor for JavaScriptExtractor {
    fn family(&self) -> LanguageFamily {
        LanguageFamily::JavaScript
    }

    fn matches(&self, code: &str) -> bool {
        JS_FINGERPRINT.is_match(code)
    }

    fn extract(&self, code: &str) -> Vec<FunctionDescriptor> {
        JS_FUNCTION
            .captures_iter(code)
            .filter_map(|caps| {
                let name = group(&caps, 1)?;
                if JS_NON_FUNCTIONS.contains(&name) {
                    return None;
                }
                let parameters = split_params(group(&caps, 2).unwrap_or_default())
                    .into_iter()
                    .map(|param| {
                        let name = param.split('=').next().unwrap_or(param).trim();
                        Parameter::new(name, None)
                    })
                    .collect();
                Some(FunctionDescriptor::new(
                    name,
                    parameters,
                    None,
                    definition(&caps),
                    LanguageFamily::JavaScript,
                ))
            })
            .collect()
    }
}

struct PythonExtractor;

impl FunctionExtractor for PythonExtractor {
    fn family(&self) -> LanguageFamily {
        LanguageFamily::Python
    }

    fn matches(&self, code: &str) -> bool {
        PY_FINGERPRINT.is_match(code)
    }

    fn extract(&self, code: &str) -> Vec<FunctionDescriptor> {
        PY_FUNCTION
            .captures_iter(code)
            .filter_map(|caps| {
                let name = group(&caps, 1)?;
                let parameters = split_params(group(&caps, 2).unwrap_or_default())
                    .into_iter()
                    .map(|param| {
                        let without_default = param.split('=').next().unwrap_or(param);
                        match without_default.split_once(':') {
                            Some((name, ty)) => {
                                Parameter::new(name.trim(), non_empty(ty))
                            }
                            None => Parameter::new(without_default.trim(), None),
                        }
                    })
                    .collect();
                Some(FunctionDescriptor::new(
                    name,
                    parameters,
                    group(&caps, 3).and_then(non_empty),
                    definition(&caps),
                    LanguageFamily::Python,
                ))
            })
            .collect()
    }
}

struct GoExtractor;

impl FunctionExtractor for GoExtractor {
    fn family(&self) -> LanguageFamily {
        LanguageFamily::Go
    }

    fn matches(&self, code: &str) -> bool {
        GO_FINGERPRINT.is_match(code)
    }

    fn extract(&self, code: &str) -> Vec<FunctionDescriptor> {
        GO_FUNCTION
            .captures_iter(code)
            .filter_map(|caps| {
                let name = group(&caps, 2)?;
                let mut raw = split_params(group(&caps, 3).unwrap_or_default());
                // The receiver reads as the first parameter.
                if let Some(receiver) = group(&caps, 1).filter(|r| !r.trim().is_empty()) {
                    raw.insert(0, receiver.trim());
                }
                let parameters = raw
                    .into_iter()
                    .map(|param| match param.split_once(char::is_whitespace) {
                        Some((name, ty)) => Parameter::new(name, non_empty(ty)),
                        None => Parameter::new(param, None),
                    })
                    .collect();
                Some(FunctionDescriptor::new(
                    name,
                    parameters,
                    group(&caps, 4).and_then(non_empty),
                    definition(&caps),
                    LanguageFamily::Go,
                ))
            })
            .collect()
    }
}

struct RustExtractor;

impl FunctionExtractor for RustExtractor {
    fn family(&self) -> LanguageFamily {
        LanguageFamily::Rust
    }

    fn matches(&self, code: &str) -> bool {
        RS_FINGERPRINT.is_match(code)
    }

    fn extract(&self, code: &str) -> Vec<FunctionDescriptor> {
        RS_FUNCTION
            .captures_iter(code)
            .filter_map(|caps| {
                let name = group(&caps, 1)?;
                let parameters = split_params(group(&caps, 2).unwrap_or_default())
                    .into_iter()
                    .map(|param| match param.split_once(':') {
                        Some((name, ty)) => Parameter::new(name.trim(), non_empty(ty)),
                        None => Parameter::new(param, None),
                    })
                    .collect();
                Some(FunctionDescriptor::new(
                    name,
                    parameters,
                    group(&caps, 3).and_then(non_empty),
                    definition(&caps),
                    LanguageFamily::Rust,
                ))
            })
            .collect()
    }
}

fn group<'t>(caps: &Captures<'t>, idx: usize) -> Option<&'t str> {
    caps.get(idx).map(|m| m.as_str())
}

fn definition(caps: &Captures<'_>) -> String {
    caps.get(0)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Split a parameter list on top-level commas, ignoring commas nested in
/// `<>`, `()`, `[]` or `{}`. Empty entries are dropped.
fn split_params(list: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in list.char_indices() {
        match ch {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                out.push(list[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    out.push(list[start..].trim());
    out.retain(|param| !param.is_empty());
    out
}
