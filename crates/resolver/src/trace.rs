use doctrace_catalog::LanguageFamily;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One call site parsed from a trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceFrame {
    /// Signature line as written (trimmed)
    pub signature: String,

    /// Text before the first parenthesis of the signature
    pub name: String,

    /// Path as written in the location line
    pub path: String,

    pub line_number: usize,
}

static LOCATION: Lazy<Regex> = Lazy::new(|| match Regex::new(r"(\S+):(\d+)") {
    Ok(regex) => regex,
    Err(err) => panic!("location pattern is invalid: {err}"),
});

static ROOTED_PATH: Lazy<Regex> = Lazy::new(|| match Regex::new(r"/[^:\s]+") {
    Ok(regex) => regex,
    Err(err) => panic!("rooted path pattern is invalid: {err}"),
});

/// Parse free-form trace text into frames, earliest signature first
///
/// A line matching `<path>:<line>` closes a frame with the most recent
/// non-location line as its signature. Signatures never followed by a
/// location are dropped, and so are locations with no signature before them.
/// Never fails: unrecognized input yields no frames.
pub fn parse_trace(text: &str) -> Vec<TraceFrame> {
    let mut frames = Vec::new();
    let mut pending: Option<&str> = None;

    for line in text.lines() {
        // Digits too large for usize saturate; the line is still a location.
        let location = LOCATION.captures(line).and_then(|caps| {
            let path = caps.get(1)?.as_str();
            let line_number = caps
                .get(2)?
                .as_str()
                .parse::<usize>()
                .unwrap_or(usize::MAX);
            Some((path, line_number))
        });

        match location {
            Some((path, line_number)) => {
                if let Some(signature) = pending.take() {
                    let name = signature.split('(').next().unwrap_or(signature).trim();
                    frames.push(TraceFrame {
                        signature: signature.to_string(),
                        name: name.to_string(),
                        path: path.to_string(),
                        line_number,
                    });
                }
            }
            None => {
                let trimmed = line.trim();
                pending = (!trimmed.is_empty()).then_some(trimmed);
            }
        }
    }

    // Traces list the deepest call first; stepping starts from the other end.
    frames.reverse();
    frames
}

/// First line of the trace, usually the error message
pub fn headline(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

/// Family of the first rooted path whose extension is recognized
pub fn detect_trace_language(text: &str) -> LanguageFamily {
    text.lines()
        .filter_map(|line| ROOTED_PATH.find(line))
        .map(|path| LanguageFamily::from_path(path.as_str()))
        .find(|family| family.is_known())
        .unwrap_or(LanguageFamily::Unknown)
}

/// Query handed to web search: `"<Language>: <headline>"`
pub fn search_query(text: &str) -> String {
    format!(
        "{}: {}",
        detect_trace_language(text).display_name(),
        headline(text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_frame() {
        let frames = parse_trace("foo()\n/path/file.go:12");
        assert_eq!(
            frames,
            vec![TraceFrame {
                signature: "foo()".to_string(),
                name: "foo".to_string(),
                path: "/path/file.go".to_string(),
                line_number: 12,
            }]
        );
    }

    #[test]
    fn test_signature_without_location_is_dropped() {
        assert!(parse_trace("foo()\nbar()").is_empty());
        assert!(parse_trace("").is_empty());
    }

    #[test]
    fn test_location_without_signature_is_ignored() {
        let frames = parse_trace("/a/b.go:3\nfoo()\n/a/c.go:4\n/a/d.go:5");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].path, "/a/c.go");
    }

    #[test]
    fn test_go_panic_is_reversed() {
        let trace = "panic: runtime error: index out of range [5] with length 3\n\
                     \n\
                     goroutine 1 [running]:\n\
                     main.lookup(...)\n\
                     \t/home/dev/app/store/lookup.go:14 +0x1d\n\
                     main.main()\n\
                     \t/home/dev/app/main.go:8 +0x25\n\
                     exit status 2";
        let frames = parse_trace(trace);
        let names: Vec<_> = frames.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["main.main", "main.lookup"]);
        assert_eq!(frames[0].path, "/home/dev/app/main.go");
        assert_eq!(frames[1].line_number, 14);
        assert_eq!(frames[1].signature, "main.lookup(...)");
    }

    #[test]
    fn test_oversized_line_number_still_closes_frame() {
        let frames = parse_trace("foo()\n/a/b.go:99999999999999999999999\n/a/c.go:3");
        assert_eq!(
            frames,
            vec![TraceFrame {
                signature: "foo()".to_string(),
                name: "foo".to_string(),
                path: "/a/b.go".to_string(),
                line_number: usize::MAX,
            }]
        );
    }

    #[test]
    fn test_blank_line_clears_pending_signature() {
        assert!(parse_trace("foo()\n\n/a/b.go:1").is_empty());
    }

    #[test]
    fn test_headline_and_query() {
        let trace = "TypeError: x is undefined\nrender()\n/srv/app/view.js:40";
        assert_eq!(headline(trace), "TypeError: x is undefined");
        assert_eq!(detect_trace_language(trace), LanguageFamily::JavaScript);
        assert_eq!(search_query(trace), "JavaScript: TypeError: x is undefined");
        assert_eq!(search_query(""), "Unknown: ");
    }

    #[test]
    fn test_trace_language_skips_unknown_extensions() {
        let trace = "boom\n/etc/config.yaml:3\nrun()\n/srv/app/run.py:9";
        assert_eq!(detect_trace_language(trace), LanguageFamily::Python);
    }
}
