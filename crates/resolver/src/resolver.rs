use crate::similarity::best_match;
use crate::trace::TraceFrame;
use doctrace_catalog::{normalize_route, FunctionDescriptor, LanguageFamily, SourceCatalog};
use serde::Serialize;

/// A trace frame bound to a catalog page and function
///
/// Only [`FrameResolver`] produces these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedFrame {
    frame: TraceFrame,
    route: String,
    language: LanguageFamily,
    descriptor: FunctionDescriptor,
    ordinal: usize,
    page_score: f64,
    name_score: f64,
}

impl ResolvedFrame {
    pub fn frame(&self) -> &TraceFrame {
        &self.frame
    }

    /// Route of the bound page
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Family derived from the frame's file extension
    pub fn language(&self) -> LanguageFamily {
        self.language
    }

    pub fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    /// Position of the frame in the full frame list
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Similarity of the frame's directory to the page route
    pub fn page_score(&self) -> f64 {
        self.page_score
    }

    /// Similarity of the frame's function name to the descriptor name
    pub fn name_score(&self) -> f64 {
        self.name_score
    }
}

/// Longest common leading run of `/`-separated segments, each followed by `/`
///
/// `[]` → `""`; `["/a/b/c.go", "/a/b/d.go"]` → `"/a/b/"`.
pub fn base_path<'a, I>(paths: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let split: Vec<Vec<&str>> = paths
        .into_iter()
        .map(|path| path.split('/').collect())
        .collect();
    let Some(first) = split.first() else {
        return String::new();
    };
    let min_len = split.iter().map(Vec::len).min().unwrap_or(0);

    let mut base = String::new();
    for idx in 0..min_len {
        let segment = first[idx];
        if split.iter().all(|segments| segments[idx] == segment) {
            base.push_str(segment);
            base.push('/');
        } else {
            break;
        }
    }
    base
}

/// Frame path relative to `base`, without the filename or any other dotted segment
pub fn relative_dir(path: &str, base: &str) -> String {
    let rest = path
        .strip_prefix(base)
        .or_else(|| path.get(base.len()..))
        .unwrap_or_default();
    rest.split('/')
        .filter(|segment| !segment.contains('.'))
        .collect::<Vec<_>>()
        .join("/")
}

/// Last `.`-separated segment of a qualified name (`main.(*Srv).Handle` → `Handle`)
pub fn short_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Name matched against descriptors
///
/// Go method frames such as `main.(*Srv).Handle(0xc0)` extract as `main.`, so
/// an empty short name falls back to the last segment of the called expression.
pub fn lookup_name(frame: &TraceFrame) -> &str {
    let short = short_name(&frame.name);
    if !short.is_empty() {
        return short;
    }
    let call = frame
        .signature
        .rfind('(')
        .map_or(frame.signature.as_str(), |idx| &frame.signature[..idx]);
    short_name(call.trim())
}

/// Binds trace frames to catalog functions by path and name similarity
pub struct FrameResolver<'c> {
    catalog: &'c SourceCatalog,
}

impl<'c> FrameResolver<'c> {
    pub fn new(catalog: &'c SourceCatalog) -> Self {
        Self { catalog }
    }

    /// First frame at or after `resume` that binds to a page and function
    ///
    /// `None` means there is no further resolvable frame; callers treat it as
    /// the end of the sequence, not as an error.
    pub fn resolve(&self, frames: &[TraceFrame], resume: usize) -> Option<ResolvedFrame> {
        let base = base_path(frames.iter().map(|frame| frame.path.as_str()));

        frames
            .iter()
            .enumerate()
            .skip(resume)
            .find_map(|(ordinal, frame)| {
                let resolved = self.bind(frame, ordinal, &base);
                if resolved.is_none() {
                    log::debug!(
                        "Frame {ordinal} ({} at {}) did not resolve",
                        frame.name,
                        frame.path
                    );
                }
                resolved
            })
    }

    fn bind(&self, frame: &TraceFrame, ordinal: usize, base: &str) -> Option<ResolvedFrame> {
        let language = LanguageFamily::from_path(&frame.path);
        let dir = relative_dir(&frame.path, base);

        let (page_idx, page_score) = best_match(
            &dir,
            self.catalog
                .pages()
                .iter()
                .map(|page| normalize_route(&page.route)),
        )?;
        let page = &self.catalog.pages()[page_idx];

        let bucket = page.functions.bucket(language);
        let name = lookup_name(frame);
        let (fn_idx, name_score) = best_match(name, bucket.iter().map(|f| f.name.as_str()))?;

        Some(ResolvedFrame {
            frame: frame.clone(),
            route: page.route.clone(),
            language,
            descriptor: bucket[fn_idx].clone(),
            ordinal,
            page_score,
            name_score,
        })
    }
}
