use serde::{Deserialize, Serialize};

/// Inclusive, 1-based line range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Single-line range
    #[must_use]
    pub const fn line(line: usize) -> Self {
        Self::new(line, line)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }

    #[must_use]
    pub const fn contains(&self, line: usize) -> bool {
        line >= self.start && line <= self.end
    }
}

/// An annotation bound to the source listing it quotes
///
/// The range is fixed once matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Excerpt {
    annotation: String,
    annotation_index: usize,
    source: usize,
    range: LineRange,
}

impl Excerpt {
    pub fn annotation(&self) -> &str {
        &self.annotation
    }

    /// Position of the annotation among all annotations, matched or not
    pub fn annotation_index(&self) -> usize {
        self.annotation_index
    }

    /// Ordinal of the bound source listing
    pub fn source(&self) -> usize {
        self.source
    }

    pub fn range(&self) -> LineRange {
        self.range
    }
}

/// Text with every whitespace character removed
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|ch| !ch.is_whitespace()).collect()
}

/// First source containing the excerpt (whitespace ignored) and the tightest
/// line span that still contains it
pub fn locate_excerpt<S: AsRef<str>>(annotation: &str, sources: &[S]) -> Option<(usize, LineRange)> {
    let needle = strip_whitespace(annotation);
    if needle.is_empty() {
        return None;
    }

    sources
        .iter()
        .enumerate()
        .find_map(|(idx, source)| tight_range(source.as_ref(), &needle).map(|range| (idx, range)))
}

/// Smallest end line whose prefix contains `needle`, then the largest start
/// line that keeps it contained
///
/// The stripped text is built once; `ends[i]` is the stripped offset where
/// line `i` ends.
fn tight_range(source: &str, needle: &str) -> Option<LineRange> {
    if needle.is_empty() {
        return None;
    }

    let mut text = String::with_capacity(source.len());
    let mut ends = Vec::new();
    for line in source.lines() {
        text.extend(line.chars().filter(|ch| !ch.is_whitespace()));
        ends.push(text.len());
    }
    let line_of = |offset: usize| ends.partition_point(|&end| end <= offset);

    let first = text.find(needle)?;
    let end_line = line_of(first + needle.len() - 1);
    let limit = ends[end_line];

    // Later (possibly overlapping) matches ending on the same line pull the start down.
    let mut last = first;
    while let Some((step, _)) = text[last..].char_indices().nth(1) {
        let from = last + step;
        match text[from..].find(needle) {
            Some(rel) if from + rel + needle.len() <= limit => last = from + rel,
            _ => break,
        }
    }

    Some(LineRange::new(line_of(last) + 1, end_line + 1))
}

/// Align annotations, in document order, against the source listings
///
/// Annotations that match no source are dropped; the returned position of an
/// excerpt is its ordinal.
pub fn align_excerpts<A, S>(annotations: &[A], sources: &[S]) -> Vec<Excerpt>
where
    A: AsRef<str>,
    S: AsRef<str>,
{
    annotations
        .iter()
        .enumerate()
        .filter_map(|(annotation_index, annotation)| {
            let annotation = annotation.as_ref();
            match locate_excerpt(annotation, sources) {
                Some((source, range)) => Some(Excerpt {
                    annotation: annotation.to_string(),
                    annotation_index,
                    source,
                    range,
                }),
                None => {
                    log::debug!("Annotation {annotation_index} matches no source, dropping it");
                    None
                }
            }
        })
        .collect()
}
