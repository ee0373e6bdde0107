use crate::language::LanguageFamily;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One parameter of an extracted function signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    /// Declared type, when the family's syntax carries one
    #[serde(rename = "type")]
    pub ty: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: Option<String>) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Function signature record extracted from a source listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    /// Function name as written in the definition
    pub name: String,

    /// Parameters in declaration order
    pub parameters: Vec<Parameter>,

    /// Return type, if declared
    pub return_type: Option<String>,

    /// Raw definition text matched by the extractor
    pub definition: String,

    /// Language family of the listing this came from
    pub language: LanguageFamily,

    /// Discovery order within the (page, language) bucket
    pub index: usize,
}

impl FunctionDescriptor {
    /// Create a descriptor; the index is assigned when it joins a catalog bucket
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<Parameter>,
        return_type: Option<String>,
        definition: impl Into<String>,
        language: LanguageFamily,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            return_type,
            definition: definition.into(),
            language,
            index: 0,
        }
    }

    /// Fragment anchor for this function: lowercase name followed by the family tag
    #[must_use]
    pub fn anchor(&self) -> String {
        format!("{}{}", self.name.to_lowercase(), self.language.as_str())
    }
}

/// Descriptors of one page grouped by language family
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCatalog {
    buckets: BTreeMap<LanguageFamily, Vec<FunctionDescriptor>>,
}

impl FunctionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a descriptor to its family bucket, returning the assigned index
    pub fn push(&mut self, mut descriptor: FunctionDescriptor) -> usize {
        let bucket = self.buckets.entry(descriptor.language).or_default();
        let index = bucket.len();
        descriptor.index = index;
        bucket.push(descriptor);
        index
    }

    /// Append descriptors in order
    pub fn extend(&mut self, descriptors: impl IntoIterator<Item = FunctionDescriptor>) {
        for descriptor in descriptors {
            self.push(descriptor);
        }
    }

    /// Descriptors for a family, in discovery order
    #[must_use]
    pub fn bucket(&self, language: LanguageFamily) -> &[FunctionDescriptor] {
        self.buckets
            .get(&language)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Families that have at least one descriptor
    pub fn languages(&self) -> impl Iterator<Item = LanguageFamily> + '_ {
        self.buckets
            .iter()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(language, _)| *language)
    }

    /// Total descriptor count across all families
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A documentation page and the functions found in its listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Route as it appears in the site listing
    pub route: String,

    /// Rendered page text
    #[serde(skip_serializing, default)]
    pub text: String,

    /// Code regions in document order
    pub regions: Vec<String>,

    pub functions: FunctionCatalog,
}

/// Read-only set of pages, in listing order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCatalog {
    pages: Vec<Page>,
}

impl SourceCatalog {
    /// Create a catalog from pages; later pages with an already-seen route are dropped
    #[must_use]
    pub fn from_pages(pages: impl IntoIterator<Item = Page>) -> Self {
        let mut out: Vec<Page> = Vec::new();
        for page in pages {
            if out.iter().any(|existing| existing.route == page.route) {
                log::debug!("Dropping duplicate page {}", page.route);
                continue;
            }
            out.push(page);
        }
        Self { pages: out }
    }

    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Find page by route
    #[must_use]
    pub fn page(&self, route: &str) -> Option<&Page> {
        self.pages.iter().find(|page| page.route == route)
    }

    /// Total descriptor count across all pages
    #[must_use]
    pub fn function_count(&self) -> usize {
        self.pages.iter().map(|page| page.functions.len()).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
