//! # Doctrace Catalog
//!
//! Function catalogs for the source listings embedded in a documentation site.
//!
//! ## Architecture
//!
//! ```text
//! Site listing ("/")
//!     │
//!     ├──> Route extraction (<li><a href>)
//!     │
//!     ├──> Page retrieval (PageSource, sequential, once per route)
//!     │
//!     ├──> Code region extraction (<pre><code>, document order)
//!     │
//!     └──> Per-region parsing
//!          ├─> Language family detection (fixed priority fingerprints)
//!          ├─> Family-specific function sweep
//!          └─> Merge into the page's FunctionCatalog (ascending indices)
//! ```
//!
//! Extraction is heuristic pattern matching, not symbol binding. Imprecise
//! descriptors are expected; callers compensate with fuzzy scoring.
//!
//! ## Example
//!
//! ```rust
//! use doctrace_catalog::{CatalogBuilder, CatalogConfig, LanguageFamily};
//!
//! let builder = CatalogBuilder::new(CatalogConfig::default()).unwrap();
//! let page = builder.build_page(
//!     "/parser/",
//!     "<pre><code>func Parse(src string) error {\n\treturn nil\n}</code></pre>",
//! );
//!
//! let go = page.functions.bucket(LanguageFamily::Go);
//! assert_eq!(go[0].name, "Parse");
//! ```

mod builder;
mod config;
mod error;
mod html;
mod language;
mod source;
mod strategy;
mod types;

pub use builder::CatalogBuilder;
pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use html::{decode_entities, extract_code_regions, extract_routes};
pub use language::LanguageFamily;
pub use source::{normalize_route, DirectorySource, MemorySource, PageSource};
pub use strategy::{detect_language, FunctionExtractor, ParsedRegion, RegionParser};
pub use types::{FunctionCatalog, FunctionDescriptor, Page, Parameter, SourceCatalog};
