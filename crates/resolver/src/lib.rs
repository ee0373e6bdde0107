//! # Doctrace Resolver
//!
//! Correlates a pasted stack trace with the functions of a [`SourceCatalog`].
//!
//! ```text
//! raw trace text
//!     │
//!     ├──> parse_trace        signature line + <path>:<line> pairs, root first
//!     │
//!     └──> FrameResolver      base path → relative dir → best page → best function
//!            └─ similarity   normalized edit distance, first maximum wins
//! ```
//!
//! [`SourceCatalog`]: doctrace_catalog::SourceCatalog

mod resolver;
mod similarity;
mod trace;

pub use resolver::{base_path, lookup_name, relative_dir, short_name, FrameResolver, ResolvedFrame};
pub use similarity::{best_match, edit_distance, similarity};
pub use trace::{detect_trace_language, headline, parse_trace, search_query, TraceFrame};
