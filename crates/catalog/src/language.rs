use serde::{Deserialize, Serialize};
use std::path::Path;

/// Language family of an embedded source listing
///
/// Variant order is the detection priority order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LanguageFamily {
    JavaScript,
    Python,
    Go,
    Rust,
    Unknown,
}

impl LanguageFamily {
    /// Families with an extraction strategy, in detection priority order
    pub const KNOWN: [LanguageFamily; 4] = [
        LanguageFamily::JavaScript,
        LanguageFamily::Python,
        LanguageFamily::Go,
        LanguageFamily::Rust,
    ];

    /// Detect family from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.trim().to_lowercase().as_str() {
            "js" | "mjs" | "cjs" => LanguageFamily::JavaScript,
            "py" => LanguageFamily::Python,
            "go" => LanguageFamily::Go,
            "rs" => LanguageFamily::Rust,
            _ => LanguageFamily::Unknown,
        }
    }

    /// Detect family from a file path as it appears in a stack trace
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(LanguageFamily::Unknown)
    }

    /// Get family tag as string
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageFamily::JavaScript => "javascript",
            LanguageFamily::Python => "python",
            LanguageFamily::Go => "go",
            LanguageFamily::Rust => "rust",
            LanguageFamily::Unknown => "unknown",
        }
    }

    /// Human-facing name, as used in search queries
    pub fn display_name(self) -> &'static str {
        match self {
            LanguageFamily::JavaScript => "JavaScript",
            LanguageFamily::Python => "Python",
            LanguageFamily::Go => "Go",
            LanguageFamily::Rust => "Rust",
            LanguageFamily::Unknown => "Unknown",
        }
    }

    pub fn is_known(self) -> bool {
        self != LanguageFamily::Unknown
    }
}

impl std::fmt::Display for LanguageFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(LanguageFamily::from_extension("rs"), LanguageFamily::Rust);
        assert_eq!(LanguageFamily::from_extension("RS"), LanguageFamily::Rust);
        assert_eq!(LanguageFamily::from_extension(" go "), LanguageFamily::Go);
        assert_eq!(LanguageFamily::from_extension("py"), LanguageFamily::Python);
        assert_eq!(
            LanguageFamily::from_extension("js"),
            LanguageFamily::JavaScript
        );
        assert_eq!(LanguageFamily::from_extension("ts"), LanguageFamily::Unknown);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            LanguageFamily::from_path("/home/app/server/main.go"),
            LanguageFamily::Go
        );
        assert_eq!(
            LanguageFamily::from_path("src/lib.rs"),
            LanguageFamily::Rust
        );
        assert_eq!(
            LanguageFamily::from_path("/usr/lib/no_extension"),
            LanguageFamily::Unknown
        );
    }

    #[test]
    fn test_priority_order_matches_variant_order() {
        let mut sorted = LanguageFamily::KNOWN;
        sorted.sort();
        assert_eq!(sorted, LanguageFamily::KNOWN);
        assert!(LanguageFamily::KNOWN.iter().all(|f| f.is_known()));
    }

    #[test]
    fn test_serde_tag() {
        let json = serde_json::to_string(&LanguageFamily::JavaScript).unwrap();
        assert_eq!(json, "\"javascript\"");
    }
}
