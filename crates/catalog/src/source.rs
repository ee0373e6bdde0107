use crate::error::{CatalogError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Retrieval seam for rendered pages
///
/// The builder awaits one `fetch` per route, in listing order.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Rendered HTML for a route
    async fn fetch(&self, route: &str) -> Result<String>;
}

/// Route without surrounding slashes; the site root is `""`
pub fn normalize_route(route: &str) -> &str {
    let route = route.trim();
    let route = route.split(['?', '#']).next().unwrap_or(route);
    route.trim_matches('/')
}

/// Pages held in memory, keyed by normalized route
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a page
    #[must_use]
    pub fn with_page(mut self, route: &str, html: impl Into<String>) -> Self {
        self.insert(route, html);
        self
    }

    pub fn insert(&mut self, route: &str, html: impl Into<String>) {
        self.pages
            .insert(normalize_route(route).to_string(), html.into());
    }
}

#[async_trait]
impl PageSource for MemorySource {
    async fn fetch(&self, route: &str) -> Result<String> {
        self.pages
            .get(normalize_route(route))
            .cloned()
            .ok_or_else(|| CatalogError::fetch(route, "no such page"))
    }
}

/// Pages of a statically generated site on disk
///
/// A route resolves to `<root>/<route>`, `<root>/<route>/index.html` or
/// `<root>/<route>.html`, first existing file wins. When the site has no root
/// `index.html`, the root route serves a synthesized listing of every
/// `index.html` below the root.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidates(&self, route: &str) -> Vec<PathBuf> {
        let route = normalize_route(route);
        if route.is_empty() {
            return vec![self.root.join("index.html")];
        }
        let base = self.root.join(route);
        vec![
            base.clone(),
            base.join("index.html"),
            self.root.join(format!("{route}.html")),
        ]
    }

    /// Routes of every nested `index.html`, sorted for determinism
    pub fn discover_routes(&self) -> Vec<String> {
        let mut routes: Vec<String> = WalkDir::new(&self.root)
            .min_depth(2)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::warn!("Failed to read entry: {err}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && entry.file_name() == "index.html")
            .filter_map(|entry| {
                let dir = entry.path().parent()?.strip_prefix(&self.root).ok()?;
                let route = dir
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/");
                Some(format!("/{route}/"))
            })
            .collect();
        routes.sort();
        routes
    }

    fn synthesized_listing(&self) -> String {
        let items: String = self
            .discover_routes()
            .iter()
            .map(|route| format!("<li><a href=\"{route}\">{route}</a></li>\n"))
            .collect();
        format!("<ul>\n{items}</ul>\n")
    }
}

#[async_trait]
impl PageSource for DirectorySource {
    async fn fetch(&self, route: &str) -> Result<String> {
        for candidate in self.candidates(route) {
            match tokio::fs::metadata(&candidate).await {
                Ok(meta) if meta.is_file() => {
                    return Ok(tokio::fs::read_to_string(&candidate).await?);
                }
                _ => continue,
            }
        }

        if normalize_route(route).is_empty() {
            log::debug!(
                "No index.html under {}, synthesizing listing",
                self.root.display()
            );
            return Ok(self.synthesized_listing());
        }

        Err(CatalogError::fetch(route, "no matching file"))
    }
}
