use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::html::{extract_code_regions, extract_routes};
use crate::source::PageSource;
use crate::strategy::RegionParser;
use crate::types::{FunctionCatalog, Page, SourceCatalog};

/// Builds the source catalog for a documentation site
pub struct CatalogBuilder {
    config: CatalogConfig,
    parser: RegionParser,
}

impl CatalogBuilder {
    /// Create a new builder with configuration
    pub fn new(config: CatalogConfig) -> Result<Self> {
        config.validate().map_err(CatalogError::invalid_config)?;
        Ok(Self {
            config,
            parser: RegionParser::new(),
        })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Retrieve the listing and every listed page, once each, in listing order
    ///
    /// Only a missing listing is an error. Pages that fail to load are
    /// logged and left out of the catalog.
    pub async fn build<S>(&self, source: &S) -> Result<SourceCatalog>
    where
        S: PageSource + ?Sized,
    {
        let listing_route = self.config.listing_route.as_str();
        let listing = source
            .fetch(listing_route)
            .await
            .map_err(|err| CatalogError::listing(listing_route, err.to_string()))?;

        let mut routes: Vec<String> = Vec::new();
        for route in extract_routes(&listing) {
            if !routes.contains(&route) {
                routes.push(route);
            }
        }
        if self.config.max_pages > 0 && routes.len() > self.config.max_pages {
            log::debug!(
                "Listing has {} routes, keeping the first {}",
                routes.len(),
                self.config.max_pages
            );
            routes.truncate(self.config.max_pages);
        }

        let mut pages = Vec::with_capacity(routes.len());
        for route in routes {
            match source.fetch(&route).await {
                Ok(html) => pages.push(self.build_page(&route, &html)),
                Err(err) => log::warn!("Skipping page {route}: {err}"),
            }
        }

        let catalog = SourceCatalog::from_pages(pages);
        log::info!(
            "Built source catalog: {} pages, {} functions",
            catalog.len(),
            catalog.function_count()
        );
        Ok(catalog)
    }

    /// Build one page from its rendered HTML
    ///
    /// Deterministic: the same text always yields the same descriptors with
    /// the same indices.
    pub fn build_page(&self, route: &str, html: &str) -> Page {
        let regions = extract_code_regions(html);
        let mut functions = FunctionCatalog::new();

        for (idx, region) in regions.iter().enumerate() {
            if region.len() > self.config.max_region_bytes {
                log::debug!(
                    "{route}: region {idx} is {} bytes, over the {} byte limit",
                    region.len(),
                    self.config.max_region_bytes
                );
                continue;
            }
            let parsed = self.parser.parse(region);
            log::debug!(
                "{route}: region {idx} detected as {}, {} functions",
                parsed.language,
                parsed.functions.len()
            );
            functions.extend(parsed.functions);
        }

        Page {
            route: route.to_string(),
            text: html.to_string(),
            regions,
            functions,
        }
    }
}
