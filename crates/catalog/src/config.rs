use serde::{Deserialize, Serialize};

/// Configuration for catalog building
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Route of the page whose list items enumerate the site
    pub listing_route: String,

    /// Maximum number of pages to retrieve (0 = no limit)
    pub max_pages: usize,

    /// Code regions larger than this are not parsed
    pub max_region_bytes: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            listing_route: "/".to_string(),
            max_pages: 0,
            max_region_bytes: 512 * 1024,
        }
    }
}

impl CatalogConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.listing_route.trim().is_empty() {
            return Err("listing_route must not be empty".to_string());
        }

        if self.max_region_bytes == 0 {
            return Err("max_region_bytes must be > 0".to_string());
        }

        Ok(())
    }
}
