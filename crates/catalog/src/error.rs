use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while building a source catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The site listing could not be retrieved
    #[error("Listing unavailable at {route}: {message}")]
    Listing { route: String, message: String },

    /// A single page could not be retrieved
    #[error("Failed to fetch {route}: {message}")]
    Fetch { route: String, message: String },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CatalogError {
    /// Create a fetch error for a route
    pub fn fetch(route: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            route: route.into(),
            message: message.into(),
        }
    }

    /// Create a listing error for a route
    pub fn listing(route: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Listing {
            route: route.into(),
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
