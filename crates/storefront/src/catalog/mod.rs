//! Catalog listing client and load state.
//!
//! # Architecture
//!
//! - One unauthenticated GET to the listing endpoint at startup
//! - Response records are mapped to [`CatalogItem`]s by position
//! - The result is published once through a `tokio::sync::watch` channel
//!   held by [`AppState`](crate::state::AppState)
//! - No caching, pagination or retry; failures are logged and the previous
//!   catalog (if any) stays in place
//!
//! # Example
//!
//! ```rust,ignore
//! use pokecart_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//! let items = client.load().await?;
//! ```

mod client;
mod state;

pub use client::CatalogClient;
pub use state::CatalogState;

pub use pokecart_core::CatalogItem;

use thiserror::Error;

/// Errors that can occur when loading the catalog.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Listing endpoint returned a non-success status.
    #[error("Listing endpoint returned status {0}")]
    Status(u16),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
