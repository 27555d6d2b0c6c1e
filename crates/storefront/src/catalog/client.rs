//! HTTP client for the catalog listing endpoint.

use std::sync::Arc;

use pokecart_core::CatalogItem;
use pokecart_core::catalog::ListingResponse;
use tracing::instrument;
use url::Url;

use super::FetchError;
use crate::config::CatalogConfig;

/// Client for the catalog listing endpoint.
///
/// Cheap to clone; the underlying `reqwest::Client` is shared.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    listing_url: Url,
    image_url_template: String,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                listing_url: config.listing_url.clone(),
                image_url_template: config.image_url_template.clone(),
            }),
        }
    }

    /// The endpoint this client reads from.
    #[must_use]
    pub fn listing_url(&self) -> &Url {
        &self.inner.listing_url
    }

    /// Fetch the listing and map it to catalog items.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` on transport failure, `FetchError::Status`
    /// for a non-2xx response and `FetchError::Parse` when the body is not a
    /// listing.
    #[instrument(skip(self), fields(url = %self.inner.listing_url))]
    pub async fn load(&self) -> Result<Vec<CatalogItem>, FetchError> {
        let response = self
            .inner
            .client
            .get(self.inner.listing_url.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Listing endpoint returned non-success status"
            );
            return Err(FetchError::Status(status.as_u16()));
        }

        let listing: ListingResponse = match serde_json::from_str(&response_text) {
            Ok(listing) => listing,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse listing response"
                );
                return Err(FetchError::Parse(e));
            }
        };

        let items = listing.into_catalog(&self.inner.image_url_template);
        tracing::debug!(count = items.len(), "Catalog listing mapped");
        Ok(items)
    }
}
