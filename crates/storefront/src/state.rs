//! Application state shared across handlers.

use std::sync::Arc;

use pokecart_core::{Cart, CartAction};
use tokio::sync::{RwLock, watch};

use crate::catalog::{CatalogClient, CatalogState, FetchError};
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It owns the single cart for
/// the lifetime of the process and the published catalog load state. It is
/// constructed once in `main` and handed to the router; nothing reaches it
/// through globals.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog_client: CatalogClient,
    catalog: watch::Sender<CatalogState>,
    cart: RwLock<Cart>,
}

impl AppState {
    /// Create a new application state with an empty cart and a pending catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog_client = CatalogClient::new(&config.catalog);
        let (catalog, _) = watch::channel(CatalogState::Pending);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog_client,
                catalog,
                cart: RwLock::new(Cart::new()),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog listing client.
    #[must_use]
    pub fn catalog_client(&self) -> &CatalogClient {
        &self.inner.catalog_client
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Snapshot of the current catalog load state.
    #[must_use]
    pub fn catalog(&self) -> CatalogState {
        self.inner.catalog.borrow().clone()
    }

    /// Subscribe to catalog load state changes.
    #[must_use]
    pub fn subscribe_catalog(&self) -> watch::Receiver<CatalogState> {
        self.inner.catalog.subscribe()
    }

    /// Publish a new catalog load state to all subscribers.
    pub fn publish_catalog(&self, state: CatalogState) {
        self.inner.catalog.send_replace(state);
    }

    /// Fetch the catalog once and publish the outcome.
    ///
    /// On success the catalog is replaced wholesale. On failure the previous
    /// catalog is kept and the state moves to `Failed`.
    ///
    /// # Errors
    ///
    /// Returns the `FetchError` after publishing the failed state.
    pub async fn load_catalog(&self) -> Result<usize, FetchError> {
        match self.inner.catalog_client.load().await {
            Ok(items) => {
                let count = items.len();
                self.publish_catalog(CatalogState::loaded(items));
                Ok(count)
            }
            Err(e) => {
                self.inner.catalog.send_modify(|state| *state = state.failed());
                Err(e)
            }
        }
    }

    /// Start the one-shot catalog load in the background.
    ///
    /// Failures are logged and otherwise ignored: the catalog view keeps
    /// showing its loading indicator.
    pub fn start_catalog_load(&self) -> tokio::task::JoinHandle<()> {
        let state = self.clone();
        tokio::spawn(async move {
            match state.load_catalog().await {
                Ok(count) => tracing::info!(count, "Catalog loaded"),
                Err(e) => tracing::error!(
                    error = %e,
                    url = %state.catalog_client().listing_url(),
                    "Failed to load catalog"
                ),
            }
        })
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Snapshot of the cart.
    pub async fn cart(&self) -> Cart {
        self.inner.cart.read().await.clone()
    }

    /// Apply one cart action and return the resulting cart.
    ///
    /// The write lock is held for the whole transformation so actions never
    /// interleave.
    pub async fn dispatch(&self, action: CartAction) -> Cart {
        let mut cart = self.inner.cart.write().await;
        let next = std::mem::take(&mut *cart).apply(action);
        *cart = next;
        cart.clone()
    }
}
