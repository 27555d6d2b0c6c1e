//! Outcome of the one-shot catalog load.

use std::sync::Arc;

use pokecart_core::{CatalogItem, CatalogItemId};

/// Catalog load state as observed by the views.
///
/// Starts as `Pending`. A successful load moves to `Loaded` and replaces the
/// catalog wholesale. A failed load moves to `Failed`, keeping whatever
/// catalog was known before so the views never lose data they already showed.
#[derive(Debug, Clone, Default)]
pub enum CatalogState {
    /// The load has not completed.
    #[default]
    Pending,
    /// The most recent load succeeded.
    Loaded(Arc<[CatalogItem]>),
    /// The most recent load failed; `previous` is the last good catalog.
    Failed {
        previous: Option<Arc<[CatalogItem]>>,
    },
}

impl CatalogState {
    /// Catalog items available for display, if any load ever succeeded.
    #[must_use]
    pub fn items(&self) -> Option<&[CatalogItem]> {
        match self {
            Self::Loaded(items) | Self::Failed {
                previous: Some(items),
            } => Some(items.as_ref()),
            Self::Pending | Self::Failed { previous: None } => None,
        }
    }

    /// Whether the views can render a catalog.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.items().is_some()
    }

    /// Find a catalog item by ID.
    #[must_use]
    pub fn find(&self, id: CatalogItemId) -> Option<&CatalogItem> {
        self.items()?.iter().find(|item| item.id == id)
    }

    /// State after a successful load.
    #[must_use]
    pub fn loaded(items: Vec<CatalogItem>) -> Self {
        Self::Loaded(items.into())
    }

    /// State after a failed load, retaining the current catalog.
    #[must_use]
    pub fn failed(&self) -> Self {
        Self::Failed {
            previous: match self {
                Self::Loaded(items) => Some(Arc::clone(items)),
                Self::Failed { previous } => previous.clone(),
                Self::Pending => None,
            },
        }
    }
}
