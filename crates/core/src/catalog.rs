//! Catalog item records.
//!
//! The catalog is sourced from a public listing endpoint whose body looks like
//! `{"results": [{"name": "bulbasaur", "url": "..."}, ...]}`. Only `name` is
//! consumed. Identities are assigned locally from the array position and the
//! image URL is derived from that identity.

use serde::{Deserialize, Serialize};

use crate::types::CatalogItemId;

/// Image URL template used when none is configured.
///
/// `{id}` is replaced with the item's [`CatalogItemId`].
pub const DEFAULT_IMAGE_URL_TEMPLATE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/{id}.png";

/// Placeholder substituted in image URL templates.
pub const IMAGE_ID_PLACEHOLDER: &str = "{id}";

/// A purchasable item shown in the catalog grid.
///
/// Immutable once created. A successful catalog load replaces the whole set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// 1-based position in the listing response.
    pub id: CatalogItemId,
    /// Display name, copied verbatim from the listing.
    pub name: String,
    /// Image URL derived from `id`.
    pub image_url: String,
}

/// Body of the listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingResponse {
    pub results: Vec<ListingEntry>,
}

/// One record of the listing endpoint. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingEntry {
    pub name: String,
}

impl CatalogItem {
    /// Build a catalog item for the entry at `index` (0-based) of a listing.
    #[must_use]
    pub fn from_listing(index: usize, entry: ListingEntry, image_url_template: &str) -> Self {
        // Listings are bounded by the upstream page size; saturate rather than wrap.
        let id = u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .map_or(CatalogItemId::new(u32::MAX), CatalogItemId::new);

        Self {
            id,
            name: entry.name,
            image_url: image_url(image_url_template, id),
        }
    }
}

impl ListingResponse {
    /// Map every listing record to a [`CatalogItem`], preserving order.
    #[must_use]
    pub fn into_catalog(self, image_url_template: &str) -> Vec<CatalogItem> {
        self.results
            .into_iter()
            .enumerate()
            .map(|(index, entry)| CatalogItem::from_listing(index, entry, image_url_template))
            .collect()
    }
}

/// Render the image URL for `id` from a template containing `{id}`.
#[must_use]
pub fn image_url(template: &str, id: CatalogItemId) -> String {
    template.replace(IMAGE_ID_PLACEHOLDER, &id.to_string())
}
