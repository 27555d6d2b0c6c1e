//! Product identity used as the cart line key.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::CatalogItemId;

/// The identity of a product in the cart.
///
/// This is the stringified [`CatalogItemId`] of the catalog entry the line was
/// created from. Cart lines are keyed by this value, so two adds of the same
/// catalog item always land on the same line.
///
/// Any string is accepted: a product identity that matches no line simply
/// makes cart operations a no-op.
///
/// ## Examples
///
/// ```
/// use pokecart_core::{CatalogItemId, ProductId};
///
/// let id = ProductId::from(CatalogItemId::new(1));
/// assert_eq!(id.as_str(), "1");
/// assert_eq!(id, ProductId::new("1"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product identity from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the product identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<CatalogItemId> for ProductId {
    fn from(id: CatalogItemId) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ProductId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ProductId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
