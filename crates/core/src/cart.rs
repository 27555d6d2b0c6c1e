//! The cart store.
//!
//! A [`Cart`] is an ordered collection of [`CartLine`]s keyed by
//! [`ProductId`]. It exposes three mutations - add-or-increment, set-quantity
//! and remove - each a pure transformation that consumes the old state and
//! returns the new one. None of them can fail: an unknown product identity
//! leaves the cart unchanged.
//!
//! # Invariants
//!
//! - `product_id` is unique across lines.
//! - Every line has `quantity >= 1`. Setting a quantity of zero or below
//!   removes the line.
//! - Lines keep the order of their first add; updates never reorder.
//!
//! Derived figures such as [`Cart::total_items`] are recomputed on every call
//! and never stored.
//!
//! # Example
//!
//! ```
//! use pokecart_core::{Cart, CatalogItem, CatalogItemId, ProductId};
//!
//! let bulbasaur = CatalogItem {
//!     id: CatalogItemId::new(1),
//!     name: "bulbasaur".to_string(),
//!     image_url: String::new(),
//! };
//!
//! let cart = Cart::new().add(&bulbasaur).add(&bulbasaur);
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.total_items(), 2);
//!
//! let cart = cart.set_quantity(&ProductId::new("1"), 5);
//! assert_eq!(cart.total_items(), 5);
//!
//! let cart = cart.remove(&ProductId::new("1"));
//! assert!(cart.is_empty());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::CatalogItem;
use crate::types::ProductId;

/// One row of the cart: a distinct product and its requested quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Stringified catalog item ID.
    pub product_id: ProductId,
    /// Catalog name captured when the line was created.
    pub title: String,
    /// Always at least 1.
    pub quantity: u32,
}

/// A mutation dispatched against the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit of a catalog item, creating the line if needed.
    Add(CatalogItem),
    /// Replace the quantity of a line. Zero or negative removes the line.
    SetQuantity {
        product_id: ProductId,
        quantity: i64,
    },
    /// Remove a line.
    Remove(ProductId),
}

/// Errors that can occur when building a [`Cart`] from raw lines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("product {0} appears on more than one line")]
    DuplicateLine(ProductId),
    #[error("product {0} has a quantity of zero")]
    ZeroQuantity(ProductId),
}

/// Ordered collection of cart lines.
///
/// Deserialization goes through [`Cart::try_from`], so a decoded cart holds
/// the same invariants as one built with [`Cart::add`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = CartError;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        for (index, line) in lines.iter().enumerate() {
            if line.quantity == 0 {
                return Err(CartError::ZeroQuantity(line.product_id.clone()));
            }
            if lines
                .iter()
                .take(index)
                .any(|earlier| earlier.product_id == line.product_id)
            {
                return Err(CartError::DuplicateLine(line.product_id.clone()));
            }
        }
        Ok(Self { lines })
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Apply a single action and return the resulting cart.
    #[must_use]
    pub fn apply(self, action: CartAction) -> Self {
        match action {
            CartAction::Add(item) => self.add(&item),
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => self.set_quantity(&product_id, quantity),
            CartAction::Remove(product_id) => self.remove(&product_id),
        }
    }

    /// Add one unit of `item`.
    ///
    /// Increments the existing line for the item's product identity, or
    /// appends a new line with quantity 1 and the item's current name.
    #[must_use]
    pub fn add(mut self, item: &CatalogItem) -> Self {
        let product_id = ProductId::from(item.id);

        match self.position(&product_id) {
            Some(index) => {
                if let Some(line) = self.lines.get_mut(index) {
                    line.quantity = line.quantity.saturating_add(1);
                }
            }
            None => self.lines.push(CartLine {
                product_id,
                title: item.name.clone(),
                quantity: 1,
            }),
        }

        self
    }

    /// Replace the quantity of the line for `product_id`.
    ///
    /// This is a full replace, not a delta. A quantity of zero or below removes
    /// the line; values above `u32::MAX` are clamped. Unknown identities are a
    /// no-op.
    #[must_use]
    pub fn set_quantity(mut self, product_id: &ProductId, quantity: i64) -> Self {
        let Some(index) = self.position(product_id) else {
            return self;
        };

        if quantity <= 0 {
            self.lines.remove(index);
            return self;
        }

        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }

        self
    }

    /// Remove the line for `product_id`, keeping the order of the rest.
    #[must_use]
    pub fn remove(mut self, product_id: &ProductId) -> Self {
        self.lines.retain(|line| &line.product_id != product_id);
        self
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up the line for `product_id`.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| &line.product_id == product_id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| &line.product_id == product_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::types::CatalogItemId;

    fn line(product_id: &str, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(product_id),
            title: format!("item {product_id}"),
            quantity,
        }
    }

    fn item(id: u32, name: &str) -> CatalogItem {
        CatalogItem {
            id: CatalogItemId::new(id),
            name: name.to_string(),
            image_url: format!("https://img.test/{id}.png"),
        }
    }

    fn pid(id: &str) -> ProductId {
        ProductId::new(id)
    }

    fn quantities(cart: &Cart) -> Vec<(String, u32)> {
        cart.lines()
            .iter()
            .map(|line| (line.product_id.to_string(), line.quantity))
            .collect()
    }

    // =========================================================================
    // add
    // =========================================================================

    #[test]
    fn test_add_to_empty_cart() {
        let cart = Cart::new().add(&item(1, "bulbasaur"));

        assert_eq!(
            cart.lines(),
            &[CartLine {
                product_id: pid("1"),
                title: "bulbasaur".to_string(),
                quantity: 1,
            }]
        );
    }

    #[test]
    fn test_add_same_item_twice_increments() {
        let bulbasaur = item(1, "bulbasaur");
        let cart = Cart::new().add(&bulbasaur).add(&bulbasaur);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_add_distinct_items_preserves_insertion_order() {
        let cart = Cart::new()
            .add(&item(4, "charmander"))
            .add(&item(1, "bulbasaur"))
            .add(&item(4, "charmander"));

        assert_eq!(
            quantities(&cart),
            vec![("4".to_string(), 2), ("1".to_string(), 1)]
        );
    }

    #[test]
    fn test_add_keeps_title_from_first_add() {
        let cart = Cart::new()
            .add(&item(1, "bulbasaur"))
            .add(&item(1, "renamed"));

        assert_eq!(cart.lines()[0].title, "bulbasaur");
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_add_saturates_at_max() {
        let cart = Cart::new()
            .add(&item(1, "bulbasaur"))
            .set_quantity(&pid("1"), i64::from(u32::MAX))
            .add(&item(1, "bulbasaur"));

        assert_eq!(cart.lines()[0].quantity, u32::MAX);
    }

    // =========================================================================
    // set_quantity
    // =========================================================================

    #[test]
    fn test_set_quantity_updates_only_target_line() {
        let cart = Cart::new()
            .add(&item(1, "bulbasaur"))
            .add(&item(2, "ivysaur"))
            .set_quantity(&pid("1"), 5);

        assert_eq!(
            quantities(&cart),
            vec![("1".to_string(), 5), ("2".to_string(), 1)]
        );
    }

    #[test]
    fn test_set_quantity_unknown_product_is_noop() {
        let before = Cart::new().add(&item(1, "bulbasaur"));
        let after = before.clone().set_quantity(&pid("99"), 5);

        assert_eq!(before, after);
    }

    #[test]
    fn test_set_quantity_is_replace_not_delta() {
        let cart = Cart::new()
            .add(&item(1, "bulbasaur"))
            .add(&item(1, "bulbasaur"))
            .set_quantity(&pid("1"), 3);

        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-1)]
    #[case::very_negative(i64::MIN)]
    fn test_set_quantity_non_positive_removes_line(#[case] quantity: i64) {
        let cart = Cart::new()
            .add(&item(1, "bulbasaur"))
            .add(&item(2, "ivysaur"))
            .add(&item(3, "venusaur"))
            .set_quantity(&pid("2"), quantity);

        assert_eq!(
            quantities(&cart),
            vec![("1".to_string(), 1), ("3".to_string(), 1)]
        );
    }

    #[test]
    fn test_set_quantity_clamps_large_values() {
        let cart = Cart::new()
            .add(&item(1, "bulbasaur"))
            .set_quantity(&pid("1"), i64::MAX);

        assert_eq!(cart.lines()[0].quantity, u32::MAX);
    }

    // =========================================================================
    // remove
    // =========================================================================

    #[test]
    fn test_remove_preserves_order_of_rest() {
        let cart = Cart::new()
            .add(&item(1, "bulbasaur"))
            .add(&item(2, "ivysaur"))
            .add(&item(3, "venusaur"))
            .remove(&pid("2"));

        assert_eq!(
            quantities(&cart),
            vec![("1".to_string(), 1), ("3".to_string(), 1)]
        );
    }

    #[test]
    fn test_remove_unknown_product_is_noop() {
        let before = Cart::new().add(&item(1, "bulbasaur"));
        let after = before.clone().remove(&pid("7"));

        assert_eq!(before, after);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let cart = Cart::new()
            .add(&item(1, "bulbasaur"))
            .add(&item(2, "ivysaur"));

        let once = cart.clone().remove(&pid("1"));
        let twice = cart.remove(&pid("1")).remove(&pid("1"));

        assert_eq!(once, twice);
    }

    #[test]
    fn test_re_add_after_remove_appends_at_end() {
        let cart = Cart::new()
            .add(&item(1, "bulbasaur"))
            .add(&item(2, "ivysaur"))
            .remove(&pid("1"))
            .add(&item(1, "bulbasaur"));

        assert_eq!(
            quantities(&cart),
            vec![("2".to_string(), 1), ("1".to_string(), 1)]
        );
    }

    // =========================================================================
    // apply / derived totals
    // =========================================================================

    #[test]
    fn test_apply_dispatches_actions() {
        let cart = [
            CartAction::Add(item(1, "bulbasaur")),
            CartAction::Add(item(2, "ivysaur")),
            CartAction::SetQuantity {
                product_id: pid("1"),
                quantity: 3,
            },
            CartAction::Remove(pid("2")),
        ]
        .into_iter()
        .fold(Cart::new(), Cart::apply);

        assert_eq!(quantities(&cart), vec![("1".to_string(), 3)]);
    }

    #[test]
    fn test_total_items_tracks_every_operation() {
        let mut cart = Cart::new();
        assert_eq!(cart.total_items(), 0);

        cart = cart.add(&item(1, "bulbasaur")).add(&item(2, "ivysaur"));
        assert_eq!(cart.total_items(), 2);

        cart = cart.set_quantity(&pid("1"), 3);
        assert_eq!(cart.total_items(), 4);

        cart = cart.remove(&pid("2"));
        assert_eq!(cart.total_items(), 3);

        let summed: u64 = cart.lines().iter().map(|l| u64::from(l.quantity)).sum();
        assert_eq!(cart.total_items(), summed);
    }

    #[test]
    fn test_total_items_does_not_overflow() {
        let cart = Cart::new()
            .add(&item(1, "bulbasaur"))
            .add(&item(2, "ivysaur"))
            .set_quantity(&pid("1"), i64::from(u32::MAX))
            .set_quantity(&pid("2"), i64::from(u32::MAX));

        assert_eq!(cart.total_items(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_line_lookup() {
        let cart = Cart::new().add(&item(1, "bulbasaur"));

        assert_eq!(cart.line(&pid("1")).unwrap().title, "bulbasaur");
        assert!(cart.line(&pid("2")).is_none());
    }

    // =========================================================================
    // Decoding
    // =========================================================================

    #[test]
    fn test_decode_valid_cart() {
        let cart: Cart = serde_json::from_str(
            r#"[{"product_id":"1","title":"bulbasaur","quantity":2},{"product_id":"4","title":"charmander","quantity":1}]"#,
        )
        .unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines()[1].product_id, "4");
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_decode_rejects_duplicate_and_zero_lines() {
        let result = serde_json::from_str::<Cart>(
            r#"[{"product_id":"1","title":"a","quantity":0},{"product_id":"1","title":"b","quantity":2}]"#,
        );
        assert!(result.is_err());

        let result = serde_json::from_str::<Cart>(
            r#"[{"product_id":"1","title":"a","quantity":1},{"product_id":"1","title":"b","quantity":2}]"#,
        );
        assert!(result.is_err());
    }

    #[rstest]
    #[case::zero_quantity(vec![line("1", 0)], CartError::ZeroQuantity(ProductId::new("1")))]
    #[case::duplicate(vec![line("1", 1), line("2", 1), line("1", 3)], CartError::DuplicateLine(ProductId::new("1")))]
    fn test_try_from_rejects_invalid_lines(#[case] lines: Vec<CartLine>, #[case] expected: CartError) {
        assert_eq!(Cart::try_from(lines).unwrap_err(), expected);
    }

    #[test]
    fn test_encoding_is_the_line_list() {
        let cart = Cart::new().add(&item(1, "bulbasaur")).add(&item(1, "bulbasaur"));

        let json = serde_json::to_value(&cart).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{"product_id": "1", "title": "bulbasaur", "quantity": 2}])
        );
    }
}
