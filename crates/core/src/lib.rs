//! Poke Cart Core - catalog records and the cart state container.
//!
//! This crate provides the types shared by the storefront binary and its tests:
//! - [`types`] - Newtype wrappers for catalog item IDs and product identities
//! - [`catalog`] - Catalog item records and the listing-to-item mapping
//! - [`cart`] - The cart store: ordered lines keyed by product identity
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no locking. The storefront owns the single cart instance and
//! serializes mutations; every operation here is a complete transformation
//! from old state to new state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{Cart, CartAction, CartError, CartLine};
pub use catalog::{CatalogItem, DEFAULT_IMAGE_URL_TEMPLATE};
pub use types::*;
