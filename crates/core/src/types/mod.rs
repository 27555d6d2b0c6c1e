//! Core types for Poke Cart.
//!
//! This module provides type-safe wrappers for catalog and cart identities.

pub mod id;
pub mod product_id;

pub use id::*;
pub use product_id::ProductId;
