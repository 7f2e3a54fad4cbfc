//! Core types for Deskfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod quantity;

pub use id::{ProductId, ProductIdError};
pub use price::{Price, PriceError};
pub use product::{Category, CategoryError, Product};
pub use quantity::{Quantity, QuantityError};
