//! Deskfront Core - Shared types library.
//!
//! This crate provides common types used across all Deskfront components:
//! - `storefront` - Cart and wishlist stores, catalog, and the JSON service
//! - `cli` - Command-line access to the catalog and the persisted stores
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, prices, quantities, and
//!   catalog products

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
