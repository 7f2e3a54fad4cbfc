//! Deskfront storefront library.
//!
//! Cart and wishlist stores for a desk-accessories shop, the product
//! catalog they draw from, and the JSON service that exposes them. The
//! stores are plain values: build them with a [`notify::Notifier`] and,
//! where persistence applies, a [`storage::KeyValueStorage`] backend.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod notify;
pub mod routes;
pub mod state;
pub mod storage;
pub mod summary;
pub mod wishlist;
