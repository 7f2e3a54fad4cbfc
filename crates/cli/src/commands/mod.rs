//! Command implementations.
//!
//! Each invocation opens the stores over the storefront's data directory,
//! applies one operation, and prints the result.

pub mod cart;
pub mod products;
pub mod wishlist;

use std::sync::Arc;

use deskfront_core::{Product, ProductId, QuantityError};
use deskfront_storefront::cart::CartStore;
use deskfront_storefront::catalog::Catalog;
use deskfront_storefront::config::{ConfigError, StorefrontConfig};
use deskfront_storefront::notify::{NotificationQueue, Notifier};
use deskfront_storefront::storage::{FileStorage, KeyValueStorage, StorageError};
use deskfront_storefront::wishlist::WishlistStore;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The data directory could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// No catalog product has this id.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// Quantity was out of range.
    #[error("Invalid quantity: {0}")]
    Quantity(#[from] QuantityError),
}

/// Stores and catalog shared by every command.
pub struct Context {
    catalog: Catalog,
    storage: Arc<dyn KeyValueStorage>,
    notifications: Arc<NotificationQueue>,
    persist_cart: bool,
}

impl Context {
    /// Load configuration from the environment and open its data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the data directory
    /// cannot be created.
    pub fn from_env() -> Result<Self, CommandError> {
        let config = StorefrontConfig::from_env()?;
        let storage = FileStorage::open(&config.data_dir)?;
        tracing::debug!(data_dir = %storage.dir().display(), "Opened data directory");
        Ok(Self::with_storage(
            Catalog::sample(),
            Arc::new(storage),
            &config,
        ))
    }

    /// Build a context over an explicit storage backend.
    pub fn with_storage(
        catalog: Catalog,
        storage: Arc<dyn KeyValueStorage>,
        config: &StorefrontConfig,
    ) -> Self {
        Self {
            catalog,
            storage,
            notifications: Arc::new(NotificationQueue::new(config.notification_capacity)),
            persist_cart: config.persist_cart,
        }
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Look up a catalog product.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownProduct`] if no product has this id.
    pub fn product(&self, id: &ProductId) -> Result<&Product, CommandError> {
        self.catalog
            .get(id)
            .ok_or_else(|| CommandError::UnknownProduct(id.clone()))
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    /// Open the wishlist.
    pub fn wishlist(&self) -> WishlistStore {
        WishlistStore::load(self.storage.clone(), self.notifier())
    }

    /// Open the cart. Without cart persistence this is an empty cart that
    /// lives only as long as the command.
    pub fn cart(&self) -> CartStore {
        if self.persist_cart {
            CartStore::persistent(self.storage.clone(), self.notifier())
        } else {
            tracing::warn!(
                "Cart persistence is off; set STOREFRONT_PERSIST_CART=true to keep the cart between commands"
            );
            CartStore::new(self.notifier())
        }
    }

    fn notifier(&self) -> Arc<dyn Notifier> {
        self.notifications.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use deskfront_core::Quantity;
    use deskfront_storefront::storage::MemoryStorage;

    use super::*;

    fn context(persist_cart: bool) -> (Context, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let config = StorefrontConfig {
            persist_cart,
            ..StorefrontConfig::default()
        };
        let ctx = Context::with_storage(Catalog::sample(), storage.clone(), &config);
        (ctx, storage)
    }

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    #[test]
    fn test_unknown_product() {
        let (ctx, _) = context(false);
        assert!(matches!(
            ctx.product(&id("42")),
            Err(CommandError::UnknownProduct(_))
        ));
        assert_eq!(ctx.product(&id("4")).unwrap().name, "RGB Dreams Poster");
    }

    #[test]
    fn test_wishlist_survives_between_commands() {
        let (ctx, _) = context(false);
        let pad = ctx.product(&id("8")).unwrap().clone();
        ctx.wishlist().add_to_wishlist(&pad);

        assert!(ctx.wishlist().is_in_wishlist(&id("8")));
    }

    #[test]
    fn test_cart_needs_persistence_to_survive() {
        let (ctx, _) = context(false);
        let pad = ctx.product(&id("1")).unwrap().clone();
        ctx.cart().add_to_cart(&pad, Quantity::ONE);
        assert!(ctx.cart().is_empty());

        let (ctx, _) = context(true);
        ctx.cart().add_to_cart(&pad, Quantity::ONE);
        ctx.cart().add_to_cart(&pad, Quantity::ONE);
        assert_eq!(ctx.cart().item_count(), 2);
    }
}
