//! Application state shared across handlers.
//!
//! The cart and wishlist stores are built exactly once, here, and handed to
//! every consumer through [`AppState`]. Nothing reaches them through globals.
//! Each store sits behind its own async mutex, so mutations run one at a
//! time and in arrival order.

use std::sync::Arc;

use deskfront_core::ProductId;
use tokio::sync::{Mutex, MutexGuard};

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::notify::{Notifier, NotificationQueue};
use crate::storage::{FileStorage, KeyValueStorage, StorageError};
use crate::wishlist::{MoveOutcome, WishlistStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: Mutex<CartStore>,
    wishlist: Mutex<WishlistStore>,
    notifications: Arc<NotificationQueue>,
}

impl AppState {
    /// Create application state backed by file storage in `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or is
    /// already owned by another process.
    pub fn new(config: StorefrontConfig) -> Result<Self, StorageError> {
        let storage = Arc::new(FileStorage::open(&config.data_dir)?);
        tracing::info!(data_dir = %storage.dir().display(), "Using file storage");
        Ok(Self::with_storage(config, Catalog::sample(), storage))
    }

    /// Create application state over an explicit catalog and storage backend.
    #[must_use]
    pub fn with_storage(
        config: StorefrontConfig,
        catalog: Catalog,
        storage: Arc<dyn KeyValueStorage>,
    ) -> Self {
        let notifications = Arc::new(NotificationQueue::new(config.notification_capacity));
        let notifier: Arc<dyn Notifier> = notifications.clone();

        let cart = if config.persist_cart {
            CartStore::persistent(storage.clone(), notifier.clone())
        } else {
            CartStore::new(notifier.clone())
        };
        let wishlist = WishlistStore::load(storage, notifier);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(cart),
                wishlist: Mutex::new(wishlist),
                notifications,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the pending notification queue.
    #[must_use]
    pub fn notifications(&self) -> &NotificationQueue {
        &self.inner.notifications
    }

    /// Lock the cart for reading or mutation.
    pub async fn cart(&self) -> MutexGuard<'_, CartStore> {
        self.inner.cart.lock().await
    }

    /// Lock the wishlist for reading or mutation.
    pub async fn wishlist(&self) -> MutexGuard<'_, WishlistStore> {
        self.inner.wishlist.lock().await
    }

    /// Move a wishlist item into the cart with a quantity of one.
    ///
    /// Locks the wishlist, then the cart.
    pub async fn move_to_cart(&self, id: &ProductId) -> MoveOutcome {
        let mut wishlist = self.wishlist().await;
        let mut cart = self.cart().await;
        wishlist.move_to_cart(&mut cart, id)
    }
}
