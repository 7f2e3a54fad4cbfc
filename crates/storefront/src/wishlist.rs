//! Wishlist store.
//!
//! A deduplicated, durable set of products saved for later. The whole
//! collection is restored from storage when the store is opened and written
//! back after every change, so it survives process restarts.

use std::sync::Arc;

use deskfront_core::{Product, ProductId, Quantity};
use serde::Serialize;

use crate::cart::{AddOutcome, CartStore};
use crate::notify::{Notification, Notifier};
use crate::storage::{self, KeyValueStorage, dedupe_by_id, keys};

/// A saved product. Carries the same fields as a catalog [`Product`],
/// snapshotted when it was saved.
pub type WishlistItem = Product;

/// Result of [`WishlistStore::add_to_wishlist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WishlistAddOutcome {
    Added,
    AlreadyPresent,
}

/// Result of [`WishlistStore::remove_from_wishlist`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "item", rename_all = "snake_case")]
pub enum WishlistRemoveOutcome {
    Removed(WishlistItem),
    NotFound,
}

/// Result of [`WishlistStore::move_to_cart`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The item was added to the cart and removed from the wishlist.
    Moved { item: WishlistItem, cart: AddOutcome },
    /// The id was not in the wishlist; nothing changed.
    NotFound,
}

/// The visitor's wishlist.
pub struct WishlistStore {
    items: Vec<WishlistItem>,
    notifier: Arc<dyn Notifier>,
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistStore")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl WishlistStore {
    /// Open the wishlist saved in `storage`.
    ///
    /// Missing or malformed stored data starts an empty wishlist; repeated
    /// ids keep their first occurrence.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStorage>, notifier: Arc<dyn Notifier>) -> Self {
        let stored: Vec<WishlistItem> = storage::load_snapshot(storage.as_ref(), keys::WISHLIST);
        let items = dedupe_by_id(stored, |item| &item.id);
        tracing::debug!(items = items.len(), "Restored wishlist");

        Self {
            items,
            notifier,
            storage,
        }
    }

    /// Save `product` for later. Already-saved products are left as they are.
    pub fn add_to_wishlist(&mut self, product: &Product) -> WishlistAddOutcome {
        if self.is_in_wishlist(&product.id) {
            self.notify(format!("{} is already in your wishlist.", product.name));
            return WishlistAddOutcome::AlreadyPresent;
        }

        self.items.push(product.clone());
        self.notify(format!("Added {} to your wishlist.", product.name));
        self.persist();
        WishlistAddOutcome::Added
    }

    /// Remove the item for `id`, if any.
    pub fn remove_from_wishlist(&mut self, id: &ProductId) -> WishlistRemoveOutcome {
        let Some(index) = self.items.iter().position(|item| &item.id == id) else {
            return WishlistRemoveOutcome::NotFound;
        };

        let removed = self.items.remove(index);
        self.notify(format!("Removed {} from your wishlist.", removed.name));
        self.persist();
        WishlistRemoveOutcome::Removed(removed)
    }

    #[must_use]
    pub fn is_in_wishlist(&self, id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    /// Move a saved item into `cart` with a quantity of one.
    ///
    /// The cart line is priced from the saved snapshot.
    pub fn move_to_cart(&mut self, cart: &mut CartStore, id: &ProductId) -> MoveOutcome {
        let Some(item) = self.get(id).cloned() else {
            return MoveOutcome::NotFound;
        };

        let added = cart.add_to_cart(&item, Quantity::ONE);
        self.remove_from_wishlist(id);
        MoveOutcome::Moved { item, cart: added }
    }

    /// Remove everything. Returns the number of items removed.
    pub fn clear_wishlist(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        self.notify("Your wishlist has been cleared.".to_string());
        self.persist();
        removed
    }

    /// Saved items, oldest first.
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    /// The saved item for `id`, if any.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&WishlistItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn notify(&self, description: String) {
        self.notifier.notify(Notification::new(description));
    }

    fn persist(&self) {
        storage::save_snapshot(self.storage.as_ref(), keys::WISHLIST, &self.items);
    }
}
