//! Shopping cart store.
//!
//! The cart holds at most one [`CartLineItem`] per product id. Adding a
//! product that is already in the cart increases its quantity instead of
//! adding a second line. Display fields and the unit price are copied from
//! the product when the line is created and are not re-synced afterwards,
//! so a line keeps the price the visitor saw when they added it.
//!
//! No operation fails: missing ids and quantities below one are reported
//! through the returned outcome and otherwise leave the cart untouched.
//!
//! By default the cart lives in memory only. [`CartStore::persistent`]
//! builds the variant that snapshots to storage after every change.

use std::sync::Arc;

use deskfront_core::{Category, Price, Product, ProductId, Quantity};
use serde::{Deserialize, Serialize};

use crate::notify::{Notification, Notifier};
use crate::storage::{self, KeyValueStorage, dedupe_by_id, keys};
use crate::summary::OrderSummary;

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub category: Category,
    /// Unit price when the line was created.
    pub price: Price,
    pub quantity: Quantity,
}

impl CartLineItem {
    /// Snapshot a product into a new line.
    #[must_use]
    pub fn from_product(product: &Product, quantity: Quantity) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            category: product.category,
            price: product.price,
            quantity,
        }
    }

    /// Unit price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Result of [`CartStore::add_to_cart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AddOutcome {
    /// A new line was appended.
    Added,
    /// An existing line's quantity was increased.
    Updated { quantity: Quantity },
}

/// Result of [`CartStore::remove_from_cart`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "item", rename_all = "snake_case")]
pub enum RemoveOutcome {
    Removed(CartLineItem),
    NotFound,
}

/// Result of [`CartStore::update_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpdateOutcome {
    Updated { previous: Quantity },
    /// The requested quantity was below one; nothing changed.
    Rejected,
    NotFound,
}

/// The visitor's shopping cart.
pub struct CartStore {
    items: Vec<CartLineItem>,
    notifier: Arc<dyn Notifier>,
    storage: Option<Arc<dyn KeyValueStorage>>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("persistent", &self.storage.is_some())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create an empty, memory-only cart.
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            items: Vec::new(),
            notifier,
            storage: None,
        }
    }

    /// Create a cart that is restored from and saved to `storage`.
    ///
    /// Stored lines that repeat an earlier id are dropped.
    #[must_use]
    pub fn persistent(storage: Arc<dyn KeyValueStorage>, notifier: Arc<dyn Notifier>) -> Self {
        let stored: Vec<CartLineItem> = storage::load_snapshot(storage.as_ref(), keys::CART);
        let items = dedupe_by_id(stored, |item| &item.id);
        tracing::debug!(lines = items.len(), "Restored cart");

        Self {
            items,
            notifier,
            storage: Some(storage),
        }
    }

    /// Add `quantity` units of `product`.
    pub fn add_to_cart(&mut self, product: &Product, quantity: Quantity) -> AddOutcome {
        let existing = self
            .items
            .iter_mut()
            .find(|line| line.id == product.id)
            .map(|line| {
                line.quantity = line.quantity.saturating_add(quantity);
                line.quantity
            });

        let outcome = match existing {
            Some(quantity) => {
                self.notify(format!("Updated {} quantity in your cart.", product.name));
                AddOutcome::Updated { quantity }
            }
            None => {
                self.items.push(CartLineItem::from_product(product, quantity));
                self.notify(format!("Added {} to your cart.", product.name));
                AddOutcome::Added
            }
        };

        tracing::debug!(product_id = %product.id, ?outcome, "add_to_cart");
        self.persist();
        outcome
    }

    /// Remove the line for `id`, if any.
    pub fn remove_from_cart(&mut self, id: &ProductId) -> RemoveOutcome {
        let Some(index) = self.items.iter().position(|line| &line.id == id) else {
            return RemoveOutcome::NotFound;
        };

        let removed = self.items.remove(index);
        self.notify(format!("Removed {} from your cart.", removed.name));
        self.persist();
        RemoveOutcome::Removed(removed)
    }

    /// Set the quantity for `id`.
    ///
    /// Quantities below one are rejected; use
    /// [`remove_from_cart`](Self::remove_from_cart) to drop a line.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> UpdateOutcome {
        let Ok(quantity) = Quantity::try_from(quantity) else {
            return UpdateOutcome::Rejected;
        };
        let Some(line) = self.items.iter_mut().find(|line| &line.id == id) else {
            return UpdateOutcome::NotFound;
        };

        let previous = std::mem::replace(&mut line.quantity, quantity);
        self.persist();
        UpdateOutcome::Updated { previous }
    }

    /// Empty the cart. Returns the number of lines removed.
    pub fn clear_cart(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        self.notify("Your cart has been cleared.".to_string());
        self.persist();
        removed
    }

    /// Sum of price × quantity over all lines.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Total units in the cart, as shown on the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Subtotal, shipping, and total.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::for_items(&self.items)
    }

    /// Lines in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// The line for `id`, if any.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| &line.id == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if the cart is saved to storage.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        self.storage.is_some()
    }

    fn notify(&self, description: String) {
        self.notifier.notify(Notification::new(description));
    }

    fn persist(&self) {
        if let Some(storage) = &self.storage {
            storage::save_snapshot(storage.as_ref(), keys::CART, &self.items);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::notify::NotificationQueue;
    use crate::storage::MemoryStorage;

    fn product(id: &str, name: &str, cents: u64) -> Product {
        Product {
            id: ProductId::parse(id).unwrap(),
            name: name.to_string(),
            price: Price::from_cents(cents),
            image: "/placeholder.svg".to_string(),
            category: Category::Mousepads,
            rating: Some(4.8),
        }
    }

    fn qty(n: u32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    fn cart() -> (CartStore, Arc<NotificationQueue>) {
        let queue = Arc::new(NotificationQueue::default());
        (CartStore::new(queue.clone()), queue)
    }

    fn descriptions(queue: &NotificationQueue) -> Vec<String> {
        queue.drain().into_iter().map(|n| n.description).collect()
    }

    #[test]
    fn test_repeated_adds_accumulate_on_one_line() {
        let (mut cart, queue) = cart();
        let pad = product("1", "Galaxy Desk Pad", 2999);

        assert_eq!(cart.add_to_cart(&pad, qty(1)), AddOutcome::Added);
        assert_eq!(
            cart.add_to_cart(&pad, qty(2)),
            AddOutcome::Updated { quantity: qty(3) }
        );
        cart.add_to_cart(&pad, qty(4));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(&id("1")).unwrap().quantity.get(), 7);
        assert_eq!(
            descriptions(&queue),
            [
                "Added Galaxy Desk Pad to your cart.",
                "Updated Galaxy Desk Pad quantity in your cart.",
                "Updated Galaxy Desk Pad quantity in your cart.",
            ]
        );
    }

    #[test]
    fn test_total_is_exact() {
        let (mut cart, _) = cart();
        cart.add_to_cart(&product("1", "Galaxy Desk Pad", 2999), qty(1));
        cart.add_to_cart(&product("2", "Nebula Gaming Pad XL", 3999), qty(2));

        assert_eq!(cart.cart_total(), Price::from_cents(10997));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_update_below_one_is_a_no_op() {
        let (mut cart, queue) = cart();
        cart.add_to_cart(&product("1", "Galaxy Desk Pad", 2999), qty(3));
        queue.drain();

        assert_eq!(cart.update_quantity(&id("1"), 0), UpdateOutcome::Rejected);
        assert_eq!(cart.update_quantity(&id("1"), -1), UpdateOutcome::Rejected);
        assert_eq!(cart.line(&id("1")).unwrap().quantity.get(), 3);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_update_replaces_quantity() {
        let (mut cart, queue) = cart();
        cart.add_to_cart(&product("1", "Galaxy Desk Pad", 2999), qty(3));
        queue.drain();

        assert_eq!(
            cart.update_quantity(&id("1"), 5),
            UpdateOutcome::Updated { previous: qty(3) }
        );
        assert_eq!(cart.line(&id("1")).unwrap().quantity.get(), 5);
        assert_eq!(cart.update_quantity(&id("9"), 5), UpdateOutcome::NotFound);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (mut cart, queue) = cart();
        cart.add_to_cart(&product("1", "Galaxy Desk Pad", 2999), qty(1));
        queue.drain();

        assert!(matches!(
            cart.remove_from_cart(&id("1")),
            RemoveOutcome::Removed(line) if line.name == "Galaxy Desk Pad"
        ));
        assert_eq!(descriptions(&queue), ["Removed Galaxy Desk Pad from your cart."]);

        assert_eq!(cart.remove_from_cart(&id("1")), RemoveOutcome::NotFound);
        assert!(queue.is_empty());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_add_remove_scenario() {
        let (mut cart, _) = cart();
        cart.add_to_cart(&product("1", "Galaxy Desk Pad", 2999), qty(1));
        cart.add_to_cart(&product("2", "Nebula Gaming Pad XL", 3999), qty(2));
        cart.remove_from_cart(&id("1"));

        assert_eq!(cart.len(), 1);
        let line = &cart.items()[0];
        assert_eq!(line.id, id("2"));
        assert_eq!(line.quantity.get(), 2);
        assert_eq!(cart.cart_total(), Price::from_cents(7998));
    }

    #[test]
    fn test_price_is_snapshot_at_add_time() {
        let (mut cart, _) = cart();
        let mut pad = product("1", "Galaxy Desk Pad", 2999);
        cart.add_to_cart(&pad, qty(1));

        pad.price = Price::from_cents(1999);
        cart.add_to_cart(&pad, qty(1));

        assert_eq!(cart.line(&id("1")).unwrap().price, Price::from_cents(2999));
    }

    #[test]
    fn test_clear_always_notifies() {
        let (mut cart, queue) = cart();
        assert_eq!(cart.clear_cart(), 0);
        assert_eq!(descriptions(&queue), ["Your cart has been cleared."]);

        cart.add_to_cart(&product("1", "Galaxy Desk Pad", 2999), qty(1));
        assert_eq!(cart.clear_cart(), 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_memory_only_cart_is_not_persistent() {
        let (cart, _) = cart();
        assert!(!cart.is_persistent());
    }

    #[test]
    fn test_persistent_cart_survives_restart() {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
        let queue = Arc::new(NotificationQueue::default());

        let mut cart = CartStore::persistent(storage.clone(), queue.clone());
        cart.add_to_cart(&product("1", "Galaxy Desk Pad", 2999), qty(2));
        cart.add_to_cart(&product("2", "Nebula Gaming Pad XL", 3999), qty(1));
        let before = cart.items().to_vec();
        drop(cart);

        let restored = CartStore::persistent(storage, queue);
        assert!(restored.is_persistent());
        assert_eq!(restored.items(), before.as_slice());
    }

    #[test]
    fn test_persistent_cart_drops_duplicate_and_invalid_lines() {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
        storage
            .write(
                keys::CART,
                r#"[
                    {"id":"1","name":"A","image":"","category":"posters","price":"1.00","quantity":1},
                    {"id":"1","name":"A again","image":"","category":"posters","price":"1.00","quantity":5}
                ]"#,
            )
            .unwrap();
        let cart = CartStore::persistent(storage.clone(), Arc::new(NotificationQueue::default()));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].name, "A");

        storage
            .write(
                keys::CART,
                r#"[{"id":"1","name":"A","image":"","category":"posters","price":"1.00","quantity":0}]"#,
            )
            .unwrap();
        let cart = CartStore::persistent(storage, Arc::new(NotificationQueue::default()));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_out_of_range_stored_prices_are_discarded() {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
        let queue = Arc::new(NotificationQueue::default());

        for price in [r#""79228162514264337593543950335""#, r#""-1.00""#] {
            storage
                .write(
                    keys::CART,
                    &format!(
                        r#"[{{"id":"1","name":"A","image":"","category":"posters","price":{price},"quantity":2}}]"#
                    ),
                )
                .unwrap();

            let cart = CartStore::persistent(storage.clone(), queue.clone());
            assert!(cart.is_empty());
            assert_eq!(cart.cart_total(), Price::ZERO);
        }
    }

    #[test]
    fn test_totals_at_maximum_price_do_not_overflow() {
        let (mut cart, _) = cart();
        let priciest = Product {
            price: Price::MAX,
            ..product("1", "Gold Desk Pad", 0)
        };
        cart.add_to_cart(&priciest, Quantity::new(u32::MAX).unwrap());
        cart.add_to_cart(&product("2", "Nebula Gaming Pad XL", 3999), qty(1));

        let summary = cart.summary();
        assert_eq!(summary.subtotal, summary.total);
        assert!(summary.subtotal > Price::MAX);
    }
}
