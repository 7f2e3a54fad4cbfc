//! Order summary shown next to the cart: subtotal, shipping, total.

use deskfront_core::Price;
use serde::Serialize;

use crate::cart::CartLineItem;

/// Orders with a subtotal strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Price = Price::from_cents(5000);

/// Flat shipping charge below the free-shipping threshold.
pub const FLAT_SHIPPING: Price = Price::from_cents(599);

/// Derived cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    /// Sum of price × quantity over all line items.
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
    /// Total units across all line items.
    pub item_count: u64,
}

impl OrderSummary {
    /// Compute the summary for a set of line items.
    #[must_use]
    pub fn for_items(items: &[CartLineItem]) -> Self {
        let subtotal: Price = items.iter().map(CartLineItem::line_total).sum();
        let item_count = items.iter().map(|item| u64::from(item.quantity.get())).sum();
        let shipping = shipping_for(subtotal, items.is_empty());

        Self {
            subtotal,
            shipping,
            total: subtotal + shipping,
            item_count,
        }
    }

    /// Returns true if this order qualifies for free shipping.
    #[must_use]
    pub fn ships_free(&self) -> bool {
        self.shipping.is_zero()
    }
}

fn shipping_for(subtotal: Price, empty: bool) -> Price {
    if empty || subtotal > FREE_SHIPPING_THRESHOLD {
        Price::ZERO
    } else {
        FLAT_SHIPPING
    }
}
