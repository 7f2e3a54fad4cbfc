//! Cart commands.

use deskfront_core::{ProductId, Quantity};
use deskfront_storefront::cart::{CartStore, UpdateOutcome};

use super::{CommandError, Context};
use crate::output;

pub fn show(cart: &CartStore) {
    output::cart(cart);
}

/// Add units of a catalog product.
///
/// # Errors
///
/// Returns an error if the product does not exist or `quantity` is below one.
pub fn add(
    ctx: &Context,
    cart: &mut CartStore,
    id: &ProductId,
    quantity: i64,
) -> Result<(), CommandError> {
    let quantity = Quantity::try_from(quantity)?;
    let product = ctx.product(id)?;
    let outcome = cart.add_to_cart(product, quantity);
    tracing::debug!(%id, ?outcome, "Cart add");
    output::cart(cart);
    Ok(())
}

/// Set a line's quantity. Values below one leave the cart unchanged.
pub fn update(cart: &mut CartStore, id: &ProductId, quantity: i64) {
    match cart.update_quantity(id, quantity) {
        UpdateOutcome::Rejected => {
            tracing::warn!(%id, quantity, "Quantity must be at least 1; cart unchanged");
        }
        UpdateOutcome::NotFound => tracing::warn!(%id, "Not in the cart"),
        UpdateOutcome::Updated { .. } => output::cart(cart),
    }
}

pub fn remove(cart: &mut CartStore, id: &ProductId) {
    let outcome = cart.remove_from_cart(id);
    tracing::debug!(%id, ?outcome, "Cart remove");
}

pub fn clear(cart: &mut CartStore) {
    let removed = cart.clear_cart();
    tracing::debug!(removed, "Cart cleared");
}
