//! Wishlist commands.

use deskfront_core::ProductId;
use deskfront_storefront::cart::CartStore;
use deskfront_storefront::wishlist::{MoveOutcome, WishlistStore};

use super::{CommandError, Context};
use crate::output;

pub fn list(wishlist: &WishlistStore) {
    output::wishlist(wishlist.items());
}

/// Save a catalog product.
///
/// # Errors
///
/// Returns an error if the product does not exist.
pub fn add(ctx: &Context, wishlist: &mut WishlistStore, id: &ProductId) -> Result<(), CommandError> {
    let product = ctx.product(id)?;
    let outcome = wishlist.add_to_wishlist(product);
    tracing::debug!(%id, ?outcome, "Wishlist add");
    Ok(())
}

pub fn remove(wishlist: &mut WishlistStore, id: &ProductId) {
    let outcome = wishlist.remove_from_wishlist(id);
    tracing::debug!(%id, ?outcome, "Wishlist remove");
}

pub fn clear(wishlist: &mut WishlistStore) {
    let removed = wishlist.clear_wishlist();
    tracing::debug!(removed, "Wishlist cleared");
}

pub fn contains(wishlist: &WishlistStore, id: &ProductId) {
    output::membership(id, wishlist.is_in_wishlist(id));
}

/// Move a saved item into the cart.
pub fn move_to_cart(wishlist: &mut WishlistStore, cart: &mut CartStore, id: &ProductId) {
    if wishlist.move_to_cart(cart, id) == MoveOutcome::NotFound {
        tracing::warn!(%id, "Not in the wishlist");
    }
}
