//! Wishlist route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use deskfront_core::ProductId;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::extract::AppJson;
use crate::state::AppState;
use crate::wishlist::{MoveOutcome, WishlistAddOutcome, WishlistItem, WishlistRemoveOutcome};

/// Wishlist display data.
#[derive(Debug, Serialize)]
pub struct WishlistView {
    pub items: Vec<WishlistItem>,
}

/// A mutation outcome together with the wishlist it produced.
#[derive(Debug, Serialize)]
pub struct WishlistMutation<T: Serialize> {
    pub outcome: T,
    pub items: Vec<WishlistItem>,
}

/// Request body naming one product.
#[derive(Debug, Deserialize)]
pub struct WishlistRequest {
    pub id: String,
}

/// Membership check response.
#[derive(Debug, Serialize)]
pub struct Membership {
    pub id: ProductId,
    pub in_wishlist: bool,
}

/// Clear wishlist response outcome.
#[derive(Debug, Serialize)]
pub struct Cleared {
    pub removed: usize,
}

/// List saved items.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<WishlistView> {
    Json(WishlistView {
        items: state.wishlist().await.items().to_vec(),
    })
}

/// Save a catalog product.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    AppJson(form): AppJson<WishlistRequest>,
) -> Result<Json<WishlistMutation<WishlistAddOutcome>>> {
    let id = ProductId::parse(&form.id)?;
    let product = state
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let mut wishlist = state.wishlist().await;
    let outcome = wishlist.add_to_wishlist(product);

    Ok(Json(WishlistMutation {
        outcome,
        items: wishlist.items().to_vec(),
    }))
}

/// Remove a saved item.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    AppJson(form): AppJson<WishlistRequest>,
) -> Result<Json<WishlistMutation<WishlistRemoveOutcome>>> {
    let id = ProductId::parse(&form.id)?;

    let mut wishlist = state.wishlist().await;
    let outcome = wishlist.remove_from_wishlist(&id);

    Ok(Json(WishlistMutation {
        outcome,
        items: wishlist.items().to_vec(),
    }))
}

/// Remove every saved item.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<WishlistMutation<Cleared>> {
    let mut wishlist = state.wishlist().await;
    let removed = wishlist.clear_wishlist();

    Json(WishlistMutation {
        outcome: Cleared { removed },
        items: wishlist.items().to_vec(),
    })
}

/// Move a saved item into the cart.
#[instrument(skip(state))]
pub async fn move_to_cart(
    State(state): State<AppState>,
    AppJson(form): AppJson<WishlistRequest>,
) -> Result<Json<MoveOutcome>> {
    let id = ProductId::parse(&form.id)?;
    Ok(Json(state.move_to_cart(&id).await))
}

/// Check whether a product is saved.
#[instrument(skip(state))]
pub async fn contains(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Membership>> {
    let id = ProductId::parse(&id)?;
    let in_wishlist = state.wishlist().await.is_in_wishlist(&id);
    Ok(Json(Membership { id, in_wishlist }))
}
