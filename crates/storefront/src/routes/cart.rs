//! Cart route handlers.
//!
//! Every mutation responds with the operation's outcome and the resulting
//! cart, so clients can re-render without a second request.

use axum::{Json, extract::State};
use deskfront_core::{Price, ProductId, Quantity};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::cart::{AddOutcome, CartLineItem, CartStore, RemoveOutcome, UpdateOutcome};
use crate::error::{AppError, Result};
use crate::extract::AppJson;
use crate::state::AppState;
use crate::summary::OrderSummary;

/// A cart line with its computed line total.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    #[serde(flatten)]
    pub line: CartLineItem,
    pub line_total: Price,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub summary: OrderSummary,
}

impl From<&CartStore> for CartView {
    fn from(cart: &CartStore) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|line| CartLineView {
                    line_total: line.line_total(),
                    line: line.clone(),
                })
                .collect(),
            summary: cart.summary(),
        }
    }
}

/// A mutation outcome together with the cart it produced.
#[derive(Debug, Serialize)]
pub struct CartMutation<T: Serialize> {
    pub outcome: T,
    pub cart: CartView,
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub id: String,
    pub quantity: Option<i64>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub id: String,
    pub quantity: i64,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub id: String,
}

/// Clear cart response outcome.
#[derive(Debug, Serialize)]
pub struct Cleared {
    pub removed: usize,
}

/// Cart badge count.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u64,
}

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    Json(CartView::from(&*state.cart().await))
}

/// Add a catalog product to the cart.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    AppJson(form): AppJson<AddToCartRequest>,
) -> Result<Json<CartMutation<AddOutcome>>> {
    let id = ProductId::parse(&form.id)?;
    let quantity = form
        .quantity
        .map_or(Ok(Quantity::ONE), Quantity::try_from)?;
    let product = state
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let mut cart = state.cart().await;
    let outcome = cart.add_to_cart(product, quantity);

    Ok(Json(CartMutation {
        outcome,
        cart: CartView::from(&*cart),
    }))
}

/// Set a line's quantity. Quantities below one leave the cart unchanged.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    AppJson(form): AppJson<UpdateCartRequest>,
) -> Result<Json<CartMutation<UpdateOutcome>>> {
    let id = ProductId::parse(&form.id)?;

    let mut cart = state.cart().await;
    let outcome = cart.update_quantity(&id, form.quantity);

    Ok(Json(CartMutation {
        outcome,
        cart: CartView::from(&*cart),
    }))
}

/// Remove a line from the cart.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    AppJson(form): AppJson<RemoveFromCartRequest>,
) -> Result<Json<CartMutation<RemoveOutcome>>> {
    let id = ProductId::parse(&form.id)?;

    let mut cart = state.cart().await;
    let outcome = cart.remove_from_cart(&id);

    Ok(Json(CartMutation {
        outcome,
        cart: CartView::from(&*cart),
    }))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartMutation<Cleared>> {
    let mut cart = state.cart().await;
    let removed = cart.clear_cart();

    Json(CartMutation {
        outcome: Cleared { removed },
        cart: CartView::from(&*cart),
    })
}

/// Total units in the cart, for the navigation badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCount> {
    Json(CartCount {
        count: state.cart().await.item_count(),
    })
}
