//! HTTP route handlers for the storefront.
//!
//! All endpoints speak JSON.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Health check
//!
//! # Products
//! GET  /products                   - Product listing (?category=&sort=&search=)
//! GET  /products/{id}              - Product detail
//!
//! # Cart
//! GET  /cart                       - Cart lines and order summary
//! POST /cart/add                   - Add to cart {id, quantity?}
//! POST /cart/update                - Set quantity {id, quantity}
//! POST /cart/remove                - Remove line {id}
//! POST /cart/clear                 - Empty the cart
//! GET  /cart/count                 - Cart badge count
//!
//! # Wishlist
//! GET  /wishlist                   - Saved items
//! POST /wishlist/add               - Save product {id}
//! POST /wishlist/remove            - Remove item {id}
//! POST /wishlist/clear             - Remove everything
//! POST /wishlist/move-to-cart      - Move item into the cart {id}
//! GET  /wishlist/contains/{id}     - Membership check
//!
//! # Notifications
//! GET  /notifications              - Drain pending notifications
//! ```

pub mod cart;
pub mod notifications;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    extract::Request,
    middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/add", post(wishlist::add))
        .route("/remove", post(wishlist::remove))
        .route("/clear", post(wishlist::clear))
        .route("/move-to-cart", post(wishlist::move_to_cart))
        .route("/contains/{id}", get(wishlist::contains))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .route("/notifications", get(notifications::drain))
}

/// Build the full application: routes, state, and the middleware stack.
pub fn app(state: AppState) -> Router {
    routes()
        .with_state(state)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
}

/// Request span with an empty `request_id` field for the middleware to fill.
fn request_span(request: &Request) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = tracing::field::Empty,
    )
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::Catalog;
    use crate::config::StorefrontConfig;
    use crate::storage::MemoryStorage;

    fn test_app() -> Router {
        let state = AppState::with_storage(
            StorefrontConfig::default(),
            Catalog::sample(),
            Arc::new(MemoryStorage::new()),
        );
        app(state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health_has_request_id() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_product_listing_and_detail() {
        let app = test_app();

        let (status, body) = send(&app, "GET", "/products?category=posters&sort=price-low", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 4);
        assert_eq!(body["products"][0]["id"], "6");

        let (status, body) = send(&app, "GET", "/products/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Nebula Gaming Pad XL");

        let (status, _) = send(&app, "GET", "/products/404", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "GET", "/products?sort=cheapest", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cart_scenario() {
        let app = test_app();

        send(&app, "POST", "/cart/add", Some(json!({"id": "1"}))).await;
        let (_, body) = send(&app, "POST", "/cart/add", Some(json!({"id": "2", "quantity": 2}))).await;
        assert_eq!(body["outcome"]["status"], "added");
        assert_eq!(body["cart"]["summary"]["subtotal"], "109.97");

        let (_, body) = send(&app, "POST", "/cart/remove", Some(json!({"id": "1"}))).await;
        assert_eq!(body["outcome"]["status"], "removed");
        assert_eq!(body["cart"]["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["cart"]["items"][0]["id"], "2");
        assert_eq!(body["cart"]["items"][0]["quantity"], 2);
        assert_eq!(body["cart"]["summary"]["subtotal"], "79.98");

        let (_, body) = send(&app, "GET", "/cart/count", None).await;
        assert_eq!(body["count"], 2);
    }

    #[tokio::test]
    async fn test_cart_update_below_one_is_rejected_without_error() {
        let app = test_app();
        send(&app, "POST", "/cart/add", Some(json!({"id": "1", "quantity": 3}))).await;

        let (status, body) =
            send(&app, "POST", "/cart/update", Some(json!({"id": "1", "quantity": 0}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"]["status"], "rejected");
        assert_eq!(body["cart"]["items"][0]["quantity"], 3);
    }

    #[tokio::test]
    async fn test_cart_add_validation() {
        let app = test_app();

        let (status, _) = send(&app, "POST", "/cart/add", Some(json!({"id": "99"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) =
            send(&app, "POST", "/cart/add", Some(json!({"id": "1", "quantity": 0}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "POST", "/cart/add", Some(json!({"id": " "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_bodies_get_json_errors() {
        let app = test_app();

        for (uri, body) in [
            ("/cart/add", r#"{"id": "1", "quantity": 1.5}"#),
            ("/cart/update", r#"{"id": "1""#),
            ("/wishlist/add", r#"{"product": "1"}"#),
        ] {
            let request = Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");

            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let value: Value = serde_json::from_slice(&bytes).unwrap();
            assert!(value["error"].as_str().is_some(), "{uri}");
        }

        let (_, body) = send(&app, "GET", "/cart", None).await;
        assert!(body["items"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wishlist_flow_and_notifications() {
        let app = test_app();

        send(&app, "POST", "/wishlist/add", Some(json!({"id": "3"}))).await;
        let (_, body) = send(&app, "POST", "/wishlist/add", Some(json!({"id": "3"}))).await;
        assert_eq!(body["outcome"]["status"], "already_present");
        assert_eq!(body["items"].as_array().unwrap().len(), 1);

        let (_, body) = send(&app, "GET", "/wishlist/contains/3", None).await;
        assert_eq!(body["in_wishlist"], true);

        let (_, body) = send(&app, "POST", "/wishlist/move-to-cart", Some(json!({"id": "3"}))).await;
        assert_eq!(body["status"], "moved");

        let (_, body) = send(&app, "GET", "/wishlist", None).await;
        assert!(body["items"].as_array().unwrap().is_empty());

        let (_, body) = send(&app, "GET", "/notifications", None).await;
        let descriptions: Vec<&str> = body["notifications"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["description"].as_str().unwrap())
            .collect();
        assert_eq!(
            descriptions,
            [
                "Added Minimalist Workspace Poster to your wishlist.",
                "Minimalist Workspace Poster is already in your wishlist.",
                "Added Minimalist Workspace Poster to your cart.",
                "Removed Minimalist Workspace Poster from your wishlist.",
            ]
        );

        let (_, body) = send(&app, "GET", "/notifications", None).await;
        assert!(body["notifications"].as_array().unwrap().is_empty());
    }
}
