//! Catalog browsing commands.

use deskfront_core::{Category, ProductId};
use deskfront_storefront::catalog::{ProductQuery, ProductSort};

use super::{CommandError, Context};
use crate::output;

/// List products matching the filters.
pub fn list(ctx: &Context, category: Option<Category>, sort: ProductSort, search: Option<String>) {
    let query = ProductQuery {
        category,
        search: search.filter(|s| !s.trim().is_empty()),
        sort,
    };
    let products = ctx.catalog().list(&query);
    tracing::debug!(count = products.len(), ?sort, "Listed products");
    output::products(&products);
}

/// Show one product.
///
/// # Errors
///
/// Returns an error if the product does not exist.
pub fn show(ctx: &Context, id: &ProductId) -> Result<(), CommandError> {
    output::product(ctx.product(id)?);
    Ok(())
}
