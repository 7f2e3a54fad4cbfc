//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use deskfront_core::{Category, Product, ProductId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::catalog::{ProductQuery, ProductSort};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// A category slug, or `all`.
    pub category: Option<String>,
    pub sort: Option<String>,
    pub search: Option<String>,
}

impl TryFrom<ListQuery> for ProductQuery {
    type Error = AppError;

    fn try_from(query: ListQuery) -> Result<Self> {
        let category = match query.category.as_deref().map(str::trim) {
            None | Some("" | "all") => None,
            Some(slug) => Some(slug.parse::<Category>()?),
        };
        let sort = query
            .sort
            .as_deref()
            .map_or(Ok(ProductSort::Featured), str::parse)?;
        let search = query.search.filter(|s| !s.trim().is_empty());

        Ok(Self {
            category,
            search,
            sort,
        })
    }
}

/// Product listing response.
#[derive(Debug, Serialize)]
pub struct ProductList {
    pub products: Vec<Product>,
    pub count: usize,
}

/// List products.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProductList>> {
    let query = ProductQuery::try_from(query)?;
    let products: Vec<Product> = state
        .catalog()
        .list(&query)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ProductList {
        count: products.len(),
        products,
    }))
}

/// Show a single product.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let id = ProductId::parse(&id)?;
    state
        .catalog()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn query(category: Option<&str>, sort: Option<&str>) -> ListQuery {
        ListQuery {
            category: category.map(String::from),
            sort: sort.map(String::from),
            search: None,
        }
    }

    #[test]
    fn test_all_category_means_no_filter() {
        let q = ProductQuery::try_from(query(Some("all"), None)).unwrap();
        assert_eq!(q.category, None);
        assert_eq!(q.sort, ProductSort::Featured);
    }

    #[test]
    fn test_parses_category_and_sort() {
        let q = ProductQuery::try_from(query(Some("posters"), Some("rating"))).unwrap();
        assert_eq!(q.category, Some(Category::Posters));
        assert_eq!(q.sort, ProductSort::Rating);
    }

    #[test]
    fn test_rejects_unknown_values() {
        assert!(ProductQuery::try_from(query(Some("stickers"), None)).is_err());
        assert!(ProductQuery::try_from(query(None, Some("cheapest"))).is_err());
    }
}
