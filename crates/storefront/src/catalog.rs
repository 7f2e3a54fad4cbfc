//! Sample product catalog with listing filters and sort orders.

use std::cmp::Ordering;

use deskfront_core::{Category, Price, Product, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a [`ProductSort`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort order: {0}")]
pub struct SortError(pub String);

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductSort {
    /// Catalog order.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    /// Highest rated first; unrated products last.
    Rating,
}

impl std::str::FromStr for ProductSort {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "featured" | "" => Ok(Self::Featured),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "rating" => Ok(Self::Rating),
            other => Err(SortError(other.to_owned())),
        }
    }
}

/// Listing filters. The default query lists everything in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// `None` means all categories.
    pub category: Option<Category>,
    /// Case-insensitive substring match on the product name.
    pub search: Option<String>,
    pub sort: ProductSort,
}

impl ProductQuery {
    fn matches(&self, product: &Product) -> bool {
        let category_ok = self.category.is_none_or(|c| c == product.category);
        let search_ok = self.search.as_deref().is_none_or(|needle| {
            product
                .name
                .to_lowercase()
                .contains(&needle.trim().to_lowercase())
        });
        category_ok && search_ok
    }
}

/// The in-memory product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products listed in featured order.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The storefront's built-in sample catalog.
    #[must_use]
    pub fn sample() -> Self {
        const PLACEHOLDER: &str = "/placeholder.svg";

        let entries: [(&str, &str, u64, Category, f64); 8] = [
            ("1", "Galaxy Desk Pad", 2999, Category::Mousepads, 4.9),
            ("2", "Nebula Gaming Pad XL", 3999, Category::Mousepads, 4.7),
            ("3", "Minimalist Workspace Poster", 2499, Category::Posters, 4.8),
            ("4", "RGB Dreams Poster", 2999, Category::Posters, 4.9),
            ("5", "Cosmic Explorer Mousepad", 3499, Category::Mousepads, 4.6),
            ("6", "Retro Gaming Poster", 2299, Category::Posters, 4.7),
            ("7", "Mechanical Keyboard Poster", 2499, Category::Posters, 4.8),
            ("8", "Stealth Gaming Pad", 3299, Category::Mousepads, 4.9),
        ];

        let products = entries
            .into_iter()
            .filter_map(|(id, name, cents, category, rating)| {
                Some(Product {
                    id: ProductId::parse(id).ok()?,
                    name: name.to_owned(),
                    price: Price::from_cents(cents),
                    image: PLACEHOLDER.to_owned(),
                    category,
                    rating: Some(rating),
                })
            })
            .collect();

        Self::new(products)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Every product in featured order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Products matching `query`, in the requested order.
    ///
    /// Sorting is stable, so products that compare equal keep catalog order.
    #[must_use]
    pub fn list(&self, query: &ProductQuery) -> Vec<&Product> {
        let mut products: Vec<&Product> = self
            .products
            .iter()
            .filter(|product| query.matches(product))
            .collect();

        match query.sort {
            ProductSort::Featured => {}
            ProductSort::PriceLow => products.sort_by_key(|product| product.price),
            ProductSort::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
            ProductSort::Rating => products.sort_by(|a, b| by_rating_desc(a.rating, b.rating)),
        }

        products
    }
}

fn by_rating_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
