//! Catalog product types.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

use super::id::ProductId;
use super::price::Price;

/// Errors that can occur when parsing a [`Category`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct CategoryError(pub String);

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mousepads,
    Posters,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Self; 2] = [Self::Mousepads, Self::Posters];

    /// The lowercase slug used in URLs and stored data.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mousepads => "mousepads",
            Self::Posters => "posters",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CategoryError(s.to_owned()))
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Image URL or path.
    pub image: String,
    pub category: Category,
    /// Average review rating on a 0-5 scale, if the product has reviews.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_rating"
    )]
    pub rating: Option<f64>,
}

/// Highest possible review rating.
pub const MAX_RATING: f64 = 5.0;

fn deserialize_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        Some(rating) if !(0.0..=MAX_RATING).contains(&rating) => Err(de::Error::custom(
            format_args!("rating must be between 0 and {MAX_RATING}, got {rating}"),
        )),
        rating => Ok(rating),
    }
}
