use serde::{Deserialize, Serialize};

use super::review::Review;

/// Represents a product in the catalog.
///
/// `rating` and the review collection are kept consistent by the catalog
/// service: every review mutation recomputes the summary before the next
/// request is dequeued. No other code path writes `rating`.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub images: Vec<String>,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub stock: u32,
    pub rating: RatingSummary,
    pub reviews: Vec<Review>,
}

/// Derived summary of a product's review collection.
///
/// `average` is the arithmetic mean of all review ratings rounded to one
/// decimal place, or 0.0 when there are no reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RatingSummary {
    pub count: usize,
    pub average: f64,
}

/// Payload for creating a new product.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: u32,
}

/// Payload for updating an existing product. Aggregate fields are absent
/// on purpose: they are derived and never independently authored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub images: Option<Vec<String>>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub stock: Option<u32>,
}

/// Outcome of a bulk product deletion. Missing identifiers are skipped
/// and reported here rather than failing the remaining batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkRemoval {
    pub removed: Vec<String>,
    pub missing: Vec<String>,
}

impl Product {
    pub fn new(id: impl Into<String>, create: ProductCreate) -> Self {
        Self {
            id: id.into(),
            name: create.name,
            images: create.images,
            price: create.price,
            description: create.description,
            category: create.category,
            stock: create.stock,
            rating: RatingSummary::default(),
            reviews: Vec::new(),
        }
    }

    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
    }
}
