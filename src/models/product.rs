//! Product data structures.

use serde::{Deserialize, Serialize};

/// A product scraped from a listing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductRecord {
    /// Product name, trimmed
    pub name: String,

    /// Price text as displayed, trimmed. Not parsed.
    pub price: String,
}

impl ProductRecord {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }

    /// Composite identity used for deduplication.
    pub fn key(&self) -> ProductKey {
        ProductKey {
            name: self.name.clone(),
            price: self.price.clone(),
        }
    }

    /// Value of a single output column.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Price => &self.price,
        }
    }
}

/// Exact-match (name, price) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductKey {
    pub name: String,
    pub price: String,
}

/// Output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Price,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Price => "price",
        }
    }
}

/// Records extracted from one fetched page.
#[derive(Debug, Default)]
pub struct PageResult {
    /// Complete records in document order, not yet deduplicated
    pub records: Vec<ProductRecord>,

    /// Number of product containers matched
    pub containers: usize,

    /// Containers dropped for a missing or empty name or price
    pub incomplete: usize,

    /// Whether the load-more link was present (always true when not checked)
    pub has_more: bool,
}

impl PageResult {
    /// True when the container selector matched nothing.
    pub fn is_empty(&self) -> bool {
        self.containers == 0
    }
}
