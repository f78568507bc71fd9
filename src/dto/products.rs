use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Category, Product};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RatingInput {
    #[schema(example = 3.9)]
    pub rate: f64,
    #[schema(example = 120)]
    pub count: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProductInput {
    #[schema(example = "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops")]
    pub title: String,
    #[schema(value_type = String, example = "109.95")]
    pub price: Decimal,
    pub description: Option<String>,
    #[schema(example = "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg")]
    pub image: Option<String>,
    /// Category name; the category row is created on first use.
    #[schema(example = "men's clothing")]
    pub category: Option<String>,
    pub rating: Option<RatingInput>,
}

/// One record of the external product feed: the product-input shape plus
/// the feed's own identifier, used for upsert matching.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FeedRecord {
    pub id: Option<i64>,
    #[serde(flatten)]
    pub product: ProductInput,
}

#[derive(Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}

#[derive(Serialize, ToSchema)]
pub struct CategoryList {
    pub items: Vec<Category>,
}

/// Outcome of one feed import run.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct ImportSummary {
    pub created: u64,
    pub updated: u64,
    pub failed: u64,
}
