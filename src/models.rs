use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Rating {
    pub id: i64,
    pub rate: f64,
    pub count: i32,
}

/// A catalog product with its resolved category and rating sub-objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i64,
    pub title: String,
    #[schema(value_type = String, example = "109.95")]
    pub price: Decimal,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<Category>,
    pub rating: Option<Rating>,
}
