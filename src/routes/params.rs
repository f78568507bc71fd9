use rust_decimal::Decimal;
use sea_orm::Order;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl Pagination {
    /// Zero-based page and clamped size; an out-of-range page simply
    /// selects past the end and yields an empty slice.
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(0).max(0);
        let size = self.size.unwrap_or(10).clamp(1, 100);
        let offset = page * size;
        (page, size, offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a caller-supplied direction string, case-insensitively.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if raw.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(AppError::BadRequest(format!(
                "unrecognized sort direction '{raw}', expected 'asc' or 'desc'"
            )))
        }
    }

    pub fn into_order(self) -> Order {
        match self {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PriceRangeQuery {
    #[serde(rename = "minPrice")]
    #[schema(value_type = Option<String>, example = "10.00")]
    pub min_price: Option<Decimal>,
    #[serde(rename = "maxPrice")]
    #[schema(value_type = Option<String>, example = "500.00")]
    pub max_price: Option<Decimal>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryQuery {
    #[serde(rename = "categoryName")]
    pub category_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SortQuery {
    #[serde(rename = "priceDirection")]
    pub price_direction: Option<String>,
    #[serde(rename = "categoryDirection")]
    pub category_direction: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_to_first_page_of_ten() {
        let p = Pagination {
            page: None,
            size: None,
        };
        assert_eq!(p.normalize(), (0, 10, 0));
    }

    #[test]
    fn pagination_offset_is_page_times_size() {
        let p = Pagination {
            page: Some(3),
            size: Some(25),
        };
        assert_eq!(p.normalize(), (3, 25, 75));
    }

    #[test]
    fn pagination_clamps_degenerate_input() {
        let p = Pagination {
            page: Some(-1),
            size: Some(0),
        };
        assert_eq!(p.normalize(), (0, 1, 0));

        let p = Pagination {
            page: Some(0),
            size: Some(10_000),
        };
        assert_eq!(p.normalize(), (0, 100, 0));
    }

    #[test]
    fn sort_direction_parses_case_insensitively() {
        assert_eq!(SortDirection::parse("asc").unwrap(), SortDirection::Asc);
        assert_eq!(SortDirection::parse("DESC").unwrap(), SortDirection::Desc);
        assert_eq!(SortDirection::parse("Asc").unwrap(), SortDirection::Asc);
    }

    #[test]
    fn sort_direction_rejects_unknown_values() {
        assert!(matches!(
            SortDirection::parse("descending"),
            Err(AppError::BadRequest(_))
        ));
    }
}
