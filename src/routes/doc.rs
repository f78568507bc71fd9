use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::products::{CategoryList, ImportSummary, ProductInput, ProductList, RatingInput},
    models::{Category, Product, Rating},
    response::{ApiResponse, Meta},
    routes::{categories, health, params, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        products::filter_by_price,
        products::filter_by_category,
        products::sort_products,
        products::import_products,
        categories::unique_categories,
    ),
    components(
        schemas(
            Product,
            Category,
            Rating,
            ProductInput,
            RatingInput,
            ProductList,
            CategoryList,
            ImportSummary,
            params::Pagination,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CategoryList>,
            ApiResponse<ImportSummary>
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "products", description = "Catalog product endpoints"),
        (name = "categories", description = "Category endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
