use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};

use crate::{
    dto::products::{ImportSummary, ProductInput, ProductList},
    error::AppResult,
    models::Product,
    response::ApiResponse,
    routes::params::{CategoryQuery, Pagination, PriceRangeQuery, SortQuery},
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/filter-price", get(filter_by_price))
        .route("/category", get(filter_by_category))
        .route("/sort", get(sort_products))
        .route("/import", post(import_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("page" = Option<i64>, Query, description = "Zero-based page number, default 0"),
        ("size" = Option<i64>, Query, description = "Items per page, default 10"),
    ),
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>)
    ),
    tag = "products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    Ok(Json(
        catalog_service::list_products(&state, pagination).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Product>>> {
    Ok(Json(catalog_service::get_product(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductInput,
    responses(
        (status = 200, description = "Create product", body = ApiResponse<Product>)
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductInput>,
) -> AppResult<Json<ApiResponse<Product>>> {
    Ok(Json(
        catalog_service::create_product(&state, payload).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductInput>,
) -> AppResult<Json<ApiResponse<Product>>> {
    Ok(Json(
        catalog_service::update_product(&state, id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Deleted product"),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(catalog_service::delete_product(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/products/filter-price",
    params(
        ("minPrice" = Option<String>, Query, description = "Inclusive lower price bound"),
        ("maxPrice" = Option<String>, Query, description = "Inclusive upper price bound"),
        ("page" = Option<i64>, Query, description = "Zero-based page number, default 0"),
        ("size" = Option<i64>, Query, description = "Items per page, default 10"),
    ),
    responses(
        (status = 200, description = "Products in the price range", body = ApiResponse<ProductList>)
    ),
    tag = "products"
)]
pub async fn filter_by_price(
    State(state): State<AppState>,
    Query(range): Query<PriceRangeQuery>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    Ok(Json(
        catalog_service::filter_by_price(&state, range, pagination).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/category",
    params(
        ("categoryName" = String, Query, description = "Exact category name"),
        ("page" = Option<i64>, Query, description = "Zero-based page number, default 0"),
        ("size" = Option<i64>, Query, description = "Items per page, default 10"),
    ),
    responses(
        (status = 200, description = "Products in the category", body = ApiResponse<ProductList>)
    ),
    tag = "products"
)]
pub async fn filter_by_category(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    Ok(Json(
        catalog_service::filter_by_category(&state, &query.category_name, pagination).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/sort",
    params(
        ("priceDirection" = Option<String>, Query, description = "'asc' or 'desc', price is the primary sort key"),
        ("categoryDirection" = Option<String>, Query, description = "'asc' or 'desc', category name is the secondary sort key"),
        ("page" = Option<i64>, Query, description = "Zero-based page number, default 0"),
        ("size" = Option<i64>, Query, description = "Items per page, default 10"),
    ),
    responses(
        (status = 200, description = "Sorted products", body = ApiResponse<ProductList>),
        (status = 400, description = "Unrecognized sort direction"),
    ),
    tag = "products"
)]
pub async fn sort_products(
    State(state): State<AppState>,
    Query(sort): Query<SortQuery>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    Ok(Json(
        catalog_service::sorted_products(&state, sort, pagination).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/products/import",
    responses(
        (status = 200, description = "Import finished", body = ApiResponse<ImportSummary>),
        (status = 502, description = "Feed unreachable or malformed"),
    ),
    tag = "products"
)]
pub async fn import_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ImportSummary>>> {
    Ok(Json(catalog_service::import_from_feed(&state).await?))
}
