use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::products::CategoryList, error::AppResult, response::ApiResponse,
    services::category_service, state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/unique", get(unique_categories))
}

#[utoipa::path(
    get,
    path = "/api/categories/unique",
    responses(
        (status = 200, description = "Distinct categories referenced by products", body = ApiResponse<CategoryList>)
    ),
    tag = "categories"
)]
pub async fn unique_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    Ok(Json(category_service::unique_categories(&state).await?))
}
