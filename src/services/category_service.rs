use sea_orm::{EntityTrait, JoinType, QueryOrder, QuerySelect, RelationTrait};

use crate::{
    dto::products::CategoryList,
    entity::{Categories, categories},
    error::AppResult,
    models::Category,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Distinct categories referenced by at least one product. Categories no
/// product points at are excluded; the set is assumed small enough to skip
/// pagination.
pub async fn unique_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let items: Vec<Category> = Categories::find()
        .join(JoinType::InnerJoin, categories::Relation::Products.def())
        .distinct()
        .order_by_asc(categories::Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|c| Category {
            id: c.id,
            name: c.name,
        })
        .collect();

    Ok(ApiResponse::success(
        "Categories",
        CategoryList { items },
        Some(Meta::empty()),
    ))
}
