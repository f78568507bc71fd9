use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::{Expr, Func, OnConflict, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, LoaderTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};

use crate::{
    audit::log_audit,
    dto::products::{FeedRecord, ImportSummary, ProductInput, ProductList},
    entity::{
        Categories, Products, Ratings, categories,
        products::{self, Model as ProductModel},
        ratings,
    },
    error::{AppError, AppResult},
    models::{Category, Product, Rating},
    response::{ApiResponse, Meta},
    routes::params::{Pagination, PriceRangeQuery, SortDirection, SortQuery},
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    paged_products(state, Products::find(), pagination).await
}

pub async fn get_product(state: &AppState, id: i64) -> AppResult<ApiResponse<Product>> {
    let model = Products::find_by_id(id).one(&state.orm).await?;
    let model = match model {
        Some(m) => m,
        None => return Err(AppError::NotFound),
    };
    let product = assemble_one(state, model).await?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn create_product(
    state: &AppState,
    input: ProductInput,
) -> AppResult<ApiResponse<Product>> {
    let (category, rating) = resolve_refs(state, &input).await?;

    let active = products::ActiveModel {
        id: NotSet,
        title: Set(input.title),
        price: Set(input.price),
        description: Set(input.description),
        image: Set(input.image),
        category_id: Set(category.as_ref().map(|c| c.id)),
        rating_id: Set(rating.as_ref().map(|r| r.id)),
    };
    let model = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": model.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Product created",
        product_view(model, category, rating),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    id: i64,
    input: ProductInput,
) -> AppResult<ApiResponse<Product>> {
    let existing = Products::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(m) => m,
        None => return Err(AppError::NotFound),
    };
    let old_rating_id = existing.rating_id;

    let (category, rating) = resolve_refs(state, &input).await?;

    let mut active: products::ActiveModel = existing.into();
    active.title = Set(input.title);
    active.price = Set(input.price);
    active.description = Set(input.description);
    active.image = Set(input.image);
    active.category_id = Set(category.as_ref().map(|c| c.id));
    active.rating_id = Set(rating.as_ref().map(|r| r.id));
    let model = active.update(&state.orm).await?;

    // The replaced rating row is exclusively owned by this product, so
    // reclaim it instead of leaking an orphan.
    if let Some(old_id) = old_rating_id {
        if model.rating_id != Some(old_id) {
            Ratings::delete_by_id(old_id).exec(&state.orm).await?;
        }
    }

    if let Err(err) = log_audit(
        &state.pool,
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": model.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        product_view(model, category, rating),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let existing = Products::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(m) => m,
        None => return Err(AppError::NotFound),
    };
    let rating_id = existing.rating_id;

    existing.delete(&state.orm).await?;
    if let Some(rating_id) = rating_id {
        Ratings::delete_by_id(rating_id).exec(&state.orm).await?;
    }

    if let Err(err) = log_audit(
        &state.pool,
        "product_delete",
        Some("products"),
        Some(serde_json::json!({ "product_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn filter_by_price(
    state: &AppState,
    range: PriceRangeQuery,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    let mut condition = Condition::all();
    if let Some(min_price) = range.min_price {
        condition = condition.add(products::Column::Price.gte(min_price));
    }
    if let Some(max_price) = range.max_price {
        condition = condition.add(products::Column::Price.lte(max_price));
    }

    paged_products(state, Products::find().filter(condition), pagination).await
}

pub async fn filter_by_category(
    state: &AppState,
    category_name: &str,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    let finder = Products::find()
        .join(JoinType::InnerJoin, products::Relation::Categories.def())
        .filter(categories::Column::Name.eq(category_name));

    paged_products(state, finder, pagination).await
}

pub async fn sorted_products(
    state: &AppState,
    sort: SortQuery,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    let price_direction = sort
        .price_direction
        .as_deref()
        .map(SortDirection::parse)
        .transpose()?;
    let category_direction = sort
        .category_direction
        .as_deref()
        .map(SortDirection::parse)
        .transpose()?;

    let mut finder = Products::find();
    if category_direction.is_some() {
        finder = finder.join(JoinType::LeftJoin, products::Relation::Categories.def());
    }
    // Price is the primary key of the sort, category name the tiebreaker.
    if let Some(direction) = price_direction {
        finder = finder.order_by(products::Column::Price, direction.into_order());
    }
    if let Some(direction) = category_direction {
        let lowered = SimpleExpr::FunctionCall(Func::lower(Expr::col((
            Categories,
            categories::Column::Name,
        ))));
        finder = finder.order_by(lowered, direction.into_order());
    }

    paged_products(state, finder, pagination).await
}

pub async fn import_from_feed(state: &AppState) -> AppResult<ApiResponse<ImportSummary>> {
    let _guard = state.import_lock.lock().await;

    let records = state.feed.fetch_products().await?;
    if records.is_empty() {
        tracing::info!("feed returned no records, nothing to import");
        return Ok(ApiResponse::success(
            "Import finished",
            ImportSummary::default(),
            Some(Meta::empty()),
        ));
    }

    let mut summary = ImportSummary::default();
    for record in records {
        let feed_id = record.id;
        match import_record(state, record).await {
            Ok(true) => summary.updated += 1,
            Ok(false) => summary.created += 1,
            Err(err) => {
                summary.failed += 1;
                tracing::warn!(feed_id = ?feed_id, error = %err, "feed record import failed");
            }
        }
    }

    tracing::info!(
        created = summary.created,
        updated = summary.updated,
        failed = summary.failed,
        "feed import finished"
    );

    if let Err(err) = log_audit(
        &state.pool,
        "product_import",
        Some("products"),
        Some(serde_json::json!({
            "created": summary.created,
            "updated": summary.updated,
            "failed": summary.failed,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Import finished",
        summary,
        Some(Meta::empty()),
    ))
}

/// Upsert a single feed record: an id already present in the catalog means
/// update-in-place, anything else means create. Returns whether the record
/// updated an existing product.
async fn import_record(state: &AppState, record: FeedRecord) -> AppResult<bool> {
    if let Some(id) = record.id {
        if Products::find_by_id(id).one(&state.orm).await?.is_some() {
            update_product(state, id, record.product).await?;
            return Ok(true);
        }
    }
    create_product(state, record.product).await?;
    Ok(false)
}

/// Resolve the entity graph referenced by a product input: look up or
/// create the named category, and persist a fresh rating row when rating
/// data is supplied.
async fn resolve_refs(
    state: &AppState,
    input: &ProductInput,
) -> AppResult<(Option<categories::Model>, Option<ratings::Model>)> {
    let category = match input.category.as_deref() {
        Some(name) => Some(find_or_create_category(state, name).await?),
        None => None,
    };

    let rating = match &input.rating {
        Some(data) => {
            let active = ratings::ActiveModel {
                id: NotSet,
                rate: Set(data.rate),
                count: Set(data.count),
            };
            Some(active.insert(&state.orm).await?)
        }
        None => None,
    };

    Ok((category, rating))
}

/// Exact-name lookup with lazy creation. The insert races with concurrent
/// creators of the same name; `ON CONFLICT DO NOTHING` plus the re-select
/// keeps the name unique either way.
async fn find_or_create_category(state: &AppState, name: &str) -> AppResult<categories::Model> {
    if let Some(existing) = Categories::find()
        .filter(categories::Column::Name.eq(name))
        .one(&state.orm)
        .await?
    {
        return Ok(existing);
    }

    Categories::insert(categories::ActiveModel {
        id: NotSet,
        name: Set(name.to_owned()),
    })
    .on_conflict(
        OnConflict::column(categories::Column::Name)
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(&state.orm)
    .await?;

    let created = Categories::find()
        .filter(categories::Column::Name.eq(name))
        .one(&state.orm)
        .await?;
    created.ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("category '{name}' missing after insert"))
    })
}

/// Count, slice, and assemble one page of a product query.
async fn paged_products(
    state: &AppState,
    finder: Select<Products>,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, size, offset) = pagination.normalize();

    let total = finder.clone().count(&state.orm).await? as i64;
    let models = finder
        .limit(size as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;
    let items = assemble(state, models).await?;

    let meta = Meta::new(page, size, total);
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    ))
}

/// Batch-load the category and rating referenced by each product on the
/// page.
async fn assemble(state: &AppState, models: Vec<ProductModel>) -> AppResult<Vec<Product>> {
    let cats = models.load_one(Categories, &state.orm).await?;
    let rates = models.load_one(Ratings, &state.orm).await?;

    Ok(models
        .into_iter()
        .zip(cats)
        .zip(rates)
        .map(|((model, category), rating)| product_view(model, category, rating))
        .collect())
}

async fn assemble_one(state: &AppState, model: ProductModel) -> AppResult<Product> {
    let category = model.find_related(Categories).one(&state.orm).await?;
    let rating = model.find_related(Ratings).one(&state.orm).await?;
    Ok(product_view(model, category, rating))
}

fn product_view(
    model: ProductModel,
    category: Option<categories::Model>,
    rating: Option<ratings::Model>,
) -> Product {
    Product {
        id: model.id,
        title: model.title,
        price: model.price,
        description: model.description,
        image: model.image,
        category: category.map(|c| Category {
            id: c.id,
            name: c.name,
        }),
        rating: rating.map(|r| Rating {
            id: r.id,
            rate: r.rate,
            count: r.count,
        }),
    }
}
