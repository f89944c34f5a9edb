use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    middleware::auth::AdminUser,
    models::Product,
    pricing::calculate_discount,
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, ProductSortBy, SortOrder},
    state::AppState,
};

pub const DEFAULT_FEATURED_LIMIT: u64 = 8;

/// Fetches the whole catalog, newest first.
pub async fn fetch_all(orm: &OrmConn) -> AppResult<Vec<Product>> {
    let products = Products::find()
        .order_by_desc(Column::CreatedAt)
        .all(orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();
    Ok(products)
}

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let products = fetch_all(&state.orm).await?;
    let mut filtered = filter_products(products, &query);
    sort_products(
        &mut filtered,
        query.sort_by.unwrap_or(ProductSortBy::CreatedAt),
        query.sort_order.unwrap_or(SortOrder::Desc),
    );

    let total = filtered.len() as i64;
    let (items, page, per_page) = query.pagination().apply(filtered);

    let meta = Meta::new(page, per_page, total);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

/// Applies the storefront filters to an already fetched catalog.
pub fn filter_products(products: Vec<Product>, query: &ProductQuery) -> Vec<Product> {
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    let search = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    products
        .into_iter()
        .filter(|p| category.is_none_or(|c| p.category == c))
        .filter(|p| {
            search.as_deref().is_none_or(|term| {
                p.name.to_lowercase().contains(term) || p.category.to_lowercase().contains(term)
            })
        })
        .filter(|p| query.featured.is_none_or(|f| p.is_featured == f))
        .filter(|p| query.in_stock.is_none_or(|s| p.in_stock == s))
        .collect()
}

pub fn sort_products(products: &mut [Product], sort_by: ProductSortBy, order: SortOrder) {
    products.sort_by(|a, b| {
        let ordering = match sort_by {
            ProductSortBy::CreatedAt => a.created_at.cmp(&b.created_at),
            ProductSortBy::Price => a.price.cmp(&b.price),
            ProductSortBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            ProductSortBy::Discount => a.discount.cmp(&b.discount),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

pub async fn featured_products(
    state: &AppState,
    limit: Option<u64>,
) -> AppResult<ApiResponse<ProductList>> {
    let limit = limit.unwrap_or(DEFAULT_FEATURED_LIMIT).clamp(1, 100) as usize;
    let items: Vec<Product> = Products::find()
        .filter(Column::IsFeatured.eq(true))
        .order_by_desc(Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .filter(|p| p.in_stock)
        .take(limit)
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Featured products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let result = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(product_from_entity);
    let result = match result {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Product", result, None))
}

pub async fn create_product(
    state: &AppState,
    admin: &AdminUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let name = required_text("name", &payload.name)?;
    let category = required_text("category", &payload.category)?;
    validate_prices(payload.mrp, payload.price)?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        mrp: Set(payload.mrp),
        price: Set(payload.price),
        category: Set(category),
        description: Set(payload.description),
        image_url: Set(payload.image_url),
        images: Set(serde_json::json!(payload.images)),
        in_stock: Set(payload.in_stock),
        is_featured: Set(payload.is_featured),
        created_at: NotSet,
    };
    let product = active.insert(&state.orm).await?;

    tracing::info!(admin = %admin.user_id, product_id = %product.id, "product created");
    Ok(ApiResponse::success(
        "Product created",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let existing = Products::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    validate_prices(
        payload.mrp.unwrap_or(existing.mrp),
        payload.price.unwrap_or(existing.price),
    )?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(required_text("name", &name)?);
    }
    if let Some(mrp) = payload.mrp {
        active.mrp = Set(mrp);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(category) = payload.category {
        active.category = Set(required_text("category", &category)?);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(image_url);
    }
    if let Some(images) = payload.images {
        active.images = Set(serde_json::json!(images));
    }
    if let Some(in_stock) = payload.in_stock {
        active.in_stock = Set(in_stock);
    }
    if let Some(is_featured) = payload.is_featured {
        active.is_featured = Set(is_featured);
    }

    let product = active.update(&state.orm).await?;

    tracing::info!(admin = %admin.user_id, product_id = %product.id, "product updated");
    Ok(ApiResponse::success(
        "Updated",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Products::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(admin = %admin.user_id, product_id = %id, "product deleted");
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Trims a mandatory text field, rejecting blank input.
pub fn required_text(field: &str, value: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(value.to_string())
}

/// Selling price must be non-negative and never above the list price.
pub fn validate_prices(mrp: i64, price: i64) -> AppResult<()> {
    if price < 0 || mrp < 0 {
        return Err(AppError::BadRequest("prices must not be negative".into()));
    }
    if price > mrp {
        return Err(AppError::BadRequest("price must not exceed mrp".into()));
    }
    Ok(())
}

pub(crate) fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        discount: calculate_discount(model.mrp, model.price),
        name: model.name,
        mrp: model.mrp,
        price: model.price,
        category: model.category,
        description: model.description,
        image_url: model.image_url,
        images: serde_json::from_value(model.images).unwrap_or_default(),
        in_stock: model.in_stock,
        is_featured: model.is_featured,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
