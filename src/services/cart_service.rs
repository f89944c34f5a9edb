use std::collections::HashMap;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    dto::cart::{CartLineDto, CartLineRequest, CartQuoteRequest, CartSummary},
    entity::products::{Column as ProdCol, Entity as Products},
    error::{AppError, AppResult},
    models::{OrderLineItem, Product},
    response::{ApiResponse, Meta},
    services::product_service::product_from_entity,
    state::AppState,
};

#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> i64 {
        self.product.price * i64::from(self.quantity)
    }
}

/// Shopping cart held by the client session. Never persisted: checkout
/// freezes it into an order snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `quantity` units; an existing line is incremented instead of duplicated.
    pub fn add(&mut self, product: Product, quantity: u32) {
        let quantity = quantity.max(1);
        match self.items.iter_mut().find(|i| i.product.id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.items.push(CartItem { product, quantity }),
        }
    }

    pub fn remove(&mut self, product_id: Uuid) {
        self.items.retain(|i| i.product.id != product_id);
    }

    /// Sets the quantity of a line, never going below 1.
    pub fn update_quantity(&mut self, product_id: Uuid, quantity: u32) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity.max(1);
        }
    }

    pub fn total(&self) -> i64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Freezes the current product data into order line items.
    pub fn snapshot(&self) -> Vec<OrderLineItem> {
        self.items
            .iter()
            .map(|item| OrderLineItem {
                product_id: item.product.id,
                name: item.product.name.clone(),
                mrp: item.product.mrp,
                price: item.product.price,
                category: item.product.category.clone(),
                description: item.product.description.clone(),
                image_url: item.product.image_url.clone(),
                images: item.product.images.clone(),
                in_stock: item.product.in_stock,
                is_featured: item.product.is_featured,
                quantity: item.quantity,
            })
            .collect()
    }
}

/// Rebuilds a client-held cart against current catalog data.
pub async fn build_cart(orm: &OrmConn, lines: &[CartLineRequest]) -> AppResult<Cart> {
    if lines.iter().any(|l| l.quantity == 0) {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    let ids: Vec<Uuid> = lines.iter().map(|l| l.product_id).collect();
    let products: HashMap<Uuid, Product> = Products::find()
        .filter(ProdCol::Id.is_in(ids))
        .all(orm)
        .await?
        .into_iter()
        .map(|m| (m.id, product_from_entity(m)))
        .collect();

    let mut cart = Cart::new();
    for line in lines {
        let product = products.get(&line.product_id).cloned().ok_or_else(|| {
            AppError::BadRequest(format!("product {} not found", line.product_id))
        })?;
        cart.add(product, line.quantity);
    }
    Ok(cart)
}

pub async fn quote_cart(
    state: &AppState,
    payload: CartQuoteRequest,
) -> AppResult<ApiResponse<CartSummary>> {
    let cart = build_cart(&state.orm, &payload.items).await?;
    Ok(ApiResponse::success("Cart", summarize(&cart), Some(Meta::empty())))
}

pub fn summarize(cart: &Cart) -> CartSummary {
    CartSummary {
        items: cart
            .items()
            .iter()
            .map(|item| CartLineDto {
                product: item.product.clone(),
                quantity: item.quantity,
                line_total: item.line_total(),
            })
            .collect(),
        item_count: cart.item_count(),
        total: cart.total(),
    }
}
