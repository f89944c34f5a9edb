use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Product;

/// One line of a client-held cart.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CartLineRequest {
    pub product_id: Uuid,
    pub quantity: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CartQuoteRequest {
    pub items: Vec<CartLineRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLineDto {
    pub product: Product,
    pub quantity: u32,
    pub line_total: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartSummary {
    pub items: Vec<CartLineDto>,
    pub item_count: u32,
    pub total: i64,
}
