use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::cart::CartLineRequest,
    models::{Order, OrderStatus, PaymentStatus},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub email: String,
    /// Calling code prepended to `phone`; the configured default when absent.
    pub country_code: Option<String>,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub items: Vec<CartLineRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePaymentStatusRequest {
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDeliveryDateRequest {
    pub estimated_delivery_date: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}
