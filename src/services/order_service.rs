use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    dto::orders::{
        CheckoutRequest, OrderList, UpdateDeliveryDateRequest, UpdateOrderStatusRequest,
        UpdatePaymentStatusRequest,
    },
    entity::orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
    error::{AppError, AppResult},
    middleware::auth::AdminUser,
    models::{Order, OrderStatus, PaymentStatus},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    services::{cart_service::build_cart, order_number::next_order_number},
    state::AppState,
};

/// Customer contact details as stored on the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingDetails {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Validates the required checkout fields and joins them into the stored form.
pub fn shipping_details(
    payload: &CheckoutRequest,
    default_country_code: &str,
) -> AppResult<ShippingDetails> {
    let required = [
        ("customer_name", &payload.customer_name),
        ("email", &payload.email),
        ("phone", &payload.phone),
        ("address", &payload.address),
        ("city", &payload.city),
        ("zip", &payload.zip),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{field} is required")));
        }
    }

    let country_code = payload
        .country_code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(default_country_code);

    Ok(ShippingDetails {
        customer_name: payload.customer_name.trim().to_string(),
        email: payload.email.trim().to_string(),
        phone: format!("{}{}", country_code, payload.phone.trim()),
        address: format!(
            "{}, {}, {}",
            payload.address.trim(),
            payload.city.trim(),
            payload.zip.trim()
        ),
    })
}

/// Places an order from the submitted cart lines. The server keeps no cart,
/// so the client empties its session cart once this succeeds.
pub async fn checkout(
    state: &AppState,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<Order>> {
    let details = shipping_details(&payload, &state.config.default_country_code)?;

    let cart = build_cart(&state.orm, &payload.items).await?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }

    let items = cart.snapshot();
    let total_amount = cart.total();
    let order_number = next_order_number(&state.orm).await;

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        order_number: Set(order_number),
        customer_name: Set(details.customer_name),
        email: Set(details.email),
        phone: Set(details.phone),
        address: Set(details.address),
        items: Set(serde_json::to_value(&items).map_err(anyhow::Error::from)?),
        total_amount: Set(total_amount),
        status: Set(OrderStatus::Pending),
        payment_status: Set(PaymentStatus::Unpaid),
        estimated_delivery_date: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(order_id = %order.id, order_number, total_amount, "order placed");
    Ok(ApiResponse::success(
        "Checkout success",
        order_from_entity(order)?,
        Some(Meta::empty()),
    ))
}

/// How a tracking query may identify an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingKey {
    pub order_number: Option<i64>,
    pub legacy_id: Option<Uuid>,
}

pub fn parse_tracking_key(raw: &str) -> TrackingKey {
    let raw = raw.trim().trim_start_matches('#');
    TrackingKey {
        order_number: raw.parse::<i64>().ok(),
        legacy_id: Uuid::parse_str(raw).ok(),
    }
}

/// Looks an order up by order number, falling back to the record id used
/// before order numbers existed.
pub async fn track_order(state: &AppState, raw: &str) -> AppResult<ApiResponse<Order>> {
    let key = parse_tracking_key(raw);

    if let Some(number) = key.order_number {
        let order = Orders::find()
            .filter(OrderCol::OrderNumber.eq(number))
            .order_by_asc(OrderCol::CreatedAt)
            .one(&state.orm)
            .await?;
        if let Some(order) = order {
            return Ok(ApiResponse::success("Order found", order_from_entity(order)?, None));
        }
    }

    if let Some(id) = key.legacy_id {
        if let Some(order) = Orders::find_by_id(id).one(&state.orm).await? {
            return Ok(ApiResponse::success("Order found", order_from_entity(order)?, None));
        }
    }

    Err(AppError::NotFound)
}

pub async fn list_orders(
    state: &AppState,
    _admin: &AdminUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(status) = query.status {
        condition = condition.add(OrderCol::Status.eq(status));
    }

    let mut finder = Orders::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Orders", OrderList { items: orders }, Some(meta)))
}

pub async fn get_order(
    state: &AppState,
    _admin: &AdminUser,
    id: Uuid,
) -> AppResult<ApiResponse<Order>> {
    let order = find_order(state, id).await?;
    Ok(ApiResponse::success("Order found", order_from_entity(order)?, Some(Meta::empty())))
}

/// Overwrites the fulfilment status. Any status may follow any other.
pub async fn set_order_status(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let existing = find_order(state, id).await?;
    let previous = existing.status;

    let mut active: OrderActive = existing.into();
    active.status = Set(payload.status);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    tracing::info!(
        admin = %admin.user_id,
        order_id = %order.id,
        from = %previous,
        to = %order.status,
        "order status updated"
    );
    Ok(ApiResponse::success("Order updated", order_from_entity(order)?, Some(Meta::empty())))
}

/// Overwrites the payment status, independently of the fulfilment status.
pub async fn set_payment_status(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
    payload: UpdatePaymentStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let existing = find_order(state, id).await?;

    let mut active: OrderActive = existing.into();
    active.payment_status = Set(payload.payment_status);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    tracing::info!(
        admin = %admin.user_id,
        order_id = %order.id,
        payment_status = %order.payment_status,
        "payment status updated"
    );
    Ok(ApiResponse::success("Order updated", order_from_entity(order)?, Some(Meta::empty())))
}

/// Stores the caller's date string as-is.
pub async fn set_estimated_delivery_date(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
    payload: UpdateDeliveryDateRequest,
) -> AppResult<ApiResponse<Order>> {
    let existing = find_order(state, id).await?;

    let mut active: OrderActive = existing.into();
    active.estimated_delivery_date = Set(Some(payload.estimated_delivery_date));
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    tracing::info!(admin = %admin.user_id, order_id = %order.id, "delivery date updated");
    Ok(ApiResponse::success("Order updated", order_from_entity(order)?, Some(Meta::empty())))
}

pub(crate) async fn find_order(state: &AppState, id: Uuid) -> AppResult<OrderModel> {
    Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub(crate) fn order_from_entity(model: OrderModel) -> AppResult<Order> {
    let items = serde_json::from_value(model.items)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt order items: {e}")))?;
    Ok(Order {
        id: model.id,
        order_number: model.order_number,
        customer_name: model.customer_name,
        email: model.email,
        phone: model.phone,
        address: model.address,
        items,
        total_amount: model.total_amount,
        status: model.status,
        payment_status: model.payment_status,
        estimated_delivery_date: model.estimated_delivery_date,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
