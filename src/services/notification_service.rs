//! WhatsApp deep links with placeholder templates for customers and contacts.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use uuid::Uuid;

use crate::{
    dto::notifications::{WhatsappLink, WhatsappTemplates},
    error::{AppError, AppResult},
    middleware::auth::AdminUser,
    models::{ContactMessage, Order, OrderStatus},
    pricing::format_inr,
    response::{ApiResponse, Meta},
    services::{contact_service, order_service, settings_service},
    state::AppState,
};

pub const TEMPLATES_KEY: &str = "whatsapp_templates";

/// Characters left intact by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

impl Default for WhatsappTemplates {
    fn default() -> Self {
        Self {
            order_confirmation: "Hello {customerName}!\n\n\
                Thank you for your order!\n\n\
                *Order ID:* {orderId}\n\
                *Total Amount:* {totalAmount}\n\
                *Status:* {status}\n\n\
                Track your order here: {trackingLink}\n\n\
                We'll keep you updated on your order status."
                .to_string(),
            order_shipped: "Hello {customerName}!\n\n\
                Great news! Your order has been shipped.\n\n\
                *Order ID:* {orderId}\n\
                *Items:* {items}\n\n\
                Track your order here: {trackingLink}"
                .to_string(),
            order_delivered: "Hello {customerName}!\n\n\
                Your order has been delivered successfully!\n\n\
                *Order ID:* {orderId}\n\n\
                We hope you love your purchase. Please share your feedback with us."
                .to_string(),
            contact_reply: "Hello {name}!\n\n\
                Thank you for contacting us.\n\n\
                We received your message regarding: *{subject}*\n\n\
                Our team will get back to you shortly."
                .to_string(),
        }
    }
}

impl WhatsappTemplates {
    /// Template matching the order's fulfilment status.
    pub fn for_order(&self, status: OrderStatus) -> &str {
        match status {
            OrderStatus::Shipped => &self.order_shipped,
            OrderStatus::Delivered => &self.order_delivered,
            _ => &self.order_confirmation,
        }
    }
}

pub fn tracking_link(public_store_url: &str, order_number: i64) -> String {
    format!("{public_store_url}/track-order?id={order_number}")
}

pub fn render_order_message(template: &str, order: &Order, public_store_url: &str) -> String {
    let items = order
        .items
        .iter()
        .map(|item| format!("{}x {}", item.quantity, item.name))
        .collect::<Vec<_>>()
        .join(", ");

    template
        .replace("{customerName}", &order.customer_name)
        .replace("{orderId}", &order.order_number.to_string())
        .replace("{totalAmount}", &format_inr(order.total_amount))
        .replace("{status}", order.status.label())
        .replace("{items}", &items)
        .replace(
            "{trackingLink}",
            &tracking_link(public_store_url, order.order_number),
        )
}

pub fn render_contact_message(template: &str, contact: &ContactMessage) -> String {
    template
        .replace("{name}", &contact.name)
        .replace("{subject}", &contact.subject)
}

/// Builds a `wa.me` link; the phone number is reduced to its digits.
pub fn whatsapp_link(phone: &str, message: String) -> AppResult<WhatsappLink> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(AppError::BadRequest("phone number has no digits".into()));
    }
    let url = format!(
        "https://wa.me/{}?text={}",
        digits,
        utf8_percent_encode(&message, URI_COMPONENT)
    );
    Ok(WhatsappLink {
        phone: digits,
        message,
        url,
    })
}

pub async fn load_templates(state: &AppState) -> AppResult<WhatsappTemplates> {
    let stored = settings_service::load_setting(&state.orm, TEMPLATES_KEY).await?;
    let templates = match stored {
        Some(value) => serde_json::from_value(value).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "stored whatsapp templates unreadable, using defaults");
            WhatsappTemplates::default()
        }),
        None => WhatsappTemplates::default(),
    };
    Ok(templates)
}

pub async fn get_templates(
    state: &AppState,
    _admin: &AdminUser,
) -> AppResult<ApiResponse<WhatsappTemplates>> {
    let templates = load_templates(state).await?;
    Ok(ApiResponse::success("WhatsApp templates", templates, Some(Meta::empty())))
}

pub async fn save_templates(
    state: &AppState,
    admin: &AdminUser,
    templates: WhatsappTemplates,
) -> AppResult<ApiResponse<WhatsappTemplates>> {
    let value = serde_json::to_value(&templates).map_err(anyhow::Error::from)?;
    settings_service::store_setting(&state.orm, TEMPLATES_KEY, value).await?;

    tracing::info!(admin = %admin.user_id, "whatsapp templates saved");
    Ok(ApiResponse::success("WhatsApp templates saved", templates, Some(Meta::empty())))
}

pub async fn order_link(
    state: &AppState,
    _admin: &AdminUser,
    order_id: Uuid,
) -> AppResult<ApiResponse<WhatsappLink>> {
    let order = order_service::order_from_entity(order_service::find_order(state, order_id).await?)?;
    let templates = load_templates(state).await?;

    let message = render_order_message(
        templates.for_order(order.status),
        &order,
        &state.config.public_store_url,
    );
    let link = whatsapp_link(&order.phone, message)?;
    Ok(ApiResponse::success("WhatsApp link", link, Some(Meta::empty())))
}

pub async fn contact_link(
    state: &AppState,
    _admin: &AdminUser,
    contact_id: Uuid,
) -> AppResult<ApiResponse<WhatsappLink>> {
    let contact =
        contact_service::contact_from_entity(contact_service::find_contact(state, contact_id).await?);
    let phone = contact
        .phone
        .clone()
        .ok_or_else(|| AppError::BadRequest("contact has no phone number".into()))?;
    let templates = load_templates(state).await?;

    let message = render_contact_message(&templates.contact_reply, &contact);
    let link = whatsapp_link(&phone, message)?;
    Ok(ApiResponse::success("WhatsApp link", link, Some(Meta::empty())))
}
