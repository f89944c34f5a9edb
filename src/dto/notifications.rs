use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message templates for WhatsApp deep links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WhatsappTemplates {
    pub order_confirmation: String,
    pub order_shipped: String,
    pub order_delivered: String,
    pub contact_reply: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WhatsappLink {
    pub phone: String,
    pub message: String,
    pub url: String,
}
