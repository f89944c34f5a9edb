use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    dto::contacts::{ContactList, CreateContactRequest, UpdateContactStatusRequest},
    entity::contacts::{ActiveModel, Column, Entity as Contacts, Model as ContactModel},
    error::{AppError, AppResult},
    middleware::auth::AdminUser,
    models::{ContactMessage, ContactStatus},
    response::{ApiResponse, Meta},
    routes::params::ContactListQuery,
    state::AppState,
};

pub async fn submit_contact(
    state: &AppState,
    payload: CreateContactRequest,
) -> AppResult<ApiResponse<ContactMessage>> {
    for (field, value) in [
        ("name", &payload.name),
        ("email", &payload.email),
        ("subject", &payload.subject),
        ("message", &payload.message),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{field} is required")));
        }
    }

    let contact = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_string()),
        email: Set(payload.email.trim().to_string()),
        phone: Set(payload
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())),
        subject: Set(payload.subject),
        message: Set(payload.message),
        status: Set(ContactStatus::New),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(contact_id = %contact.id, "contact message received");
    Ok(ApiResponse::success(
        "Message sent",
        contact_from_entity(contact),
        Some(Meta::empty()),
    ))
}

pub async fn list_contacts(
    state: &AppState,
    _admin: &AdminUser,
    query: ContactListQuery,
) -> AppResult<ApiResponse<ContactList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(status) = query.status {
        condition = condition.add(Column::Status.eq(status));
    }

    let finder = Contacts::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(contact_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Contacts",
        ContactList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

/// Overwrites the inbox status; no transition rules apply.
pub async fn set_contact_status(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
    payload: UpdateContactStatusRequest,
) -> AppResult<ApiResponse<ContactMessage>> {
    let existing = find_contact(state, id).await?;

    let mut active: ActiveModel = existing.into();
    active.status = Set(payload.status);
    let contact = active.update(&state.orm).await?;

    tracing::info!(admin = %admin.user_id, contact_id = %id, status = %contact.status, "contact status updated");
    Ok(ApiResponse::success(
        "Contact updated",
        contact_from_entity(contact),
        Some(Meta::empty()),
    ))
}

pub async fn delete_contact(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Contacts::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(admin = %admin.user_id, contact_id = %id, "contact deleted");
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub(crate) async fn find_contact(state: &AppState, id: Uuid) -> AppResult<ContactModel> {
    Contacts::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub(crate) fn contact_from_entity(model: ContactModel) -> ContactMessage {
    ContactMessage {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        subject: model.subject,
        message: model.message,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
