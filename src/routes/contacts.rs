use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::contacts::CreateContactRequest,
    error::AppResult,
    models::ContactMessage,
    response::ApiResponse,
    services::contact_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit_contact))
}

#[utoipa::path(
    post,
    path = "/api/contacts",
    request_body = CreateContactRequest,
    responses(
        (status = 200, description = "Contact message stored", body = ApiResponse<ContactMessage>),
        (status = 400, description = "Missing fields"),
    ),
    tag = "Contacts"
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(payload): Json<CreateContactRequest>,
) -> AppResult<Json<ApiResponse<ContactMessage>>> {
    let resp = contact_service::submit_contact(&state, payload).await?;
    Ok(Json(resp))
}
