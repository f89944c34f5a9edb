use axum::{Json, Router, extract::State, routing::get};

use crate::{
    error::AppResult, response::ApiResponse, services::settings_service, state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_settings))
}

#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Website settings document", body = ApiResponse<serde_json::Value>)
    ),
    tag = "Settings"
)]
pub async fn get_settings(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = settings_service::get_website_settings(&state).await?;
    Ok(Json(resp))
}
