use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::cart::{CartQuoteRequest, CartSummary},
    error::AppResult,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/quote", post(quote_cart))
}

#[utoipa::path(
    post,
    path = "/api/cart/quote",
    request_body = CartQuoteRequest,
    responses(
        (status = 200, description = "Price a client-held cart against the current catalog", body = ApiResponse<CartSummary>),
        (status = 400, description = "Unknown product or invalid quantity"),
    ),
    tag = "Cart"
)]
pub async fn quote_cart(
    State(state): State<AppState>,
    Json(payload): Json<CartQuoteRequest>,
) -> AppResult<Json<ApiResponse<CartSummary>>> {
    let resp = cart_service::quote_cart(&state, payload).await?;
    Ok(Json(resp))
}
