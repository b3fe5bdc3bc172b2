use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::{card, render, util, AppState};

/// Accent used when the caller does not pick one.
const DEFAULT_COLOR: &str = "#4B6179";

#[derive(Debug, Deserialize, ToSchema)]
pub struct CardRequest {
    /// Card type (or legacy alias), see `GET /cards`.
    pub card: String,
    /// Accent color as `#RRGGBB`.
    pub color: Option<String>,
    /// Card-specific payload.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub payload: serde_json::Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CardResponse {
    /// Base64-encoded PNG.
    pub image: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn detail(status: StatusCode, msg: impl Into<String>) -> ApiError {
    (status, Json(json!({ "detail": msg.into() })))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/generate", post(generate))
        .route("/cards", get(cards))
        .route("/api/status", get(api_status))
        .route("/health", get(health))
        .with_state(state)
}

#[utoipa::path(get, path = "/health", tag = "cardgen", responses((status = 200, body = HealthResponse)))]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok".into() })
}

fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    headers
        .get("X-API-Key")
        .or_else(|| headers.get("x-api-key"))
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

fn verify_api_key(st: &AppState, headers: &HeaderMap) -> Result<String, ApiError> {
    let key = extract_api_key(headers).ok_or_else(|| {
        detail(
            StatusCode::UNAUTHORIZED,
            "API key required. Please provide X-API-Key header",
        )
    })?;
    if !st.api_keys.validate(&key) {
        return Err(detail(StatusCode::UNAUTHORIZED, "Invalid API key"));
    }
    Ok(st.api_keys.name(&key).unwrap_or_else(|| "default".into()))
}

#[utoipa::path(
    get,
    path = "/api/status",
    tag = "cardgen",
    params(("X-API-Key" = String, Header, description = "API key")),
    responses((status = 200, body = serde_json::Value), (status = 401, description = "Unauthorized"))
)]
pub async fn api_status(
    State(st): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let key_name = verify_api_key(&st, &headers)?;
    Ok(Json(json!({
        "status": "active",
        "key_name": key_name,
        "message": "API key is valid"
    })))
}

#[utoipa::path(
    get,
    path = "/cards",
    tag = "cardgen",
    responses((status = 200, body = serde_json::Value))
)]
pub async fn cards() -> impl IntoResponse {
    Json(card::catalog())
}

#[utoipa::path(
    post,
    path = "/generate",
    tag = "cardgen",
    request_body = CardRequest,
    params(("X-API-Key" = String, Header, description = "API key")),
    responses(
        (status = 200, description = "Generated card as a Base64 PNG", body = CardResponse),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn generate(
    State(st): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CardRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let _ = verify_api_key(&st, &headers)?;

    let color = render::parse_hex_color(req.color.as_deref().unwrap_or(DEFAULT_COLOR))
        .map_err(|e| detail(StatusCode::BAD_REQUEST, e.to_string()))?;

    let started = std::time::Instant::now();
    let img = card::generate(&req.card, color, &req.payload).map_err(|e| match e {
        card::CardError::UnknownCard(name) => detail(
            StatusCode::BAD_REQUEST,
            format!("Unknown card: {name}. Available: {:?}", card::card_names()),
        ),
        card::CardError::BadRequest(msg) => detail(StatusCode::BAD_REQUEST, msg),
        other => detail(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    })?;

    let png = util::png_encode_rgba8(&img)
        .map_err(|e| detail(StatusCode::INTERNAL_SERVER_ERROR, e))?;
    info!(
        card = %req.card,
        ms = started.elapsed().as_millis() as u64,
        bytes = png.len(),
        "card rendered"
    );

    Ok(Json(CardResponse {
        image: util::b64_encode(&png),
    }))
}
