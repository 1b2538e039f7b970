use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use nk_core::{now_jst, Itinerary, QueryInput};
use nk_dialog::{DialogRequest, DialogResponse};
use serde::Deserialize;
use serde_json::{json, Value};

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

pub fn dialog_routes() -> Router<AppState> {
    Router::new().route("/api/v1/dialog", post(dialog_turn))
}

pub fn search_routes() -> Router<AppState> {
    Router::new().route("/api/v1/search", get(search))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "started_at": state.started_at.to_rfc3339(),
    }))
}

async fn dialog_turn(State(state): State<AppState>, Json(mut request): Json<DialogRequest>) -> Json<DialogResponse> {
    if request.session.session_id.is_none() {
        request.session.session_id = Some(uuid::Uuid::new_v4().to_string());
    }
    Json(state.controller.handle(request).await)
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub duration: Option<String>,
    #[serde(rename = "type")]
    pub mode: Option<String>,
}

impl From<SearchParams> for QueryInput {
    fn from(p: SearchParams) -> Self {
        QueryInput {
            departure_station: p.from,
            arrival_station: p.to,
            date: p.date,
            time: p.time,
            duration: p.duration,
            mode: p.mode,
        }
    }
}

async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Result<Json<Itinerary>, ApiError> {
    let input = QueryInput::from(params);
    let itinerary = state.search.search(&input, now_jst()).await?;
    tracing::info!(url = %itinerary.source_url, "one-shot search answered");
    Ok(Json(itinerary))
}
