// HTTP request handlers
use crate::application::refresher::{MountSnapshot, RefreshOutcome};
use crate::application::theme_controller::ThemeSnapshot;
use crate::domain::chart::ChartSlot;
use crate::domain::rating::{DEFAULT_MAX_STARS, StarRating, StarState};
use crate::domain::theme::ThemeMode;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct PaletteRequest {
    pub hue: i64,
    pub intensity: i64,
}

#[derive(Deserialize)]
pub struct ModeRequest {
    pub mode: ThemeMode,
}

/// Raw hidden-input value of a star rating form field.
#[derive(Deserialize)]
pub struct RatingQuery {
    #[serde(default)]
    pub value: String,
    pub max: Option<u8>,
}

#[derive(Serialize)]
pub struct StarView {
    pub state: StarState,
    pub icon_classes: &'static str,
}

#[derive(Serialize)]
pub struct RatingView {
    pub value: u8,
    pub input_value: String,
    pub stars: Vec<StarView>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Both mount points
pub async fn list_charts(State(state): State<Arc<AppState>>) -> Json<Vec<MountSnapshot>> {
    let mut charts = Vec::with_capacity(ChartSlot::ALL.len());
    for slot in ChartSlot::ALL {
        charts.push(state.refresher.snapshot(slot).await);
    }
    Json(charts)
}

/// One mount point by slot name (`tips` or `staff`)
pub async fn get_chart(
    Path(slot): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<MountSnapshot>, StatusCode> {
    let slot = ChartSlot::parse(&slot).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(state.refresher.snapshot(slot).await))
}

/// Refresh both charts now
pub async fn refresh_charts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RefreshOutcome>, StatusCode> {
    // Run detached so a dropped connection cannot leave the mounts loading.
    let refresher = state.refresher.clone();
    tokio::spawn(async move { refresher.refresh().await })
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Refresh task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

pub async fn get_theme(State(state): State<Arc<AppState>>) -> Json<ThemeSnapshot> {
    Json(state.theme.snapshot())
}

pub async fn update_palette(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PaletteRequest>,
) -> Result<Json<ThemeSnapshot>, (StatusCode, String)> {
    state
        .theme
        .set_palette(request.hue, request.intensity)
        .map(Json)
        .map_err(|e| {
            tracing::error!("Could not save palette: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
}

pub async fn set_mode(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ModeRequest>,
) -> Json<ThemeSnapshot> {
    Json(state.theme.set_mode(request.mode))
}

pub async fn toggle_theme(State(state): State<Arc<AppState>>) -> Json<ThemeSnapshot> {
    Json(state.theme.toggle())
}

/// Star states for a rating field, restored from its hidden input value
pub async fn render_rating(Query(query): Query<RatingQuery>) -> Json<RatingView> {
    let rating = StarRating::from_input(query.max.unwrap_or(DEFAULT_MAX_STARS), &query.value);
    Json(RatingView {
        value: rating.value(),
        input_value: rating.input_value(),
        stars: rating
            .stars()
            .into_iter()
            .map(|state| StarView {
                state,
                icon_classes: state.icon_classes(),
            })
            .collect(),
    })
}
