// Presentation layer - HTTP surface over the mount points, theme and rating widget
pub mod app_state;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_chart, get_theme, health_check, list_charts, refresh_charts, render_rating, set_mode,
    toggle_theme, update_palette,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/charts", get(list_charts))
        .route("/charts/refresh", post(refresh_charts))
        .route("/charts/:slot", get(get_chart))
        .route("/theme", get(get_theme).put(update_palette))
        .route("/theme/mode", post(set_mode))
        .route("/theme/toggle", post(toggle_theme))
        .route("/rating", get(render_rating))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
