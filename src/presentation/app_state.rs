// Application state for HTTP handlers
use crate::application::refresher::DashboardRefresher;
use crate::application::theme_controller::ThemeController;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub refresher: Arc<DashboardRefresher>,
    pub theme: Arc<ThemeController>,
}
