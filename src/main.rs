// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use tips_dashboard::application::chart_builder::{ChartBuilder, ChartDefaults};
use tips_dashboard::application::data_source::ChartDataSource;
use tips_dashboard::application::refresher::DashboardRefresher;
use tips_dashboard::application::theme_controller::ThemeController;
use tips_dashboard::domain::money::Money;
use tips_dashboard::domain::theme::Palette;
use tips_dashboard::infrastructure::config::{
    AppConfig, DEFAULT_CONFIG_PATH, SourceSettings, load_config, read_seed,
};
use tips_dashboard::infrastructure::http_source::HttpChartSource;
use tips_dashboard::infrastructure::ledger_source::LedgerChartSource;
use tips_dashboard::infrastructure::preference_store::FilePreferenceStore;
use tips_dashboard::presentation::app_state::AppState;
use tips_dashboard::presentation::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config_path =
        std::env::var("DASHBOARD_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config(&config_path)?;

    // Initialize tracing; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Theme preferences (infrastructure + application)
    let store = Arc::new(FilePreferenceStore::new(&config.theme.store_path));
    let fallback = Palette::new(
        config.theme.default_hue as i64,
        config.theme.default_intensity as i64,
    );
    let theme = Arc::new(ThemeController::load(store, fallback));

    // Chart data source and refresher
    let source = build_source(&config)?;
    let builder = ChartBuilder::new(
        Money::new(config.currency.locale, config.currency.code),
        ChartDefaults {
            font_family: config.theme.font_family.clone(),
            ..Default::default()
        },
    );
    let refresher = Arc::new(DashboardRefresher::new(
        source,
        builder,
        theme.palette_updates(),
        config.poll.interval(),
    ));

    let seed = read_seed(config.seed_path.as_deref());
    refresher.bootstrap(seed.as_deref()).await;
    let poller = refresher.spawn();

    // Build router (presentation layer)
    let state = Arc::new(AppState {
        refresher: refresher.clone(),
        theme,
    });
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting tips dashboard on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    refresher.stop();
    poller.await?;

    Ok(())
}

fn build_source(config: &AppConfig) -> anyhow::Result<Arc<dyn ChartDataSource>> {
    let source: Arc<dyn ChartDataSource> = match &config.source {
        SourceSettings::Http {
            base_url,
            connect_timeout_ms,
            request_timeout_ms,
        } => Arc::new(HttpChartSource::new(
            base_url,
            Duration::from_millis(*connect_timeout_ms),
            Duration::from_millis(*request_timeout_ms),
        )?),
        SourceSettings::Ledger { path } => Arc::new(LedgerChartSource::new(path)),
    };
    Ok(source)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Could not listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
