// Data source trait for dashboard chart payloads
use crate::application::error::RefreshError;
use crate::domain::payload::ChartPayload;
use async_trait::async_trait;

#[async_trait]
pub trait ChartDataSource: Send + Sync {
    /// Fetch the latest aggregated chart data.
    async fn fetch_payload(&self) -> Result<ChartPayload, RefreshError>;

    /// Short description used in logs.
    fn describe(&self) -> String;
}
