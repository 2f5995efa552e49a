// Offline data source aggregating a local tip ledger file
use crate::application::data_source::ChartDataSource;
use crate::application::error::RefreshError;
use crate::domain::ledger::TipLedger;
use crate::domain::payload::ChartPayload;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::path::PathBuf;

/// Re-reads the ledger on every fetch so edits show up on the next poll.
#[derive(Debug, Clone)]
pub struct LedgerChartSource {
    path: PathBuf,
    today: Option<NaiveDate>,
}

impl LedgerChartSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            today: None,
        }
    }

    /// Pin the reporting date instead of using the current UTC date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    async fn read_ledger(&self) -> Result<TipLedger, RefreshError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| RefreshError::Ledger(format!("{}: {}", self.path.display(), e)))?;
        serde_json::from_str(&text)
            .map_err(|e| RefreshError::Ledger(format!("{}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl ChartDataSource for LedgerChartSource {
    async fn fetch_payload(&self) -> Result<ChartPayload, RefreshError> {
        let ledger = self.read_ledger().await?;
        let today = self.today.unwrap_or_else(|| Utc::now().date_naive());
        tracing::debug!(
            "Aggregating {} tips from {}",
            ledger.tips.len(),
            self.path.display()
        );
        Ok(ledger.chart_payload(today))
    }

    fn describe(&self) -> String {
        format!("ledger {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_and_aggregates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "staff": [{{"id": 7, "name": "Alice"}}],
                "tips": [
                    {{"staff_id": 7, "amount_cents": 1000, "created_at": "2024-06-01T10:00:00"}},
                    {{"staff_id": 7, "amount_cents": 2000, "created_at": "2024-06-02T21:15:00"}},
                    {{"amount_cents": 500, "created_at": "2024-05-01T09:00:00", "status": "pending"}}
                ]
            }}"#
        )
        .unwrap();

        let source = LedgerChartSource::new(file.path())
            .with_today(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        let payload = source.fetch_payload().await.unwrap();

        assert_eq!(payload.daily_labels.len(), 30);
        assert_eq!(&payload.daily_current[..2], &[1000, 2000]);
        assert!(payload.daily_previous.iter().all(|v| *v == 0));
        assert_eq!(payload.staff_labels, vec!["Alice"]);
        assert_eq!(payload.staff_totals, vec![3000]);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = LedgerChartSource::new("/nonexistent/ledger.json");
        let err = source.fetch_payload().await.unwrap_err();
        assert!(matches!(err, RefreshError::Ledger(_)));
    }

    #[tokio::test]
    async fn test_corrupt_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not a ledger").unwrap();
        let err = LedgerChartSource::new(file.path())
            .fetch_payload()
            .await
            .unwrap_err();
        assert!(matches!(err, RefreshError::Ledger(_)));
    }
}
