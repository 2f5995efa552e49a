// HTTP data source for the dashboard data endpoint
use crate::application::data_source::ChartDataSource;
use crate::application::error::RefreshError;
use crate::domain::payload::ChartPayload;
use crate::infrastructure::config::DATA_PATH;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpChartSource {
    client: reqwest::Client,
    url: String,
}

impl HttpChartSource {
    pub fn new(
        base_url: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, RefreshError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), DATA_PATH),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChartDataSource for HttpChartSource {
    async fn fetch_payload(&self) -> Result<ChartPayload, RefreshError> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RefreshError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let payload = response.json::<ChartPayload>().await?;
        tracing::debug!(
            "Fetched payload: {} days, {} staff",
            payload.daily_labels.len(),
            payload.staff_labels.len()
        );
        Ok(payload)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payload::sample_payload;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> HttpChartSource {
        HttpChartSource::new(
            &server.uri(),
            Duration::from_millis(500),
            Duration::from_millis(300),
        )
        .unwrap()
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let source = HttpChartSource::new(
            "http://tips.local:5000/",
            Duration::from_secs(1),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(source.url(), "http://tips.local:5000/dashboard/restaurant/data");
    }

    #[tokio::test]
    async fn test_fetch_sends_accept_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DATA_PATH))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_payload()))
            .expect(1)
            .mount(&server)
            .await;

        let payload = source_for(&server).fetch_payload().await.unwrap();
        assert_eq!(payload, sample_payload());
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DATA_PATH))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_payload().await.unwrap_err();
        assert!(matches!(err, RefreshError::HttpStatus { status: 502 }));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DATA_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_payload().await.unwrap_err();
        assert!(matches!(err, RefreshError::PayloadShape(_)));
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DATA_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"daily_labels": ["1"]})),
            )
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_payload().await.unwrap_err();
        assert!(matches!(err, RefreshError::PayloadShape(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DATA_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(sample_payload())
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_payload().await.unwrap_err();
        assert!(matches!(err, RefreshError::Network(_)));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let source = HttpChartSource::new(
            "http://127.0.0.1:9",
            Duration::from_millis(200),
            Duration::from_millis(200),
        )
        .unwrap();
        let err = source.fetch_payload().await.unwrap_err();
        assert!(matches!(err, RefreshError::Network(_)));
    }
}
