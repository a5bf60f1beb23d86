//! reqwest-backed client for the churn service's JSON API.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::{ChurnService, Operation};
use crate::config::ApiConfig;
use crate::telemetry;
use crate::types::{AnalyticsSnapshot, ModelPerformance, PredictionRequest, PredictionResult};
use crate::{ChurnLensError, Result};

/// Default base URL of a locally running service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest error body echoed into an [`ChurnLensError::Api`] message.
const MAX_ERROR_BODY: usize = 512;

/// Client for the churn service.
///
/// ```rust,no_run
/// # use churnlens::{HttpChurnClient, ChurnService};
/// # async fn run() -> churnlens::Result<()> {
/// let client = HttpChurnClient::new("http://127.0.0.1:8000")?;
/// let analytics = client.analytics().await?;
/// println!("{} geographies", analytics.churn_by_geography.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HttpChurnClient {
    http: Client,
    base_url: String,
}

impl HttpChurnClient {
    /// Create a client with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom per-request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("churnlens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ChurnLensError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::with_timeout(&config.base_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, operation: Operation) -> String {
        format!("{}/{}", self.base_url, operation.path())
    }

    /// Send one request and decode its JSON body, recording metrics.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T> {
        let start = Instant::now();
        let result = Self::send_and_decode(request).await;
        record_request(operation, start, result.is_ok());
        if let Err(ref e) = result {
            warn!(operation = operation.as_str(), error = %e, "churn service request failed");
        }
        result
    }

    async fn send_and_decode<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| ChurnLensError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChurnLensError::Network(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(ChurnLensError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        debug!(status = status.as_u16(), bytes = body.len(), "response received");
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ChurnService for HttpChurnClient {
    #[instrument(skip(self, request), fields(operation = "predict"))]
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        let builder = self.http.post(self.url(Operation::Predict)).json(request);
        self.execute(Operation::Predict, builder).await
    }

    #[instrument(skip(self), fields(operation = "analytics"))]
    async fn analytics(&self) -> Result<AnalyticsSnapshot> {
        let builder = self.http.get(self.url(Operation::Analytics));
        self.execute(Operation::Analytics, builder).await
    }

    #[instrument(skip(self), fields(operation = "model_performance"))]
    async fn model_performance(&self) -> Result<ModelPerformance> {
        let builder = self.http.get(self.url(Operation::ModelPerformance));
        self.execute(Operation::ModelPerformance, builder).await
    }
}

fn record_request(operation: Operation, start: Instant, ok: bool) {
    let status = if ok { "ok" } else { "error" };
    let elapsed = start.elapsed().as_secs_f64();
    metrics::counter!(telemetry::REQUESTS_TOTAL,
        "operation" => operation.as_str(),
        "status" => status,
    )
    .increment(1);
    metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
        "operation" => operation.as_str(),
    )
    .record(elapsed);
}

fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return status.to_string();
    }
    let mut end = body.len().min(MAX_ERROR_BODY);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{status}: {}", &body[..end])
}
