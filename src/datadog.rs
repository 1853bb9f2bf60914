use async_trait::async_trait;
use lambda_runtime::Error;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error as ThisError;
use tracing::{debug, info};

/// One custom metric series as accepted by the Datadog series API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub metric: String,
    #[serde(rename = "type")]
    pub metric_type: String,
    pub points: Vec<(i64, f64)>,
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeriesRequest {
    pub series: Vec<Series>,
}

#[derive(Debug, ThisError)]
pub enum SubmissionError {
    #[error("failed to send metrics request: {0}")]
    Http(#[from] reqwest::Error),
    #[error("datadog rejected metrics submission ({status}): {body}")]
    Rejected { status: StatusCode, body: String },
}

#[async_trait]
pub trait MetricsExporter {
    async fn submit(&self, series: Vec<Series>) -> Result<(), Error>;
}

pub type DynMetricsExporter = Arc<dyn MetricsExporter + Send + Sync>;

/// Submits metrics to the Datadog series endpoint over HTTP. The inner
/// reqwest client is shared read-only across concurrent submissions.
pub struct RestMetricsExporter {
    http: reqwest::Client,
    uri: String,
    api_key: String,
}

impl RestMetricsExporter {
    pub fn new(http: reqwest::Client, base_url: &str, api_key: String) -> Self {
        RestMetricsExporter {
            http,
            uri: format!("{}/api/v1/series", base_url),
            api_key,
        }
    }
}

#[async_trait]
impl MetricsExporter for RestMetricsExporter {
    async fn submit(&self, series: Vec<Series>) -> Result<(), Error> {
        debug!("sending metric data to uri: {:?}", self.uri);

        let metrics = series.len();
        let start = Instant::now();
        let response = self
            .http
            .post(&self.uri)
            .header("DD-API-KEY", &self.api_key)
            .json(&SeriesRequest { series })
            .send()
            .await
            .map_err(SubmissionError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubmissionError::Rejected { status, body }.into());
        }

        info!(
            status = %status,
            metrics,
            elapsed_ms = start.elapsed().as_millis(),
            "metrics HTTP request completed"
        );

        Ok(())
    }
}
