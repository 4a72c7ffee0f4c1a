use serde::{Deserialize, Serialize};

use super::Metrics;

/// Success body of `POST /api/preview-email`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub success: bool,
    /// Base64-encoded PNG chart.
    pub chart: String,
    /// Rendered HTML email body.
    pub content: String,
    pub metrics: Metrics,
}

/// Success body of `POST /api/process-emails`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
    pub timestamp: String,
    pub processed_rows: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_success: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_failure: Option<u64>,
}

/// Success body of `POST /api/test-email`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSendResponse {
    pub success: bool,
    pub message: String,
}

/// Structured error body returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Preview data held for the current preview step only; replaced wholesale
/// on each new preview request.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewResult {
    pub chart: String,
    pub content: String,
    pub metrics: Metrics,
}

impl From<PreviewResponse> for PreviewResult {
    fn from(response: PreviewResponse) -> Self {
        Self {
            chart: response.chart,
            content: response.content,
            metrics: response.metrics,
        }
    }
}
