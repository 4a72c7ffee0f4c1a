use serde::{Deserialize, Serialize};

/// Completion metrics computed by the backend from the uploaded CSV.
///
/// Read-only on this side; `completed + pending + past_due == total` is a
/// backend invariant and is not re-verified here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total: u32,
    pub completed: u32,
    pub pending: u32,
    pub past_due: u32,
    pub completion_rate: f64,
}
