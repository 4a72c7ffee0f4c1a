use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An uploaded file held client-side between selection and send.
/// Exactly one may be active at a time; the bytes are discarded once a
/// send request has been issued or on explicit clear.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub size: usize,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len(),
            content_type,
            bytes,
        }
    }
}

/// Processing outcome of one recent upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Processing,
    Complete,
    Error,
}

/// In-memory record of one file's processing outcome, shown in the
/// recent-uploads history. Lost on restart; that is intentional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentUploadEntry {
    pub id: Uuid,
    pub name: String,
    pub size: usize,
    pub status: UploadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RecentUploadEntry {
    /// New entry in the optimistic `Processing` state.
    pub fn processing(name: impl Into<String>, size: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            size,
            status: UploadStatus::Processing,
            message: None,
        }
    }
}

/// Human-readable file size, e.g. `1.5 KB`.
pub fn format_size(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    // Whole values read as integers, fractional ones with one decimal
    let rounded = (value * 10.0).round() / 10.0;
    if (rounded - rounded.trunc()).abs() < f64::EPSILON {
        format!("{} {}", rounded.trunc() as u64, UNITS[unit])
    } else {
        format!("{:.1} {}", rounded, UNITS[unit])
    }
}
