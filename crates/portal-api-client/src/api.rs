//! Domain methods for the backend's three endpoints.
//!
//! Field names in the multipart bodies (`file`, `template`, `row_index`,
//! `sendTestCopy`) are part of the backend contract and must not change.

use crate::{ClientError, PortalClient};
use portal_core::models::{
    EmailTemplate, PreviewResponse, ProcessResponse, TestSendResponse, UploadedFile,
};
use reqwest::multipart::{Form, Part};
use serde::Serialize;

pub const PREVIEW_PATH: &str = "/api/preview-email";
pub const PROCESS_PATH: &str = "/api/process-emails";
pub const TEST_SEND_PATH: &str = "/api/test-email";

const PREVIEW_FALLBACK: &str = "Failed to generate preview";
const PROCESS_FALLBACK: &str = "Failed to process emails";
const TEST_SEND_FALLBACK: &str = "Failed to send test email";

/// The `template` form field: the email template, optionally tagged with the
/// test-copy flag the backend understands.
#[derive(Serialize)]
struct TemplatePayload<'a> {
    #[serde(flatten)]
    template: &'a EmailTemplate,
    #[serde(rename = "sendTestCopy", skip_serializing_if = "Option::is_none")]
    send_test_copy: Option<bool>,
}

impl PortalClient {
    /// Request a preview: chart, metrics, and rendered HTML for the file,
    /// without sending any email.
    pub async fn preview(
        &self,
        file: &UploadedFile,
        row_index: Option<u32>,
    ) -> Result<PreviewResponse, ClientError> {
        let mut form = Form::new().part("file", file_part(file)?);
        if let Some(index) = row_index {
            form = form.text("row_index", index.to_string());
        }
        self.post_multipart(PREVIEW_PATH, form, PREVIEW_FALLBACK)
            .await
    }

    /// Process the file and dispatch the emails using the given template.
    pub async fn process(
        &self,
        file: &UploadedFile,
        template: &EmailTemplate,
        send_test_copy: bool,
    ) -> Result<ProcessResponse, ClientError> {
        let payload = TemplatePayload {
            template,
            send_test_copy: send_test_copy.then_some(true),
        };
        let template_json = serde_json::to_string(&payload)?;
        let form = Form::new()
            .part("file", file_part(file)?)
            .text("template", template_json);
        self.post_multipart(PROCESS_PATH, form, PROCESS_FALLBACK)
            .await
    }

    /// Send a single test email with the given template, no CSV involved.
    pub async fn send_test(
        &self,
        template: &EmailTemplate,
    ) -> Result<TestSendResponse, ClientError> {
        let template_json = serde_json::to_string(template)?;
        let form = Form::new().text("template", template_json);
        self.post_multipart(TEST_SEND_PATH, form, TEST_SEND_FALLBACK)
            .await
    }
}

fn file_part(file: &UploadedFile) -> Result<Part, ClientError> {
    let mut part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
    if let Some(content_type) = file.content_type.as_deref() {
        part = part.mime_str(content_type)?;
    }
    Ok(part)
}
