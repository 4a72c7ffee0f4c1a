//! Upload/preview/send workflow
//!
//! Owns the coarse UI step (`upload` → `preview` → `complete`), the active
//! file, the loading/error flags, and the recent-uploads history, and
//! sequences backend calls through the upload client. Every error is
//! absorbed here into a user-visible message; nothing is retried.

use async_trait::async_trait;
use uuid::Uuid;

use portal_api_client::{ClientError, PortalClient};
use portal_core::models::{
    EmailTemplate, PreviewResponse, PreviewResult, ProcessResponse, RecentUploadEntry,
    TemplateField, UploadStatus, UploadedFile,
};
use portal_core::{CsvValidator, ValidationError};
use portal_render::{render_email, ChartRef};

const PREVIEW_FALLBACK: &str = "Failed to generate preview";
const PROCESS_FALLBACK: &str = "Failed to process emails";

/// Coarse UI step. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Upload,
    Preview,
    Complete,
}

/// Errors surfaced by workflow operations. All of them also land in the
/// workflow's user-visible `error` message.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Please select a file first")]
    NoFileSelected,

    #[error(transparent)]
    InvalidFile(#[from] ValidationError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// The backend operations the workflow sequences.
///
/// [`PortalClient`] is the production implementation; tests substitute
/// stubs to script backend behavior.
#[async_trait]
pub trait UploadApi {
    async fn preview(
        &self,
        file: &UploadedFile,
        row_index: Option<u32>,
    ) -> Result<PreviewResponse, ClientError>;

    async fn process(
        &self,
        file: &UploadedFile,
        template: &EmailTemplate,
        send_test_copy: bool,
    ) -> Result<ProcessResponse, ClientError>;
}

#[async_trait]
impl UploadApi for PortalClient {
    async fn preview(
        &self,
        file: &UploadedFile,
        row_index: Option<u32>,
    ) -> Result<PreviewResponse, ClientError> {
        PortalClient::preview(self, file, row_index).await
    }

    async fn process(
        &self,
        file: &UploadedFile,
        template: &EmailTemplate,
        send_test_copy: bool,
    ) -> Result<ProcessResponse, ClientError> {
        PortalClient::process(self, file, template, send_test_copy).await
    }
}

/// The upload → preview → complete state machine.
///
/// One instance per user session; it owns all mutable state, including the
/// recent-uploads list. Dropping it mid-request simply discards the
/// eventual response.
pub struct Workflow<A: UploadApi> {
    api: A,
    validator: CsvValidator,
    step: Step,
    file: Option<UploadedFile>,
    template: EmailTemplate,
    preview: Option<PreviewResult>,
    recent: Vec<RecentUploadEntry>,
    loading: bool,
    error: Option<String>,
}

impl<A: UploadApi> Workflow<A> {
    pub fn new(api: A) -> Self {
        Self::with_validator(api, CsvValidator::with_default_cap())
    }

    pub fn with_validator(api: A, validator: CsvValidator) -> Self {
        Self {
            api,
            validator,
            step: Step::Upload,
            file: None,
            template: EmailTemplate::default(),
            preview: None,
            recent: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn active_file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    pub fn template(&self) -> &EmailTemplate {
        &self.template
    }

    pub fn preview(&self) -> Option<&PreviewResult> {
        self.preview.as_ref()
    }

    /// Most-recent-first history of processed uploads.
    pub fn recent_uploads(&self) -> &[RecentUploadEntry] {
        &self.recent
    }

    /// Accept a candidate file for upload.
    ///
    /// Rejected candidates leave no active file and set the user-visible
    /// error; an accepted file resets the step to `Upload` and clears any
    /// stale preview.
    pub fn select_file(
        &mut self,
        name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<(), WorkflowError> {
        if let Err(err) = self.validator.validate(name, content_type, bytes.len()) {
            self.file = None;
            self.error = Some(err.to_string());
            return Err(err.into());
        }

        self.file = Some(UploadedFile::new(
            name,
            content_type.map(str::to_string),
            bytes,
        ));
        self.preview = None;
        self.step = Step::Upload;
        self.error = None;
        tracing::debug!(file = %name, "File selected");
        Ok(())
    }

    /// Discard the active file without touching the rest of the state.
    pub fn clear_file(&mut self) {
        self.file = None;
    }

    /// Ask the backend for a preview of the active file.
    ///
    /// A call issued while another preview is in flight is ignored, so a
    /// late first response can never overwrite a newer one. On failure the
    /// step stays at `Upload` and the backend's detail message (or a
    /// generic fallback) becomes the user-visible error.
    #[tracing::instrument(skip(self))]
    pub async fn request_preview(&mut self, row_index: Option<u32>) -> Result<(), WorkflowError> {
        if self.loading {
            tracing::debug!("Preview already in flight, ignoring duplicate request");
            return Ok(());
        }

        let Some(file) = self.file.take() else {
            self.error = Some(WorkflowError::NoFileSelected.to_string());
            return Err(WorkflowError::NoFileSelected);
        };

        self.loading = true;
        let result = self.api.preview(&file, row_index).await;
        self.file = Some(file);
        self.loading = false;

        match result {
            Ok(response) => {
                self.preview = Some(response.into());
                self.step = Step::Preview;
                self.error = None;
                tracing::info!("Preview generated");
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.user_message(PREVIEW_FALLBACK));
                Err(err.into())
            }
        }
    }

    /// Update one template field and re-render the preview HTML.
    ///
    /// Only meaningful while previewing; outside the `Preview` step this is
    /// a no-op, since the editor is only reachable from the preview screen.
    pub fn edit_template_field(&mut self, field: TemplateField, value: impl Into<String>) {
        if self.step != Step::Preview {
            return;
        }

        self.template.set_field(field, value);
        if let Some(preview) = self.preview.as_mut() {
            let html = render_email(
                &self.template,
                &preview.metrics,
                Some(ChartRef::DataUri(&preview.chart)),
            );
            preview.content = html;
        }
    }

    /// Process the active file: dispatch the emails with the current (or
    /// overridden) template.
    ///
    /// A `Processing` history entry is appended before the call goes out
    /// and is resolved exactly once from the completion path. The active
    /// file is consumed regardless of outcome. A preview is not required.
    #[tracing::instrument(skip(self, template_override))]
    pub async fn send(
        &mut self,
        template_override: Option<&EmailTemplate>,
        send_test_copy: bool,
    ) -> Result<(), WorkflowError> {
        let Some(file) = self.file.take() else {
            self.error = Some(WorkflowError::NoFileSelected.to_string());
            return Err(WorkflowError::NoFileSelected);
        };

        let entry = RecentUploadEntry::processing(&file.name, file.size);
        let entry_id = entry.id;
        self.recent.insert(0, entry);

        let template = template_override.unwrap_or(&self.template).clone();
        self.loading = true;
        let result = self.api.process(&file, &template, send_test_copy).await;
        self.loading = false;

        match result {
            Ok(response) => {
                let (status, message) = summarize(&response);
                tracing::info!(
                    file = %response.filename,
                    processed_rows = response.processed_rows,
                    "Processing complete"
                );
                self.resolve_entry(entry_id, status, message);
                self.step = Step::Complete;
                self.error = None;
                Ok(())
            }
            Err(err) => {
                let message = err.user_message(PROCESS_FALLBACK);
                self.resolve_entry(entry_id, UploadStatus::Error, message.clone());
                self.error = Some(message);
                Err(err.into())
            }
        }
    }

    /// Leave the preview and return to the upload step. Keeps the recent
    /// uploads and any template edits.
    pub fn back_to_upload(&mut self) {
        self.preview = None;
        self.error = None;
        self.step = Step::Upload;
    }

    /// Single mutation point for history entries, reachable only from the
    /// completion paths of [`send`](Self::send).
    fn resolve_entry(&mut self, id: Uuid, status: UploadStatus, message: String) {
        if let Some(entry) = self.recent.iter_mut().find(|entry| entry.id == id) {
            entry.status = status;
            entry.message = Some(message);
        }
    }
}

/// Judge a 2xx process response: any successfully sent email keeps the
/// entry `Complete` (the counts in the message carry the partial-failure
/// note); an all-failed dispatch marks it `Error`.
fn summarize(response: &ProcessResponse) -> (UploadStatus, String) {
    let message = match (response.email_success, response.email_failure) {
        (Some(success), Some(failure)) => format!(
            "Processed {} rows. {} sent successfully, {} failed.",
            response.processed_rows, success, failure
        ),
        _ => format!("Processed {} rows.", response.processed_rows),
    };

    let all_failed = response.email_success.unwrap_or(0) == 0
        && response.email_failure.unwrap_or(0) > 0;
    let status = if all_failed {
        UploadStatus::Error
    } else {
        UploadStatus::Complete
    };

    (status, message)
}
