use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use portal_api_client::PortalClient;
use portal_core::models::{format_size, EmailTemplate, TemplateField, UploadStatus};
use portal_workflow::Workflow;

#[derive(Parser, Debug)]
#[command(name = "process_emails")]
#[command(about = "Process a CSV file and dispatch the tracking emails")]
struct Args {
    /// Path to the CSV file
    file: PathBuf,

    /// Override the email subject
    #[arg(long)]
    subject: Option<String>,

    /// Override the greeting line
    #[arg(long)]
    greeting: Option<String>,

    /// Override the intro paragraph
    #[arg(long)]
    intro: Option<String>,

    /// Override the call-to-action paragraph
    #[arg(long)]
    action: Option<String>,

    /// Override the closing text
    #[arg(long)]
    closing: Option<String>,

    /// Ask the backend to also deliver a test copy
    #[arg(long)]
    send_test_copy: bool,
}

impl Args {
    fn template(&self) -> Option<EmailTemplate> {
        let overrides = [
            (TemplateField::Subject, &self.subject),
            (TemplateField::Greeting, &self.greeting),
            (TemplateField::Intro, &self.intro),
            (TemplateField::Action, &self.action),
            (TemplateField::Closing, &self.closing),
        ];
        if overrides.iter().all(|(_, value)| value.is_none()) {
            return None;
        }

        let mut template = EmailTemplate::default();
        for (field, value) in overrides {
            if let Some(value) = value {
                template.set_field(field, value.clone());
            }
        }
        Some(template)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let client = PortalClient::from_env()?;
    let mut workflow = Workflow::new(client);

    let name = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.csv")
        .to_string();
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let size = bytes.len();

    workflow.select_file(&name, Some("text/csv"), bytes)?;
    println!("Processing {} ({})", name, format_size(size));

    let template = args.template();
    let send_result = workflow.send(template.as_ref(), args.send_test_copy).await;

    // The history entry carries the outcome either way; report it before
    // propagating any failure.
    if let Some(entry) = workflow.recent_uploads().first() {
        let status = match entry.status {
            UploadStatus::Complete => "complete",
            UploadStatus::Error => "error",
            UploadStatus::Processing => "processing",
        };
        println!(
            "Status: {} - {}",
            status,
            entry.message.as_deref().unwrap_or("no details")
        );
    }

    send_result?;
    Ok(())
}
