use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use portal_api_client::PortalClient;
use portal_core::models::format_size;
use portal_workflow::Workflow;

#[derive(Parser, Debug)]
#[command(name = "preview_email")]
#[command(about = "Generate an email preview for a CSV file without sending anything")]
struct Args {
    /// Path to the CSV file
    file: PathBuf,

    /// Row index forwarded to the backend
    #[arg(long, value_name = "N")]
    row_index: Option<u32>,

    /// Write the rendered HTML to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
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
    println!("Selected {} ({})", name, format_size(size));

    workflow.request_preview(args.row_index).await?;

    let preview = workflow.preview().context("Preview missing after request")?;
    let metrics = &preview.metrics;
    println!("Total tasks: {}", metrics.total);
    println!(
        "Completed:   {} ({:.2}%)",
        metrics.completed, metrics.completion_rate
    );
    println!("Pending:     {}", metrics.pending);
    println!("Past due:    {}", metrics.past_due);

    match args.out {
        Some(path) => {
            std::fs::write(&path, &preview.content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Preview written to {}", path.display());
        }
        None => println!("{}", preview.content),
    }

    Ok(())
}
