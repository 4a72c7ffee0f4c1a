use anyhow::Result;
use clap::Parser;

use portal_api_client::PortalClient;
use portal_core::models::{EmailTemplate, TemplateField};

#[derive(Parser, Debug)]
#[command(name = "test_email")]
#[command(about = "Send a single test email with the given template")]
struct Args {
    /// Override the email subject
    #[arg(long)]
    subject: Option<String>,

    /// Override the intro paragraph
    #[arg(long)]
    intro: Option<String>,
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

    let mut template = EmailTemplate::default();
    if let Some(subject) = args.subject {
        template.set_field(TemplateField::Subject, subject);
    }
    if let Some(intro) = args.intro {
        template.set_field(TemplateField::Intro, intro);
    }

    let response = client.send_test(&template).await?;
    println!("{}", response.message);

    Ok(())
}
