//! mailgauge - CLI entry point
//!
//! Runs one mailbox summary and prints the report as JSON. Connection
//! parameters come from the environment so the secret never appears in
//! the process list:
//!
//! ```text
//! MAILGAUGE_IMAP_HOST, MAILGAUGE_IMAP_PORT (default 993),
//! MAILGAUGE_IMAP_USER, MAILGAUGE_IMAP_PASSWORD
//! ```
//!
//! The reference date is the first argument (`YYYY-MM-DD`), defaulting
//! to today.

use anyhow::{Context, Result};
use chrono::Utc;

use mailgauge::config::Settings;
use mailgauge::domain::{MailboxCredentials, SummaryRequest};
use mailgauge::providers::ImapSearchClient;
use mailgauge::SummaryService;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("summary failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let settings = match Settings::default_path() {
        Some(path) => Settings::load(&path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let request = build_request(&settings)?;

    let service = SummaryService::with_classifier(
        ImapSearchClient::new(),
        settings.classifier.build(),
    );

    let report = service.run(&request).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn build_request(settings: &Settings) -> Result<SummaryRequest> {
    let host = std::env::var("MAILGAUGE_IMAP_HOST").context("MAILGAUGE_IMAP_HOST not set")?;
    let port = match std::env::var("MAILGAUGE_IMAP_PORT") {
        Ok(port) => port.parse().context("MAILGAUGE_IMAP_PORT is not a port")?,
        Err(_) => 993,
    };
    let username = std::env::var("MAILGAUGE_IMAP_USER").context("MAILGAUGE_IMAP_USER not set")?;
    let password =
        std::env::var("MAILGAUGE_IMAP_PASSWORD").context("MAILGAUGE_IMAP_PASSWORD not set")?;

    let reference_date = std::env::args()
        .nth(1)
        .unwrap_or_else(|| Utc::now().date_naive().format("%Y-%m-%d").to_string());

    Ok(SummaryRequest {
        reference_date,
        credentials: MailboxCredentials::new(host, port, username, password),
        whitelist: settings.lists.whitelist.clone(),
        blacklist: settings.lists.blacklist.clone(),
    })
}
