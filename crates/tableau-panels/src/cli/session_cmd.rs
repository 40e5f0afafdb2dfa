//! CLI handler for `tableau-panels session`.

use crate::acquisition::http_client::HttpClient;
use crate::cli::output::Output;
use crate::config::ScrapeConfig;
use crate::session::acquire_session;
use anyhow::Result;

/// Acquire a session token and print it.
pub async fn run(config: &ScrapeConfig, out: Output) -> Result<()> {
    let client = HttpClient::new(config)?;
    out.note(&format!("Fetching {}", config.dashboard_url()));

    let token = acquire_session(&client, config).await?;

    if out.json {
        out.print_json(&serde_json::json!({ "session": token }));
    } else {
        println!("{token}");
    }
    Ok(())
}
