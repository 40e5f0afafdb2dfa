//! CLI handlers for `bootstrap`, `layout` and `all`.

use crate::acquisition::http_client::HttpClient;
use crate::cli::output::Output;
use crate::config::ScrapeConfig;
use crate::report::{render_panels, scrape, Resolution};
use crate::resolver::{resolve_bootstrap_panels, resolve_layout_panels};
use crate::session::acquire_session;
use anyhow::{Context, Result};

/// Which single resolver a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Bootstrap,
    Layout,
}

impl Variant {
    fn title(self) -> &'static str {
        match self {
            Variant::Bootstrap => "bootstrap",
            Variant::Layout => "layout refresh",
        }
    }
}

/// Acquire a session, run one resolver, and print its panels.
pub async fn run_one(config: &ScrapeConfig, variant: Variant, out: Output) -> Result<()> {
    let client = HttpClient::new(config)?;

    out.note("Acquiring session...");
    let token = acquire_session(&client, config).await?;

    out.note(&format!("Resolving panels via {}...", variant.title()));
    let panels = match variant {
        Variant::Bootstrap => resolve_bootstrap_panels(&client, config, &token).await,
        Variant::Layout => resolve_layout_panels(&client, config, &token).await,
    }
    .with_context(|| format!("{} resolver failed", variant.title()))?;

    if out.json {
        out.print_json(&serde_json::json!({
            "session": token,
            "panels": panels,
        }));
    } else {
        print!("{}", render_panels(variant.title(), &panels));
    }
    Ok(())
}

/// Full scrape: session, bootstrap, then layout refresh.
pub async fn run_all(config: &ScrapeConfig, resolution: Resolution, out: Output) -> Result<()> {
    let client = HttpClient::new(config)?;

    out.note(&format!("Scraping {} ({resolution:?})...", config.origin));
    let report = scrape(&client, config, resolution).await?;

    if out.json {
        out.print_json(&report);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}
