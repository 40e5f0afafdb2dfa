//! Combined scrape: one session, both resolvers, one report.

use crate::acquisition::http_client::HttpClient;
use crate::config::ScrapeConfig;
use crate::error::PanelResult;
use crate::panels::PanelMap;
use crate::resolver::{resolve_bootstrap_panels, resolve_layout_panels};
use crate::session::{acquire_session, SessionToken};
use serde::Serialize;
use std::fmt::Write as _;

/// How the two resolvers are scheduled once a token is in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    /// Issue both resolver requests at once.
    #[default]
    Concurrent,
    /// Bootstrap first, then layout refresh.
    Sequential,
}

/// Results of a full scrape. Field order is the presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeReport {
    pub session: SessionToken,
    pub bootstrap: PanelMap,
    pub layout: PanelMap,
}

/// Acquire a session and run both resolvers against it.
///
/// Any failure aborts the whole scrape; no partial report is returned.
pub async fn scrape(
    client: &HttpClient,
    config: &ScrapeConfig,
    resolution: Resolution,
) -> PanelResult<ScrapeReport> {
    let session = acquire_session(client, config).await?;

    let (bootstrap, layout) = match resolution {
        Resolution::Concurrent => tokio::try_join!(
            resolve_bootstrap_panels(client, config, &session),
            resolve_layout_panels(client, config, &session),
        )?,
        Resolution::Sequential => {
            let bootstrap = resolve_bootstrap_panels(client, config, &session).await?;
            let layout = resolve_layout_panels(client, config, &session).await?;
            (bootstrap, layout)
        }
    };

    Ok(ScrapeReport {
        session,
        bootstrap,
        layout,
    })
}

/// Render one panel map as aligned `key  url` lines under a heading.
pub fn render_panels(title: &str, panels: &PanelMap) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title} ({} panels)", panels.len());
    if panels.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }

    let width = panels.keys().map(|k| k.len()).max().unwrap_or(0);
    for (key, url) in panels {
        let _ = writeln!(out, "  {key:<width$}  {url}");
    }
    out
}

impl ScrapeReport {
    /// Human-readable rendering: session, then bootstrap, then layout.
    pub fn render_text(&self) -> String {
        format!(
            "session: {}\n\n{}\n{}",
            self.session,
            render_panels("bootstrap", &self.bootstrap),
            render_panels("layout refresh", &self.layout),
        )
    }
}
