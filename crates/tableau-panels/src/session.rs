//! Session acquisition.
//!
//! The embed page inlines its bootstrap config as HTML-escaped JSON inside
//! a `<textarea>`. The session id sits in that blob as
//! `sessionid&quot;&#x3a;&quot;<TOKEN>&quot;,&quot;sessionIdHash...`.

use crate::acquisition::http_client::HttpClient;
use crate::acquisition::markers::{after_marker, unescape_entities};
use crate::config::ScrapeConfig;
use crate::error::{PanelError, PanelResult};
use serde::Serialize;
use std::fmt;

/// Key that introduces the token.
pub const SESSION_ID_MARKER: &str = "sessionid";

/// Separators accepted between [`SESSION_ID_MARKER`] and the token. The
/// first is what the server emits today; with it the token starts
/// [`SESSION_ID_OFFSET`] bytes after the marker's first byte.
pub const SESSION_ID_SEPARATORS: &[&str] = &["&quot;&#x3a;&quot;", "&quot;:&quot;"];

/// Length of `sessionid&quot;&#x3a;&quot;`.
pub const SESSION_ID_OFFSET: usize = 27;

/// Key that follows the token and terminates it.
pub const SESSION_ID_HASH_MARKER: &str = "sessionIdHash";

/// Opaque identifier binding vizql requests to a server-side session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Pull the session token out of the embed page HTML.
pub fn extract_session_token(html: &str) -> PanelResult<SessionToken> {
    let start = after_marker(html, SESSION_ID_MARKER, SESSION_ID_SEPARATORS).ok_or_else(|| {
        PanelError::MalformedResponse(format!("`{SESSION_ID_MARKER}` marker not found"))
    })?;

    let len = html[start..].find(SESSION_ID_HASH_MARKER).ok_or_else(|| {
        PanelError::MalformedResponse(format!(
            "`{SESSION_ID_HASH_MARKER}` marker not found after `{SESSION_ID_MARKER}`"
        ))
    })?;

    let mut token = unescape_entities(&html[start..start + len]);
    // Drop the `,` that separated the value from the next key.
    token.pop();

    if token.is_empty() {
        return Err(PanelError::MalformedResponse(
            "empty session token between markers".to_string(),
        ));
    }

    Ok(SessionToken(token))
}

/// Fetch the dashboard embed page and extract its session token.
pub async fn acquire_session(client: &HttpClient, config: &ScrapeConfig) -> PanelResult<SessionToken> {
    let html = client
        .get(&config.dashboard_url())
        .await?
        .into_success_body()?;

    let token = extract_session_token(&html)?;
    tracing::info!("acquired session token ({} chars)", token.as_str().len());
    Ok(token)
}
