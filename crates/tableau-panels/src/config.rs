//! Configuration loading and resolution.
//!
//! Every value has a compiled-in default matching the live dashboard. The
//! origin and timeout can be overridden, first by explicit arguments, then
//! by environment variables.

use crate::error::{PanelError, PanelResult};

/// Environment variable overriding the Tableau server origin.
pub const ORIGIN_ENV: &str = "TABLEAU_PANELS_ORIGIN";
/// Environment variable overriding the per-request timeout.
pub const TIMEOUT_ENV: &str = "TABLEAU_PANELS_TIMEOUT_MS";

pub const DEFAULT_ORIGIN: &str = "https://tableau.gatech.edu";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

const SITE: &str = "t/GT";
const WORKBOOK: &str = "GTCovid-19Tracking";
const VIEW: &str = "GeorgiaInstituteofTechnologyCovid-19Data";

/// Sheet identifier for the bootstrap form. The server expects it
/// double-encoded, so it is sent verbatim.
const BOOTSTRAP_FORM: &str =
    "sheet_id=Georgia%252520Institute%252520of%252520Technology%252520Covid-19%252520Data";

/// Dashboard display name requested by the layout refresh. The trailing
/// space is part of the name the server accepts.
const TARGET_SHEET: &str = "Georgia Institute of Technology Covid-19 Data ";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/85.0.4181.8 Safari/537.36";

const LOCALE_COOKIE: &str = "tableau_locale=en";

/// Endpoints, fixed payloads and request settings for one scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    /// Scheme and host, without a trailing slash.
    pub origin: String,
    pub bootstrap_form: String,
    pub target_sheet: String,
    pub user_agent: String,
    pub locale_cookie: String,
    pub timeout_ms: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            bootstrap_form: BOOTSTRAP_FORM.to_string(),
            target_sheet: TARGET_SHEET.to_string(),
            user_agent: USER_AGENT.to_string(),
            locale_cookie: LOCALE_COOKIE.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ScrapeConfig {
    /// Resolve the configuration from explicit overrides, then the process
    /// environment, then defaults.
    pub fn resolve(
        explicit_origin: Option<&str>,
        explicit_timeout: Option<u64>,
    ) -> PanelResult<Self> {
        Self::resolve_with(explicit_origin, explicit_timeout, |key| {
            std::env::var(key).ok()
        })
    }

    /// Same as [`ScrapeConfig::resolve`] with a pluggable environment lookup.
    pub fn resolve_with<F>(
        explicit_origin: Option<&str>,
        explicit_timeout: Option<u64>,
        env: F,
    ) -> PanelResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let origin = match explicit_origin {
            Some(o) => Some(o.to_string()),
            None => env(ORIGIN_ENV).filter(|v| !v.trim().is_empty()),
        };
        if let Some(origin) = origin {
            config = config.with_origin(&origin)?;
        }

        let timeout = match explicit_timeout {
            Some(t) => Some(t),
            None => match env(TIMEOUT_ENV) {
                Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                    PanelError::InvalidConfig(format!("{TIMEOUT_ENV}={raw:?} is not a number"))
                })?),
                None => None,
            },
        };
        if let Some(timeout_ms) = timeout {
            config = config.with_timeout_ms(timeout_ms)?;
        }

        Ok(config)
    }

    /// Replace the origin. Must be an absolute http(s) URL with no path.
    pub fn with_origin(mut self, origin: &str) -> PanelResult<Self> {
        let parsed = url::Url::parse(origin.trim())
            .map_err(|e| PanelError::InvalidConfig(format!("origin {origin:?}: {e}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PanelError::InvalidConfig(format!(
                "origin {origin:?}: scheme must be http or https"
            )));
        }
        if parsed.host_str().is_none() {
            return Err(PanelError::InvalidConfig(format!(
                "origin {origin:?}: missing host"
            )));
        }
        if parsed.path() != "/" || parsed.query().is_some() {
            return Err(PanelError::InvalidConfig(format!(
                "origin {origin:?}: must not carry a path or query"
            )));
        }

        // Url::origin drops the trailing slash and default ports.
        self.origin = parsed.origin().ascii_serialization();
        Ok(self)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> PanelResult<Self> {
        if timeout_ms == 0 {
            return Err(PanelError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        self.timeout_ms = timeout_ms;
        Ok(self)
    }

    /// Embed URL whose HTML carries the session token.
    pub fn dashboard_url(&self) -> String {
        format!("{}/{SITE}/views/{WORKBOOK}/{VIEW}?:embed=y", self.origin)
    }

    fn vizql_base(&self) -> String {
        format!("{}/vizql/{SITE}/w/{WORKBOOK}/v/{VIEW}", self.origin)
    }

    pub fn bootstrap_url(&self, token: &str) -> String {
        format!("{}/bootstrapSession/sessions/{token}", self.vizql_base())
    }

    pub fn layout_url(&self, token: &str) -> String {
        format!(
            "{}/sessions/{token}/commands/tabsrv/ensure-layout-for-sheet",
            self.vizql_base()
        )
    }
}
