// Copyright 2026 Tableau Panels Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tableau panels library: resolve chart image URLs from the Georgia Tech
//! COVID-19 Tableau dashboard.
//!
//! The pipeline acquires a vizql session from the dashboard embed page,
//! then asks two session-scoped endpoints for the dashboard layout and
//! maps each tracked worksheet to its rendered PNG.

pub mod acquisition;
pub mod cli;
pub mod config;
pub mod error;
pub mod panels;
pub mod report;
pub mod resolver;
pub mod session;
pub mod zones;

pub use config::ScrapeConfig;
pub use error::{PanelError, PanelResult};
pub use panels::{short_key, PanelMap, PANEL_NAMES};
pub use report::{scrape, Resolution, ScrapeReport};
pub use resolver::{resolve_bootstrap_panels, resolve_layout_panels, strip_bootstrap_body};
pub use session::{acquire_session, extract_session_token, SessionToken};
pub use zones::extract_panel_urls;
