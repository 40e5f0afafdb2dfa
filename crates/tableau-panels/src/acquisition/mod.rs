//! HTTP acquisition layer.
//!
//! Fetches raw dashboard HTML and vizql responses, and provides the
//! marker-based text extraction the session and resolver stages share.

pub mod http_client;
pub mod markers;
