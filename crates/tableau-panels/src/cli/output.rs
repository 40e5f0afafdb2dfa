//! Output mode shared by every subcommand.

use crate::error::PanelError;
use serde::Serialize;

/// Global output flags, parsed once in `main`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    /// Emit machine-readable JSON instead of text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl Output {
    pub fn print_json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("  Error: could not encode output: {e}"),
        }
    }

    /// Print a progress note to stderr unless quiet or in JSON mode.
    pub fn note(&self, msg: &str) {
        if !self.quiet && !self.json {
            eprintln!("  {msg}");
        }
    }

    /// Report a terminal error in the active output mode.
    pub fn print_error(&self, err: &anyhow::Error) {
        if self.json {
            let kind = err
                .downcast_ref::<PanelError>()
                .map(PanelError::kind)
                .unwrap_or("internal");
            self.print_json(&error_body(kind, &format!("{err:#}")));
        } else if !self.quiet {
            eprintln!("  Error: {err:#}");
        }
    }
}

/// JSON object printed for a failed run.
pub fn error_body(kind: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "error": true,
        "kind": kind,
        "message": message,
    })
}
