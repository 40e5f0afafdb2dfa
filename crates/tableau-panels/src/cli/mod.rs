//! CLI subcommand implementations for the `tableau-panels` binary.

pub mod output;
pub mod resolve_cmd;
pub mod session_cmd;
