// Copyright 2026 Tableau Panels Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use tableau_panels::cli::output::Output;
use tableau_panels::cli::resolve_cmd::{self, Variant};
use tableau_panels::cli::session_cmd;
use tableau_panels::{Resolution, ScrapeConfig};

#[derive(Parser)]
#[command(
    name = "tableau-panels",
    about = "Resolve chart image URLs from the Georgia Tech COVID-19 Tableau dashboard",
    version,
    after_help = "Run 'tableau-panels <command> --help' for details on each command.\nRun 'tableau-panels' with no command to resolve everything."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Tableau server origin (also TABLEAU_PANELS_ORIGIN)
    #[arg(long, global = true)]
    origin: Option<String>,

    /// Per-request timeout in milliseconds (also TABLEAU_PANELS_TIMEOUT_MS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Acquire and print a session token
    Session,
    /// Resolve panels through the bootstrap endpoint
    Bootstrap,
    /// Resolve panels through the layout refresh command
    Layout,
    /// Acquire a session and run both resolvers
    All {
        /// Run the resolvers one after the other instead of concurrently
        #[arg(long)]
        sequential: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let logs = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.json {
        logs.json().init();
    } else {
        logs.init();
    }

    let out = Output {
        json: cli.json,
        quiet: cli.quiet,
    };

    let result = run(cli, out).await;

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        out.print_error(e);
        std::process::exit(1);
    }

    result
}

async fn run(cli: Cli, out: Output) -> Result<()> {
    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "tableau-panels", &mut std::io::stdout());
        return Ok(());
    }

    let config = ScrapeConfig::resolve(cli.origin.as_deref(), cli.timeout)?;
    tracing::debug!(?config, "resolved configuration");

    match cli.command {
        Some(Commands::Session) => session_cmd::run(&config, out).await,
        Some(Commands::Bootstrap) => resolve_cmd::run_one(&config, Variant::Bootstrap, out).await,
        Some(Commands::Layout) => resolve_cmd::run_one(&config, Variant::Layout, out).await,
        Some(Commands::All { sequential }) => {
            let resolution = if sequential {
                Resolution::Sequential
            } else {
                Resolution::Concurrent
            };
            resolve_cmd::run_all(&config, resolution, out).await
        }
        None => resolve_cmd::run_all(&config, Resolution::default(), out).await,
        Some(Commands::Completions { .. }) => Ok(()),
    }
}
