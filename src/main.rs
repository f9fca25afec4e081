//! promplot - interactive terminal plotter for Prometheus range queries.
//!
//! # Usage
//!
//! ```bash
//! promplot                             # query a local Prometheus
//! promplot --prom http://prom:9090     # query a remote one
//! ```
//!
//! Each query typed at the prompt is graphed live over the last 15 minutes
//! and refreshed every 15 seconds; `q` closes the view and returns to the
//! prompt, `exit` (or Ctrl-D) leaves the program.

mod client;
mod prompt;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use client::PromClient;

/// Plot Prometheus range queries live in the terminal.
#[derive(Parser)]
#[command(name = "promplot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Prometheus address
    #[arg(long = "prom", default_value = "http://127.0.0.1:9090")]
    prom: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Built once, lent to every view session.
    let client = PromClient::new(&cli.prom)
        .with_context(|| format!("cannot use '{}' as a Prometheus address", cli.prom))?;

    let mut prompt = prompt::from_stdin()?;
    loop {
        let Some(query) = prompt.next_query()? else {
            break;
        };
        if query.is_empty() {
            continue;
        }

        // A failed view session is recoverable: report it and prompt again
        // instead of tearing the whole process down.
        if let Err(err) = tui::run(&client, &query) {
            eprintln!("{} {err:#}", "error:".red().bold());
        }
    }

    Ok(())
}
