// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # cache-probe
//!
//! Command-line interface for the cache-probe library.
//!
//! ## Usage
//! ```bash
//! # Fresh query, errors visible
//! cache-probe probe --json
//!
//! # Process-wide cached value (never fails)
//! cache-probe cached
//!
//! # Show how the host OS is classified
//! cache-probe platform
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cache-probe",
    about = "Best-effort CPU cache hierarchy probe",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the cache hierarchy now and report any error.
    Probe {
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the cached cache hierarchy (computed once, errors hidden).
    Cached {
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the detected OS name and the platform it maps to.
    Platform,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Probe { json } => commands::probe::execute(config, json).await,
        Commands::Cached { json } => commands::cached::execute(json).await,
        Commands::Platform => commands::platform::execute(config).await,
    }
}
