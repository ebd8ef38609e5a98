// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared CLI plumbing.

pub mod cached;
pub mod platform;
pub mod probe;

use cache_probe::{CacheInfo, ProbeConfig};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Installs a `tracing` subscriber on stderr.
///
/// `RUST_LOG` wins if set; otherwise the level follows `-v` repetitions.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file if one was given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<ProbeConfig> {
    match path {
        Some(path) => {
            let config = ProbeConfig::from_file(path)?;
            tracing::info!("loaded configuration from '{}'", path.display());
            Ok(config)
        }
        None => Ok(ProbeConfig::default()),
    }
}

/// Prints a probe result either as JSON or as an aligned table.
pub fn print_info(info: Option<&CacheInfo>, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let Some(info) = info else {
        println!("no cache information available");
        return Ok(());
    };
    println!("  L4:             {}", format_bytes(info.l4_bytes()));
    println!("  L3:             {}", format_bytes(info.l3_bytes()));
    println!("  L2 (reported):  {}", format_bytes(info.l2_system_reported_bytes()));
    println!("  L2 (per core):  {}", format_bytes(info.l2_per_core_estimate_bytes()));
    Ok(())
}

fn format_bytes(bytes: Option<u64>) -> String {
    match bytes {
        Some(b) => format!("{b} bytes ({:.1} KiB)", b as f64 / 1024.0),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(None), "-");
        assert_eq!(format_bytes(Some(65536)), "65536 bytes (64.0 KiB)");
    }

    #[test]
    fn test_load_config_default() {
        let config = load_config(None).unwrap();
        assert_eq!(config, ProbeConfig::default());
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config(Some(Path::new("/nonexistent/cache-probe.toml"))).is_err());
    }
}
