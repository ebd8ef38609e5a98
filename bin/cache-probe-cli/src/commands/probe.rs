// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `cache-probe probe` command: fresh query with errors reported.
//!
//! Unlike `cached`, a failure here (unsupported OS, a failing `wmic` or
//! `getconf`, unparseable output) is printed with all of its causes and
//! the process exits non-zero.

use cache_probe::{CacheProbe, ProbeConfig, ProbeError};

pub async fn execute(config: ProbeConfig, json: bool) -> anyhow::Result<()> {
    let probe = CacheProbe::from_config(config);
    let os_name = probe.os_name().to_string();

    let result = tokio::task::spawn_blocking(move || probe.query()).await?;
    match result {
        Ok(info) => super::print_info(info.as_ref(), json),
        Err(e) => {
            report(&e);
            Err(anyhow::anyhow!("cache probe failed on '{os_name}': {e}"))
        }
    }
}

/// Prints every cause of an aggregated error on its own line.
fn report(error: &ProbeError) {
    if let ProbeError::AggregatedParse { .. } = error {
        for (i, cause) in error.causes().enumerate() {
            let role = if i == 0 { "primary" } else { "suppressed" };
            eprintln!("  {role}: {cause}");
        }
    }
}
