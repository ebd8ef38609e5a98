// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `cache-probe platform` command: show OS classification.

use cache_probe::{CacheProbe, ProbeConfig};

pub async fn execute(config: ProbeConfig) -> anyhow::Result<()> {
    let probe = CacheProbe::from_config(config);
    println!("  OS name:   {}", probe.os_name());
    match probe.platform() {
        Ok(platform) => {
            let plan = platform.plan(&ProbeConfig::default());
            println!("  Platform:  {platform}");
            println!("  Unit:      x{} to bytes", plan.multiplier);
        }
        Err(e) => println!("  Platform:  {e}"),
    }
    Ok(())
}
