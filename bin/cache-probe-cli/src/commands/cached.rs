// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `cache-probe cached` command: print the process-wide cached value.
//!
//! Uses the host OS and default settings; `--config` does not apply here.

pub async fn execute(json: bool) -> anyhow::Result<()> {
    let info = tokio::task::spawn_blocking(cache_probe::cached).await?;
    super::print_info(info.as_ref(), json)
}
