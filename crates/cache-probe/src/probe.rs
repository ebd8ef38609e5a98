// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Probe entry points.
//!
//! - [`cached()`]: computed once per process, never fails, only present or
//!   absent. This is what most callers want.
//! - [`get_cache()`] / [`CacheProbe::query`]: a fresh read that surfaces
//!   every error, for diagnostics.

use crate::aggregate::reduce;
use crate::{CacheInfo, Platform, ProbeConfig, ProbeError, ProcessRunner, SystemRunner};
use std::sync::OnceLock;

/// A configured cache probe.
#[derive(Debug, Clone)]
pub struct CacheProbe<R = SystemRunner> {
    os_name: String,
    config: ProbeConfig,
    runner: R,
}

impl CacheProbe<SystemRunner> {
    /// Probe for the host OS with default configuration.
    pub fn new() -> Self {
        Self::from_config(ProbeConfig::default())
    }

    /// Probe for the host OS (or the configured override).
    pub fn from_config(config: ProbeConfig) -> Self {
        Self {
            os_name: config.resolve_os_name(),
            config,
            runner: SystemRunner,
        }
    }
}

impl Default for CacheProbe<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ProcessRunner> CacheProbe<R> {
    /// Probe with an explicit OS name and process runner.
    pub fn with_runner(os_name: impl Into<String>, runner: R) -> Self {
        Self {
            os_name: os_name.into(),
            config: ProbeConfig::default(),
            runner,
        }
    }

    /// Replaces the configuration. The OS name is kept unless the new
    /// configuration overrides it.
    pub fn config(mut self, config: ProbeConfig) -> Self {
        if let Some(name) = &config.os_name {
            self.os_name = name.clone();
        }
        self.config = config;
        self
    }

    /// The OS name this probe classifies.
    pub fn os_name(&self) -> &str {
        &self.os_name
    }

    /// Classifies the OS name.
    pub fn platform(&self) -> Result<Platform, ProbeError> {
        Platform::classify(&self.os_name)
    }

    /// Runs the full pipeline: classify, query, reduce.
    ///
    /// Returns `Ok(None)` when the query produced no usable text or no field
    /// matched, without any underlying error.
    pub fn query(&self) -> Result<Option<CacheInfo>, ProbeError> {
        let platform = self.platform()?;
        tracing::debug!("probing cache on '{}' as {platform}", self.os_name);

        let plan = platform.plan(&self.config);
        let text = plan.query(&self.runner)?;
        let info = reduce(Some(text.as_str()), &plan.parsers, plan.multiplier)?;

        match &info {
            Some(info) => tracing::debug!("{info}"),
            None => tracing::debug!("query returned no cache information"),
        }
        Ok(info)
    }
}

/// Queries the host's cache hierarchy now, surfacing every error.
pub fn get_cache() -> Result<Option<CacheInfo>, ProbeError> {
    CacheProbe::new().query()
}

/// The host's cache hierarchy, probed once per process.
///
/// Any error from the probe is logged and turned into `None`.
pub fn cached() -> Option<CacheInfo> {
    static CACHE: OnceLock<Option<CacheInfo>> = OnceLock::new();
    *CACHE.get_or_init(|| swallow(get_cache()))
}

fn swallow(result: Result<Option<CacheInfo>, ProbeError>) -> Option<CacheInfo> {
    result.unwrap_or_else(|e| {
        tracing::warn!("cache probe failed: {e}");
        None
    })
}
