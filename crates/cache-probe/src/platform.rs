// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! OS classification and per-platform probe plans.
//!
//! A [`ProbePlan`] bundles everything that differs between platforms: the
//! commands to run, the four field parsers, and the multiplier that turns
//! reported values into bytes.
//!
//! | Platform | Query                                  | Unit | L2 per core        |
//! |----------|----------------------------------------|------|--------------------|
//! | Windows  | `wmic cpu get ...` (+ optional L4)     | KiB  | L2 / NumberOfCores |
//! | Unix     | `getconf -a`                           | B    | same as L2         |
//!
//! macOS and Solaris are recognised but not implemented.

use crate::aggregate::FieldParsers;
use crate::extract::extract_field;
use crate::{ProbeConfig, ProbeError, ProcessRunner};

const WINDOWS_PRIMARY_QUERY: &[&str] = &[
    "cmd.exe",
    "/c",
    "wmic cpu get L3CacheSize, L2CacheSize, NumberOfCores /format:list",
];
const WINDOWS_L4_QUERY: &[&str] = &["cmd.exe", "/c", "wmic cpu get L4CacheSize /format:list"];
const UNIX_QUERY: &[&str] = &["bash", "-c", "getconf -a"];

/// A platform the probe knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    /// Classifies an OS display name (case-insensitive).
    ///
    /// Checked in order: `darwin`, `win`, `nix`/`nux`, `mac`, `sunos`.
    pub fn classify(os_name: &str) -> Result<Self, ProbeError> {
        let os = os_name.to_lowercase();
        if os.contains("darwin") {
            Err(ProbeError::UnsupportedPlatform { platform: "mac os" })
        } else if os.contains("win") {
            Ok(Platform::Windows)
        } else if os.contains("nix") || os.contains("nux") {
            Ok(Platform::Unix)
        } else if os.contains("mac") {
            Err(ProbeError::UnsupportedPlatform { platform: "mac os" })
        } else if os.contains("sunos") {
            Err(ProbeError::UnsupportedPlatform { platform: "solaris" })
        } else {
            Err(ProbeError::UnrecognizedPlatform { os_name: os })
        }
    }

    /// Short name for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Unix => "unix",
        }
    }

    /// Builds the probe plan for this platform.
    pub fn plan(self, config: &ProbeConfig) -> ProbePlan {
        match self {
            Platform::Windows => ProbePlan {
                platform: self,
                parsers: FieldParsers {
                    l4: windows::l4,
                    l3: windows::l3,
                    l2_system_reported: windows::l2,
                    l2_per_core_estimate: windows::l2_per_core,
                },
                multiplier: 1024,
                query_l4: config.windows.query_l4,
            },
            Platform::Unix => ProbePlan {
                platform: self,
                parsers: FieldParsers {
                    l4: unix::l4,
                    l3: unix::l3,
                    l2_system_reported: unix::l2,
                    l2_per_core_estimate: unix::l2,
                },
                multiplier: 1,
                query_l4: false,
            },
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The platform-specific part of one probe execution.
#[derive(Clone, Copy)]
pub struct ProbePlan {
    pub platform: Platform,
    pub parsers: FieldParsers,
    /// Factor converting reported values to bytes.
    pub multiplier: u64,
    /// Whether to run the supplementary Windows L4 query.
    pub query_l4: bool,
}

impl ProbePlan {
    /// Runs the plan's introspection command(s) and returns the combined
    /// output.
    ///
    /// On Windows the supplementary L4 query may fail in any way (its exit
    /// code is never inspected); its output is then simply left out.
    pub fn query<R: ProcessRunner>(&self, runner: &R) -> Result<String, ProbeError> {
        match self.platform {
            Platform::Windows => {
                let mut out = runner.run(WINDOWS_PRIMARY_QUERY, false)?;
                if self.query_l4 {
                    match runner.run(WINDOWS_L4_QUERY, true) {
                        Ok(l4) => {
                            out.push_str("\n\n");
                            out.push_str(&l4);
                        }
                        Err(e) => tracing::debug!("L4 query failed, continuing without it: {e}"),
                    }
                }
                Ok(out)
            }
            Platform::Unix => Ok(runner.run(UNIX_QUERY, false)?),
        }
    }
}

mod windows {
    use super::*;

    const L4: &str = "L4CacheSize";
    const L3: &str = "L3CacheSize";
    const L2: &str = "L2CacheSize";
    const CORES: &str = "NumberOfCores";

    pub(super) fn l4(text: &str) -> Result<Option<u64>, ProbeError> {
        extract_field(text, L4)
    }

    pub(super) fn l3(text: &str) -> Result<Option<u64>, ProbeError> {
        extract_field(text, L3)
    }

    pub(super) fn l2(text: &str) -> Result<Option<u64>, ProbeError> {
        extract_field(text, L2)
    }

    /// `wmic` reports L2 for the whole package; apportion it per core.
    pub(super) fn l2_per_core(text: &str) -> Result<Option<u64>, ProbeError> {
        let l2 = extract_field(text, L2)?.ok_or(ProbeError::MissingField { label: L2 })?;
        let cores = extract_field(text, CORES)?.ok_or(ProbeError::MissingField { label: CORES })?;
        if cores == 0 {
            return Err(ProbeError::DivisionByZero { label: CORES });
        }
        Ok(Some(l2 / cores))
    }
}

mod unix {
    use super::*;

    pub(super) fn l4(text: &str) -> Result<Option<u64>, ProbeError> {
        extract_field(text, "LEVEL4_CACHE_SIZE")
    }

    pub(super) fn l3(text: &str) -> Result<Option<u64>, ProbeError> {
        extract_field(text, "LEVEL3_CACHE_SIZE")
    }

    pub(super) fn l2(text: &str) -> Result<Option<u64>, ProbeError> {
        extract_field(text, "LEVEL2_CACHE_SIZE")
    }
}
