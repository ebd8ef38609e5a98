// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # cache-probe
//!
//! Determines the CPU cache hierarchy (L2, L3, L4) of the host by running
//! the OS's own introspection command and parsing its text output.
//!
//! # Platforms
//! - **Windows**: `wmic cpu get ...`, values in KiB. L2 is reported for
//!   the whole package, so a per-core estimate is derived from
//!   `NumberOfCores`.
//! - **Linux / Unix**: `getconf -a`, values in bytes, L2 already per core.
//! - **macOS / Solaris**: recognised, rejected with
//!   [`ProbeError::UnsupportedPlatform`].
//!
//! # Graceful Degradation
//! The probe is best-effort. Each cache level is parsed independently; a
//! partial result is a success. An error is only reported when no level
//! could be determined at all, and [`cached()`] hides even that behind
//! `None`.
//!
//! # Example
//! ```no_run
//! if let Some(info) = cache_probe::cached() {
//!     println!("{}", info.summary());
//! }
//!
//! // Fresh read with errors visible:
//! match cache_probe::get_cache() {
//!     Ok(Some(info)) => println!("L3: {:?}", info.l3_bytes()),
//!     Ok(None) => println!("no cache information"),
//!     Err(e) => eprintln!("probe failed: {e}"),
//! }
//! ```

pub mod aggregate;
mod config;
mod error;
pub mod extract;
mod info;
mod os;
mod platform;
mod probe;
mod process;

pub use config::{ProbeConfig, WindowsConfig};
pub use error::{ProbeError, ProcessError};
pub use info::CacheInfo;
pub use os::host_os_name;
pub use platform::{Platform, ProbePlan};
pub use probe::{cached, get_cache, CacheProbe};
pub use process::{ProcessRunner, SystemRunner};
