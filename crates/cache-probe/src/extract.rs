// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Label-then-digits field extraction.
//!
//! Introspection tools print their values in different layouts:
//!
//! ```text
//! LEVEL2_CACHE_SIZE                  1048576      (getconf -a)
//! L2CacheSize=256                                 (wmic /format:list)
//! ```
//!
//! Both are matched by the same rule: the label, then one or more
//! non-digit characters, then a run of digits. The first match anywhere in
//! the text wins.

use crate::ProbeError;
use regex::Regex;

/// Extracts the integer that follows `label` in `text`.
///
/// Returns `Ok(None)` if the label does not occur (or is never followed by
/// digits). A digit run too large for `u64` is a [`ProbeError::InvalidNumber`].
pub fn extract_field(text: &str, label: &str) -> Result<Option<u64>, ProbeError> {
    let pattern = Regex::new(&format!(r"{}\D+(\d+)", regex::escape(label)))?;
    let Some(digits) = pattern.captures(text).and_then(|c| c.get(1)) else {
        return Ok(None);
    };
    digits
        .as_str()
        .parse::<u64>()
        .map(Some)
        .map_err(|source| ProbeError::InvalidNumber {
            label: label.to_string(),
            digits: digits.as_str().to_string(),
            source,
        })
}
