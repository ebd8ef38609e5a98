// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The probed cache hierarchy.
//!
//! Every level is optional: a platform may expose only some of them, and a
//! value of zero is never stored (it is normalised to "absent").

use std::fmt;

/// Cache sizes of the host CPU, all in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "RawCacheInfo")]
pub struct CacheInfo {
    l4_bytes: Option<u64>,
    l3_bytes: Option<u64>,
    l2_system_reported_bytes: Option<u64>,
    l2_per_core_estimate_bytes: Option<u64>,
}

impl CacheInfo {
    /// Builds a record from four independently obtained values.
    ///
    /// `Some(0)` is stored as `None`.
    pub fn new(
        l4_bytes: Option<u64>,
        l3_bytes: Option<u64>,
        l2_system_reported_bytes: Option<u64>,
        l2_per_core_estimate_bytes: Option<u64>,
    ) -> Self {
        Self {
            l4_bytes: positive(l4_bytes),
            l3_bytes: positive(l3_bytes),
            l2_system_reported_bytes: positive(l2_system_reported_bytes),
            l2_per_core_estimate_bytes: positive(l2_per_core_estimate_bytes),
        }
    }

    /// L4 cache size, if the platform exposes one.
    pub fn l4_bytes(&self) -> Option<u64> {
        self.l4_bytes
    }

    /// L3 cache size.
    pub fn l3_bytes(&self) -> Option<u64> {
        self.l3_bytes
    }

    /// L2 cache size exactly as the OS reports it. On some platforms this
    /// is the total across all cores.
    pub fn l2_system_reported_bytes(&self) -> Option<u64> {
        self.l2_system_reported_bytes
    }

    /// L2 cache size per core. Equal to [`l2_system_reported_bytes`] where
    /// the OS already reports a per-core figure.
    ///
    /// [`l2_system_reported_bytes`]: CacheInfo::l2_system_reported_bytes
    pub fn l2_per_core_estimate_bytes(&self) -> Option<u64> {
        self.l2_per_core_estimate_bytes
    }

    /// Returns `true` if L4, L3 or the system-reported L2 is present.
    ///
    /// The per-core L2 estimate is not considered. A record holding only the
    /// estimate counts as empty, and a probe producing one is reported as
    /// "no value".
    pub fn has_some_values(&self) -> bool {
        self.l4_bytes.is_some() || self.l3_bytes.is_some() || self.l2_system_reported_bytes.is_some()
    }

    /// Returns a one-line summary suitable for logging or CLI display.
    ///
    /// # Example output
    /// ```text
    /// Cache: L4 -, L3 32 MiB, L2 1 MiB (per core 1 MiB)
    /// ```
    pub fn summary(&self) -> String {
        format!(
            "Cache: L4 {}, L3 {}, L2 {} (per core {})",
            format_size(self.l4_bytes),
            format_size(self.l3_bytes),
            format_size(self.l2_system_reported_bytes),
            format_size(self.l2_per_core_estimate_bytes),
        )
    }
}

impl fmt::Display for CacheInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Deserialisation goes through [`CacheInfo::new`] so zeros are dropped.
#[derive(serde::Deserialize)]
struct RawCacheInfo {
    l4_bytes: Option<u64>,
    l3_bytes: Option<u64>,
    l2_system_reported_bytes: Option<u64>,
    l2_per_core_estimate_bytes: Option<u64>,
}

impl From<RawCacheInfo> for CacheInfo {
    fn from(raw: RawCacheInfo) -> Self {
        Self::new(
            raw.l4_bytes,
            raw.l3_bytes,
            raw.l2_system_reported_bytes,
            raw.l2_per_core_estimate_bytes,
        )
    }
}

fn positive(value: Option<u64>) -> Option<u64> {
    value.filter(|&v| v > 0)
}

/// Formats a byte count with the largest binary unit that divides it evenly.
fn format_size(bytes: Option<u64>) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    match bytes {
        None => "-".to_string(),
        Some(b) if b % MIB == 0 => format!("{} MiB", b / MIB),
        Some(b) if b % KIB == 0 => format!("{} KiB", b / KIB),
        Some(b) => format!("{b} B"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_absent() {
        let info = CacheInfo::new(Some(0), Some(0), Some(0), Some(0));
        assert_eq!(info, CacheInfo::default());
        assert!(!info.has_some_values());
    }

    #[test]
    fn test_accessors() {
        let info = CacheInfo::new(None, Some(32768), Some(1_048_576), Some(262_144));
        assert_eq!(info.l4_bytes(), None);
        assert_eq!(info.l3_bytes(), Some(32768));
        assert_eq!(info.l2_system_reported_bytes(), Some(1_048_576));
        assert_eq!(info.l2_per_core_estimate_bytes(), Some(262_144));
    }

    #[test]
    fn test_has_some_values_ignores_per_core_estimate() {
        let only_estimate = CacheInfo::new(None, None, None, Some(65536));
        assert!(!only_estimate.has_some_values());
    }

    #[test]
    fn test_has_some_values_any_level() {
        assert!(CacheInfo::new(Some(1), None, None, None).has_some_values());
        assert!(CacheInfo::new(None, Some(1), None, None).has_some_values());
        assert!(CacheInfo::new(None, None, Some(1), None).has_some_values());
    }

    #[test]
    fn test_summary_format() {
        let info = CacheInfo::new(None, Some(32 * 1024 * 1024), Some(1_048_576), Some(1536));
        assert_eq!(
            info.summary(),
            "Cache: L4 -, L3 32 MiB, L2 1 MiB (per core 1536 B)"
        );
        assert_eq!(info.to_string(), info.summary());
    }

    #[test]
    fn test_deserialize_drops_zero() {
        let json = r#"{"l4_bytes":0,"l3_bytes":33554432,"l2_system_reported_bytes":null,"l2_per_core_estimate_bytes":null}"#;
        let info: CacheInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.l4_bytes(), None);
        assert_eq!(info.l3_bytes(), Some(33_554_432));
    }

    #[test]
    fn test_format_size_kib() {
        assert_eq!(format_size(Some(65536)), "64 KiB");
        assert_eq!(format_size(Some(1000)), "1000 B");
    }
}
