// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Reduction of raw query text into a [`CacheInfo`].
//!
//! Each of the four fields is parsed independently. A failing parser never
//! stops the others: its error is recorded in an [`ErrorAccumulator`] and
//! the field is treated as absent. The accumulated error only surfaces when
//! no field produced a usable value.
//!
//! ```text
//!  text ──► L4 parser ──┐
//!       ├─► L3 parser ──┤  × multiplier   ┌─ has values ──► Ok(Some(info))
//!       ├─► L2 parser ──┼────────────────►├─ errors ──────► Err(AggregatedParse)
//!       └─► L2/core  ───┘                 └─ neither ─────► Ok(None)
//! ```

use crate::{CacheInfo, ProbeError};

/// Parses one field out of the query text.
///
/// `Ok(None)` means "not present"; an error means the field could not be
/// determined and is recorded for the aggregate.
pub type FieldParser = fn(&str) -> Result<Option<u64>, ProbeError>;

/// The four field parsers of a probe plan.
#[derive(Clone, Copy)]
pub struct FieldParsers {
    pub l4: FieldParser,
    pub l3: FieldParser,
    pub l2_system_reported: FieldParser,
    pub l2_per_core_estimate: FieldParser,
}

/// Collects errors from independent sub-operations: the first one recorded
/// is the primary cause, every later one is kept as suppressed.
#[derive(Debug, Default)]
pub struct ErrorAccumulator {
    primary: Option<ProbeError>,
    suppressed: Vec<ProbeError>,
}

impl ErrorAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error.
    pub fn record(&mut self, error: ProbeError) {
        if self.primary.is_none() {
            self.primary = Some(error);
        } else {
            self.suppressed.push(error);
        }
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
    }

    /// Number of recorded errors.
    pub fn len(&self) -> usize {
        self.primary.iter().count() + self.suppressed.len()
    }

    /// Converts the recorded errors into a single
    /// [`ProbeError::AggregatedParse`], or `None` if nothing was recorded.
    pub fn into_error(self) -> Option<ProbeError> {
        let primary = self.primary?;
        Some(ProbeError::AggregatedParse {
            primary: Box::new(primary),
            suppressed: self.suppressed,
        })
    }
}

/// Reduces query output into a [`CacheInfo`].
///
/// - Absent or blank `text` yields `Ok(None)` without running any parser.
/// - Values of zero are absent; others are multiplied by `multiplier`.
/// - Partial success wins: if [`CacheInfo::has_some_values`] holds, field
///   errors are discarded.
/// - Otherwise any recorded error is returned as
///   [`ProbeError::AggregatedParse`], and with no errors the result is
///   `Ok(None)`.
pub fn reduce(
    text: Option<&str>,
    parsers: &FieldParsers,
    multiplier: u64,
) -> Result<Option<CacheInfo>, ProbeError> {
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return Ok(None);
    };

    let mut errors = ErrorAccumulator::new();
    let info = CacheInfo::new(
        evaluate(parsers.l4, text, multiplier, &mut errors),
        evaluate(parsers.l3, text, multiplier, &mut errors),
        evaluate(parsers.l2_system_reported, text, multiplier, &mut errors),
        evaluate(parsers.l2_per_core_estimate, text, multiplier, &mut errors),
    );

    if info.has_some_values() {
        if !errors.is_empty() {
            tracing::debug!("discarding {} field error(s) after partial success", errors.len());
        }
        return Ok(Some(info));
    }
    match errors.into_error() {
        Some(err) => Err(err),
        None => Ok(None),
    }
}

fn evaluate(
    parser: FieldParser,
    text: &str,
    multiplier: u64,
    errors: &mut ErrorAccumulator,
) -> Option<u64> {
    match parser(text) {
        Ok(Some(value)) if value > 0 => match value.checked_mul(multiplier) {
            Some(bytes) => Some(bytes),
            None => {
                errors.record(ProbeError::Overflow { value, multiplier });
                None
            }
        },
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("field parser failed: {e}");
            errors.record(e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn absent(_: &str) -> Result<Option<u64>, ProbeError> {
        Ok(None)
    }

    fn zero(_: &str) -> Result<Option<u64>, ProbeError> {
        Ok(Some(0))
    }

    fn seven(_: &str) -> Result<Option<u64>, ProbeError> {
        Ok(Some(7))
    }

    fn huge(_: &str) -> Result<Option<u64>, ProbeError> {
        Ok(Some(u64::MAX))
    }

    fn missing(_: &str) -> Result<Option<u64>, ProbeError> {
        Err(ProbeError::MissingField { label: "L2CacheSize" })
    }

    fn div_zero(_: &str) -> Result<Option<u64>, ProbeError> {
        Err(ProbeError::DivisionByZero { label: "NumberOfCores" })
    }

    fn parsers(
        l4: FieldParser,
        l3: FieldParser,
        l2: FieldParser,
        l2_core: FieldParser,
    ) -> FieldParsers {
        FieldParsers {
            l4,
            l3,
            l2_system_reported: l2,
            l2_per_core_estimate: l2_core,
        }
    }

    #[test]
    fn test_accumulator_first_error_is_primary() {
        let mut acc = ErrorAccumulator::new();
        assert!(acc.is_empty());
        acc.record(ProbeError::MissingField { label: "a" });
        acc.record(ProbeError::MissingField { label: "b" });
        acc.record(ProbeError::MissingField { label: "c" });
        assert_eq!(acc.len(), 3);

        match acc.into_error() {
            Some(ProbeError::AggregatedParse {
                primary,
                suppressed,
            }) => {
                assert!(matches!(*primary, ProbeError::MissingField { label: "a" }));
                assert_eq!(suppressed.len(), 2);
                assert!(matches!(suppressed[1], ProbeError::MissingField { label: "c" }));
            }
            other => panic!("expected aggregated error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_accumulator_has_no_error() {
        assert!(ErrorAccumulator::new().into_error().is_none());
    }

    #[test]
    fn test_absent_text_is_no_value() {
        let p = parsers(missing, missing, missing, missing);
        assert!(reduce(None, &p, 1).unwrap().is_none());
    }

    #[test]
    fn test_blank_text_is_no_value() {
        let p = parsers(missing, missing, missing, missing);
        assert!(reduce(Some(""), &p, 1).unwrap().is_none());
        assert!(reduce(Some(" \r\n\n"), &p, 1).unwrap().is_none());
    }

    #[test]
    fn test_zero_normalises_to_absent() {
        let p = parsers(zero, zero, seven, zero);
        let info = reduce(Some("x"), &p, 1024).unwrap().unwrap();
        assert_eq!(info.l4_bytes(), None);
        assert_eq!(info.l3_bytes(), None);
        assert_eq!(info.l2_system_reported_bytes(), Some(7 * 1024));
        assert_eq!(info.l2_per_core_estimate_bytes(), None);
    }

    #[test]
    fn test_all_zero_is_no_value() {
        let p = parsers(zero, zero, zero, zero);
        assert!(reduce(Some("x"), &p, 1).unwrap().is_none());
    }

    #[test]
    fn test_all_parsers_fail_aggregates() {
        let p = parsers(missing, div_zero, missing, div_zero);
        let err = reduce(Some("x"), &p, 1).unwrap_err();
        match err {
            ProbeError::AggregatedParse {
                primary,
                suppressed,
            } => {
                assert!(matches!(*primary, ProbeError::MissingField { .. }));
                assert_eq!(suppressed.len(), 3);
            }
            other => panic!("expected aggregated error, got {other:?}"),
        }
    }

    #[test]
    fn test_partial_success_discards_errors() {
        let p = parsers(missing, seven, missing, div_zero);
        let info = reduce(Some("x"), &p, 1).unwrap().unwrap();
        assert_eq!(info.l3_bytes(), Some(7));
        assert_eq!(info.l2_system_reported_bytes(), None);
    }

    #[test]
    fn test_only_per_core_estimate_with_errors_fails() {
        let p = parsers(missing, absent, absent, seven);
        assert!(matches!(
            reduce(Some("x"), &p, 1),
            Err(ProbeError::AggregatedParse { .. })
        ));
    }

    #[test]
    fn test_only_per_core_estimate_without_errors_is_no_value() {
        let p = parsers(absent, absent, absent, seven);
        assert!(reduce(Some("x"), &p, 1).unwrap().is_none());
    }

    #[test]
    fn test_overflow_is_recorded() {
        let p = parsers(absent, huge, absent, absent);
        let err = reduce(Some("x"), &p, 1024).unwrap_err();
        assert!(err
            .causes()
            .any(|e| matches!(e, ProbeError::Overflow { multiplier: 1024, .. })));
    }
}
