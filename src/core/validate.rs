//! CTQ and measurement validation
//!
//! Two separate concerns live here. Structural validity (ordered limits,
//! matching units, finite numbers) blocks creation. Process conformance
//! (whether a value lies within the limits) is derived on demand and never
//! rejects a record.

use serde::Serialize;

use crate::core::error::{TraceError, TraceResult};
use crate::entities::Ctq;

fn finite(field: &'static str, value: Option<f64>) -> TraceResult<()> {
    match value {
        Some(v) if !v.is_finite() => Err(TraceError::InvalidValue { field, value: v }),
        _ => Ok(()),
    }
}

fn ordered(low_name: &str, low: Option<f64>, high_name: &str, high: Option<f64>) -> TraceResult<()> {
    match (low, high) {
        (Some(l), Some(h)) if l > h => Err(TraceError::InvalidRange {
            message: format!("{} {} is greater than {} {}", low_name, l, high_name, h),
        }),
        _ => Ok(()),
    }
}

/// Check that the present limits and target satisfy lower <= target <= upper
pub fn validate_ctq(lower: Option<f64>, upper: Option<f64>, target: Option<f64>) -> TraceResult<()> {
    finite("lower_limit", lower)?;
    finite("upper_limit", upper)?;
    finite("target", target)?;

    ordered("lower limit", lower, "upper limit", upper)?;
    ordered("lower limit", lower, "target", target)?;
    ordered("target", target, "upper limit", upper)?;
    Ok(())
}

/// Check that a measurement is interpretable against its CTQ
///
/// Only the unit label and finiteness are checked; an out-of-range value
/// is a failed inspection, not an invalid record.
pub fn validate_measurement(value: f64, unit_label: &str, ctq: &Ctq) -> TraceResult<()> {
    finite("value", Some(value))?;
    if unit_label != ctq.measurement_unit {
        return Err(TraceError::UnitMismatch {
            expected: ctq.measurement_unit.clone(),
            actual: unit_label.to_string(),
        });
    }
    Ok(())
}

/// Derived inspection verdict for a value against CTQ limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Conformance {
    Pass,
    BelowLower,
    AboveUpper,
}

impl Conformance {
    pub fn is_pass(&self) -> bool {
        matches!(self, Conformance::Pass)
    }
}

impl std::fmt::Display for Conformance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Conformance::Pass => write!(f, "pass"),
            Conformance::BelowLower => write!(f, "below_lower"),
            Conformance::AboveUpper => write!(f, "above_upper"),
        }
    }
}

/// Compare a value against the CTQ's limits (inclusive on both ends)
pub fn conformance(value: f64, ctq: &Ctq) -> Conformance {
    if let Some(lower) = ctq.lower_limit {
        if value < lower {
            return Conformance::BelowLower;
        }
    }
    if let Some(upper) = ctq.upper_limit {
        if value > upper {
            return Conformance::AboveUpper;
        }
    }
    Conformance::Pass
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Draft;
    use crate::core::identity::{EntityId, EntityKind};
    use crate::entities::NewCtq;
    use chrono::Utc;

    fn ctq_with_unit(unit: &str) -> Ctq {
        NewCtq::new("Torque", unit, &EntityId::new(EntityKind::ProcessStep))
            .with_limits(2.3, 2.7, 2.5)
            .build(EntityId::new(EntityKind::Ctq), Utc::now())
    }

    #[test]
    fn test_validate_ctq_ordered() {
        assert!(validate_ctq(Some(2.3), Some(2.7), Some(2.5)).is_ok());
    }

    #[test]
    fn test_validate_ctq_target_above_upper() {
        let err = validate_ctq(Some(2.3), Some(2.7), Some(3.0)).unwrap_err();
        assert!(matches!(err, TraceError::InvalidRange { .. }));
    }

    #[test]
    fn test_validate_ctq_partial_specs() {
        assert!(validate_ctq(None, Some(3.0), None).is_ok());
        assert!(validate_ctq(Some(8.0), None, Some(10.0)).is_ok());
        assert!(validate_ctq(None, None, None).is_ok());
        assert!(validate_ctq(Some(2.0), Some(1.0), None).is_err());
        assert!(validate_ctq(None, Some(1.0), Some(1.5)).is_err());
    }

    #[test]
    fn test_validate_ctq_rejects_nan() {
        let err = validate_ctq(Some(f64::NAN), None, None).unwrap_err();
        assert!(matches!(err, TraceError::InvalidValue { field: "lower_limit", .. }));
    }

    #[test]
    fn test_validate_measurement_matching_unit() {
        assert!(validate_measurement(2.55, "N-m", &ctq_with_unit("N-m")).is_ok());
    }

    #[test]
    fn test_validate_measurement_unit_mismatch_regardless_of_range() {
        let ctq = ctq_with_unit("N-m");
        let err = validate_measurement(2.55, "mm", &ctq).unwrap_err();
        assert!(matches!(err, TraceError::UnitMismatch { .. }));
        let err = validate_measurement(99.0, "mm", &ctq).unwrap_err();
        assert!(matches!(err, TraceError::UnitMismatch { .. }));
    }

    #[test]
    fn test_out_of_range_value_is_structurally_valid() {
        let ctq = ctq_with_unit("N-m");
        assert!(validate_measurement(3.1, "N-m", &ctq).is_ok());
        assert_eq!(conformance(3.1, &ctq), Conformance::AboveUpper);
        assert_eq!(conformance(2.0, &ctq), Conformance::BelowLower);
    }

    #[test]
    fn test_conformance_bounds_are_inclusive() {
        let ctq = ctq_with_unit("N-m");
        assert!(conformance(2.3, &ctq).is_pass());
        assert!(conformance(2.7, &ctq).is_pass());
        assert!(conformance(2.35, &ctq).is_pass());
    }
}
