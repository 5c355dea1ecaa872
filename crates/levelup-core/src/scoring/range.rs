//! # Score Range
//!
//! The closed interval a range score's values must lie in.

use super::{RANGE_HIGH, RANGE_LOW};
use crate::LevelUpError;
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;

/// Wire form of a range record.
#[derive(Debug, Deserialize)]
pub(crate) struct RangeRecord {
    pub(crate) low: f64,
    pub(crate) high: f64,
}

/// An interval `[low, high]` with `low < high`.
///
/// Immutable once constructed; every constructor validates the bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    low: f64,
    high: f64,
}

impl Range {
    /// Create a range.
    ///
    /// Returns `LevelUpError::InvalidRange` unless `low < high`. A NaN bound
    /// never satisfies the comparison and is rejected too.
    pub fn new(low: f64, high: f64) -> Result<Self, LevelUpError> {
        if low.partial_cmp(&high) != Some(Ordering::Less) {
            return Err(LevelUpError::InvalidRange { low, high });
        }
        Ok(Self { low, high })
    }

    /// Parse a `{"low": .., "high": ..}` record.
    pub fn from_json(json: &Value) -> Result<Self, LevelUpError> {
        let record =
            RangeRecord::deserialize(json).map_err(|e| LevelUpError::Parse(e.to_string()))?;
        Self::from_record(record)
    }

    pub(crate) fn from_record(record: RangeRecord) -> Result<Self, LevelUpError> {
        Self::new(record.low, record.high)
    }

    /// Produce a `{"low": .., "high": ..}` record.
    ///
    /// Fails with `LevelUpError::Serialization` when a bound is not finite,
    /// since JSON numbers cannot carry infinities.
    pub fn to_json(&self) -> Result<Value, LevelUpError> {
        let mut map = Map::new();
        map.insert(RANGE_LOW.to_string(), bound_to_json(RANGE_LOW, self.low)?);
        map.insert(RANGE_HIGH.to_string(), bound_to_json(RANGE_HIGH, self.high)?);
        Ok(Value::Object(map))
    }

    /// The lowest value in the range.
    #[must_use]
    pub fn low(&self) -> f64 {
        self.low
    }

    /// The highest value in the range.
    #[must_use]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Whether `value` lies inside the closed interval.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    /// Clamp `value` into the interval.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.low, self.high)
    }
}

fn bound_to_json(field: &str, bound: f64) -> Result<Value, LevelUpError> {
    Number::from_f64(bound).map(Value::Number).ok_or_else(|| {
        LevelUpError::Serialization(format!("range {} is not finite: {}", field, bound))
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn low_must_be_below_high() {
        assert!(Range::new(5.0, 10.0).is_ok());
        assert!(matches!(
            Range::new(10.0, 5.0),
            Err(LevelUpError::InvalidRange { .. })
        ));
        assert!(matches!(
            Range::new(7.0, 7.0),
            Err(LevelUpError::InvalidRange { .. })
        ));
    }

    #[test]
    fn nan_bounds_are_rejected() {
        assert!(Range::new(f64::NAN, 1.0).is_err());
        assert!(Range::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn from_json_reads_bounds() {
        let range = Range::from_json(&json!({"low": 10, "high": 100.5})).expect("parse");
        assert_eq!(range.low(), 10.0);
        assert_eq!(range.high(), 100.5);
    }

    #[test]
    fn from_json_missing_field_is_parse_error() {
        let result = Range::from_json(&json!({"low": 10}));
        assert!(matches!(result, Err(LevelUpError::Parse(_))));
    }

    #[test]
    fn from_json_validates_order() {
        let result = Range::from_json(&json!({"low": 10, "high": 5}));
        assert!(matches!(result, Err(LevelUpError::InvalidRange { .. })));
    }

    #[test]
    fn to_json_writes_both_bounds() {
        let range = Range::new(-1.5, 2.0).expect("range");
        assert_eq!(
            range.to_json().expect("json"),
            json!({"low": -1.5, "high": 2.0})
        );
    }

    #[test]
    fn infinite_bound_cannot_serialize() {
        let range = Range::new(f64::NEG_INFINITY, 0.0).expect("range");
        assert!(matches!(
            range.to_json(),
            Err(LevelUpError::Serialization(_))
        ));
    }

    #[test]
    fn contains_and_clamp_use_closed_interval() {
        let range = Range::new(10.0, 100.0).expect("range");
        assert!(range.contains(10.0));
        assert!(range.contains(100.0));
        assert!(!range.contains(100.5));
        assert_eq!(range.clamp(500.0), 100.0);
        assert_eq!(range.clamp(-3.0), 10.0);
        assert_eq!(range.clamp(42.0), 42.0);
    }
}
