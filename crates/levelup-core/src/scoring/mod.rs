//! # Scores
//!
//! A score is a base record (id, name, direction, start value) plus a kind.
//! `ScoreKind::Range` constrains the score to a closed interval.
//!
//! ## JSON records
//!
//! ```json
//! {
//!   "itemId": "shots",
//!   "name": "Shots",
//!   "higherBetter": false,
//!   "startValue": 100.0,
//!   "className": "RangeScore",
//!   "range": { "low": 10.0, "high": 100.0 }
//! }
//! ```
//!
//! Parsing is strict: missing required fields or an invalid range fail.
//! Serialization is lenient: a range that cannot be written is logged and
//! left out of the record.

mod range;

pub use range::Range;

use crate::LevelUpError;
use range::RangeRecord;
use serde::Deserialize;
use serde_json::{Map, Number, Value};

// =============================================================================
// JSON KEYS
// =============================================================================

/// Score id key.
pub const SCORE_ID: &str = "itemId";
/// Display name key.
pub const SCORE_NAME: &str = "name";
/// Direction key.
pub const SCORE_HIGHER_BETTER: &str = "higherBetter";
/// Start value key.
pub const SCORE_START_VALUE: &str = "startValue";
/// Kind discriminator key.
pub const SCORE_CLASS_NAME: &str = "className";
/// Nested range object key.
pub const SCORE_RANGE: &str = "range";
/// Range lower bound key.
pub const RANGE_LOW: &str = "low";
/// Range upper bound key.
pub const RANGE_HIGH: &str = "high";

/// `className` of plain scores.
pub const PLAIN_SCORE_CLASS: &str = "Score";
/// `className` of range scores.
pub const RANGE_SCORE_CLASS: &str = "RangeScore";

// =============================================================================
// SCORE
// =============================================================================

/// The kind-specific payload of a score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreKind {
    /// Unconstrained score.
    Plain,
    /// Score constrained to a closed interval.
    Range(Range),
}

impl ScoreKind {
    /// The `className` written for this kind.
    #[must_use]
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Plain => PLAIN_SCORE_CLASS,
            Self::Range(_) => RANGE_SCORE_CLASS,
        }
    }
}

/// A score definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    id: String,
    name: String,
    higher_is_better: bool,
    start_value: f64,
    kind: ScoreKind,
}

/// Wire form of a score record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreRecord {
    item_id: String,
    #[serde(default)]
    name: String,
    #[serde(default = "default_higher_better")]
    higher_better: bool,
    #[serde(default)]
    start_value: f64,
    #[serde(default)]
    class_name: Option<String>,
    #[serde(default)]
    range: Option<RangeRecord>,
}

fn default_higher_better() -> bool {
    true
}

impl Score {
    /// Create a plain, ascending score starting at zero.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_details(id, "", true)
    }

    /// Create a plain score with a display name and direction.
    #[must_use]
    pub fn with_details(
        id: impl Into<String>,
        name: impl Into<String>,
        higher_is_better: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            higher_is_better,
            start_value: 0.0,
            kind: ScoreKind::Plain,
        }
    }

    /// Create an ascending range score.
    #[must_use]
    pub fn range(id: impl Into<String>, range: Range) -> Self {
        Self::range_with_details(id, "", true, range)
    }

    /// Create a range score with a display name and direction.
    ///
    /// Descending scores start at the top of the range.
    #[must_use]
    pub fn range_with_details(
        id: impl Into<String>,
        name: impl Into<String>,
        higher_is_better: bool,
        range: Range,
    ) -> Self {
        let mut score = Self::with_details(id, name, higher_is_better);
        score.apply_range(range);
        score
    }

    /// Parse a score record, choosing the kind from `className`.
    ///
    /// Without `className`, a record carrying `range` is a range score.
    pub fn from_json(json: &Value) -> Result<Self, LevelUpError> {
        let record = parse_record(json)?;
        let is_range = match record.class_name.as_deref() {
            Some(RANGE_SCORE_CLASS) => true,
            Some(PLAIN_SCORE_CLASS) => false,
            Some(other) => {
                return Err(LevelUpError::Parse(format!(
                    "unknown score class: {}",
                    other
                )));
            }
            None => record.range.is_some(),
        };

        if is_range {
            Self::range_from_record(record)
        } else {
            Ok(Self::base_from_record(&record))
        }
    }

    /// Parse a range score record; the nested `range` object is required.
    pub fn range_from_json(json: &Value) -> Result<Self, LevelUpError> {
        Self::range_from_record(parse_record(json)?)
    }

    fn base_from_record(record: &ScoreRecord) -> Self {
        let mut score = Self::with_details(
            record.item_id.clone(),
            record.name.clone(),
            record.higher_better,
        );
        score.start_value = record.start_value;
        score
    }

    fn range_from_record(mut record: ScoreRecord) -> Result<Self, LevelUpError> {
        let range = record
            .range
            .take()
            .ok_or_else(|| LevelUpError::Parse(format!("missing field `{}`", SCORE_RANGE)))
            .and_then(Range::from_record)?;

        let mut score = Self::base_from_record(&record);
        score.apply_range(range);
        Ok(score)
    }

    fn apply_range(&mut self, range: Range) {
        self.kind = ScoreKind::Range(range);
        if !self.higher_is_better {
            self.start_value = range.high();
        }
    }

    /// Produce the score's JSON record.
    ///
    /// Never fails. A value JSON cannot represent is logged and omitted;
    /// for range scores that drops the whole `range` object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(SCORE_ID.to_string(), Value::String(self.id.clone()));
        map.insert(SCORE_NAME.to_string(), Value::String(self.name.clone()));
        map.insert(
            SCORE_HIGHER_BETTER.to_string(),
            Value::Bool(self.higher_is_better),
        );
        match Number::from_f64(self.start_value) {
            Some(n) => {
                map.insert(SCORE_START_VALUE.to_string(), Value::Number(n));
            }
            None => {
                tracing::warn!(
                    score = %self.id,
                    start_value = self.start_value,
                    "start value is not finite, omitted from record"
                );
            }
        }
        map.insert(
            SCORE_CLASS_NAME.to_string(),
            Value::String(self.kind.class_name().to_string()),
        );

        if let ScoreKind::Range(range) = &self.kind {
            match range.to_json() {
                Ok(json) => {
                    map.insert(SCORE_RANGE.to_string(), json);
                }
                Err(e) => {
                    tracing::warn!(score = %self.id, error = %e, "range omitted from record");
                }
            }
        }

        Value::Object(map)
    }

    /// The score id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether higher values are better.
    #[must_use]
    pub fn is_higher_better(&self) -> bool {
        self.higher_is_better
    }

    /// The value the score starts from.
    #[must_use]
    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    /// Override the start value.
    pub fn set_start_value(&mut self, start_value: f64) {
        self.start_value = start_value;
    }

    /// The kind payload.
    #[must_use]
    pub fn kind(&self) -> &ScoreKind {
        &self.kind
    }

    /// The range, for range scores.
    #[must_use]
    pub fn range_bounds(&self) -> Option<&Range> {
        match &self.kind {
            ScoreKind::Range(range) => Some(range),
            ScoreKind::Plain => None,
        }
    }
}

fn parse_record(json: &Value) -> Result<ScoreRecord, LevelUpError> {
    ScoreRecord::deserialize(json).map_err(|e| LevelUpError::Parse(e.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================
