use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A completed workout session as returned by `GET /workout-sessions`.
///
/// Metric fields are tolerant: null, missing, non-numeric strings and
/// non-finite numbers all read as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSession {
  #[serde(default)]
  pub id: Option<String>,
  #[serde(default)]
  pub student_id: Option<String>,
  #[serde(default)]
  pub workout_id: Option<String>,
  #[serde(default)]
  pub day_name: Option<String>,
  #[serde(default)]
  pub completed_at: Option<String>,
  #[serde(default, deserialize_with = "lenient_f64")]
  pub total_volume_kg: f64,
  #[serde(default, deserialize_with = "lenient_f64")]
  pub estimated_calories: f64,
  #[serde(default, deserialize_with = "lenient_i64")]
  pub total_reps: i64,
  #[serde(default, deserialize_with = "lenient_i64")]
  pub exercises_completed: i64,
  #[serde(default)]
  pub duration_minutes: Option<f64>,
  #[serde(default)]
  pub notes: Option<String>,
  #[serde(default)]
  pub feedback: Option<String>,
  /// PSR, subjective recovery 1-10
  #[serde(default, deserialize_with = "lenient_score")]
  pub recovery_score: Option<f64>,
  /// PSE, subjective effort 1-10
  #[serde(default, deserialize_with = "lenient_score")]
  pub effort_score: Option<f64>,
  #[serde(default, deserialize_with = "lenient_score")]
  pub difficulty: Option<f64>,
}

/// Body of `POST /workout-sessions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteSessionRequest {
  pub workout_id: String,
  pub day_name: Option<String>,
  pub notes: Option<String>,
  pub feedback: String,
  pub recovery_score: u8,
  pub effort_score: u8,
  pub difficulty: u8,
}

impl CompleteSessionRequest {
  /// Build a completion request; difficulty is derived from effort as
  /// `ceil(effort / 2)` clamped to 1..=5.
  pub fn new(
    workout_id: impl Into<String>,
    day_name: Option<String>,
    notes: Option<String>,
    feedback: impl Into<String>,
    recovery_score: u8,
    effort_score: u8,
  ) -> Self {
    let notes = notes.filter(|n| !n.trim().is_empty());
    Self {
      workout_id: workout_id.into(),
      day_name,
      notes,
      feedback: feedback.into(),
      recovery_score,
      effort_score,
      difficulty: effort_score.div_ceil(2).clamp(1, 5),
    }
  }
}

fn coerce_number(value: &Value) -> f64 {
  let n = match value {
    Value::Number(n) => n.as_f64().unwrap_or(0.0),
    Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
    _ => 0.0,
  };
  if n.is_finite() {
    n
  } else {
    0.0
  }
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(deserializer)?;
  Ok(coerce_number(&value))
}

/// Pass-through score: kept as sent when numeric, `None` otherwise
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(deserializer)?;
  let score = match &value {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse::<f64>().ok(),
    _ => None,
  };
  Ok(score.filter(|n| n.is_finite()))
}

pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(deserializer)?;
  Ok(coerce_number(&value) as i64)
}
