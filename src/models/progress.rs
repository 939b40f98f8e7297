use serde::{Deserialize, Serialize};

use super::session::{lenient_f64, lenient_i64};

/// One logged set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetEntry {
  pub set: u32,
  #[serde(default, deserialize_with = "lenient_f64")]
  pub weight: f64,
  #[serde(default, deserialize_with = "lenient_i64")]
  pub reps: i64,
}

/// Body of `POST /progress`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressLog {
  pub workout_id: String,
  pub exercise_name: String,
  pub sets_completed: Vec<SetEntry>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressRecord {
  pub id: String,
  pub student_id: String,
  pub workout_id: String,
  pub exercise_name: String,
  #[serde(default)]
  pub sets_completed: Vec<SetEntry>,
  #[serde(default)]
  pub notes: Option<String>,
  pub logged_at: String,
}

impl ProgressRecord {
  pub fn max_weight(&self) -> f64 {
    self
      .sets_completed
      .iter()
      .map(|s| s.weight)
      .fold(0.0, f64::max)
  }

  pub fn total_reps(&self) -> i64 {
    self.sets_completed.iter().map(|s| s.reps).sum()
  }
}

/// One point of `GET /progress/evolution`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvolutionPoint {
  /// `YYYY-MM-DD`
  pub date: String,
  #[serde(default, deserialize_with = "lenient_f64")]
  pub weight: f64,
  #[serde(default, deserialize_with = "lenient_i64")]
  pub reps: i64,
  pub exercise: String,
}
