use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body composition, circumferences (cm) and skin folds (mm).
/// Everything except the header fields is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Measurements {
  pub weight: Option<f64>,
  pub height: Option<f64>,
  pub body_fat_percentage: Option<f64>,
  pub muscle_mass: Option<f64>,
  pub chest: Option<f64>,
  pub waist: Option<f64>,
  pub hip: Option<f64>,
  pub arm_right: Option<f64>,
  pub arm_left: Option<f64>,
  pub thigh_right: Option<f64>,
  pub thigh_left: Option<f64>,
  pub calf_right: Option<f64>,
  pub calf_left: Option<f64>,
  pub fold_chest: Option<f64>,
  pub fold_abdominal: Option<f64>,
  pub fold_thigh: Option<f64>,
  pub fold_triceps: Option<f64>,
  pub fold_subscapular: Option<f64>,
  pub fold_suprailiac: Option<f64>,
  pub fold_midaxillary: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assessment {
  pub id: String,
  pub student_id: String,
  #[serde(default = "manual")]
  pub assessment_type: String,
  pub date: String,
  #[serde(flatten)]
  pub measurements: Measurements,
  #[serde(default)]
  pub notes: Option<String>,
}

fn manual() -> String {
  "manual".to_string()
}

/// Body of `POST /assessments`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAssessment {
  pub student_id: String,
  pub assessment_type: String,
  pub date: String,
  #[serde(flatten)]
  pub measurements: Measurements,
  pub notes: Option<String>,
}

/// Response of `GET /assessments/compare/{student_id}`; field-wise deltas
/// between the first and latest assessment as computed by the server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentComparison {
  #[serde(default)]
  pub changes: BTreeMap<String, serde_json::Value>,
  #[serde(flatten)]
  pub extra: BTreeMap<String, serde_json::Value>,
}
