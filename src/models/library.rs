use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Entry of the shared exercise library
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibraryExercise {
  pub id: String,
  pub name: String,
  pub category: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub instructions: Option<String>,
  #[serde(default)]
  pub video_url: Option<String>,
  #[serde(default)]
  pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLibraryExercise {
  pub name: String,
  pub category: String,
  pub description: Option<String>,
  pub instructions: Option<String>,
  pub video_url: Option<String>,
  pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CategoryList {
  #[serde(default)]
  pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Checkin {
  pub id: String,
  pub student_id: String,
  pub checked_in_at: String,
  #[serde(default)]
  pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CheckinFrequency {
  #[serde(default)]
  pub total_checkins: u32,
  #[serde(default)]
  pub unique_days: u32,
  /// `YYYY-MM-DD` -> check-ins that day
  #[serde(default)]
  pub frequency_by_date: BTreeMap<String, u32>,
}
