use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::session::{lenient_f64, lenient_i64};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Badge {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub icon: Option<String>,
  #[serde(default)]
  pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BadgeSet {
  #[serde(default)]
  pub earned: Vec<Badge>,
  #[serde(default)]
  pub total_available: u32,
}

/// Personal best for one exercise
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonalRecord {
  #[serde(default, deserialize_with = "lenient_f64")]
  pub weight: f64,
  #[serde(default, deserialize_with = "lenient_i64")]
  pub reps: i64,
  pub date: String,
}

/// Keyed by exercise name
pub type PersonalRecords = BTreeMap<String, PersonalRecord>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankingEntry {
  pub student_id: String,
  pub student_name: String,
  #[serde(default)]
  pub rank: u32,
  #[serde(default)]
  pub score: i64,
  #[serde(default)]
  pub progress_count: u32,
  #[serde(default)]
  pub streak: u32,
  #[serde(default)]
  pub badges_count: u32,
}
