use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PersonalStats {
  pub students_count: u32,
  pub workouts_count: u32,
  /// Progress logs across all students in the last 7 days
  pub recent_progress: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StudentStats {
  pub total_exercises: u32,
  pub progress_logged: u32,
  pub workout_streak: u32,
  pub has_workout: bool,
}
