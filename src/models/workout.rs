use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
  pub name: String,
  #[serde(default)]
  pub muscle_group: Option<String>,
  #[serde(default)]
  pub sets: Option<u32>,
  /// Free text, e.g. "10" or "8-12"
  #[serde(default)]
  pub reps: Option<String>,
  /// Free text prescribed load, e.g. "20kg"
  #[serde(default)]
  pub weight: Option<String>,
  #[serde(default)]
  pub notes: Option<String>,
  #[serde(default)]
  pub image_url: Option<String>,
  #[serde(default)]
  pub video_url: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkoutDay {
  pub day_name: String,
  #[serde(default)]
  pub exercises: Vec<Exercise>,
}

impl WorkoutDay {
  /// Total prescribed sets for the day
  pub fn planned_sets(&self) -> u32 {
    self.exercises.iter().filter_map(|e| e.sets).sum()
  }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workout {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub student_id: Option<String>,
  pub personal_id: String,
  #[serde(default)]
  pub routine_id: Option<String>,
  #[serde(default)]
  pub days: Vec<WorkoutDay>,
  pub created_at: String,
  pub updated_at: String,
  #[serde(default = "default_version")]
  pub version: u32,
}

fn default_version() -> u32 {
  1
}

/// Body of `POST /workouts`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkout {
  pub name: String,
  pub student_id: String,
  pub days: Vec<WorkoutDay>,
}

/// Response of `POST /workouts/upload`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedWorkout {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub days_count: usize,
  #[serde(default)]
  pub exercises_count: usize,
  #[serde(default)]
  pub days: Vec<WorkoutDay>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExerciseImageUpdate {
  pub workout_id: String,
  pub day_index: usize,
  pub exercise_index: usize,
  pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Routine {
  pub id: String,
  #[serde(default)]
  pub student_id: Option<String>,
  pub name: String,
  #[serde(default)]
  pub start_date: Option<String>,
  #[serde(default)]
  pub end_date: Option<String>,
  #[serde(default)]
  pub objective: Option<String>,
  #[serde(default)]
  pub level: Option<String>,
  #[serde(default)]
  pub day_type: Option<String>,
  #[serde(default)]
  pub auto_archive: Option<bool>,
  #[serde(default)]
  pub status: Option<String>,
  #[serde(default)]
  pub notes: Option<String>,
}

/// Body of `POST /routines`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRoutine {
  pub student_id: String,
  pub name: String,
  pub start_date: String,
  pub end_date: Option<String>,
  pub objective: Option<String>,
  pub level: Option<String>,
  pub day_type: String,
  pub auto_archive: bool,
  pub notes: Option<String>,
}
