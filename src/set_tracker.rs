//! Per-exercise set logging with a rest countdown

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Exercise, ProgressLog, ProgressRecord, SetEntry};
use crate::rest_timer::{RestNotifier, RestTimer, TimerError, TimerState};

const DEFAULT_SETS: u32 = 4;
const WEIGHT_STEP: f64 = 2.5;
const REPS_STEP: u32 = 1;

/// One row of the tracker; `None` means nothing typed yet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetRow {
  pub set: u32,
  pub weight: Option<f64>,
  pub reps: Option<u32>,
  pub completed: bool,
}

impl SetRow {
  fn blank(set: u32) -> Self {
    Self {
      set,
      weight: None,
      reps: None,
      completed: false,
    }
  }

  fn has_values(&self) -> bool {
    self.weight.is_some() || self.reps.is_some()
  }
}

/// Previous session rendered as `60kg x 10 | 62.5kg x 8`
pub fn previous_hint(record: &ProgressRecord) -> String {
  record
    .sets_completed
    .iter()
    .map(|s| format!("{}kg x {}", s.weight, s.reps))
    .collect::<Vec<_>>()
    .join(" | ")
}

pub struct SetTracker {
  exercise_name: String,
  rows: Vec<SetRow>,
  notes: Option<String>,
  previous: Option<ProgressRecord>,
  default_rest_seconds: u32,
  timer: RestTimer,
}

impl SetTracker {
  /// Rows follow the prescribed set count, four when none is given
  pub fn new(exercise: &Exercise, default_rest_seconds: u32, notifier: Arc<dyn RestNotifier>) -> Self {
    let count = exercise.sets.filter(|n| *n > 0).unwrap_or(DEFAULT_SETS);
    Self {
      exercise_name: exercise.name.clone(),
      rows: (1..=count).map(SetRow::blank).collect(),
      notes: None,
      previous: None,
      default_rest_seconds,
      timer: RestTimer::new(notifier),
    }
  }

  pub fn exercise_name(&self) -> &str {
    &self.exercise_name
  }

  pub fn rows(&self) -> &[SetRow] {
    &self.rows
  }

  pub fn previous(&self) -> Option<&ProgressRecord> {
    self.previous.as_ref()
  }

  pub fn completed_count(&self) -> usize {
    self.rows.iter().filter(|r| r.completed).count()
  }

  /// ---------------------------------------------------------------------------
  /// Editing
  /// ---------------------------------------------------------------------------

  fn row_mut(&mut self, index: usize) -> Result<&mut SetRow, ApiError> {
    self
      .rows
      .get_mut(index)
      .ok_or_else(|| ApiError::Validation(format!("Série {} não existe", index + 1)))
  }

  pub fn set_weight(&mut self, index: usize, weight: Option<f64>) -> Result<(), ApiError> {
    self.row_mut(index)?.weight = weight.map(|w| w.max(0.0));
    Ok(())
  }

  pub fn set_reps(&mut self, index: usize, reps: Option<u32>) -> Result<(), ApiError> {
    self.row_mut(index)?.reps = reps;
    Ok(())
  }

  pub fn toggle_completed(&mut self, index: usize) -> Result<bool, ApiError> {
    let row = self.row_mut(index)?;
    row.completed = !row.completed;
    Ok(row.completed)
  }

  pub fn increment_weight(&mut self, index: usize) -> Result<f64, ApiError> {
    self.step_weight(index, WEIGHT_STEP)
  }

  pub fn decrement_weight(&mut self, index: usize) -> Result<f64, ApiError> {
    self.step_weight(index, -WEIGHT_STEP)
  }

  pub fn increment_reps(&mut self, index: usize) -> Result<u32, ApiError> {
    let row = self.row_mut(index)?;
    let reps = row.reps.unwrap_or(0).saturating_add(REPS_STEP);
    row.reps = Some(reps);
    Ok(reps)
  }

  pub fn decrement_reps(&mut self, index: usize) -> Result<u32, ApiError> {
    let row = self.row_mut(index)?;
    let reps = row.reps.unwrap_or(0).saturating_sub(REPS_STEP);
    row.reps = Some(reps);
    Ok(reps)
  }

  fn step_weight(&mut self, index: usize, delta: f64) -> Result<f64, ApiError> {
    let row = self.row_mut(index)?;
    let weight = (row.weight.unwrap_or(0.0) + delta).max(0.0);
    row.weight = Some(weight);
    Ok(weight)
  }

  pub fn set_notes(&mut self, notes: Option<String>) {
    self.notes = notes.filter(|n| !n.trim().is_empty());
  }

  /// ---------------------------------------------------------------------------
  /// Saving
  /// ---------------------------------------------------------------------------

  /// Completed rows with something typed in; blanks go out as zero
  pub fn progress_log(&self, workout_id: &str) -> Result<ProgressLog, ApiError> {
    let sets_completed: Vec<SetEntry> = self
      .rows
      .iter()
      .filter(|r| r.completed && r.has_values())
      .map(|r| SetEntry {
        set: r.set,
        weight: r.weight.unwrap_or(0.0),
        reps: r.reps.map(i64::from).unwrap_or(0),
      })
      .collect();

    if sets_completed.is_empty() {
      return Err(ApiError::Validation("Complete pelo menos uma série".into()));
    }

    Ok(ProgressLog {
      workout_id: workout_id.to_string(),
      exercise_name: self.exercise_name.clone(),
      sets_completed,
      notes: self.notes.clone(),
    })
  }

  pub async fn save(&self, api: &ApiClient, workout_id: &str) -> Result<ProgressRecord, ApiError> {
    let log = self.progress_log(workout_id)?;
    let record = api.log_progress(&log).await?;
    tracing::info!(
      exercise = %self.exercise_name,
      sets = log.sets_completed.len(),
      "Progress saved"
    );
    Ok(record)
  }

  /// Fetch the latest logged session of this exercise for the hint line.
  /// Failures only cost the hint.
  pub async fn load_previous(&mut self, api: &ApiClient) {
    match api.list_progress(Some(&self.exercise_name), None).await {
      Ok(records) => self.previous = records.into_iter().next(),
      Err(e) => tracing::warn!(exercise = %self.exercise_name, error = %e, "Could not load previous progress"),
    }
  }

  pub fn previous_hint(&self) -> Option<String> {
    self.previous.as_ref().map(previous_hint)
  }

  /// ---------------------------------------------------------------------------
  /// Rest
  /// ---------------------------------------------------------------------------

  pub fn start_rest(&mut self, seconds: Option<u32>) -> Result<(), TimerError> {
    self.timer.start(seconds.unwrap_or(self.default_rest_seconds))
  }

  pub fn pause_rest(&mut self) -> Result<(), TimerError> {
    self.timer.pause()
  }

  pub fn resume_rest(&mut self) -> Result<(), TimerError> {
    self.timer.resume()
  }

  pub fn reset_rest(&mut self) {
    self.timer.reset();
  }

  pub fn rest_state(&self) -> TimerState {
    self.timer.state()
  }

  pub fn watch_rest(&self) -> watch::Receiver<TimerState> {
    self.timer.subscribe()
  }
}
