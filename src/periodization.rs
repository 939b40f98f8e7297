//! Weekly periodization derived from completed workout sessions
//!
//! Sessions are bucketed by local calendar week (Monday 00:00), the last six
//! weeks become the mesocycle table, and the whole list is summed for the
//! period totals. Everything here is recomputed from the session list on
//! every call.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;

use crate::models::{Routine, Workout, WorkoutSession};

/// ---------------------------------------------------------------------------
/// Constants
/// ---------------------------------------------------------------------------

const MESOCYCLE_WEEKS: usize = 6;
const DEFAULT_OBJECTIVE: &str = "Objetivo geral";
const DEFAULT_WORKOUT_NAME: &str = "Treino ativo";
const NO_PERIOD: &str = "Sem periodo definido";

const NAIVE_FORMATS: [&str; 4] = [
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%d %H:%M",
];

/// ---------------------------------------------------------------------------
/// Output Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeeklyBucket {
  /// Monday of the week
  pub week_start: NaiveDate,
  /// `dd/mm` of `week_start`
  pub week_label: String,
  pub volume_kg: f64,
  pub calories: f64,
  pub reps: i64,
  pub sessions: u32,
  pub exercises: i64,
}

impl WeeklyBucket {
  fn empty(week_start: NaiveDate) -> Self {
    Self {
      week_start,
      week_label: week_start.format("%d/%m").to_string(),
      volume_kg: 0.0,
      calories: 0.0,
      reps: 0,
      sessions: 0,
      exercises: 0,
    }
  }

  fn add(&mut self, session: &WorkoutSession) {
    self.volume_kg += session.total_volume_kg;
    self.calories += session.estimated_calories;
    self.reps = self.reps.saturating_add(session.total_reps);
    self.exercises = self.exercises.saturating_add(session.exercises_completed);
    self.sessions += 1;
  }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MesocycleRow {
  /// `Semana {n}`, 1-based within the window
  pub week: String,
  #[serde(flatten)]
  pub bucket: WeeklyBucket,
  /// Percent change of volume against the previous row
  pub trend: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SessionSummary {
  pub total_sessions: usize,
  pub total_volume: f64,
  pub total_calories: f64,
  pub total_exercises: i64,
  pub total_reps: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PeriodizationReport {
  pub objective: String,
  pub workout_name: String,
  pub period_label: String,
  pub weekly: Vec<WeeklyBucket>,
  pub mesocycle: Vec<MesocycleRow>,
  pub summary: SessionSummary,
}

/// ---------------------------------------------------------------------------
/// Timestamp Handling
/// ---------------------------------------------------------------------------

pub fn round1(value: f64) -> f64 {
  (value * 10.0).round() / 10.0
}

/// Local wall-clock time of a session timestamp.
///
/// Offset-carrying timestamps are converted into `tz`; naive ones are
/// already local. A bare date reads as local midnight.
pub fn parse_completed_at<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDateTime> {
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }

  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.with_timezone(tz).naive_local());
  }

  NAIVE_FORMATS
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    .or_else(|| {
      NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    })
}

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
  let days_from_monday = date.weekday().num_days_from_monday();
  date - chrono::Duration::days(days_from_monday as i64)
}

fn session_date<Tz: TimeZone>(session: &WorkoutSession, tz: &Tz) -> Option<NaiveDate> {
  let raw = session.completed_at.as_deref().filter(|s| !s.trim().is_empty())?;

  match parse_completed_at(raw, tz) {
    Some(dt) => Some(dt.date()),
    None => {
      tracing::warn!(
        completed_at = raw,
        session_id = session.id.as_deref().unwrap_or("-"),
        "Skipping session with unreadable completion time"
      );
      None
    }
  }
}

/// ---------------------------------------------------------------------------
/// Aggregation
/// ---------------------------------------------------------------------------

/// One bucket per calendar week in the system's local zone, oldest first
pub fn aggregate_weekly(sessions: &[WorkoutSession]) -> Vec<WeeklyBucket> {
  aggregate_weekly_in(sessions, &Local)
}

pub fn aggregate_weekly_in<Tz: TimeZone>(sessions: &[WorkoutSession], tz: &Tz) -> Vec<WeeklyBucket> {
  let mut weeks: HashMap<NaiveDate, WeeklyBucket> = HashMap::new();

  for session in sessions {
    let Some(date) = session_date(session, tz) else {
      continue;
    };
    let start = week_start(date);
    weeks
      .entry(start)
      .or_insert_with(|| WeeklyBucket::empty(start))
      .add(session);
  }

  let mut buckets: Vec<WeeklyBucket> = weeks
    .into_values()
    .map(|mut b| {
      b.volume_kg = round1(b.volume_kg);
      b
    })
    .collect();

  buckets.sort_by_key(|b| b.week_start);
  buckets
}

/// Last six weeks with their week-over-week volume trend
pub fn mesocycle(buckets: &[WeeklyBucket]) -> Vec<MesocycleRow> {
  let window = &buckets[buckets.len().saturating_sub(MESOCYCLE_WEEKS)..];

  window
    .iter()
    .enumerate()
    .map(|(i, bucket)| {
      let trend = i
        .checked_sub(1)
        .map(|prev| window[prev].volume_kg)
        .filter(|prev| *prev > 0.0)
        .map(|prev| round1((bucket.volume_kg - prev) / prev * 100.0));

      MesocycleRow {
        week: format!("Semana {}", i + 1),
        bucket: bucket.clone(),
        trend,
      }
    })
    .collect()
}

/// Totals over every session, with or without a completion time
pub fn summarize(sessions: &[WorkoutSession]) -> SessionSummary {
  let mut summary = sessions.iter().fold(SessionSummary::default(), |mut acc, s| {
    acc.total_sessions += 1;
    acc.total_volume += s.total_volume_kg;
    acc.total_calories += s.estimated_calories;
    acc.total_exercises = acc.total_exercises.saturating_add(s.exercises_completed);
    acc.total_reps = acc.total_reps.saturating_add(s.total_reps);
    acc
  });
  summary.total_volume = round1(summary.total_volume);
  summary
}

/// ---------------------------------------------------------------------------
/// Period Label
/// ---------------------------------------------------------------------------

pub fn period_label(routine: Option<&Routine>, sessions: &[WorkoutSession]) -> String {
  period_label_in(routine, sessions, &Local)
}

/// `dd/mm/yyyy - dd/mm/yyyy` from the routine dates, else from the first
/// and last completed session
pub fn period_label_in<Tz: TimeZone>(
  routine: Option<&Routine>,
  sessions: &[WorkoutSession],
  tz: &Tz,
) -> String {
  let routine_range = routine.and_then(|r| {
    let start = parse_completed_at(r.start_date.as_deref()?, tz)?;
    let end = parse_completed_at(r.end_date.as_deref()?, tz)?;
    Some((start.date(), end.date()))
  });

  let range = routine_range.or_else(|| {
    let dates: Vec<NaiveDate> = sessions
      .iter()
      .filter_map(|s| s.completed_at.as_deref())
      .filter_map(|raw| parse_completed_at(raw, tz))
      .map(|dt| dt.date())
      .collect();
    Some((*dates.iter().min()?, *dates.iter().max()?))
  });

  match range {
    Some((start, end)) => format!("{} - {}", start.format("%d/%m/%Y"), end.format("%d/%m/%Y")),
    None => NO_PERIOD.to_string(),
  }
}

/// ---------------------------------------------------------------------------
/// Report
/// ---------------------------------------------------------------------------

impl PeriodizationReport {
  pub fn build(workouts: &[Workout], sessions: &[WorkoutSession], routines: &[Routine]) -> Self {
    Self::build_in(workouts, sessions, routines, &Local)
  }

  /// The first workout is the current one; its routine is preferred,
  /// falling back to the first routine on file.
  pub fn build_in<Tz: TimeZone>(
    workouts: &[Workout],
    sessions: &[WorkoutSession],
    routines: &[Routine],
    tz: &Tz,
  ) -> Self {
    let current = workouts.first();
    let routine = current
      .and_then(|w| w.routine_id.as_deref())
      .and_then(|id| routines.iter().find(|r| r.id == id))
      .or_else(|| routines.first());

    let weekly = aggregate_weekly_in(sessions, tz);
    let mesocycle = mesocycle(&weekly);

    Self {
      objective: routine
        .and_then(|r| r.objective.clone())
        .filter(|o| !o.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_OBJECTIVE.to_string()),
      workout_name: current
        .map(|w| w.name.clone())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_WORKOUT_NAME.to_string()),
      period_label: period_label_in(routine, sessions, tz),
      weekly,
      mesocycle,
      summary: summarize(sessions),
    }
  }
}
