//! Test utilities shared by the unit tests
//!
//! - In-memory database setup
//! - Mock data factories
//! - Helper assertions

use sqlx::SqlitePool;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::models::{Exercise, Role, Routine, User, Workout, WorkoutDay, WorkoutSession};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// In-memory SQLite with migrations applied.
///
/// Uses max_connections(1) so every query sees the same in-memory database.
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn mock_user(id: &str, role: Role) -> User {
  User {
    id: id.to_string(),
    email: format!("{}@example.com", id),
    name: format!("User {}", id),
    role,
    personal_id: (role == Role::Student).then(|| "p1".to_string()),
    phone: None,
    notes: None,
    created_at: "2024-01-01T00:00:00+00:00".to_string(),
  }
}

/// Session with the given completion time and volume; other metrics zero
pub fn mock_session(completed_at: &str, total_volume_kg: f64) -> WorkoutSession {
  WorkoutSession {
    completed_at: Some(completed_at.to_string()),
    total_volume_kg,
    ..Default::default()
  }
}

pub fn mock_exercise(name: &str, sets: Option<u32>) -> Exercise {
  Exercise {
    name: name.to_string(),
    muscle_group: Some("Peito".to_string()),
    sets,
    reps: Some("10".to_string()),
    weight: Some("20kg".to_string()),
    ..Default::default()
  }
}

pub fn mock_workout(id: &str, name: &str) -> Workout {
  Workout {
    id: id.to_string(),
    name: name.to_string(),
    student_id: Some("s1".to_string()),
    personal_id: "p1".to_string(),
    routine_id: None,
    days: vec![WorkoutDay {
      day_name: "Treino A".to_string(),
      exercises: vec![
        mock_exercise("Supino Reto", Some(4)),
        mock_exercise("Crucifixo", Some(3)),
      ],
    }],
    created_at: "2024-01-01T00:00:00+00:00".to_string(),
    updated_at: "2024-01-01T00:00:00+00:00".to_string(),
    version: 1,
  }
}

pub fn mock_routine(id: &str, start_date: Option<&str>, end_date: Option<&str>) -> Routine {
  Routine {
    id: id.to_string(),
    student_id: Some("s1".to_string()),
    name: format!("Rotina {}", id),
    start_date: start_date.map(str::to_string),
    end_date: end_date.map(str::to_string),
    objective: None,
    level: None,
    day_type: None,
    auto_archive: None,
    status: Some("active".to_string()),
    notes: None,
  }
}

/// Client pointed at a mock server, already holding a token
pub fn mock_api(base_url: &str) -> ApiClient {
  ApiClient::new(&AppConfig::for_base_url(base_url))
    .expect("Failed to build client")
    .with_token("test-token")
}

/// ---------------------------------------------------------------------------
/// Helper Assertions
/// ---------------------------------------------------------------------------

pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: f64) {
  assert!(
    (actual - expected).abs() < epsilon,
    "Expected {} to be approximately {} (within {})",
    actual,
    expected,
    epsilon
  );
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_test_db_runs_migrations() {
    let pool = setup_test_db().await;
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM auth_session")
      .fetch_one(&pool)
      .await
      .unwrap();
    assert_eq!(count, 0);
  }

  #[test]
  fn test_mock_workout_plans_sets() {
    assert_eq!(mock_workout("w1", "A").days[0].planned_sets(), 7);
  }
}
