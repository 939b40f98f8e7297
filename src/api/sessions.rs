use serde::Deserialize;

use crate::error::ApiError;
use crate::models::{CompleteSessionRequest, WorkoutSession};
use super::ApiClient;

#[derive(Debug, Deserialize)]
pub struct SessionCompleted {
  #[serde(default)]
  pub message: String,
  #[serde(default)]
  pub session_id: Option<String>,
}

impl ApiClient {
  /// Completed sessions, oldest first as stored by the server.
  /// `start_date` is a `YYYY-MM-DD` lower bound.
  pub async fn list_sessions(
    &self,
    student_id: Option<&str>,
    start_date: Option<&str>,
  ) -> Result<Vec<WorkoutSession>, ApiError> {
    self
      .get_json(
        "/workout-sessions",
        &[("student_id", student_id), ("start_date", start_date)],
      )
      .await
  }

  pub async fn complete_session(
    &self,
    request: &CompleteSessionRequest,
  ) -> Result<SessionCompleted, ApiError> {
    if !(1..=10).contains(&request.recovery_score) || !(1..=10).contains(&request.effort_score) {
      return Err(ApiError::Validation("PSR e PSE devem estar entre 1 e 10".into()));
    }
    self.post_json("/workout-sessions", &[], request).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::AppConfig;

  #[tokio::test]
  async fn test_list_sessions_tolerates_messy_metrics() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
      .mock("GET", "/workout-sessions")
      .match_query(mockito::Matcher::Any)
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(
        r#"[
          {"completed_at": "2024-01-01T10:00:00", "total_volume_kg": "500", "total_reps": null},
          {"completed_at": "2024-01-03T10:00:00", "total_volume_kg": 300, "estimated_calories": "abc"}
        ]"#,
      )
      .create_async()
      .await;

    let api = ApiClient::new(&AppConfig::for_base_url(&server.url()))
      .unwrap()
      .with_token("t");
    let sessions = api.list_sessions(Some("s1"), None).await.unwrap();

    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].total_volume_kg, 500.0);
    assert_eq!(sessions[0].total_reps, 0);
    assert_eq!(sessions[1].estimated_calories, 0.0);
  }

  #[tokio::test]
  async fn test_complete_session_rejects_out_of_range_scores() {
    let server = mockito::Server::new_async().await;
    let api = ApiClient::new(&AppConfig::for_base_url(&server.url()))
      .unwrap()
      .with_token("t");
    let request = CompleteSessionRequest::new("w1", None, None, "ok", 0, 7);
    let err = api.complete_session(&request).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
  }
}
