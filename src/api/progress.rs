use crate::error::ApiError;
use crate::models::{EvolutionPoint, ProgressLog, ProgressRecord};
use super::ApiClient;

impl ApiClient {
  pub async fn log_progress(&self, log: &ProgressLog) -> Result<ProgressRecord, ApiError> {
    self.post_json("/progress", &[], log).await
  }

  /// Progress history, newest first
  pub async fn list_progress(
    &self,
    exercise_name: Option<&str>,
    student_id: Option<&str>,
  ) -> Result<Vec<ProgressRecord>, ApiError> {
    self
      .get_json(
        "/progress",
        &[("exercise_name", exercise_name), ("student_id", student_id)],
      )
      .await
  }

  /// Max weight and total reps per logged session of one exercise, oldest first
  pub async fn progress_evolution(
    &self,
    exercise_name: &str,
    student_id: Option<&str>,
  ) -> Result<Vec<EvolutionPoint>, ApiError> {
    self
      .get_json(
        "/progress/evolution",
        &[("exercise_name", Some(exercise_name)), ("student_id", student_id)],
      )
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::AppConfig;
  use mockito::Matcher;

  #[tokio::test]
  async fn test_evolution_sends_exercise_and_student() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("GET", "/progress/evolution")
      .match_query(Matcher::AllOf(vec![
        Matcher::UrlEncoded("exercise_name".into(), "Supino Reto".into()),
        Matcher::UrlEncoded("student_id".into(), "s1".into()),
      ]))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(r#"[{"date": "2024-01-02", "weight": 62.5, "reps": 30, "exercise": "Supino Reto"}]"#)
      .create_async()
      .await;

    let api = ApiClient::new(&AppConfig::for_base_url(&server.url()))
      .unwrap()
      .with_token("t");
    let points = api.progress_evolution("Supino Reto", Some("s1")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].weight, 62.5);
  }
}
