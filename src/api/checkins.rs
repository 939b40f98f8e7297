use serde_json::json;

use crate::error::ApiError;
use crate::models::library::{Checkin, CheckinFrequency};
use super::{segment, ApiClient};

impl ApiClient {
  /// Students see their own check-ins; trainers pass the student
  pub async fn list_checkins(&self, student_id: Option<&str>) -> Result<Vec<Checkin>, ApiError> {
    self.get_json("/checkins", &[("student_id", student_id)]).await
  }

  pub async fn check_in(&self, notes: Option<&str>) -> Result<Checkin, ApiError> {
    let notes = notes.map(str::trim).filter(|n| !n.is_empty());
    self.post_json("/checkins", &[], &json!({ "notes": notes })).await
  }

  pub async fn checkin_frequency(&self, student_id: &str) -> Result<CheckinFrequency, ApiError> {
    self
      .get_json(&format!("/checkins/frequency/{}", segment(student_id)), &[])
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::AppConfig;

  #[tokio::test]
  async fn test_blank_notes_are_sent_as_null() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("POST", "/checkins")
      .match_body(mockito::Matcher::Json(json!({ "notes": null })))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(r#"{"id": "c1", "student_id": "s1", "checked_in_at": "2024-01-01T07:00:00"}"#)
      .create_async()
      .await;

    let api = ApiClient::new(&AppConfig::for_base_url(&server.url()))
      .unwrap()
      .with_token("t");
    let checkin = api.check_in(Some("  ")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(checkin.id, "c1");
  }
}
