use crate::error::ApiError;
use crate::models::stats::{PersonalStats, StudentStats};
use super::ApiClient;

impl ApiClient {
  pub async fn personal_stats(&self) -> Result<PersonalStats, ApiError> {
    self.get_json("/stats/personal", &[]).await
  }

  pub async fn student_stats(&self) -> Result<StudentStats, ApiError> {
    self.get_json("/stats/student", &[]).await
  }
}
