use crate::error::ApiError;
use crate::models::user::{NewStudent, StudentUpdate};
use crate::models::User;
use super::{segment, Ack, ApiClient};

impl ApiClient {
  /// Students of the logged-in personal trainer
  pub async fn list_students(&self) -> Result<Vec<User>, ApiError> {
    self.get_json("/students", &[]).await
  }

  pub async fn get_student(&self, student_id: &str) -> Result<User, ApiError> {
    self
      .get_json(&format!("/students/{}", segment(student_id)), &[])
      .await
  }

  pub async fn create_student(&self, student: &NewStudent) -> Result<User, ApiError> {
    if student.name.trim().is_empty() || student.email.trim().is_empty() || student.password.is_empty() {
      return Err(ApiError::Validation("Preencha os campos obrigatórios".into()));
    }
    self.post_json("/students", &[], student).await
  }

  pub async fn update_student(&self, student_id: &str, update: &StudentUpdate) -> Result<User, ApiError> {
    self
      .put_json(&format!("/students/{}", segment(student_id)), update)
      .await
  }

  pub async fn delete_student(&self, student_id: &str) -> Result<Ack, ApiError> {
    self.delete(&format!("/students/{}", segment(student_id))).await
  }
}
