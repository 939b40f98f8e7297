use serde_json::json;

use crate::error::ApiError;
use crate::models::workout::NewRoutine;
use crate::models::Routine;
use super::{segment, Ack, ApiClient};

impl ApiClient {
  pub async fn list_routines(&self, student_id: Option<&str>) -> Result<Vec<Routine>, ApiError> {
    self.get_json("/routines", &[("student_id", student_id)]).await
  }

  pub async fn create_routine(&self, routine: &NewRoutine) -> Result<Routine, ApiError> {
    if routine.name.trim().is_empty() || routine.student_id.is_empty() || routine.start_date.is_empty() {
      return Err(ApiError::Validation("Preencha os campos obrigatórios".into()));
    }
    self.post_json("/routines", &[], routine).await
  }

  pub async fn archive_routine(&self, routine_id: &str) -> Result<Ack, ApiError> {
    self
      .put_json(
        &format!("/routines/{}", segment(routine_id)),
        &json!({ "status": "archived" }),
      )
      .await
  }

  /// Copy a routine and its workouts to another student
  pub async fn clone_routine(&self, routine_id: &str, student_id: &str) -> Result<Ack, ApiError> {
    if student_id.is_empty() {
      return Err(ApiError::Validation("Selecione o aluno destino".into()));
    }
    self
      .post_json(
        &format!("/routines/{}/clone", segment(routine_id)),
        &[("student_id", Some(student_id))],
        &json!({}),
      )
      .await
  }

  pub async fn delete_routine(&self, routine_id: &str) -> Result<Ack, ApiError> {
    self.delete(&format!("/routines/{}", segment(routine_id))).await
  }
}
