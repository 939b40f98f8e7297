use crate::error::ApiError;
use crate::models::assessment::{Assessment, AssessmentComparison, NewAssessment};
use super::{segment, Ack, ApiClient};

impl ApiClient {
  pub async fn list_assessments(&self, student_id: Option<&str>) -> Result<Vec<Assessment>, ApiError> {
    self.get_json("/assessments", &[("student_id", student_id)]).await
  }

  pub async fn create_assessment(&self, assessment: &NewAssessment) -> Result<Assessment, ApiError> {
    if assessment.student_id.is_empty() || assessment.date.is_empty() {
      return Err(ApiError::Validation("Selecione o aluno e a data".into()));
    }
    self.post_json("/assessments", &[], assessment).await
  }

  pub async fn delete_assessment(&self, assessment_id: &str) -> Result<Ack, ApiError> {
    self
      .delete(&format!("/assessments/{}", segment(assessment_id)))
      .await
  }

  /// First vs latest assessment of a student
  pub async fn compare_assessments(&self, student_id: &str) -> Result<AssessmentComparison, ApiError> {
    self
      .get_json(&format!("/assessments/compare/{}", segment(student_id)), &[])
      .await
  }
}
