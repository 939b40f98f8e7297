use crate::error::ApiError;
use crate::models::user::PendingPersonal;
use super::{segment, Ack, ApiClient};

impl ApiClient {
  /// Personal trainer sign-ups awaiting approval (admins only)
  pub async fn pending_personals(&self) -> Result<Vec<PendingPersonal>, ApiError> {
    self.get_json("/admin/personals/pending", &[]).await
  }

  pub async fn approve_personal(&self, personal_id: &str) -> Result<Ack, ApiError> {
    self
      .post_json(
        &format!("/admin/personals/{}/approve", segment(personal_id)),
        &[],
        &serde_json::json!({}),
      )
      .await
  }
}
