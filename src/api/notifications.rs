use serde_json::json;

use crate::error::ApiError;
use crate::models::Notification;
use super::{segment, Ack, ApiClient};

impl ApiClient {
  pub async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError> {
    self.get_json("/notifications", &[]).await
  }

  pub async fn mark_notification_read(&self, notification_id: &str) -> Result<Ack, ApiError> {
    self
      .put_json(&format!("/notifications/{}/read", segment(notification_id)), &json!({}))
      .await
  }

  pub async fn mark_all_notifications_read(&self) -> Result<Ack, ApiError> {
    self.put_json("/notifications/read-all", &json!({})).await
  }
}
