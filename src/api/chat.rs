use crate::error::ApiError;
use crate::models::messaging::OutgoingMessage;
use crate::models::{ChatMessage, Conversation};
use super::{segment, ApiClient};

impl ApiClient {
  pub async fn list_conversations(&self) -> Result<Vec<Conversation>, ApiError> {
    self.get_json("/chat/conversations", &[]).await
  }

  /// Full history with one peer, oldest first
  pub async fn list_messages(&self, peer_id: &str) -> Result<Vec<ChatMessage>, ApiError> {
    self
      .get_json(&format!("/chat/messages/{}", segment(peer_id)), &[])
      .await
  }

  pub async fn send_message(&self, peer_id: &str, content: &str) -> Result<ChatMessage, ApiError> {
    let content = content.trim();
    if content.is_empty() {
      return Err(ApiError::Validation("Digite uma mensagem".into()));
    }
    let body = OutgoingMessage {
      receiver_id: peer_id.to_string(),
      content: content.to_string(),
    };
    self.post_json("/chat/messages", &[], &body).await
  }
}
