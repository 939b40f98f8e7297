use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
  Info,
  Success,
  Warning,
  Workout,
  #[serde(other)]
  Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
  pub id: String,
  pub user_id: String,
  pub title: String,
  pub message: String,
  #[serde(rename = "type")]
  pub kind: NotificationKind,
  pub read: bool,
  pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
  pub user_id: String,
  pub user_name: String,
  #[serde(default)]
  pub last_message: Option<String>,
  #[serde(default)]
  pub unread_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
  pub id: String,
  pub sender_id: String,
  pub receiver_id: String,
  pub content: String,
  pub created_at: String,
  #[serde(default)]
  pub read: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutgoingMessage {
  pub receiver_id: String,
  pub content: String,
}
