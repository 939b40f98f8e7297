use futures::Stream;
use tokio_util::sync::CancellationToken;

use crate::chat::subscribe_messages;
use crate::error::ApiError;
use crate::models::{ChatMessage, Conversation};
use super::{cancellable, AppState, Session};

pub const LOAD_ERROR: &str = "Erro ao carregar mensagens";
pub const SEND_ERROR: &str = "Erro ao enviar mensagem";

pub async fn conversations(session: &Session, cancel: &CancellationToken) -> Result<Vec<Conversation>, ApiError> {
  cancellable(cancel, session.api.list_conversations()).await
}

/// Live message list with `peer_id`, polled at the configured interval
pub fn watch_conversation(
  state: &AppState,
  session: &Session,
  peer_id: &str,
  cancel: CancellationToken,
) -> impl Stream<Item = Result<Vec<ChatMessage>, ApiError>> {
  subscribe_messages(
    session.api.clone(),
    peer_id.to_string(),
    state.config.chat_poll_interval,
    cancel,
  )
}

pub async fn send(
  session: &Session,
  peer_id: &str,
  content: &str,
  cancel: &CancellationToken,
) -> Result<ChatMessage, ApiError> {
  cancellable(cancel, session.api.send_message(peer_id, content)).await
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::commands::tests::{test_session, test_state};
  use crate::models::Role;
  use futures::StreamExt;

  #[tokio::test]
  async fn test_watch_conversation_yields_history() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
      .mock("GET", "/chat/messages/s1")
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(
        r#"[{"id": "m1", "sender_id": "s1", "receiver_id": "p1", "content": "Bom dia", "created_at": "2024-01-01T08:00:00"}]"#,
      )
      .create_async()
      .await;

    let state = test_state(&server.url()).await;
    let session = test_session(&server.url(), Role::Personal);
    let cancel = CancellationToken::new();

    let stream = watch_conversation(&state, &session, "s1", cancel.clone());
    futures::pin_mut!(stream);
    let history = stream.next().await.unwrap().unwrap();
    assert_eq!(history[0].content, "Bom dia");

    cancel.cancel();
    assert!(stream.next().await.is_none());
  }
}
