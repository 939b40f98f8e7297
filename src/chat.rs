//! Live view of a conversation
//!
//! The API has no push channel, so the message list is polled. Each poll
//! yields the full history; consumers replace their state with it.

use std::time::Duration;

use futures::Stream;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::ChatMessage;

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Poll the conversation with `peer_id` every `interval` until `cancel` fires.
///
/// The first snapshot is fetched immediately. A snapshot identical to the
/// previous one is not yielded again. Failed polls are yielded as errors and
/// polling continues.
pub fn subscribe_messages(
  api: ApiClient,
  peer_id: String,
  interval: Duration,
  cancel: CancellationToken,
) -> impl Stream<Item = Result<Vec<ChatMessage>, ApiError>> {
  async_stream::stream! {
    let mut ticker = tokio::time::interval(interval.max(MIN_POLL_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last: Option<Vec<ChatMessage>> = None;

    tracing::debug!(peer = %peer_id, "Chat subscription started");

    loop {
      tokio::select! {
        biased;
        _ = cancel.cancelled() => break,
        _ = ticker.tick() => {}
      }

      let fetched = tokio::select! {
        biased;
        _ = cancel.cancelled() => break,
        result = api.list_messages(&peer_id) => result,
      };

      match fetched {
        Ok(messages) => {
          if last.as_ref() != Some(&messages) {
            last = Some(messages.clone());
            yield Ok(messages);
          }
        }
        Err(e) => {
          tracing::warn!(peer = %peer_id, error = %e, "Chat poll failed");
          yield Err(e);
        }
      }
    }

    tracing::debug!(peer = %peer_id, "Chat subscription ended");
  }
}

/// Messages from `peer_id` the current user has not read yet
pub fn unread_from(messages: &[ChatMessage], peer_id: &str) -> usize {
  messages
    .iter()
    .filter(|m| m.sender_id == peer_id && !m.read)
    .count()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::mock_api;
  use futures::StreamExt;

  const POLL: Duration = Duration::from_millis(50);

  fn message_json(id: &str, content: &str) -> String {
    format!(
      r#"{{"id": "{}", "sender_id": "u2", "receiver_id": "u1", "content": "{}", "created_at": "2024-01-01T10:00:00"}}"#,
      id, content
    )
  }

  #[tokio::test]
  async fn test_identical_snapshots_are_not_repeated() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("GET", "/chat/messages/u2")
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(format!("[{}]", message_json("m1", "oi")))
      .expect_at_least(2)
      .create_async()
      .await;

    let cancel = CancellationToken::new();
    let stream = subscribe_messages(mock_api(&server.url()), "u2".into(), POLL, cancel.clone());
    futures::pin_mut!(stream);

    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].content, "oi");

    // Several polls happen, none of them new
    let next = tokio::time::timeout(Duration::from_millis(300), stream.next()).await;
    assert!(next.is_err());
    mock.assert_async().await;

    cancel.cancel();
    assert!(stream.next().await.is_none());
  }

  #[tokio::test]
  async fn test_new_messages_replace_snapshot() {
    let mut server = mockito::Server::new_async().await;
    let first_mock = server
      .mock("GET", "/chat/messages/u2")
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(format!("[{}]", message_json("m1", "oi")))
      .create_async()
      .await;

    let cancel = CancellationToken::new();
    let stream = subscribe_messages(mock_api(&server.url()), "u2".into(), POLL, cancel.clone());
    futures::pin_mut!(stream);

    assert_eq!(stream.next().await.unwrap().unwrap().len(), 1);

    first_mock.remove_async().await;
    let _second = server
      .mock("GET", "/chat/messages/u2")
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(format!(
        "[{}, {}]",
        message_json("m1", "oi"),
        message_json("m2", "tudo bem?")
      ))
      .create_async()
      .await;

    // A poll may land between the two mocks; skip those failures
    let snapshot = tokio::time::timeout(Duration::from_secs(5), async {
      loop {
        if let Some(Ok(messages)) = stream.next().await {
          return messages;
        }
      }
    })
    .await
    .expect("updated snapshot");
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[1].id, "m2");
    assert_eq!(unread_from(&snapshot, "u2"), 2);

    cancel.cancel();
  }

  #[tokio::test]
  async fn test_errors_do_not_end_the_stream() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
      .mock("GET", "/chat/messages/u2")
      .with_status(500)
      .create_async()
      .await;

    let cancel = CancellationToken::new();
    let stream = subscribe_messages(mock_api(&server.url()), "u2".into(), POLL, cancel.clone());
    futures::pin_mut!(stream);

    assert!(stream.next().await.unwrap().is_err());
    assert!(stream.next().await.unwrap().is_err());

    cancel.cancel();
    assert!(stream.next().await.is_none());
  }

  #[tokio::test]
  async fn test_cancelled_before_first_poll_yields_nothing() {
    let server = mockito::Server::new_async().await;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let stream = subscribe_messages(mock_api(&server.url()), "u2".into(), POLL, cancel);
    futures::pin_mut!(stream);
    assert!(stream.next().await.is_none());
  }
}
