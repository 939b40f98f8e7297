use tokio_util::sync::CancellationToken;

use crate::error::ApiError;
use crate::models::Notification;
use super::{cancellable, Session};

pub const LOAD_ERROR: &str = "Erro ao carregar notificações";

/// Newest first, plus how many are unread
pub async fn load_notifications(
  session: &Session,
  cancel: &CancellationToken,
) -> Result<(Vec<Notification>, usize), ApiError> {
  let notifications = cancellable(cancel, session.api.list_notifications()).await?;
  let unread = notifications.iter().filter(|n| !n.read).count();
  Ok((notifications, unread))
}

pub async fn mark_all_read(session: &Session, cancel: &CancellationToken) -> Result<(), ApiError> {
  cancellable(cancel, session.api.mark_all_notifications_read()).await?;
  Ok(())
}
