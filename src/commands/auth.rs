use tokio_util::sync::CancellationToken;

use crate::db;
use crate::error::ApiError;
use crate::models::User;
use super::{cancellable, AppState, Session};

pub const LOGIN_ERROR: &str = "Erro ao fazer login";

/// ---------------------------------------------------------------------------
/// Login / Logout
/// ---------------------------------------------------------------------------

/// Authenticate and persist the session for later runs
pub async fn login(
  state: &AppState,
  email: &str,
  password: &str,
  cancel: &CancellationToken,
) -> Result<Session, ApiError> {
  if email.trim().is_empty() || password.is_empty() {
    return Err(ApiError::Validation("Informe email e senha".into()));
  }

  let token = cancellable(cancel, state.api.login(email, password)).await?;
  db::save_session(&state.db, &token.access_token, &token.user).await?;

  tracing::info!(user = %token.user.email, role = %token.user.role, "Logged in");
  Ok(Session::new(state, &token.access_token, token.user))
}

pub async fn logout(state: &AppState) -> Result<(), ApiError> {
  db::clear_session(&state.db).await?;
  tracing::info!("Logged out");
  Ok(())
}

/// ---------------------------------------------------------------------------
/// Stored Session
/// ---------------------------------------------------------------------------

pub async fn restore_session(state: &AppState) -> Result<Option<Session>, ApiError> {
  Ok(
    db::load_session(&state.db)
      .await?
      .map(|stored| Session::new(state, &stored.access_token, stored.user)),
  )
}

pub async fn require_session(state: &AppState) -> Result<Session, ApiError> {
  restore_session(state).await?.ok_or(ApiError::NotAuthenticated)
}

/// Ask the server who the token belongs to. An expired token clears the
/// stored session.
pub async fn current_user(
  state: &AppState,
  session: &Session,
  cancel: &CancellationToken,
) -> Result<User, ApiError> {
  match cancellable(cancel, session.api.me()).await {
    Err(ApiError::NotAuthenticated) => {
      tracing::warn!("Stored token rejected; clearing session");
      db::clear_session(&state.db).await?;
      Err(ApiError::NotAuthenticated)
    }
    other => other,
  }
}
