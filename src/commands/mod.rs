//! Application operations
//!
//! Every operation receives its context explicitly: `AppState` for process
//! wide resources and `Session` for the logged-in user. Network work takes a
//! `CancellationToken`; a cancelled operation resolves to
//! `ApiError::Cancelled` and its response is dropped.

pub mod auth;
pub mod chat;
pub mod notifications;
pub mod periodization;
pub mod report;
pub mod tracking;

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::db::{self, DbPool};
use crate::error::ApiError;
use crate::models::User;

/// Process-wide resources
pub struct AppState {
  pub config: AppConfig,
  pub db: DbPool,
  /// Unauthenticated client; sessions derive theirs from it
  pub api: ApiClient,
}

impl AppState {
  /// Open the local store and build the HTTP client
  pub async fn initialize(config: AppConfig) -> Result<Self, ApiError> {
    let db = db::initialize_db(&config.db_path).await?;
    let api = ApiClient::new(&config)?;
    Ok(Self { config, db, api })
  }
}

/// The logged-in user and a client carrying their token
#[derive(Debug, Clone)]
pub struct Session {
  pub user: User,
  pub api: ApiClient,
}

impl Session {
  pub fn new(state: &AppState, token: &str, user: User) -> Self {
    Self {
      user,
      api: state.api.with_token(token),
    }
  }

  pub fn is_personal(&self) -> bool {
    self.user.is_personal()
  }

  /// Student filter as the server expects it: trainers choose, students are
  /// always scoped to themselves server-side.
  pub fn student_scope<'a>(&self, student_id: Option<&'a str>) -> Option<&'a str> {
    if self.is_personal() {
      student_id.filter(|s| !s.is_empty())
    } else {
      None
    }
  }
}

/// Await `fut` unless `cancel` fires first
pub async fn cancellable<T, F>(cancel: &CancellationToken, fut: F) -> Result<T, ApiError>
where
  F: Future<Output = Result<T, ApiError>>,
{
  tokio::select! {
    biased;
    _ = cancel.cancelled() => Err(ApiError::Cancelled),
    result = fut => result,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::Role;
  use crate::test_utils::{mock_api, mock_user, setup_test_db};
  use std::time::Duration;

  pub(crate) async fn test_state(base_url: &str) -> AppState {
    AppState {
      config: AppConfig::for_base_url(base_url),
      db: setup_test_db().await,
      api: ApiClient::new(&AppConfig::for_base_url(base_url)).unwrap(),
    }
  }

  pub(crate) fn test_session(base_url: &str, role: Role) -> Session {
    Session {
      user: mock_user(if role == Role::Personal { "p1" } else { "s1" }, role),
      api: mock_api(base_url),
    }
  }

  #[tokio::test]
  async fn test_cancellable_prefers_cancellation() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let result: Result<(), ApiError> = cancellable(&cancel, async { Ok(()) }).await;
    assert!(matches!(result, Err(ApiError::Cancelled)));
  }

  #[tokio::test]
  async fn test_cancellable_drops_slow_work() {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
      tokio::time::sleep(Duration::from_millis(20)).await;
      trigger.cancel();
    });

    let result: Result<u32, ApiError> = cancellable(&cancel, async {
      tokio::time::sleep(Duration::from_secs(30)).await;
      Ok(1)
    })
    .await;
    assert!(result.unwrap_err().is_cancelled());
  }

  #[test]
  fn test_student_scope_depends_on_role() {
    let personal = test_session("http://localhost", Role::Personal);
    assert_eq!(personal.student_scope(Some("s1")), Some("s1"));
    assert_eq!(personal.student_scope(Some("")), None);

    let student = test_session("http://localhost", Role::Student);
    assert_eq!(student.student_scope(Some("s9")), None);
  }
}
