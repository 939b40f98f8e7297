//! Local SQLite store for the logged-in session

use std::path::Path;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::ApiError;
use crate::models::User;

pub type DbPool = SqlitePool;

/// Token and user persisted between runs
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
  pub access_token: String,
  pub user: User,
  pub saved_at: DateTime<Utc>,
}

/// Open (creating if needed) the database file and run migrations
pub async fn initialize_db(db_path: &Path) -> Result<DbPool, ApiError> {
  if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)?;
  }

  tracing::info!(path = %db_path.display(), "Initializing database");

  let options = SqliteConnectOptions::new()
    .filename(db_path)
    .create_if_missing(true);

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect_with(options)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::debug!("Database initialized");
  Ok(pool)
}

pub async fn save_session(db: &DbPool, access_token: &str, user: &User) -> Result<(), ApiError> {
  let user_json = serde_json::to_string(user)?;

  sqlx::query(
    r#"
    INSERT INTO auth_session (id, access_token, user_json, saved_at)
    VALUES (1, ?1, ?2, ?3)
    ON CONFLICT(id) DO UPDATE SET
      access_token = excluded.access_token,
      user_json = excluded.user_json,
      saved_at = excluded.saved_at
    "#,
  )
  .bind(access_token)
  .bind(user_json)
  .bind(Utc::now())
  .execute(db)
  .await?;

  Ok(())
}

/// The stored session, if any. A row whose user JSON no longer parses is
/// treated as logged out.
pub async fn load_session(db: &DbPool) -> Result<Option<StoredSession>, ApiError> {
  let row: Option<(String, String, DateTime<Utc>)> = sqlx::query_as(
    "SELECT access_token, user_json, saved_at FROM auth_session WHERE id = 1",
  )
  .fetch_optional(db)
  .await?;

  let Some((access_token, user_json, saved_at)) = row else {
    return Ok(None);
  };

  match serde_json::from_str::<User>(&user_json) {
    Ok(user) => Ok(Some(StoredSession {
      access_token,
      user,
      saved_at,
    })),
    Err(e) => {
      tracing::warn!(error = %e, "Discarding unreadable stored session");
      Ok(None)
    }
  }
}

pub async fn clear_session(db: &DbPool) -> Result<(), ApiError> {
  sqlx::query("DELETE FROM auth_session").execute(db).await?;
  Ok(())
}
