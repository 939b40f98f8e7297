use serde::Serialize;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

pub const NOT_AUTHENTICATED_MESSAGE: &str = "Sessão não encontrada ou expirada. Faça login para continuar";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("API error {status}: {detail}")]
  Api { status: u16, detail: String },

  #[error("Not authenticated")]
  NotAuthenticated,

  #[error("{0}")]
  Validation(String),

  #[error("Request cancelled")]
  Cancelled,

  #[error("Database error: {0}")]
  Database(String),

  #[error("Parse error: {0}")]
  Parse(String),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}

impl ApiError {
  /// Message meant for the person using the app.
  ///
  /// The server's `detail` and client-side validation text are shown as-is,
  /// a missing or rejected session asks for a new login, and everything else
  /// collapses into the caller's generic message
  /// (e.g. "Erro ao carregar alunos").
  pub fn user_message(&self, fallback: &str) -> String {
    match self {
      ApiError::Api { detail, .. } if !detail.is_empty() => detail.clone(),
      ApiError::Validation(msg) => msg.clone(),
      ApiError::NotAuthenticated => NOT_AUTHENTICATED_MESSAGE.to_string(),
      _ => fallback.to_string(),
    }
  }

  pub fn is_cancelled(&self) -> bool {
    matches!(self, ApiError::Cancelled)
  }
}

impl From<sqlx::Error> for ApiError {
  fn from(e: sqlx::Error) -> Self {
    ApiError::Database(e.to_string())
  }
}

impl From<sqlx::migrate::MigrateError> for ApiError {
  fn from(e: sqlx::migrate::MigrateError) -> Self {
    ApiError::Database(e.to_string())
  }
}

impl From<serde_json::Error> for ApiError {
  fn from(e: serde_json::Error) -> Self {
    ApiError::Parse(e.to_string())
  }
}

impl From<csv::Error> for ApiError {
  fn from(e: csv::Error) -> Self {
    ApiError::Io(std::io::Error::other(e.to_string()))
  }
}

impl Serialize for ApiError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}
