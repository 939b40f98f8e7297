use crate::error::ApiError;
use crate::models::user::{LoginRequest, RegisterRequest, TokenResponse};
use crate::models::User;
use super::ApiClient;

/// ---------------------------------------------------------------------------
/// Authentication
/// ---------------------------------------------------------------------------

impl ApiClient {
  /// Exchange credentials for a bearer token.
  /// A rejected login keeps the server's message ("Email ou senha incorretos").
  pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
    let body = LoginRequest {
      email: email.trim().to_string(),
      password: password.to_string(),
    };
    self.post_json("/auth/login", &[], &body).await
  }

  /// Self-registration of a personal trainer account
  pub async fn register(&self, request: &RegisterRequest) -> Result<TokenResponse, ApiError> {
    self.post_json("/auth/register", &[], request).await
  }

  pub async fn me(&self) -> Result<User, ApiError> {
    self.get_json("/auth/me", &[]).await
  }
}

#[cfg(test)]
mod tests {
  use crate::api::ApiClient;
  use crate::config::AppConfig;
  use crate::error::ApiError;
  use crate::models::Role;

  #[tokio::test]
  async fn test_login_returns_token_and_user() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("POST", "/auth/login")
      .match_body(mockito::Matcher::PartialJsonString(
        r#"{"email": "ana@example.com"}"#.to_string(),
      ))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(
        r#"{
          "access_token": "jwt-123",
          "token_type": "bearer",
          "user": {
            "id": "u1", "email": "ana@example.com", "name": "Ana",
            "role": "personal", "created_at": "2024-01-01T00:00:00+00:00"
          }
        }"#,
      )
      .create_async()
      .await;

    let api = ApiClient::new(&AppConfig::for_base_url(&server.url())).unwrap();
    let token = api.login(" ana@example.com ", "secret").await.unwrap();

    mock.assert_async().await;
    assert_eq!(token.access_token, "jwt-123");
    assert_eq!(token.user.role, Role::Personal);
  }

  #[tokio::test]
  async fn test_rejected_login_keeps_server_detail() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
      .mock("POST", "/auth/login")
      .with_status(401)
      .with_header("content-type", "application/json")
      .with_body(r#"{"detail": "Email ou senha incorretos"}"#)
      .create_async()
      .await;

    let api = ApiClient::new(&AppConfig::for_base_url(&server.url())).unwrap();
    let err = api.login("ana@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.user_message("Erro ao fazer login"), "Email ou senha incorretos");
    assert!(matches!(err, ApiError::Api { status: 401, .. }));
  }
}
