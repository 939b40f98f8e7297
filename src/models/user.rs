use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
  Personal,
  Student,
  Admin,
}

impl std::fmt::Display for Role {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Personal => write!(f, "personal"),
      Self::Student => write!(f, "student"),
      Self::Admin => write!(f, "admin"),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
  pub id: String,
  pub email: String,
  pub name: String,
  pub role: Role,
  #[serde(default)]
  pub personal_id: Option<String>,
  #[serde(default)]
  pub phone: Option<String>,
  #[serde(default)]
  pub notes: Option<String>,
  pub created_at: String,
}

impl User {
  pub fn is_personal(&self) -> bool {
    self.role == Role::Personal
  }
}

/// Personal trainer account waiting for admin approval
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingPersonal {
  pub id: String,
  pub name: String,
  pub email: String,
  #[serde(default)]
  pub created_at: Option<String>,
}

/// Response from the login/register endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
  pub access_token: String,
  #[allow(dead_code)]
  #[serde(default)]
  pub token_type: Option<String>,
  pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
  pub email: String,
  pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
  pub email: String,
  pub name: String,
  pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
  pub email: String,
  pub name: String,
  pub password: String,
  pub phone: Option<String>,
  pub notes: Option<String>,
}

/// Partial update; `None` fields are left untouched by the server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
}
