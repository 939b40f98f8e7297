use crate::error::ApiError;
use crate::models::library::{CategoryList, LibraryExercise, NewLibraryExercise};
use super::{segment, Ack, ApiClient};

impl ApiClient {
  pub async fn exercise_categories(&self) -> Result<Vec<String>, ApiError> {
    let list: CategoryList = self.get_json("/exercise-library/categories", &[]).await?;
    Ok(list.categories)
  }

  /// Library entries, optionally narrowed by category and a name search
  pub async fn search_exercises(
    &self,
    category: Option<&str>,
    search: Option<&str>,
  ) -> Result<Vec<LibraryExercise>, ApiError> {
    self
      .get_json("/exercise-library", &[("category", category), ("search", search)])
      .await
  }

  pub async fn create_library_exercise(
    &self,
    exercise: &NewLibraryExercise,
  ) -> Result<LibraryExercise, ApiError> {
    if exercise.name.trim().is_empty() || exercise.category.trim().is_empty() {
      return Err(ApiError::Validation("Preencha nome e categoria".into()));
    }
    self.post_json("/exercise-library", &[], exercise).await
  }

  pub async fn delete_library_exercise(&self, exercise_id: &str) -> Result<Ack, ApiError> {
    self
      .delete(&format!("/exercise-library/{}", segment(exercise_id)))
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::AppConfig;

  #[tokio::test]
  async fn test_categories_unwraps_envelope() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
      .mock("GET", "/exercise-library/categories")
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(r#"{"categories": ["Peito", "Costas"]}"#)
      .create_async()
      .await;

    let api = ApiClient::new(&AppConfig::for_base_url(&server.url()))
      .unwrap()
      .with_token("t");
    assert_eq!(api.exercise_categories().await.unwrap(), vec!["Peito", "Costas"]);
  }
}
