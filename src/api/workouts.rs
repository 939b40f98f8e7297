use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::error::ApiError;
use crate::models::media::UploadedImage;
use crate::models::workout::{ExerciseImageUpdate, NewWorkout, UploadedWorkout};
use crate::models::Workout;
use super::photos::is_image_file;
use super::{decode, segment, Ack, ApiClient};

const UPLOAD_EXTENSIONS: [&str; 3] = [".csv", ".xls", ".xlsx"];

/// Whether the server will accept this spreadsheet for parsing
pub fn is_accepted_upload(file_name: &str) -> bool {
  let lower = file_name.to_lowercase();
  UPLOAD_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

impl ApiClient {
  /// Workouts visible to the caller; personal trainers may filter by student
  pub async fn list_workouts(&self, student_id: Option<&str>) -> Result<Vec<Workout>, ApiError> {
    self.get_json("/workouts", &[("student_id", student_id)]).await
  }

  pub async fn get_workout(&self, workout_id: &str) -> Result<Workout, ApiError> {
    self
      .get_json(&format!("/workouts/{}", segment(workout_id)), &[])
      .await
  }

  pub async fn create_workout(&self, workout: &NewWorkout) -> Result<Workout, ApiError> {
    self.post_json("/workouts", &[], workout).await
  }

  /// Upload a spreadsheet the server turns into a workout.
  /// The extension is checked here so bad files never leave the machine.
  pub async fn upload_workout(
    &self,
    file_name: &str,
    bytes: Vec<u8>,
    student_id: Option<&str>,
  ) -> Result<UploadedWorkout, ApiError> {
    if !is_accepted_upload(file_name) {
      return Err(ApiError::Validation(
        "Apenas arquivos .csv, .xls ou .xlsx são aceitos".into(),
      ));
    }

    let mut form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
    if let Some(student_id) = student_id.filter(|s| !s.is_empty()) {
      form = form.text("student_id", student_id.to_string());
    }

    let path = "/workouts/upload";
    let url = self.url(path, &[])?;
    tracing::info!(file = file_name, "Uploading workout spreadsheet");
    let response = self
      .send(self.request(Method::POST, url).multipart(form))
      .await?;
    decode(response, path).await
  }

  /// Read a spreadsheet from disk and upload it
  pub async fn upload_workout_file(
    &self,
    path: &Path,
    student_id: Option<&str>,
  ) -> Result<UploadedWorkout, ApiError> {
    let file_name = path
      .file_name()
      .and_then(|n| n.to_str())
      .unwrap_or_default()
      .to_string();

    if !is_accepted_upload(&file_name) {
      return Err(ApiError::Validation(
        "Apenas arquivos .csv, .xls ou .xlsx são aceitos".into(),
      ));
    }

    let bytes = tokio::fs::read(path).await?;
    self.upload_workout(&file_name, bytes, student_id).await
  }

  pub async fn assign_workout(&self, workout_id: &str, student_id: &str) -> Result<Ack, ApiError> {
    if student_id.is_empty() {
      return Err(ApiError::Validation("Selecione um aluno".into()));
    }
    self
      .post_json(
        &format!("/workouts/{}/assign", segment(workout_id)),
        &[("student_id", Some(student_id))],
        &serde_json::json!({}),
      )
      .await
  }

  pub async fn update_exercise_image(&self, update: &ExerciseImageUpdate) -> Result<Ack, ApiError> {
    if update.image_url.trim().is_empty() {
      return Err(ApiError::Validation("Informe a URL da imagem".into()));
    }
    self
      .put_json(
        &format!("/workouts/{}/exercise-image", segment(&update.workout_id)),
        update,
      )
      .await
  }

  /// Upload an image file for one exercise of a workout; returns where the
  /// server stored it.
  pub async fn upload_exercise_image(
    &self,
    workout_id: &str,
    day_index: usize,
    exercise_index: usize,
    file_name: &str,
    bytes: Vec<u8>,
  ) -> Result<UploadedImage, ApiError> {
    if !is_image_file(file_name) {
      return Err(ApiError::Validation("Apenas imagens são aceitas".into()));
    }

    let form = Form::new()
      .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
      .text("day_index", day_index.to_string())
      .text("exercise_index", exercise_index.to_string());

    let path = format!("/workouts/{}/upload-image", segment(workout_id));
    let url = self.url(&path, &[])?;
    let response = self
      .send(self.request(Method::POST, url).multipart(form))
      .await?;
    decode(response, &path).await
  }

  pub async fn delete_workout(&self, workout_id: &str) -> Result<Ack, ApiError> {
    self.delete(&format!("/workouts/{}", segment(workout_id))).await
  }
}
