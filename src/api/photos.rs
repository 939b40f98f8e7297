use reqwest::multipart::{Form, Part};
use reqwest::Method;
use url::Url;

use crate::error::ApiError;
use crate::models::media::{EvolutionPhoto, NewEvolutionPhoto};
use super::{decode, segment, Ack, ApiClient};

const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".webp", ".heic"];

/// Whether the file name looks like an image the server will store
pub fn is_image_file(file_name: &str) -> bool {
  let lower = file_name.to_lowercase();
  IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

impl ApiClient {
  pub async fn list_evolution_photos(&self, student_id: &str) -> Result<Vec<EvolutionPhoto>, ApiError> {
    self
      .get_json(&format!("/evolution-photos/{}", segment(student_id)), &[])
      .await
  }

  pub async fn upload_evolution_photo(&self, photo: NewEvolutionPhoto) -> Result<EvolutionPhoto, ApiError> {
    if photo.bytes.is_empty() {
      return Err(ApiError::Validation("Selecione uma imagem".into()));
    }
    if !is_image_file(&photo.file_name) {
      return Err(ApiError::Validation("Apenas imagens são aceitas".into()));
    }

    let form = Form::new()
      .text("student_id", photo.student_id)
      .text("date", photo.date)
      .text("notes", photo.notes.unwrap_or_default())
      .part("file", Part::bytes(photo.bytes).file_name(photo.file_name.clone()));

    let path = "/evolution-photos";
    let url = self.url(path, &[])?;
    tracing::info!(file = %photo.file_name, "Uploading evolution photo");
    let response = self
      .send(self.request(Method::POST, url).multipart(form))
      .await?;
    decode(response, path).await
  }

  pub async fn delete_evolution_photo(&self, photo_id: &str) -> Result<Ack, ApiError> {
    self
      .delete(&format!("/evolution-photos/{}", segment(photo_id)))
      .await
  }

  /// Absolute URL for a stored media path. Relative paths hang off the
  /// server origin, not the API prefix.
  pub fn media_url(&self, path: &str) -> String {
    if path.is_empty() || path.starts_with("http://") || path.starts_with("https://") {
      return path.to_string();
    }
    Url::parse(&self.base_url)
      .and_then(|base| base.join(path))
      .map(|url| url.to_string())
      .unwrap_or_else(|_| path.to_string())
  }
}
