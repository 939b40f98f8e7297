use serde::{Deserialize, Serialize};

/// Progress photo of a student, as listed by `GET /evolution-photos/{student}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvolutionPhoto {
  pub id: String,
  pub student_id: String,
  /// Absolute, or relative to the server origin
  pub photo_url: String,
  /// `YYYY-MM-DD`
  pub date: String,
  #[serde(default)]
  pub notes: Option<String>,
  #[serde(default)]
  pub created_at: Option<String>,
}

/// Fields sent alongside the image on `POST /evolution-photos`
#[derive(Debug, Clone)]
pub struct NewEvolutionPhoto {
  pub student_id: String,
  pub date: String,
  pub notes: Option<String>,
  pub file_name: String,
  pub bytes: Vec<u8>,
}

/// Response of `POST /workouts/{id}/upload-image`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadedImage {
  pub image_url: String,
}
