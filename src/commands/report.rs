use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::error::ApiError;
use crate::report::{build_student_report, save_report_csv, StudentReport};
use super::{cancellable, Session};

pub const REPORT_ERROR: &str = "Erro ao gerar relatório";

/// Student details, workouts and full progress history, fetched together
pub async fn generate_student_report(
  session: &Session,
  student_id: &str,
  cancel: &CancellationToken,
) -> Result<StudentReport, ApiError> {
  if !session.is_personal() {
    return Err(ApiError::Validation("Apenas personal trainers geram relatórios".into()));
  }

  let api = &session.api;
  let (student, workouts, progress) = cancellable(cancel, async {
    tokio::try_join!(
      api.get_student(student_id),
      api.list_workouts(Some(student_id)),
      api.list_progress(None, Some(student_id)),
    )
  })
  .await?;

  Ok(build_student_report(student, workouts, &progress, Utc::now()))
}

/// Generate and write the report; defaults to `{file_name}.csv` in `dir`
pub async fn export_student_report(
  session: &Session,
  student_id: &str,
  out: Option<PathBuf>,
  dir: &Path,
  cancel: &CancellationToken,
) -> Result<PathBuf, ApiError> {
  let report = generate_student_report(session, student_id, cancel).await?;
  let path = out.unwrap_or_else(|| dir.join(format!("{}.csv", report.file_name())));
  save_report_csv(&report, &path)?;
  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::commands::tests::test_session;
  use crate::models::Role;
  use mockito::Matcher;

  #[tokio::test]
  async fn test_students_cannot_generate_reports() {
    let session = test_session("http://127.0.0.1:9", Role::Student);
    let err = generate_student_report(&session, "s1", &CancellationToken::new())
      .await
      .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
  }

  #[tokio::test]
  async fn test_export_writes_csv_named_after_student() {
    let mut server = mockito::Server::new_async().await;
    let _student = server
      .mock("GET", "/students/s1")
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(
        r#"{"id": "s1", "email": "ana@example.com", "name": "Ana Souza", "role": "student",
            "personal_id": "p1", "created_at": "2024-01-01T00:00:00"}"#,
      )
      .create_async()
      .await;
    let _workouts = server
      .mock("GET", "/workouts")
      .match_query(Matcher::UrlEncoded("student_id".into(), "s1".into()))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body("[]")
      .create_async()
      .await;
    let _progress = server
      .mock("GET", "/progress")
      .match_query(Matcher::UrlEncoded("student_id".into(), "s1".into()))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(
        r#"[{"id": "p1", "student_id": "s1", "workout_id": "w1", "exercise_name": "Remada",
             "sets_completed": [{"set": 1, "weight": 40, "reps": 12}], "logged_at": "2024-01-03T10:00:00"}]"#,
      )
      .create_async()
      .await;

    let session = test_session(&server.url(), Role::Personal);
    let dir = std::env::temp_dir();
    let path = export_student_report(&session, "s1", None, &dir, &CancellationToken::new())
      .await
      .unwrap();

    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("relatorio_Ana_Souza_"));
    assert!(name.ends_with(".csv"));
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("Exercícios Diferentes,1\n"));
    let _ = std::fs::remove_file(&path);
  }
}
