use tokio_util::sync::CancellationToken;

use crate::error::ApiError;
use crate::periodization::PeriodizationReport;
use super::{cancellable, Session};

pub const LOAD_ERROR: &str = "Erro ao carregar periodizacao";

/// Fetch workouts, sessions and routines together and derive the weekly
/// periodization. Trainers pass the student to inspect; without one the
/// first student on their list is used, and an empty list gives an empty
/// report.
pub async fn load_periodization(
  session: &Session,
  student_id: Option<&str>,
  cancel: &CancellationToken,
) -> Result<PeriodizationReport, ApiError> {
  let scope = match session.student_scope(student_id) {
    Some(id) => Some(id.to_string()),
    None if session.is_personal() => {
      let students = cancellable(cancel, session.api.list_students()).await?;
      match students.into_iter().next() {
        Some(first) => {
          tracing::debug!(student = %first.id, "No student given, using the first one");
          Some(first.id)
        }
        None => return Ok(PeriodizationReport::build(&[], &[], &[])),
      }
    }
    None => None,
  };
  let scope = scope.as_deref();
  let api = &session.api;

  let (workouts, sessions, routines) = cancellable(cancel, async {
    tokio::try_join!(
      api.list_workouts(scope),
      api.list_sessions(scope, None),
      api.list_routines(scope),
    )
  })
  .await?;

  tracing::debug!(
    workouts = workouts.len(),
    sessions = sessions.len(),
    routines = routines.len(),
    "Periodization data loaded"
  );

  Ok(PeriodizationReport::build(&workouts, &sessions, &routines))
}
