use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api::sessions::SessionCompleted;
use crate::error::ApiError;
use crate::models::{CompleteSessionRequest, Exercise, ProgressRecord};
use crate::rest_timer::RestNotifier;
use crate::set_tracker::SetTracker;
use super::{cancellable, AppState, Session};

pub const SAVE_ERROR: &str = "Erro ao salvar progresso";
pub const COMPLETE_ERROR: &str = "Erro ao finalizar treino";

/// Tracker for one exercise, primed with the last logged session.
/// A failed history lookup still opens the tracker.
pub async fn open_tracker(
  state: &AppState,
  session: &Session,
  exercise: &Exercise,
  notifier: Arc<dyn RestNotifier>,
  cancel: &CancellationToken,
) -> Result<SetTracker, ApiError> {
  let mut tracker = SetTracker::new(exercise, state.config.default_rest_seconds, notifier);
  cancellable(cancel, async {
    tracker.load_previous(&session.api).await;
    Ok(())
  })
  .await?;
  Ok(tracker)
}

pub async fn save_sets(
  session: &Session,
  tracker: &SetTracker,
  workout_id: &str,
  cancel: &CancellationToken,
) -> Result<ProgressRecord, ApiError> {
  cancellable(cancel, tracker.save(&session.api, workout_id)).await
}

/// Close a workout day with the student's PSR/PSE feedback
pub async fn complete_workout(
  session: &Session,
  request: &CompleteSessionRequest,
  cancel: &CancellationToken,
) -> Result<SessionCompleted, ApiError> {
  let done = cancellable(cancel, session.api.complete_session(request)).await?;
  tracing::info!(
    workout = %request.workout_id,
    difficulty = request.difficulty,
    "Workout session completed"
  );
  Ok(done)
}
