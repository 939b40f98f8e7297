//! Rest countdown between sets
//!
//! One countdown per timer. Each running phase owns a spawned task that ticks
//! once per second; starting, pausing or resetting bumps the generation so a
//! tick from an older phase can never touch the current state.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TimerState {
  Idle,
  Running { remaining: u32 },
  Paused { remaining: u32 },
  Expired,
}

impl TimerState {
  pub fn remaining(&self) -> u32 {
    match self {
      Self::Running { remaining } | Self::Paused { remaining } => *remaining,
      Self::Idle | Self::Expired => 0,
    }
  }

  pub fn is_running(&self) -> bool {
    matches!(self, Self::Running { .. })
  }
}

impl fmt::Display for TimerState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Idle => write!(f, "idle"),
      Self::Running { .. } => write!(f, "running"),
      Self::Paused { .. } => write!(f, "paused"),
      Self::Expired => write!(f, "expired"),
    }
  }
}

/// `mm:ss`
pub fn format_clock(seconds: u32) -> String {
  format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimerError {
  #[error("Cannot {action} a timer that is {state}")]
  InvalidTransition { action: &'static str, state: TimerState },

  #[error("Rest duration must be at least one second")]
  ZeroDuration,
}

/// Told when a countdown reaches zero
pub trait RestNotifier: Send + Sync + 'static {
  fn rest_finished(&self);
}

/// Default notifier: a log line
#[derive(Debug, Default)]
pub struct LogNotifier;

impl RestNotifier for LogNotifier {
  fn rest_finished(&self) {
    tracing::info!("Descanso finalizado!");
  }
}

struct Inner {
  generation: u64,
  state: TimerState,
}

pub struct RestTimer {
  inner: Arc<Mutex<Inner>>,
  updates: Arc<watch::Sender<TimerState>>,
  notifier: Arc<dyn RestNotifier>,
  task: Option<JoinHandle<()>>,
}

impl RestTimer {
  pub fn new(notifier: Arc<dyn RestNotifier>) -> Self {
    let (updates, _) = watch::channel(TimerState::Idle);
    Self {
      inner: Arc::new(Mutex::new(Inner {
        generation: 0,
        state: TimerState::Idle,
      })),
      updates: Arc::new(updates),
      notifier,
      task: None,
    }
  }

  pub fn state(&self) -> TimerState {
    lock(&self.inner).state
  }

  /// Observe every state change, including each tick
  pub fn subscribe(&self) -> watch::Receiver<TimerState> {
    self.updates.subscribe()
  }

  /// Begin a countdown of `seconds`, replacing whatever was running
  pub fn start(&mut self, seconds: u32) -> Result<(), TimerError> {
    if seconds == 0 {
      return Err(TimerError::ZeroDuration);
    }
    let generation = self.transition(TimerState::Running { remaining: seconds });
    self.spawn_countdown(generation);
    tracing::debug!(seconds, "Rest timer started");
    Ok(())
  }

  pub fn pause(&mut self) -> Result<(), TimerError> {
    match self.state() {
      TimerState::Running { remaining } => {
        self.transition(TimerState::Paused { remaining });
        Ok(())
      }
      state => Err(TimerError::InvalidTransition { action: "pause", state }),
    }
  }

  pub fn resume(&mut self) -> Result<(), TimerError> {
    match self.state() {
      TimerState::Paused { remaining } => {
        let generation = self.transition(TimerState::Running { remaining });
        self.spawn_countdown(generation);
        Ok(())
      }
      state => Err(TimerError::InvalidTransition { action: "resume", state }),
    }
  }

  pub fn reset(&mut self) {
    self.transition(TimerState::Idle);
  }

  /// Cancel any running countdown, move to `next` and publish it.
  /// Returns the new generation.
  fn transition(&mut self, next: TimerState) -> u64 {
    if let Some(task) = self.task.take() {
      task.abort();
    }

    let mut inner = lock(&self.inner);
    inner.generation += 1;
    inner.state = next;
    self.updates.send_replace(next);
    inner.generation
  }

  fn spawn_countdown(&mut self, generation: u64) {
    let inner = Arc::clone(&self.inner);
    let updates = Arc::clone(&self.updates);
    let notifier = Arc::clone(&self.notifier);

    self.task = Some(tokio::spawn(async move {
      loop {
        tokio::time::sleep(TICK).await;

        let expired = {
          let mut guard = lock(&inner);
          if guard.generation != generation {
            return;
          }
          let TimerState::Running { remaining } = guard.state else {
            return;
          };

          let next = match remaining.saturating_sub(1) {
            0 => TimerState::Expired,
            left => TimerState::Running { remaining: left },
          };
          guard.state = next;
          updates.send_replace(next);
          next == TimerState::Expired
        };

        if expired {
          notifier.rest_finished();
          return;
        }
      }
    }));
  }
}

impl Drop for RestTimer {
  fn drop(&mut self) {
    if let Some(task) = self.task.take() {
      task.abort();
    }
  }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
  inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicUsize, Ordering};

  #[derive(Default)]
  struct CountingNotifier(AtomicUsize);

  impl RestNotifier for CountingNotifier {
    fn rest_finished(&self) {
      self.0.fetch_add(1, Ordering::SeqCst);
    }
  }

  fn timer() -> (RestTimer, Arc<CountingNotifier>) {
    let notifier = Arc::new(CountingNotifier::default());
    (RestTimer::new(notifier.clone()), notifier)
  }

  async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
  }

  #[tokio::test(start_paused = true)]
  async fn test_countdown_expires_and_notifies_once() {
    let (mut timer, notifier) = timer();
    timer.start(3).unwrap();
    assert_eq!(timer.state(), TimerState::Running { remaining: 3 });

    sleep_ms(1500).await;
    assert_eq!(timer.state(), TimerState::Running { remaining: 2 });

    sleep_ms(2000).await;
    assert_eq!(timer.state(), TimerState::Expired);

    sleep_ms(10_000).await;
    assert_eq!(notifier.0.load(Ordering::SeqCst), 1);
  }

  #[tokio::test(start_paused = true)]
  async fn test_restart_cancels_previous_countdown() {
    let (mut timer, notifier) = timer();
    timer.start(5).unwrap();
    sleep_ms(2500).await;
    assert_eq!(timer.state(), TimerState::Running { remaining: 3 });

    timer.start(10).unwrap();
    sleep_ms(5200).await;
    // The first countdown would have expired by now
    assert_eq!(timer.state(), TimerState::Running { remaining: 5 });
    assert_eq!(notifier.0.load(Ordering::SeqCst), 0);

    sleep_ms(5000).await;
    assert_eq!(timer.state(), TimerState::Expired);
    assert_eq!(notifier.0.load(Ordering::SeqCst), 1);
  }

  #[tokio::test(start_paused = true)]
  async fn test_pause_freezes_and_resume_continues() {
    let (mut timer, notifier) = timer();
    timer.start(5).unwrap();
    sleep_ms(2500).await;

    timer.pause().unwrap();
    assert_eq!(timer.state(), TimerState::Paused { remaining: 3 });

    sleep_ms(10_000).await;
    assert_eq!(timer.state(), TimerState::Paused { remaining: 3 });
    assert_eq!(notifier.0.load(Ordering::SeqCst), 0);

    timer.resume().unwrap();
    assert_eq!(timer.state(), TimerState::Running { remaining: 3 });
    sleep_ms(3500).await;
    assert_eq!(timer.state(), TimerState::Expired);
    assert_eq!(notifier.0.load(Ordering::SeqCst), 1);
  }

  #[tokio::test(start_paused = true)]
  async fn test_invalid_transitions_are_rejected() {
    let (mut timer, _) = timer();
    assert_eq!(
      timer.pause(),
      Err(TimerError::InvalidTransition {
        action: "pause",
        state: TimerState::Idle
      })
    );
    assert!(timer.resume().is_err());

    timer.start(2).unwrap();
    assert!(matches!(
      timer.resume(),
      Err(TimerError::InvalidTransition { action: "resume", .. })
    ));

    timer.pause().unwrap();
    assert!(timer.pause().is_err());
    assert_eq!(timer.start(0), Err(TimerError::ZeroDuration));
    assert_eq!(timer.state(), TimerState::Paused { remaining: 2 });
  }

  #[tokio::test(start_paused = true)]
  async fn test_start_from_expired_runs_again() {
    let (mut timer, notifier) = timer();
    timer.start(1).unwrap();
    sleep_ms(1500).await;
    assert_eq!(timer.state(), TimerState::Expired);

    timer.start(1).unwrap();
    sleep_ms(1500).await;
    assert_eq!(notifier.0.load(Ordering::SeqCst), 2);
  }

  #[tokio::test(start_paused = true)]
  async fn test_reset_and_drop_cancel_countdown() {
    let (mut timer, notifier) = timer();
    timer.start(2).unwrap();
    timer.reset();
    assert_eq!(timer.state(), TimerState::Idle);
    sleep_ms(5000).await;
    assert_eq!(notifier.0.load(Ordering::SeqCst), 0);

    timer.start(2).unwrap();
    drop(timer);
    sleep_ms(5000).await;
    assert_eq!(notifier.0.load(Ordering::SeqCst), 0);
  }

  #[tokio::test(start_paused = true)]
  async fn test_subscribers_see_ticks() {
    let (mut timer, _) = timer();
    let mut rx = timer.subscribe();
    timer.start(2).unwrap();
    assert_eq!(*rx.borrow_and_update(), TimerState::Running { remaining: 2 });

    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), TimerState::Running { remaining: 1 });
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), TimerState::Expired);
  }

  #[test]
  fn test_format_clock() {
    assert_eq!(format_clock(0), "00:00");
    assert_eq!(format_clock(90), "01:30");
    assert_eq!(format_clock(605), "10:05");
  }
}
