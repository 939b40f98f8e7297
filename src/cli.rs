//! Command-line front end
//!
//! Thin layer over `commands`: parse arguments, run one operation, print the
//! result. Failures are reported with the same user-facing messages the
//! operations define.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::chat::unread_from;
use crate::commands::{self, AppState};
use crate::error::ApiError;
use crate::periodization::PeriodizationReport;
use crate::rest_timer::{format_clock, LogNotifier, RestTimer, TimerState};

#[derive(Debug, Parser)]
#[command(
  name = "trainer-desk",
  version,
  about = "Personal trainer client",
  long_about = "Log in to the trainer API, follow periodization, chat with students and export progress reports."
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,

  /// Enable debug logging
  #[arg(long, short = 'v', global = true)]
  pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Log in and remember the session
  Login {
    #[arg(long)]
    email: String,

    #[arg(long)]
    password: String,
  },

  /// Forget the stored session
  Logout,

  /// Show the logged-in user
  Whoami,

  /// Weekly periodization of completed sessions
  Periodization {
    /// Student to inspect (trainers only)
    #[arg(long)]
    student: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
  },

  /// List notifications
  Notifications {
    /// Mark every notification as read afterwards
    #[arg(long)]
    mark_read: bool,
  },

  /// List conversations
  Conversations,

  /// Follow a conversation until interrupted
  Chat {
    #[arg(long)]
    peer: String,

    /// Send this message before following
    #[arg(long)]
    send: Option<String>,
  },

  /// Export a student's progress report as CSV (trainers only)
  Report {
    #[arg(long)]
    student: String,

    /// Output file (defaults to the report name in the current directory)
    #[arg(long)]
    out: Option<PathBuf>,
  },

  /// Run a rest countdown
  Rest {
    /// Duration in seconds (defaults to TRAINER_REST_SECONDS)
    #[arg(long)]
    seconds: Option<u32>,
  },
}

impl Command {
  /// Message shown when the operation fails without a server detail
  pub fn fallback_message(&self) -> &'static str {
    match self {
      Command::Login { .. } => commands::auth::LOGIN_ERROR,
      Command::Logout | Command::Whoami => "Erro ao carregar sessão",
      Command::Periodization { .. } => commands::periodization::LOAD_ERROR,
      Command::Notifications { .. } => commands::notifications::LOAD_ERROR,
      Command::Conversations => commands::chat::LOAD_ERROR,
      Command::Chat { send: Some(_), .. } => commands::chat::SEND_ERROR,
      Command::Chat { .. } => commands::chat::LOAD_ERROR,
      Command::Report { .. } => commands::report::REPORT_ERROR,
      Command::Rest { .. } => "Erro no cronômetro",
    }
  }
}

/// Run one command to completion
pub async fn execute(command: Command, state: &AppState, cancel: CancellationToken) -> Result<(), ApiError> {
  match command {
    Command::Login { email, password } => {
      let session = commands::auth::login(state, &email, &password, &cancel).await?;
      println!("Logado como {} ({})", session.user.name, session.user.role);
    }

    Command::Logout => {
      commands::auth::logout(state).await?;
      println!("Sessão encerrada");
    }

    Command::Whoami => {
      let session = commands::auth::require_session(state).await?;
      let user = commands::auth::current_user(state, &session, &cancel).await?;
      println!("{} <{}> ({})", user.name, user.email, user.role);
    }

    Command::Periodization { student, json } => {
      let session = commands::auth::require_session(state).await?;
      let report = commands::periodization::load_periodization(&session, student.as_deref(), &cancel).await?;
      if json {
        let text = serde_json::to_string_pretty(&report)?;
        println!("{}", text);
      } else {
        print_periodization(&report);
      }
    }

    Command::Notifications { mark_read } => {
      let session = commands::auth::require_session(state).await?;
      let (notifications, unread) = commands::notifications::load_notifications(&session, &cancel).await?;
      println!("{} não lidas", unread);
      for n in &notifications {
        let marker = if n.read { ' ' } else { '*' };
        println!("{} [{}] {}: {}", marker, short_date(&n.created_at), n.title, n.message);
      }
      if mark_read && unread > 0 {
        commands::notifications::mark_all_read(&session, &cancel).await?;
      }
    }

    Command::Conversations => {
      let session = commands::auth::require_session(state).await?;
      for c in commands::chat::conversations(&session, &cancel).await? {
        let last = c.last_message.as_deref().unwrap_or("");
        println!("{} ({}) [{}] {}", c.user_name, c.user_id, c.unread_count, last);
      }
    }

    Command::Chat { peer, send } => {
      let session = commands::auth::require_session(state).await?;
      if let Some(content) = send {
        commands::chat::send(&session, &peer, &content, &cancel).await?;
      }

      let stream = commands::chat::watch_conversation(state, &session, &peer, cancel.clone());
      futures::pin_mut!(stream);
      let mut shown = 0;
      while let Some(item) = stream.next().await {
        match item {
          Ok(messages) => {
            // Snapshots are the full history; print only what is new
            if messages.len() < shown {
              shown = 0;
            }
            for m in &messages[shown..] {
              let who = if m.sender_id == session.user.id { "você" } else { peer.as_str() };
              println!("[{}] {}: {}", short_date(&m.created_at), who, m.content);
            }
            shown = messages.len();
            tracing::debug!(unread = unread_from(&messages, &peer), "Chat snapshot");
          }
          Err(e) => eprintln!("{}", e.user_message(commands::chat::LOAD_ERROR)),
        }
      }
    }

    Command::Report { student, out } => {
      let session = commands::auth::require_session(state).await?;
      let dir = std::env::current_dir()?;
      let path = commands::report::export_student_report(&session, &student, out, &dir, &cancel).await?;
      println!("Relatório salvo em {}", path.display());
    }

    Command::Rest { seconds } => {
      run_rest(seconds.unwrap_or(state.config.default_rest_seconds), &cancel).await?;
    }
  }

  Ok(())
}

async fn run_rest(seconds: u32, cancel: &CancellationToken) -> Result<(), ApiError> {
  let mut timer = RestTimer::new(Arc::new(LogNotifier));
  let mut updates = timer.subscribe();
  timer
    .start(seconds)
    .map_err(|e| ApiError::Validation(e.to_string()))?;

  loop {
    let state = *updates.borrow_and_update();
    match state {
      TimerState::Running { remaining } => println!("{}", format_clock(remaining)),
      TimerState::Expired => break,
      _ => {}
    }

    tokio::select! {
      biased;
      _ = cancel.cancelled() => {
        timer.reset();
        return Err(ApiError::Cancelled);
      }
      changed = updates.changed() => {
        if changed.is_err() {
          break;
        }
      }
    }
  }

  Ok(())
}

fn print_periodization(report: &PeriodizationReport) {
  println!("Objetivo: {}", report.objective);
  println!("Treino:   {}", report.workout_name);
  println!("Período:  {}", report.period_label);
  println!();
  println!(
    "{:<12} {:>10} {:>8} {:>6} {:>8} {:>8}",
    "Semana", "Volume kg", "Kcal", "Reps", "Sessões", "Tendência"
  );
  for row in &report.mesocycle {
    let trend = row
      .trend
      .map(|t| format!("{:+.1}%", t))
      .unwrap_or_else(|| "-".into());
    println!(
      "{:<12} {:>10.1} {:>8.1} {:>6} {:>8} {:>8}",
      row.week, row.bucket.volume_kg, row.bucket.calories, row.bucket.reps, row.bucket.sessions, trend
    );
  }
  let s = &report.summary;
  println!();
  println!(
    "Total: {} sessões, {:.1} kg, {:.1} kcal, {} exercícios, {} reps",
    s.total_sessions, s.total_volume, s.total_calories, s.total_exercises, s.total_reps
  );
}

fn short_date(raw: &str) -> &str {
  raw.get(..16).unwrap_or(raw)
}
