pub mod api;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod periodization;
pub mod report;
pub mod rest_timer;
pub mod set_tracker;

#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use cli::Cli;
use commands::AppState;
use config::AppConfig;

/// Entry point for the binary. Returns the process exit code.
pub fn run() -> i32 {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let cli = Cli::parse();
  logging::init(cli.verbose);

  let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
    Ok(runtime) => runtime,
    Err(e) => {
      eprintln!("Failed to start runtime: {}", e);
      return 1;
    }
  };

  runtime.block_on(async move {
    let fallback = cli.command.fallback_message();

    let config = match AppConfig::from_env() {
      Ok(config) => config,
      Err(e) => {
        eprintln!("{}", e);
        return 1;
      }
    };

    let state = match AppState::initialize(config).await {
      Ok(state) => state,
      Err(e) => {
        tracing::error!(error = %e, "Failed to initialize");
        eprintln!("{}", e);
        return 1;
      }
    };

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
      if tokio::signal::ctrl_c().await.is_ok() {
        trigger.cancel();
      }
    });

    match cli::execute(cli.command, &state, cancel).await {
      Ok(()) => 0,
      // Interrupting a follow-style command is the normal way out
      Err(e) if e.is_cancelled() => 0,
      Err(e) => {
        tracing::debug!(error = %e, "Command failed");
        eprintln!("{}", e.user_message(fallback));
        1
      }
    }
  })
}
