use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise this crate logs at `info`, or `debug`
/// when `verbose`.
pub fn init(verbose: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

  // A second init (tests, embedding apps) is not an error.
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}

fn default_directives(verbose: bool) -> &'static str {
  if verbose {
    "warn,trainer_desk_lib=debug"
  } else {
    "warn,trainer_desk_lib=info"
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_verbose_raises_crate_level() {
    assert!(default_directives(true).contains("trainer_desk_lib=debug"));
    assert!(default_directives(false).contains("trainer_desk_lib=info"));
  }

  #[test]
  fn test_init_twice_is_harmless() {
    init(false);
    init(true);
  }
}
