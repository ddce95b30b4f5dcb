use app_config::AppConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Stdout carries the report, so logs go to a rolling file or stderr.
pub fn setup_logging_config(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
  let Some(log_level) = config.log_level() else {
    return Ok(());
  };

  let subscriber_builder = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::new(log_level))
    .with_ansi(false);

  if let Some(logging_dir) = config.logging_dir() {
    let filename_prefix = PathBuf::from(config.logging_filename_prefix());
    let logging_file = config.logging_file_roll_appender().clone();

    subscriber_builder
      .with_writer(logging_file.to_file_appender(logging_dir, &filename_prefix)?)
      .init();
  } else {
    subscriber_builder.with_writer(std::io::stderr).init();
  }

  Ok(())
}
