use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("{}", .0)]
  IoError(#[from] std::io::Error),

  #[error("{}", .0)]
  TeraError(#[from] tera::Error),

  #[error("Failed to render a template because it did not exist. Template name: {template_name}")]
  MissingTeraTemplate { template_name: &'static str },

  #[error("Failed to start the stats command `{command}`. Reason: `{source}`")]
  FailedToSpawnStatsCommand {
    command: String,
    source: std::io::Error,
  },

  #[error("The stats command `{}` was started without a readable stdout.", .0)]
  StatsCommandHasNoOutput(String),

  #[error("Failed to open the statistics dump at {path:?}. Reason: `{source}`")]
  FailedToOpenStatsDump {
    path: PathBuf,
    source: std::io::Error,
  },
}
