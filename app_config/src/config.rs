use crate::log_level_wrapper::*;
use crate::output_format::OutputFormat;
use crate::rolling_appender_rotation::*;
use schematic::{Config, ConfigLoader};
use std::path::{Path, PathBuf};

const CONFIG_PATH_ENV_VAR: &str = "CONFIG_PATH";
const DEFAULT_CONFIG_FILEPATH: &str = "./config/config.yml";

#[derive(Debug, Config, serde::Serialize, serde::Deserialize)]
#[config(rename_all = "snake_case")]
pub struct AppConfig {
  /// Logging is disabled when no level is set.
  log_level: Option<LoggingConfigLevel>,
  /// Logs are written to stderr when no directory is set.
  logging_dir: Option<PathBuf>,
  #[setting(default = "")]
  logging_filename_prefix: String,
  logging_roll_appender: RollingAppenderRotation,

  /// The network the report is generated for.
  #[setting(default = "INU", env = "STATS_NETWORK")]
  network: String,
  /// The channel on [`network`](Self::network) the report is generated for.
  #[setting(default = "#ctrlproxy", env = "STATS_CHANNEL")]
  channel: String,

  /// Program that dumps the statistics database, one `network/channel/nick/metric: value` per line.
  #[setting(default = "printstats", env = "STATS_COMMAND")]
  stats_command: String,
  /// Passed as the only argument to the stats command.
  #[setting(env = "STATS_DATABASE")]
  stats_database: Option<PathBuf>,
  stats_working_dir: Option<PathBuf>,

  /// Prefix for the links from the summary to the detail views.
  #[setting(default = "", env = "STATS_REPORT_URL")]
  report_url: String,
  output_format: OutputFormat,
}

impl AppConfig {
  /// Loads the config file at `CONFIG_PATH`, or `./config/config.yml` if the variable isn't set.
  ///
  /// A missing file is not an error, defaults and environment variables apply.
  pub fn load() -> anyhow::Result<Self> {
    Self::load_from(get_config_path())
  }

  pub fn load_from<P: AsRef<Path>>(config_path: P) -> anyhow::Result<Self> {
    let config = ConfigLoader::<AppConfig>::new()
      .file_optional(config_path.as_ref().to_path_buf())?
      .load()?
      .config;

    tracing::debug!("Loaded config from {:?}", config_path.as_ref());

    Ok(config)
  }

  pub fn log_level(&self) -> Option<&LoggingConfigLevel> {
    self.log_level.as_ref()
  }

  pub fn logging_dir(&self) -> Option<&PathBuf> {
    self.logging_dir.as_ref()
  }

  pub fn logging_filename_prefix(&self) -> &str {
    &self.logging_filename_prefix
  }

  pub fn logging_file_roll_appender(&self) -> &RollingAppenderRotation {
    &self.logging_roll_appender
  }

  pub fn network(&self) -> &str {
    &self.network
  }

  pub fn channel(&self) -> &str {
    &self.channel
  }

  pub fn stats_command(&self) -> &str {
    &self.stats_command
  }

  pub fn stats_database(&self) -> Option<&PathBuf> {
    self.stats_database.as_ref()
  }

  pub fn stats_working_dir(&self) -> Option<&PathBuf> {
    self.stats_working_dir.as_ref()
  }

  pub fn report_url(&self) -> &str {
    &self.report_url
  }

  pub fn output_format(&self) -> OutputFormat {
    self.output_format
  }
}

fn get_config_path() -> PathBuf {
  let Ok(config_path) = std::env::var(CONFIG_PATH_ENV_VAR) else {
    return PathBuf::from(DEFAULT_CONFIG_FILEPATH);
  };

  PathBuf::from(config_path)
}
