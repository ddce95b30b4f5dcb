use app_config::{AppConfig, CLAP_ARGS};
use irc_stats_report::errors::AppError;
use irc_stats_report::reports::{generate_report, ReportSettings};
use irc_stats_report::request_parameters::RequestParameters;
use irc_stats_report::stats_source::{CommandSource, LineSource, ReaderSource};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

const QUERY_STRING_ENV_VAR: &str = "QUERY_STRING";

fn main() {
  let config = match AppConfig::load() {
    Ok(config) => config,
    Err(error) => {
      eprintln!("Failed to load the config. Reason: {:?}", error);

      std::process::exit(1);
    }
  };

  if let Err(error) = irc_stats_report::logging::setup_logging_config(&config) {
    eprintln!("Failed to set up logging. Reason: {}", error);
  }

  if let Err(error) = run(&config) {
    tracing::error!("Failed to generate the report. Reason: {}", error);
    eprintln!("Failed to generate the report. Reason: {}", error);

    std::process::exit(1);
  }
}

fn run(config: &AppConfig) -> Result<(), AppError> {
  let settings = ReportSettings::from_config(config, &CLAP_ARGS);
  let query_string = std::env::var(QUERY_STRING_ENV_VAR).ok();
  let parameters = RequestParameters::from_args(&CLAP_ARGS, query_string.as_deref());

  let report = match CLAP_ARGS.input() {
    Some(input) if input == Path::new("-") => {
      let mut source = ReaderSource::new(io::stdin().lock());

      generate_report(&mut source, &settings, &parameters, chrono::Utc::now())?
    }
    Some(input) => {
      let file = File::open(input).map_err(|source| AppError::FailedToOpenStatsDump {
        path: input.clone(),
        source,
      })?;
      let mut source = ReaderSource::new(BufReader::new(file));

      generate_report(&mut source, &settings, &parameters, chrono::Utc::now())?
    }
    None => {
      let mut source = stats_command(config);

      generate_report(&mut source, &settings, &parameters, chrono::Utc::now())?
    }
  };

  match CLAP_ARGS.output() {
    Some(output) => std::fs::write(output, report)?,
    None => {
      let mut stdout = io::stdout().lock();

      stdout.write_all(report.as_bytes())?;
      stdout.flush()?;
    }
  }

  Ok(())
}

/// The command that dumps the statistics database when no input file was given.
fn stats_command(config: &AppConfig) -> impl LineSource {
  let mut command = CommandSource::new(config.stats_command());

  if let Some(database) = config.stats_database() {
    command = command.arg(database.to_string_lossy());
  }

  if let Some(working_dir) = config.stats_working_dir() {
    command = command.working_directory(working_dir);
  }

  command
}
