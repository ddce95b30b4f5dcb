use crate::errors::AppError;
use crate::rankings::highest_for_metric;
use crate::report_builders::html_report::render_html_report;
use crate::report_builders::leaderboards::{DetailView, ReportHeader, ReportPage, SummaryView};
use crate::report_builders::markdown_report::render_markdown_report;
use crate::request_parameters::{ReportMode, RequestParameters};
use crate::stats_parser::parse_lines;
use crate::stats_source::LineSource;
use crate::stats_table::{ChannelStats, StatsTable, LINES};
use app_config::clap::ClapArgs;
use app_config::{AppConfig, OutputFormat};
use chrono::{DateTime, Utc};

/// Which channel to report on and how to present it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
  pub network: String,
  pub channel: String,
  pub report_url: String,
  pub output_format: OutputFormat,
}

impl ReportSettings {
  /// Command line flags take priority over the config file.
  pub fn from_config(config: &AppConfig, args: &ClapArgs) -> Self {
    Self {
      network: args.network().unwrap_or(config.network()).to_string(),
      channel: args.channel().unwrap_or(config.channel()).to_string(),
      report_url: config.report_url().to_string(),
      output_format: args.output_format().unwrap_or(config.output_format()),
    }
  }
}

/// Reads every line of the source into a table.
///
/// A source that fails to produce output leaves the table empty, and a read error ends the
/// table at the last line read. Either way the report still renders.
pub fn read_stats_table(source: &mut dyn LineSource) -> StatsTable {
  let lines = match source.lines() {
    Ok(lines) => lines,
    Err(error) => {
      tracing::error!("Failed to read the statistics. Reason: {}", error);

      return StatsTable::default();
    }
  };

  let records = parse_lines(lines.map_while(|line| match line {
    Ok(line) => Some(line),
    Err(error) => {
      tracing::error!("Stopped reading the statistics early. Reason: {}", error);

      None
    }
  }));

  StatsTable::from_records(records)
}

/// Returns the statistics for one channel, with the per line averages filled in.
pub fn collect_channel_stats(
  source: &mut dyn LineSource,
  network: &str,
  channel: &str,
) -> ChannelStats {
  let mut stats_table = read_stats_table(source);

  if stats_table.channel(network, channel).is_none() {
    let known_channels: Vec<String> = stats_table
      .networks()
      .flat_map(|known_network| {
        stats_table
          .channels(known_network)
          .into_iter()
          .map(move |known_channel| format!("{}/{}", known_network, known_channel))
      })
      .collect();

    tracing::warn!(
      "No statistics for {} on {}. Known channels: {:?}",
      channel,
      network,
      known_channels
    );
  }

  stats_table.add_derived_metrics(network, channel);
  let channel_stats = stats_table.take_channel(network, channel);

  if let Some(most_active) = highest_for_metric(&channel_stats, LINES) {
    tracing::info!(
      "{} nicks on {}. Most lines by {}.",
      channel_stats.participant_count(),
      channel,
      most_active.nick
    );
  }

  channel_stats
}

/// Reads the statistics and renders the page selected by the request parameters.
pub fn generate_report(
  source: &mut dyn LineSource,
  settings: &ReportSettings,
  parameters: &RequestParameters,
  generated_at: DateTime<Utc>,
) -> Result<String, AppError> {
  let channel_stats = collect_channel_stats(source, &settings.network, &settings.channel);

  render_report(&channel_stats, settings, parameters, generated_at)
}

pub fn render_report(
  channel_stats: &ChannelStats,
  settings: &ReportSettings,
  parameters: &RequestParameters,
  generated_at: DateTime<Utc>,
) -> Result<String, AppError> {
  let header = ReportHeader::new(
    &settings.network,
    &settings.channel,
    channel_stats,
    generated_at,
  );

  let page = match parameters.report_mode() {
    ReportMode::Detail(request) => {
      tracing::info!("Rendering the `{}` leaderboard.", request.metric);

      ReportPage::Detail(DetailView::new(channel_stats, &request))
    }
    ReportMode::Summary => {
      tracing::info!("Rendering the summary.");

      ReportPage::Summary(SummaryView::new(channel_stats, &settings.report_url))
    }
  };

  match settings.output_format {
    OutputFormat::Html => render_html_report(&header, &page),
    OutputFormat::Markdown => Ok(render_markdown_report(&header, &page)),
  }
}
