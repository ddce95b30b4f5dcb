use crate::field_spec::{expand_message, BigNumber, FieldSpec, BIG_NUMBERS, SUMMARY_FIELDS};
use crate::rankings::{highest_for_metric, rank_participants, RankedNick};
use crate::request_parameters::DetailRequest;
use crate::stats_table::{ChannelStats, MetricValue, NickStats, LINES, WORDS};
use chrono::{DateTime, Utc};

const HOURS_IN_A_DAY: u8 = 24;
const NOT_APPLICABLE: &str = "N/A";

/// The values shared by every page of the report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ReportHeader {
  pub network: String,
  pub channel: String,
  pub generated_at: String,
  pub nick_count: usize,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum ReportPage {
  Summary(SummaryView),
  Detail(DetailView),
}

/// The full leaderboard for a single metric.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DetailView {
  pub heading: String,
  pub metric: String,
  /// Lines view shows the word counts next to the lines, and the channel total below.
  pub lines_view: bool,
  pub rows: Vec<LeaderboardRow>,
  pub total_lines: String,
}

/// Missing values are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LeaderboardRow {
  pub rank: usize,
  pub nick: String,
  pub value: String,
  pub words: String,
  pub percentage: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SummaryView {
  pub sections: Vec<SummarySection>,
  /// One sentence per metric that at least one nick has.
  pub big_numbers: Vec<String>,
  pub hourly_activity: Vec<HourlyActivity>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SummarySection {
  pub title: String,
  pub messages: Vec<String>,
  pub link: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HourlyActivity {
  pub hour: u8,
  pub lines: i64,
  /// Share of all hourly lines, with one decimal.
  pub percentage: String,
}

impl ReportHeader {
  pub fn new(
    network: &str,
    channel: &str,
    channel_stats: &ChannelStats,
    generated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      network: network.to_string(),
      channel: channel.to_string(),
      generated_at: generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
      nick_count: channel_stats.participant_count(),
    }
  }
}

impl DetailView {
  pub fn new(channel_stats: &ChannelStats, request: &DetailRequest) -> Self {
    let lines_view = request.is_lines_view();
    let sort_metric = if lines_view { LINES } else { request.metric.as_str() };

    let rows = rank_participants(channel_stats, sort_metric)
      .into_iter()
      .enumerate()
      .map(|(index, ranked_nick)| {
        let value = ranked_nick.metric(sort_metric);

        LeaderboardRow {
          rank: index + 1,
          nick: ranked_nick.nick.to_string(),
          value: display_value(value),
          words: if lines_view {
            display_value(ranked_nick.metric(WORDS))
          } else {
            String::new()
          },
          percentage: if request.show_percentage && !lines_view {
            percentage_of_lines(value, ranked_nick.stats)
          } else {
            String::new()
          },
        }
      })
      .collect();

    Self {
      heading: request.heading().to_string(),
      metric: request.metric.clone(),
      lines_view,
      rows,
      total_lines: channel_stats.total_lines().to_string(),
    }
  }
}

impl SummaryView {
  pub fn new(channel_stats: &ChannelStats, report_url: &str) -> Self {
    let sections = SUMMARY_FIELDS
      .iter()
      .map(|field| SummarySection::new(channel_stats, field, report_url))
      .collect();

    Self {
      sections,
      big_numbers: BIG_NUMBERS
        .iter()
        .filter_map(|big_number| big_number_message(channel_stats, big_number))
        .collect(),
      hourly_activity: HourlyActivity::for_channel(channel_stats),
    }
  }
}

impl SummarySection {
  /// The channel totals aren't ranked, so the first two places are always actual nicks.
  pub fn new(channel_stats: &ChannelStats, field: &FieldSpec, report_url: &str) -> Self {
    let rankings = rank_participants(channel_stats, field.metric);
    let places = [
      (field.first_place, rankings.first()),
      (field.second_place, rankings.get(1)),
    ];

    let messages = places
      .into_iter()
      .filter_map(|(template, ranked_nick)| {
        let template = template?;
        let Some(ranked_nick) = ranked_nick else {
          tracing::debug!(
            "Not enough nicks to fill every place of the {:?} leaderboard.",
            field.metric
          );

          return None;
        };

        Some(place_message(template, ranked_nick, field.metric))
      })
      .collect();

    Self {
      title: field.title.to_string(),
      messages,
      link: DetailRequest::for_field(field).link(report_url),
    }
  }
}

impl HourlyActivity {
  /// Reads the `hour-N` counts of the channel totals. Empty if the channel has none.
  pub fn for_channel(channel_stats: &ChannelStats) -> Vec<Self> {
    let Some(totals) = channel_stats.totals() else {
      return vec![];
    };

    let hourly_lines: Vec<(u8, Option<i64>)> = (0..HOURS_IN_A_DAY)
      .map(|hour| (hour, hour_lines(totals, hour)))
      .collect();

    if hourly_lines.iter().all(|(_, lines)| lines.is_none()) {
      return vec![];
    }

    let all_lines = hourly_lines
      .iter()
      .filter_map(|(_, lines)| *lines)
      .fold(0_i64, i64::saturating_add);

    hourly_lines
      .into_iter()
      .map(|(hour, lines)| {
        let lines = lines.unwrap_or(0);
        let percentage = if all_lines > 0 {
          lines as f64 / all_lines as f64 * 100.0
        } else {
          0.0
        };

        Self {
          hour,
          lines,
          percentage: format!("{:.1}%", percentage),
        }
      })
      .collect()
  }
}

/// `round(value / lines * 100)%`, or `N/A` when the nick has no lines.
pub fn percentage_of_lines(value: Option<&MetricValue>, nick_stats: &NickStats) -> String {
  let Some(lines) = nick_stats.get(LINES).filter(|lines| !lines.is_zero()) else {
    return NOT_APPLICABLE.to_string();
  };
  let value = value.map(MetricValue::as_f64).unwrap_or(0.0);

  format!("{}%", (value / lines.as_f64() * 100.0).round())
}

fn place_message(template: &str, ranked_nick: &RankedNick, metric: &str) -> String {
  let value = ranked_nick
    .metric(metric)
    .copied()
    .unwrap_or(MetricValue::Count(0));

  expand_message(template, ranked_nick.nick, &value.to_string())
}

fn big_number_message(channel_stats: &ChannelStats, big_number: &BigNumber) -> Option<String> {
  let top_nick = highest_for_metric(channel_stats, big_number.metric)?;
  let value = top_nick.metric(big_number.metric);
  let value = if big_number.as_percentage {
    percentage_of_lines(value, top_nick.stats)
  } else {
    display_value(value)
  };

  Some(expand_message(big_number.message, top_nick.nick, &value))
}

fn hour_lines(totals: &NickStats, hour: u8) -> Option<i64> {
  match totals.get(&format!("hour-{}", hour))? {
    MetricValue::Count(lines) => Some(*lines),
    MetricValue::Ratio(_) => None,
  }
}

fn display_value(value: Option<&MetricValue>) -> String {
  value.map(ToString::to_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing_helper_methods::*;

  fn detail_request(metric: &str, show_percentage: bool) -> DetailRequest {
    DetailRequest {
      metric: metric.to_string(),
      title: None,
      show_percentage,
    }
  }

  #[test]
  fn lines_view_expected_value() {
    let channel_stats = channel_stats(&[
      ("", &[("lines", 100)]),
      ("nick1", &[("lines", 40), ("words", 20)]),
      ("nick2", &[("lines", 60), ("words", 30)]),
    ]);

    let detail = DetailView::new(&channel_stats, &detail_request("lines", false));

    let expected_rows = vec![
      LeaderboardRow {
        rank: 1,
        nick: "nick2".into(),
        value: "60".into(),
        words: "30".into(),
        percentage: String::new(),
      },
      LeaderboardRow {
        rank: 2,
        nick: "nick1".into(),
        value: "40".into(),
        words: "20".into(),
        percentage: String::new(),
      },
    ];

    assert!(detail.lines_view);
    assert_eq!(detail.rows, expected_rows);
    assert_eq!(detail.total_lines, "100");
    assert_eq!(detail.heading, "Lines");
  }

  #[test]
  fn metric_view_shows_percentages_of_lines() {
    let channel_stats = channel_stats(&[
      ("", &[("lines", 30), ("foul", 4)]),
      ("sailor", &[("lines", 8), ("foul", 3)]),
      ("lurker", &[("lines", 0), ("foul", 1)]),
      ("saint", &[("lines", 20)]),
    ]);

    let detail = DetailView::new(&channel_stats, &detail_request("foul", true));

    let rows: Vec<(usize, &str, &str, &str)> = detail
      .rows
      .iter()
      .map(|row| {
        (
          row.rank,
          row.nick.as_str(),
          row.value.as_str(),
          row.percentage.as_str(),
        )
      })
      .collect();

    assert_eq!(
      rows,
      [
        (1, "sailor", "3", "38%"),
        (2, "lurker", "1", "N/A"),
        (3, "saint", "", "0%"),
      ]
    );
    assert!(detail.rows.iter().all(|row| row.words.is_empty()));
  }

  #[test]
  fn metric_view_without_percentages() {
    let channel_stats = channel_stats(&[("sunny", &[("lines", 8), ("happy", 3)])]);

    let detail = DetailView::new(&channel_stats, &detail_request("happy", false));

    assert_eq!(detail.rows[0].value, "3");
    assert_eq!(detail.rows[0].percentage, "");
  }

  #[test]
  fn empty_channel_has_no_rows_and_zero_total() {
    let detail = DetailView::new(&ChannelStats::default(), &detail_request("lines", false));

    assert!(detail.rows.is_empty());
    assert_eq!(detail.total_lines, "0");
  }

  #[test]
  fn summary_section_fills_both_places() {
    let channel_stats = channel_stats(&[
      ("", &[("lines", 1000)]),
      ("x", &[("lines", 50)]),
      ("y", &[("lines", 40)]),
      ("z", &[("lines", 1)]),
    ]);

    let section = SummarySection::new(&channel_stats, &SUMMARY_FIELDS[0], "");

    assert_eq!(section.title, "Lines");
    assert_eq!(
      section.messages,
      [
        "x wrote the most lines: 50",
        "y wrote almost as much lines: 40"
      ]
    );
    assert_eq!(section.link, "?extended=lines&title=Lines");
  }

  #[test]
  fn summary_leaderboard_skips_channel_totals() {
    let channel_stats = channel_stats(&[
      ("", &[("foul", 90)]),
      ("potty", &[("foul", 9)]),
    ]);

    let section = SummarySection::new(&channel_stats, FieldSpec::find("foul").unwrap(), "");

    assert_eq!(section.messages, ["potty makes sailors blush"]);
  }

  #[test]
  fn summary_of_an_empty_channel_has_no_messages() {
    let summary = SummaryView::new(&ChannelStats::default(), "/stats");

    assert_eq!(summary.sections.len(), SUMMARY_FIELDS.len());
    assert!(summary
      .sections
      .iter()
      .all(|section| section.messages.is_empty()));
    assert_eq!(
      summary.sections[1].link,
      "/stats?extended=foul&title=Foul+Language"
    );
    assert!(summary.hourly_activity.is_empty());
  }

  #[test]
  fn missing_values_in_messages_render_as_zero() {
    let channel_stats = channel_stats(&[("quiet", &[("words", 3)])]);

    let section = SummarySection::new(&channel_stats, &SUMMARY_FIELDS[0], "");

    assert_eq!(section.messages, ["quiet wrote the most lines: 0"]);
  }

  #[test]
  fn hourly_activity_expected_value() {
    let channel_stats = channel_stats(&[("", &[("hour-0", 1), ("hour-13", 3)])]);

    let hourly_activity = HourlyActivity::for_channel(&channel_stats);

    assert_eq!(hourly_activity.len(), 24);
    assert_eq!(hourly_activity[0].percentage, "25.0%");
    assert_eq!(hourly_activity[13].lines, 3);
    assert_eq!(hourly_activity[13].percentage, "75.0%");
    assert_eq!(hourly_activity[5].percentage, "0.0%");
  }

  #[test]
  fn hourly_activity_saturates_huge_counts() {
    let channel_stats = channel_stats(&[("", &[("hour-1", i64::MAX), ("hour-2", i64::MAX)])]);

    let hourly_activity = HourlyActivity::for_channel(&channel_stats);

    assert_eq!(hourly_activity[1].lines, i64::MAX);
    assert_eq!(hourly_activity[1].percentage, "100.0%");
  }

  #[test]
  fn big_numbers_name_the_top_nick() {
    let channel_stats = channel_stats(&[
      ("", &[("url", 100)]),
      ("alice", &[("lines", 10), ("url", 4)]),
      ("bob", &[("lines", 10), ("url", 9)]),
    ]);

    let summary = SummaryView::new(&channel_stats, "");

    assert_eq!(summary.big_numbers, ["Total of 9 URLs were pasted by bob!!"]);
  }

  #[test]
  fn big_numbers_skip_metrics_nobody_has() {
    let channel_stats = channel_stats(&[("alice", &[("lines", 10)])]);

    let summary = SummaryView::new(&channel_stats, "");

    assert!(summary.big_numbers.is_empty());
  }

  #[test]
  fn big_numbers_show_shares_of_lines() {
    let channel_stats = channel_stats(&[
      ("alice", &[("lines", 8), ("question", 2), ("caps", 1)]),
      ("bob", &[("lines", 40), ("question", 1)]),
      ("carol", &[("caps", 3)]),
    ]);

    let summary = SummaryView::new(&channel_stats, "");

    assert_eq!(
      summary.big_numbers,
      [
        "Is alice stupid or just asking too many questions? 25% of their lines contained a question!",
        "carol is a clear caps-abuser, N/A of the time they wrote in CAPS.",
      ]
    );
  }

  #[test]
  fn empty_metric_gives_empty_cells() {
    let channel_stats = channel_stats(&[("alice", &[("lines", 3)])]);
    let request = detail_request("", false);

    let detail = DetailView::new(&channel_stats, &request);

    assert_eq!(detail.rows.len(), 1);
    assert_eq!(detail.rows[0].nick, "alice");
    assert_eq!(detail.rows[0].value, "");
  }

  #[test]
  fn report_header_counts_participants() {
    let channel_stats = channel_stats(&[("", &[("lines", 2)]), ("a", &[("lines", 2)])]);
    let generated_at = DateTime::from_timestamp(0, 0).unwrap();

    let header = ReportHeader::new("INU", "#ctrlproxy", &channel_stats, generated_at);

    assert_eq!(header.nick_count, 1);
    assert_eq!(header.generated_at, "1970-01-01 00:00:00 UTC");
  }
}
