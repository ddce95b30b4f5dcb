use crate::stats_parser::Record;
use std::collections::BTreeMap;

/// The nick that holds the totals of a channel.
pub const CHANNEL_TOTALS_NICK: &str = "";

pub const LINES: &str = "lines";
pub const WORDS: &str = "words";
pub const CHARS: &str = "chars";
pub const AVG_WORDS_PER_LINE: &str = "avg_words_per_line";
pub const AVG_CHARS_PER_LINE: &str = "avg_chars_per_line";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
  /// A value read from the dump.
  Count(i64),
  /// A value computed from other metrics.
  Ratio(f64),
}

impl MetricValue {
  pub fn as_f64(&self) -> f64 {
    match self {
      Self::Count(count) => *count as f64,
      Self::Ratio(ratio) => *ratio,
    }
  }

  pub fn is_zero(&self) -> bool {
    match self {
      Self::Count(count) => *count == 0,
      Self::Ratio(ratio) => *ratio == 0.0,
    }
  }
}

impl std::fmt::Display for MetricValue {
  fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Count(count) => write!(formatter, "{}", count),
      Self::Ratio(ratio) => write!(formatter, "{}", ratio),
    }
  }
}

/// Metric name to value for a single nick.
pub type NickStats = BTreeMap<String, MetricValue>;

/// Nick to [`NickStats`] for a single channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelStats {
  nicks: BTreeMap<String, NickStats>,
}

impl ChannelStats {
  pub fn nick(&self, nick: &str) -> Option<&NickStats> {
    self.nicks.get(nick)
  }

  /// Every entry, including the channel totals.
  pub fn nicks(&self) -> impl Iterator<Item = (&str, &NickStats)> {
    self.nicks.iter().map(|(nick, stats)| (nick.as_str(), stats))
  }

  /// Every entry except the channel totals.
  pub fn participants(&self) -> impl Iterator<Item = (&str, &NickStats)> {
    self
      .nicks()
      .filter(|(nick, _)| *nick != CHANNEL_TOTALS_NICK)
  }

  pub fn participant_count(&self) -> usize {
    self.participants().count()
  }

  pub fn totals(&self) -> Option<&NickStats> {
    self.nicks.get(CHANNEL_TOTALS_NICK)
  }

  /// The `lines` of the channel totals, 0 if missing.
  pub fn total_lines(&self) -> MetricValue {
    self
      .totals()
      .and_then(|totals| totals.get(LINES))
      .copied()
      .unwrap_or(MetricValue::Count(0))
  }

  pub fn is_empty(&self) -> bool {
    self.nicks.is_empty()
  }

  fn insert(&mut self, nick: String, metric: String, value: MetricValue) {
    self.nicks.entry(nick).or_default().insert(metric, value);
  }

  /// Adds the average words and characters per line to every nick with lines and words.
  ///
  /// Nicks missing either count, or with a count of 0, are left as they are.
  pub fn add_derived_metrics(&mut self) {
    for (nick, stats) in self.nicks.iter_mut() {
      let (Some(lines), Some(words)) = (stats.get(LINES).copied(), stats.get(WORDS).copied())
      else {
        continue;
      };

      if lines.is_zero() || words.is_zero() {
        tracing::trace!("Skipping derived metrics for {:?}.", nick);
        continue;
      }

      let lines = lines.as_f64();

      stats.insert(
        AVG_WORDS_PER_LINE.to_string(),
        MetricValue::Ratio(words.as_f64() / lines),
      );

      if let Some(chars) = stats.get(CHARS).copied() {
        stats.insert(
          AVG_CHARS_PER_LINE.to_string(),
          MetricValue::Ratio(chars.as_f64() / lines),
        );
      }
    }
  }
}

/// network -> channel -> nick -> metric -> value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsTable {
  networks: BTreeMap<String, BTreeMap<String, ChannelStats>>,
}

impl StatsTable {
  pub fn from_records<I: IntoIterator<Item = Record>>(records: I) -> Self {
    let mut stats_table = Self::default();

    for record in records {
      stats_table.insert(record);
    }

    stats_table
  }

  /// Stores the record, replacing any previous value for the same metric.
  pub fn insert(&mut self, record: Record) {
    self
      .networks
      .entry(record.network)
      .or_default()
      .entry(record.channel)
      .or_default()
      .insert(record.nick, record.metric, MetricValue::Count(record.value));
  }

  pub fn get(&self, network: &str, channel: &str, nick: &str, metric: &str) -> Option<&MetricValue> {
    self.channel(network, channel)?.nick(nick)?.get(metric)
  }

  pub fn channel(&self, network: &str, channel: &str) -> Option<&ChannelStats> {
    self.networks.get(network)?.get(channel)
  }

  /// Removes the channel from the table. Returns an empty channel if it didn't exist.
  pub fn take_channel(&mut self, network: &str, channel: &str) -> ChannelStats {
    self
      .networks
      .get_mut(network)
      .and_then(|channels| channels.remove(channel))
      .unwrap_or_default()
  }

  pub fn add_derived_metrics(&mut self, network: &str, channel: &str) {
    if let Some(channel_stats) = self
      .networks
      .get_mut(network)
      .and_then(|channels| channels.get_mut(channel))
    {
      channel_stats.add_derived_metrics();
    }
  }

  pub fn networks(&self) -> impl Iterator<Item = &str> {
    self.networks.keys().map(String::as_str)
  }

  pub fn channels(&self, network: &str) -> Vec<&str> {
    self
      .networks
      .get(network)
      .map(|channels| channels.keys().map(String::as_str).collect())
      .unwrap_or_default()
  }

  pub fn is_empty(&self) -> bool {
    self.networks.is_empty()
  }
}
