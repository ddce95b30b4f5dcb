use crate::stats_parser::Record;
use crate::stats_table::{ChannelStats, StatsTable};

pub const TEST_NETWORK: &str = "INU";
pub const TEST_CHANNEL: &str = "#ctrlproxy";

pub fn record(network: &str, channel: &str, nick: &str, metric: &str, value: i64) -> Record {
  Record {
    network: network.to_string(),
    channel: channel.to_string(),
    nick: nick.to_string(),
    metric: metric.to_string(),
    value,
  }
}

/// Creates the stats for [`TEST_CHANNEL`] from a list of nicks and their metrics.
pub fn channel_stats(nicks: &[(&str, &[(&str, i64)])]) -> ChannelStats {
  let records = nicks.iter().flat_map(|(nick, metrics)| {
    metrics
      .iter()
      .map(move |(metric, value)| record(TEST_NETWORK, TEST_CHANNEL, nick, metric, *value))
  });

  StatsTable::from_records(records).take_channel(TEST_NETWORK, TEST_CHANNEL)
}

/// A dump as printed by `printstats` for [`TEST_CHANNEL`].
pub fn stats_dump(nicks: &[(&str, &[(&str, i64)])]) -> String {
  let mut dump = String::new();

  for (nick, metrics) in nicks {
    for (metric, value) in metrics.iter() {
      dump.push_str(&format!(
        "{}/{}/{}/{}: {}\n",
        TEST_NETWORK, TEST_CHANNEL, nick, metric, value
      ));
    }
  }

  dump
}
