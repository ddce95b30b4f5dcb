use crate::stats_table::{ChannelStats, MetricValue, NickStats};
use std::cmp::Ordering;

/// A nick and its stats, in leaderboard order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedNick<'a> {
  pub nick: &'a str,
  pub stats: &'a NickStats,
}

impl<'a> RankedNick<'a> {
  pub fn metric(&self, metric: &str) -> Option<&'a MetricValue> {
    self.stats.get(metric)
  }
}

/// Orders nicks from the highest to the lowest value of `metric`.
///
/// Nicks without the metric are placed after every nick that has it.
/// Equal values keep the order they were given in.
pub fn rank_by_metric<'a, I>(nicks: I, metric: &str) -> Vec<RankedNick<'a>>
where
  I: IntoIterator<Item = (&'a str, &'a NickStats)>,
{
  let mut rankings: Vec<RankedNick<'a>> = nicks
    .into_iter()
    .map(|(nick, stats)| RankedNick { nick, stats })
    .collect();

  rankings.sort_by(descending_by(metric));

  rankings
}

/// Ranks the participants of the channel, leaving out the channel totals.
pub fn rank_participants<'a>(channel_stats: &'a ChannelStats, metric: &str) -> Vec<RankedNick<'a>> {
  rank_by_metric(channel_stats.participants(), metric)
}

/// The participant with the highest value for `metric`, if anyone has it.
pub fn highest_for_metric<'a>(channel_stats: &'a ChannelStats, metric: &str) -> Option<RankedNick<'a>> {
  rank_participants(channel_stats, metric)
    .into_iter()
    .next()
    .filter(|ranked_nick| ranked_nick.metric(metric).is_some())
}

fn descending_by<'m>(metric: &'m str) -> impl Fn(&RankedNick, &RankedNick) -> Ordering + 'm {
  move |left, right| {
    match (left.metric(metric), right.metric(metric)) {
      (Some(left), Some(right)) => right.as_f64().total_cmp(&left.as_f64()),
      (Some(_), None) => Ordering::Less,
      (None, Some(_)) => Ordering::Greater,
      (None, None) => Ordering::Equal,
    }
  }
}
