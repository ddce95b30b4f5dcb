use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
  /// `network/channel/nick/metric: value`. Searched anywhere in the line, leftmost match wins.
  static ref RECORD_REGEX: Regex =
    Regex::new(r"([^/]*)/([^/]*)/([^/]*)/([^/]*): ([0-9]+)").unwrap();
}

/// A single statistic from the dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
  pub network: String,
  pub channel: String,
  /// Empty for the channel totals.
  pub nick: String,
  pub metric: String,
  pub value: i64,
}

/// Returns the record contained in the line, or None if the line doesn't hold one.
pub fn parse_line(line: &str) -> Option<Record> {
  let captures = RECORD_REGEX.captures(line)?;
  let raw_value = &captures[5];

  let Ok(value) = raw_value.parse::<i64>() else {
    tracing::warn!(
      "Skipping a statistic with a value that doesn't fit in 64 bits: {:?}",
      line
    );

    return None;
  };

  Some(Record {
    network: captures[1].to_string(),
    channel: captures[2].to_string(),
    nick: captures[3].to_string(),
    metric: captures[4].to_string(),
    value,
  })
}

/// Parses every line of the stream, skipping the ones without a record.
pub fn parse_lines<I, S>(lines: I) -> Vec<Record>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  let mut skipped_lines = 0_usize;
  let records: Vec<Record> = lines
    .into_iter()
    .filter_map(|line| {
      let record = parse_line(line.as_ref());

      if record.is_none() {
        skipped_lines += 1;
      }

      record
    })
    .collect();

  tracing::debug!(
    "Parsed {} statistics. Skipped {} lines.",
    records.len(),
    skipped_lines
  );

  records
}
