use crate::output_format::OutputFormat;
use clap::{value_parser, Arg, ArgAction, Command};
use lazy_static::lazy_static;
use std::path::PathBuf;

lazy_static! {
  pub static ref CLAP_ARGS: ClapArgs = ClapArgs::new();
}

#[derive(Debug)]
pub struct ClapArgs {
  args: clap::ArgMatches,
}

impl ClapArgs {
  const NETWORK: &'static str = "network";
  const CHANNEL: &'static str = "channel";
  const FORMAT: &'static str = "format";
  const INPUT: &'static str = "input";
  const OUTPUT: &'static str = "output";
  const QUERY: &'static str = "query";
  const EXTENDED: &'static str = "extended";
  const TITLE: &'static str = "title";
  const SHOW_PERCENTAGE: &'static str = "showprcnt";

  pub fn new() -> Self {
    let args = Self::command().get_matches();

    Self { args }
  }

  /// Parses the given arguments instead of the process arguments.
  pub fn try_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
  where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
  {
    let args = Self::command().try_get_matches_from(iter)?;

    Ok(Self { args })
  }

  pub fn network(&self) -> Option<&str> {
    self.get_str(Self::NETWORK)
  }

  pub fn channel(&self) -> Option<&str> {
    self.get_str(Self::CHANNEL)
  }

  pub fn output_format(&self) -> Option<OutputFormat> {
    self.get_str(Self::FORMAT)?.parse().ok()
  }

  /// A dump file to read instead of running the stats command. `-` reads stdin.
  pub fn input(&self) -> Option<&PathBuf> {
    self.args.get_one::<PathBuf>(Self::INPUT)
  }

  pub fn output(&self) -> Option<&PathBuf> {
    self.args.get_one::<PathBuf>(Self::OUTPUT)
  }

  pub fn query(&self) -> Option<&str> {
    self.get_str(Self::QUERY)
  }

  pub fn extended(&self) -> Option<&str> {
    self.get_str(Self::EXTENDED)
  }

  pub fn title(&self) -> Option<&str> {
    self.get_str(Self::TITLE)
  }

  pub fn show_percentage(&self) -> bool {
    self.args.get_flag(Self::SHOW_PERCENTAGE)
  }

  fn get_str(&self, id: &str) -> Option<&str> {
    self.args.get_one::<String>(id).map(String::as_str)
  }

  fn command() -> Command {
    Command::new("irc_stats_report")
      .about("Renders an HTML or Markdown report from a ctrlproxy statistics dump.")
      .arg(
        Arg::new(Self::NETWORK)
          .short('n')
          .long("network")
          .action(ArgAction::Set)
          .help("The network to report on. Overrides the configured network."),
      )
      .arg(
        Arg::new(Self::CHANNEL)
          .short('c')
          .long("channel")
          .action(ArgAction::Set)
          .help("The channel to report on. Overrides the configured channel."),
      )
      .arg(
        Arg::new(Self::FORMAT)
          .short('f')
          .long("format")
          .action(ArgAction::Set)
          .value_parser(OutputFormat::POSSIBLE_VALUES)
          .help("The format of the rendered report."),
      )
      .arg(
        Arg::new(Self::INPUT)
          .short('i')
          .long("input")
          .action(ArgAction::Set)
          .value_parser(value_parser!(PathBuf))
          .help("Reads the statistics dump from a file instead of running the stats command. Use - for stdin."),
      )
      .arg(
        Arg::new(Self::OUTPUT)
          .short('o')
          .long("output")
          .action(ArgAction::Set)
          .value_parser(value_parser!(PathBuf))
          .help("Writes the report to a file instead of stdout."),
      )
      .arg(
        Arg::new(Self::QUERY)
          .short('q')
          .long("query")
          .action(ArgAction::Set)
          .help("Request parameters as a query string, e.g. `extended=foul&title=Foul+Language`. Defaults to $QUERY_STRING."),
      )
      .arg(
        Arg::new(Self::EXTENDED)
          .short('e')
          .long("extended")
          .action(ArgAction::Set)
          .help("Renders the full leaderboard for this metric instead of the summary."),
      )
      .arg(
        Arg::new(Self::TITLE)
          .short('t')
          .long("title")
          .action(ArgAction::Set)
          .help("The heading of the leaderboard."),
      )
      .arg(
        Arg::new(Self::SHOW_PERCENTAGE)
          .short('p')
          .long("showprcnt")
          .action(ArgAction::SetTrue)
          .help("Shows each value as a percentage of the nick's lines."),
      )
  }
}

impl Default for ClapArgs {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn request_flags_are_parsed() {
    let args = ClapArgs::try_from_iter([
      "irc_stats_report",
      "--extended",
      "foul",
      "--title",
      "Foul Language",
      "--showprcnt",
      "--format",
      "md",
    ])
    .unwrap();

    assert_eq!(args.extended(), Some("foul"));
    assert_eq!(args.title(), Some("Foul Language"));
    assert!(args.show_percentage());
    assert_eq!(args.output_format(), Some(OutputFormat::Markdown));
    assert!(args.input().is_none());
  }

  #[test]
  fn no_flags_leaves_everything_unset() {
    let args = ClapArgs::try_from_iter(["irc_stats_report"]).unwrap();

    assert!(args.extended().is_none());
    assert!(args.query().is_none());
    assert!(!args.show_percentage());
    assert!(args.output_format().is_none());
  }

  #[test]
  fn unknown_format_is_rejected() {
    let result = ClapArgs::try_from_iter(["irc_stats_report", "--format", "pdf"]);

    assert!(result.is_err());
  }
}
