use app_config::clap::ClapArgs;
use crate::field_spec::FieldSpec;
use crate::stats_table::LINES;
use std::collections::HashMap;
use url::form_urlencoded;

pub const EXTENDED_PARAMETER: &str = "extended";
pub const TITLE_PARAMETER: &str = "title";
pub const SHOW_PERCENTAGE_PARAMETER: &str = "showprcnt";

/// The key -> value parameters of a report request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParameters {
  parameters: HashMap<String, String>,
}

/// Which page of the report to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportMode {
  Summary,
  Detail(DetailRequest),
}

/// The full leaderboard of a single metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
  pub metric: String,
  pub title: Option<String>,
  pub show_percentage: bool,
}

impl RequestParameters {
  pub fn from_pairs<I, K, V>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    let parameters = pairs
      .into_iter()
      .map(|(key, value)| (key.into(), value.into()))
      .collect();

    Self { parameters }
  }

  /// Parses an `application/x-www-form-urlencoded` query such as a CGI `QUERY_STRING`.
  pub fn from_query_string(query: &str) -> Self {
    let query = query.strip_prefix('?').unwrap_or(query);

    Self::from_pairs(form_urlencoded::parse(query.as_bytes()).into_owned())
  }

  /// Combines a CGI query string with the command line. Later sources replace earlier ones:
  /// `query_string`, then `--query`, then the individual flags.
  pub fn from_args(args: &ClapArgs, query_string: Option<&str>) -> Self {
    let mut parameters = query_string
      .map(Self::from_query_string)
      .unwrap_or_default();

    if let Some(query) = args.query() {
      parameters.merge(Self::from_query_string(query));
    }

    if let Some(extended) = args.extended() {
      parameters.set(EXTENDED_PARAMETER, extended);
    }

    if let Some(title) = args.title() {
      parameters.set(TITLE_PARAMETER, title);
    }

    if args.show_percentage() {
      parameters.set(SHOW_PERCENTAGE_PARAMETER, "1");
    }

    parameters
  }

  pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
    self.parameters.insert(key.into(), value.into());
  }

  /// Copies every parameter of `other`, replacing the ones with the same key.
  pub fn merge(&mut self, other: RequestParameters) {
    self.parameters.extend(other.parameters);
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.parameters.get(key).map(String::as_str)
  }

  /// Whether the key was given at all, regardless of its value.
  pub fn contains(&self, key: &str) -> bool {
    self.parameters.contains_key(key)
  }

  /// An `extended` parameter selects the leaderboard for that metric, even when it's empty.
  pub fn report_mode(&self) -> ReportMode {
    let Some(metric) = self.get(EXTENDED_PARAMETER) else {
      return ReportMode::Summary;
    };

    ReportMode::Detail(DetailRequest {
      metric: metric.to_string(),
      title: self.get(TITLE_PARAMETER).map(str::to_string),
      show_percentage: self.contains(SHOW_PERCENTAGE_PARAMETER),
    })
  }
}

impl DetailRequest {
  pub fn for_field(field: &FieldSpec) -> Self {
    Self {
      metric: field.metric.to_string(),
      title: Some(field.title.to_string()),
      show_percentage: field.show_percentage,
    }
  }

  pub fn is_lines_view(&self) -> bool {
    self.metric == LINES
  }

  /// The requested title, falling back to the summary title of the metric, then the metric itself.
  pub fn heading(&self) -> &str {
    if let Some(title) = &self.title {
      return title;
    }

    FieldSpec::find(&self.metric)
      .map(|field| field.title)
      .unwrap_or(self.metric.as_str())
  }

  /// The link to this leaderboard, relative to `report_url`.
  pub fn link(&self, report_url: &str) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    query.append_pair(EXTENDED_PARAMETER, &self.metric);

    if let Some(title) = &self.title {
      query.append_pair(TITLE_PARAMETER, title);
    }

    if self.show_percentage {
      query.append_pair(SHOW_PERCENTAGE_PARAMETER, "1");
    }

    format!("{}?{}", report_url, query.finish())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_extended_is_the_summary() {
    let parameters = RequestParameters::from_pairs([("title", "Lines")]);

    assert_eq!(parameters.report_mode(), ReportMode::Summary);
  }

  #[test]
  fn empty_extended_still_selects_a_detail_view() {
    let parameters = RequestParameters::from_query_string("extended=&title=X");

    let expected_mode = ReportMode::Detail(DetailRequest {
      metric: String::new(),
      title: Some("X".into()),
      show_percentage: false,
    });

    assert_eq!(parameters.report_mode(), expected_mode);
  }

  #[test]
  fn query_string_selects_a_detail_view() {
    let parameters =
      RequestParameters::from_query_string("?extended=foul&title=Foul+Language&showprcnt=1");

    let expected_mode = ReportMode::Detail(DetailRequest {
      metric: "foul".into(),
      title: Some("Foul Language".into()),
      show_percentage: true,
    });

    assert_eq!(parameters.report_mode(), expected_mode);
  }

  #[test]
  fn show_percentage_only_needs_the_key() {
    let parameters = RequestParameters::from_query_string("extended=happy&showprcnt");

    let ReportMode::Detail(detail) = parameters.report_mode() else {
      panic!("Expected a detail view.");
    };

    assert!(detail.show_percentage);
    assert_eq!(detail.heading(), "Happy");
  }

  #[test]
  fn merged_parameters_override_existing_ones() {
    let mut parameters = RequestParameters::from_query_string("extended=lines&title=Lines");

    parameters.merge(RequestParameters::from_pairs([("extended", "caps")]));

    assert_eq!(parameters.get(EXTENDED_PARAMETER), Some("caps"));
    assert_eq!(parameters.get(TITLE_PARAMETER), Some("Lines"));
  }

  #[test]
  fn command_line_overrides_the_query_string() {
    let args = ClapArgs::try_from_iter([
      "irc_stats_report",
      "--query",
      "extended=happy&title=Happy",
      "--extended",
      "unhappy",
      "--showprcnt",
    ])
    .unwrap();

    let parameters = RequestParameters::from_args(&args, Some("extended=foul&showprcnt=1&title=Foul"));

    let expected_mode = ReportMode::Detail(DetailRequest {
      metric: "unhappy".into(),
      title: Some("Happy".into()),
      show_percentage: true,
    });

    assert_eq!(parameters.report_mode(), expected_mode);
  }

  #[test]
  fn query_string_alone_selects_the_view() {
    let args = ClapArgs::try_from_iter(["irc_stats_report"]).unwrap();

    let parameters = RequestParameters::from_args(&args, Some("extended=caps"));

    assert!(matches!(parameters.report_mode(), ReportMode::Detail(_)));
    assert_eq!(
      RequestParameters::from_args(&args, None).report_mode(),
      ReportMode::Summary
    );
  }

  #[test]
  fn heading_falls_back_to_the_metric() {
    let detail = DetailRequest {
      metric: "caps".into(),
      title: None,
      show_percentage: false,
    };

    assert_eq!(detail.heading(), "caps");
  }

  #[test]
  fn link_expected_value() {
    let mut detail = DetailRequest::for_field(FieldSpec::find("foul").unwrap());

    assert_eq!(detail.link(""), "?extended=foul&title=Foul+Language");

    detail.show_percentage = true;

    assert_eq!(
      detail.link("/cgi-bin/stats"),
      "/cgi-bin/stats?extended=foul&title=Foul+Language&showprcnt=1"
    );
  }
}
