use std::str::FromStr;

/// The document format a report is rendered into.
#[derive(
  Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  #[default]
  Html,
  #[serde(alias = "md")]
  Markdown,
}

impl OutputFormat {
  pub const POSSIBLE_VALUES: [&'static str; 3] = ["html", "markdown", "md"];
}

impl FromStr for OutputFormat {
  type Err = String;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value.trim().to_lowercase().as_str() {
      "html" => Ok(Self::Html),
      "markdown" | "md" => Ok(Self::Markdown),
      _ => Err(value.to_string()),
    }
  }
}

impl std::fmt::Display for OutputFormat {
  fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Html => write!(formatter, "html"),
      Self::Markdown => write!(formatter, "markdown"),
    }
  }
}
