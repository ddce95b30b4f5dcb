use super::leaderboards::{DetailView, ReportHeader, ReportPage, SummaryView};
use tabled::builder::Builder;
use tabled::settings::Style;

/// Renders the page as Markdown, with the leaderboards as tables.
pub fn render_markdown_report(header: &ReportHeader, page: &ReportPage) -> String {
  let mut report = format!(
    "# {} @ {} stats by ctrlproxy\n\nStatistics generated on {}. A total of {} different nicks were represented on {}.\n\n",
    header.channel, header.network, header.generated_at, header.nick_count, header.channel
  );

  match page {
    ReportPage::Detail(detail) => push_detail(&mut report, detail),
    ReportPage::Summary(summary) => push_summary(&mut report, summary),
  }

  report
}

fn push_detail(report: &mut String, detail: &DetailView) {
  let mut builder = Builder::default();

  if detail.lines_view {
    builder.push_record(["Rank", "Nick", "Lines", "Words"].map(String::from));

    for row in &detail.rows {
      builder.push_record([
        row.rank.to_string(),
        row.nick.clone(),
        row.value.clone(),
        row.words.clone(),
      ]);
    }
  } else {
    builder.push_record(["Rank".to_string(), "Nick".to_string(), detail.heading.clone()]);

    for row in &detail.rows {
      let value = if row.percentage.is_empty() {
        row.value.clone()
      } else {
        format!("{} ({})", row.value, row.percentage)
      };

      builder.push_record([row.rank.to_string(), row.nick.clone(), value]);
    }
  }

  let mut table = builder.build();
  table.with(Style::markdown());

  report.push_str(&format!("## {}\n\n{}\n", detail.heading, table));

  if detail.lines_view {
    report.push_str(&format!("\nTotal lines: {}\n", detail.total_lines));
  }
}

fn push_summary(report: &mut String, summary: &SummaryView) {
  for section in &summary.sections {
    report.push_str(&format!("## {}\n\n", section.title));

    for message in &section.messages {
      report.push_str(message);
      report.push_str("\n\n");
    }

    report.push_str(&format!("[...]({})\n\n---\n\n", section.link));
  }

  if !summary.big_numbers.is_empty() {
    report.push_str("## Big Numbers\n\n");

    for message in &summary.big_numbers {
      report.push_str(message);
      report.push_str("\n\n");
    }

    report.push_str("---\n\n");
  }

  if summary.hourly_activity.is_empty() {
    return;
  }

  let mut builder = Builder::default();

  builder.push_record(["Hour", "Lines", "Share"].map(String::from));

  for hour in &summary.hourly_activity {
    builder.push_record([
      hour.hour.to_string(),
      hour.lines.to_string(),
      hour.percentage.clone(),
    ]);
  }

  let mut table = builder.build();
  table.with(Style::markdown());

  report.push_str(&format!("## Most active times\n\n{}\n", table));
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::request_parameters::DetailRequest;
  use crate::testing_helper_methods::*;
  use chrono::DateTime;

  #[test]
  fn lines_table_expected_value() {
    let channel_stats = channel_stats(&[
      ("", &[("lines", 100)]),
      ("nick1", &[("lines", 40), ("words", 20)]),
      ("nick2", &[("lines", 60), ("words", 30)]),
    ]);
    let request = DetailRequest {
      metric: "lines".into(),
      title: None,
      show_percentage: false,
    };
    let header = ReportHeader::new(
      TEST_NETWORK,
      TEST_CHANNEL,
      &channel_stats,
      DateTime::from_timestamp(0, 0).unwrap(),
    );
    let page = ReportPage::Detail(DetailView::new(&channel_stats, &request));

    let markdown = render_markdown_report(&header, &page);
    let table_rows: Vec<&str> = markdown
      .lines()
      .filter(|line| line.starts_with('|'))
      .collect();

    assert!(markdown.starts_with("# #ctrlproxy @ INU stats by ctrlproxy\n"));
    assert_eq!(table_rows.len(), 4);
    assert!(table_rows[2].contains("nick2"));
    assert!(table_rows[3].contains("nick1"));
    assert!(markdown.contains("Total lines: 100"));
  }

  #[test]
  fn summary_expected_value() {
    let channel_stats = channel_stats(&[("x", &[("unhappy", 3)]), ("y", &[("unhappy", 1)])]);
    let header = ReportHeader::new(
      TEST_NETWORK,
      TEST_CHANNEL,
      &channel_stats,
      DateTime::from_timestamp(0, 0).unwrap(),
    );
    let page = ReportPage::Summary(SummaryView::new(&channel_stats, ""));

    let markdown = render_markdown_report(&header, &page);

    assert!(markdown.contains("## Unhappy\n\nx is the saddest person on the channel\n\ny is quite sad as well\n\n"));
    assert!(markdown.contains("[...](?extended=unhappy&title=Unhappy)"));
    assert!(markdown.contains(
      "## Big Numbers\n\nOn the other hand x seems to be quite sad :(\n\n---\n\n"
    ));
  }
}
