use super::leaderboards::{ReportHeader, ReportPage};
use super::template_renderer::TemplateRenderer;
use crate::errors::AppError;

const LAYOUT_TEMPLATE: &str = include_str!("templates/layout.html");
const DETAIL_TEMPLATE: &str = include_str!("templates/detail.html");
const SUMMARY_TEMPLATE: &str = include_str!("templates/summary.html");

/// Renders the page as an HTML document. Every interpolated value is escaped.
pub fn render_html_report(header: &ReportHeader, page: &ReportPage) -> Result<String, AppError> {
  let mut renderer = TemplateRenderer::new();

  renderer.add_many_templates(vec![
    ("layout.html", LAYOUT_TEMPLATE),
    ("detail.html", DETAIL_TEMPLATE),
    ("summary.html", SUMMARY_TEMPLATE),
  ])?;
  renderer.add_context("report", header);

  match page {
    ReportPage::Detail(detail) => {
      renderer.add_context("detail", detail);

      renderer.render("detail.html")
    }
    ReportPage::Summary(summary) => {
      renderer.add_context("summary", summary);

      renderer.render("summary.html")
    }
  }
}
