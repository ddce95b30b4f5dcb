pub mod html_report;
pub mod leaderboards;
pub mod markdown_report;
pub mod template_renderer;
