pub mod clap;
pub mod config;
pub mod log_level_wrapper;
pub mod output_format;
pub mod rolling_appender_rotation;

pub use crate::clap::CLAP_ARGS;
pub use crate::config::AppConfig;
pub use crate::output_format::OutputFormat;
