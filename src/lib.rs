pub mod errors;
pub mod field_spec;
pub mod logging;
pub mod rankings;
pub mod report_builders;
pub mod reports;
pub mod request_parameters;
pub mod stats_parser;
pub mod stats_source;
pub mod stats_table;
#[cfg(test)]
pub mod testing_helper_methods;
