pub mod paths;
pub mod report_config;
pub mod test_helpers;
