pub mod config;
pub mod report;
pub mod report_ui;
