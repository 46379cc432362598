// Presentation layer - Command line interface and output
pub mod app_state;
pub mod cli;
pub mod handlers;
pub mod output;
