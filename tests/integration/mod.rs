//! Integration tests for the kondate generation pipeline

mod cli_routes;
mod config_integration;
mod pipeline_end_to_end;
mod test_utils;
