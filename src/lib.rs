//! kondate: batch generation of bento preset documents
//!
//! Asks a text-generation backend for recipes, main dishes and side dishes in small batches,
//! extracts the JSON it returns, and merges the results into pretty-printed preset documents.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod generation;
pub mod kinds;
pub mod logging;
pub mod pipeline;
pub mod provider;
