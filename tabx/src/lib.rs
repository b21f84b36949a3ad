//! The CLI shell around the `extract` core: argument parsing, configuration,
//! the PDF document source, and the CSV output surface.

pub mod app;
pub mod common;
pub mod config;
pub mod document;
pub mod errors;
pub mod output;
