//! A library for extracting structured tabular records from document text
//! with an LLM completion backend.
//!
//! The pipeline: parse a page-range expression into page indices, compute how
//! many tokens of document text fit alongside the static prompt, split the
//! text into token-budgeted chunks, and issue one completion request per
//! chunk, recovering JSON records from each response. Everything is driven by
//! plain function calls so the core is consumable from any CLI or service
//! shell.

#![deny(unused_must_use)]
#![deny(unreachable_code)]
#![deny(unreachable_patterns)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]

pub mod chunk;
pub mod config;
pub mod constants;
pub mod errors;
pub mod llm;
pub mod pages;
pub mod prompt;
pub mod records;
pub mod token;
