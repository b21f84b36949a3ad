//! Completion clients and the request/response boundary.
//!
//! The completion capability is treated as a black box: given a prompt
//! string, a response-length cap, and a determinism setting, return a text
//! completion or fail with an [`errors::LLMError`].

pub mod base;
pub mod errors;
pub mod http_client;
pub mod openai;
