//! Constants used throughout the extraction pipeline.

/// Default OpenAI model for chat completions.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Context window of the default model, in tokens.
pub const DEFAULT_MODEL_MAX_TOKENS: usize = 128_000;

/// Tokens reserved for the model's response in every request.
pub const DEFAULT_RESERVED_RESPONSE_TOKENS: usize = 2_000;

/// OpenAI chat completions endpoint.
pub const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
