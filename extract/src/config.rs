//! Provider configuration for the completion client.

use serde::{Deserialize, Serialize};

/// OpenAI client configuration. When a client is built without one, it falls
/// back to the `OPENAI_API_KEY` and `OPENAI_MODEL` environment variables.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAIConfig {
    /// API key for the completions endpoint.
    pub api_key: String,

    /// Model name (e.g., "gpt-4o-mini").
    pub model: String,
}
