//! Provider-agnostic request and response types.

use serde::{Deserialize, Serialize};

use super::errors::LLMError;

/// A completion request that does not carry API-specific information.
/// Clients convert from this to their native request types.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CompletionRequest {
    /// The fully rendered prompt.
    pub prompt: String,

    /// Maximum number of tokens the model may generate; set to the reserved
    /// response budget so the request stays within the model context.
    pub max_tokens: u32,
}

/// A completion response, containing only the information callers use.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CompletionApiResponse {
    /// The raw completion text. Not guaranteed to be syntactically pure
    /// JSON; callers must parse tolerantly.
    pub content: String,

    /// Tokens consumed by the prompt.
    pub input_tokens: u32,

    /// Tokens generated in the response.
    pub output_tokens: u32,
}

/// The completion capability boundary.
#[allow(async_fn_in_trait)]
pub trait ApiClient {
    /// Request one completion for `request`.
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionApiResponse, LLMError>;
}
