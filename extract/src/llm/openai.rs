//! A client for OpenAI's chat completions API.

use std::env;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use super::base::{ApiClient, CompletionApiResponse, CompletionRequest};
use super::errors::LLMError;
use super::http_client::{HttpClient, ReqwestClient};
use crate::config::OpenAIConfig;
use crate::constants::{DEFAULT_OPENAI_MODEL, OPENAI_CHAT_COMPLETIONS_URL};

/// A client for the OpenAI chat completions endpoint. Requests are issued
/// with zero temperature so repeated extractions over the same text are
/// deterministic.
#[derive(Debug, Clone)]
pub struct OpenAIClient<T: HttpClient = ReqwestClient> {
    client: T,
    config: Option<OpenAIConfig>,
}

impl<T: HttpClient + Default> Default for OpenAIClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OpenAIClient<T>
where
    T: HttpClient + Default,
{
    /// Creates a client without configuration; the API key and model are
    /// read from `OPENAI_API_KEY` and `OPENAI_MODEL` at request time.
    pub fn new() -> Self {
        Self {
            client: T::default(),
            config: None,
        }
    }

    /// Creates a client with an explicit configuration.
    pub fn with_config(config: OpenAIConfig) -> Self {
        Self {
            client: T::default(),
            config: Some(config),
        }
    }
}

impl<T: HttpClient> OpenAIClient<T> {
    /// Creates a client with a caller-supplied HTTP transport. Used by tests
    /// to substitute a mock.
    pub fn with_http_client(client: T, config: Option<OpenAIConfig>) -> Self {
        Self { client, config }
    }
}

#[derive(Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Clone, Serialize, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Clone, Serialize, Deserialize)]
struct OpenAIChoiceMessage {
    role: String,
    content: String,
}

#[derive(Clone, Serialize, Deserialize)]
struct OpenAIChoice {
    message: OpenAIChoiceMessage,
    finish_reason: Option<String>,
    index: u32,
}

#[derive(Clone, Serialize, Deserialize)]
struct OpenAIResponse {
    id: String,
    object: String,
    created: u64,
    model: String,
    usage: OpenAIUsage,
    choices: Vec<OpenAIChoice>,
}

impl<T: HttpClient> ApiClient for OpenAIClient<T> {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionApiResponse, LLMError> {
        let (key, model) = match &self.config {
            Some(config) => (config.api_key.clone(), config.model.clone()),
            None => (
                env::var("OPENAI_API_KEY")?,
                env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            ),
        };

        let req_body = OpenAIRequest {
            model,
            messages: vec![OpenAIMessage {
                role: "system".to_owned(),
                content: request.prompt.clone(),
            }],
            max_tokens: request.max_tokens,
            temperature: 0.0,
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| LLMError::Generic(e.to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let res = self
            .client
            .post_json(OPENAI_CHAT_COMPLETIONS_URL, headers, &req_body)
            .await?;

        let status = res.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LLMError::RateLimited);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(LLMError::Credential);
        }
        if !status.is_success() {
            return Err(LLMError::HttpStatus(status.as_u16()));
        }

        let body = res.text().await?;
        let response: OpenAIResponse =
            serde_json::from_str(&body).map_err(|_| LLMError::Deserialization(body))?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| LLMError::Deserialization("response had no choices".to_string()))?;

        Ok(CompletionApiResponse {
            content: choice.message.content.clone(),
            input_tokens: response.usage.prompt_tokens,
            output_tokens: response.usage.completion_tokens,
        })
    }
}
