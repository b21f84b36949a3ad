//! The extraction orchestrator: chunk the document, issue one completion per
//! chunk, and recover structured records from the responses.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::chunk::split_into_chunks;
use crate::constants::{DEFAULT_MODEL_MAX_TOKENS, DEFAULT_RESERVED_RESPONSE_TOKENS};
use crate::errors::ExtractError;
use crate::llm::base::{ApiClient, CompletionRequest};
use crate::prompt::{render_prompt, text_token_budget};
use crate::token::Tokenizer;

/// One extracted record: a mapping from field name to scalar value. Records
/// are created on parse, appended to the result list, and never mutated
/// afterward (the caller may tag them with a source-file identifier).
pub type Record = Map<String, Value>;

/// Matches brace-delimited candidate objects in a newline-flattened
/// response.
static JSON_OBJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{.*?\}").expect("invalid JSON object regex"));

/// Token accounting parameters for one extraction run.
#[derive(Clone, Copy, Debug)]
pub struct BudgetParams {
    /// Total context size of the model, in tokens.
    pub model_max_tokens: usize,

    /// Tokens reserved for the model's response; also used as the response
    /// length cap on every completion request.
    pub reserved_response_tokens: usize,
}

impl Default for BudgetParams {
    fn default() -> Self {
        Self {
            model_max_tokens: DEFAULT_MODEL_MAX_TOKENS,
            reserved_response_tokens: DEFAULT_RESERVED_RESPONSE_TOKENS,
        }
    }
}

/// What to extract: the output schema, free-text instructions, and whether a
/// document may yield more than one record.
#[derive(Clone, Debug)]
pub struct ExtractionRequest {
    /// Ordered list of output field names.
    pub columns: Vec<String>,

    /// Free-text instructions substituted into the prompt.
    pub instructions: String,

    /// When false, at most one record is returned per document: the first
    /// record of the first chunk that produced any data.
    pub multiple_rows: bool,
}

/// Extract structured records from one document's text.
///
/// Empty or whitespace-only text returns no records. The text budget is
/// computed first and a non-positive budget fails with
/// [`ExtractError::PromptTooLong`] before any chunking or completion work.
/// Chunks are processed sequentially in document order; a completion failure
/// for one chunk is logged and skipped, so partial results from the other
/// chunks are preserved.
///
/// # Errors
///
/// * `ExtractError::PromptTooLong` - the static prompt leaves no room for
///   document text; the whole call is aborted.
/// * `ExtractError::Tokenizer` - a token sequence failed to decode while
///   chunking.
pub async fn extract_records(
    client: &impl ApiClient,
    tokenizer: &impl Tokenizer,
    text: &str,
    request: &ExtractionRequest,
    budget: &BudgetParams,
) -> Result<Vec<Record>, ExtractError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let available_tokens = text_token_budget(
        &request.columns,
        &request.instructions,
        tokenizer,
        budget.model_max_tokens,
        budget.reserved_response_tokens,
    )?;

    let chunks = split_into_chunks(text, available_tokens, tokenizer)?;
    if chunks.is_empty() {
        // Nothing to extract; not an error.
        return Ok(Vec::new());
    }

    let mut records: Vec<Record> = Vec::new();

    for (i, chunk) in chunks.iter().enumerate() {
        let completion = CompletionRequest {
            prompt: render_prompt(&request.columns, &request.instructions, chunk),
            max_tokens: u32::try_from(budget.reserved_response_tokens).unwrap_or(u32::MAX),
        };

        match client.complete(&completion).await {
            Ok(response) => records.extend(recover_records(&response.content)),
            Err(e) => {
                // Non-fatal: this chunk contributes nothing, siblings still run.
                log::warn!("completion failed for chunk {}/{}: {e}", i + 1, chunks.len());
            }
        }
    }

    if !request.multiple_rows {
        records.truncate(1);
    }

    Ok(records)
}

/// Recover JSON objects from a raw completion response.
///
/// Responses are not guaranteed to be syntactically pure JSON: models wrap
/// output in prose or code fences. The response is flattened to one line and
/// scanned for brace-delimited candidates; each candidate is parsed
/// independently and unparsable ones are silently dropped. This lossy
/// recovery is deliberate and must not be replaced with strict
/// whole-response parsing, which loses records on real completion output.
#[must_use]
pub fn recover_records(response: &str) -> Vec<Record> {
    let flattened = response.replace('\n', " ");

    JSON_OBJECT_RE
        .find_iter(&flattened)
        .filter_map(|candidate| serde_json::from_str::<Record>(candidate.as_str()).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::llm::base::CompletionApiResponse;
    use crate::llm::errors::LLMError;
    use crate::token::testing::CharTokenizer;

    /// Answers completion requests from a script, in order.
    struct ScriptedClient {
        responses: Mutex<VecDeque<Result<CompletionApiResponse, LLMError>>>,
    }

    impl ScriptedClient {
        fn new(responses: Vec<Result<CompletionApiResponse, LLMError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    impl ApiClient for ScriptedClient {
        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<CompletionApiResponse, LLMError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected completion request")
        }
    }

    fn ok_response(content: &str) -> Result<CompletionApiResponse, LLMError> {
        Ok(CompletionApiResponse {
            content: content.to_string(),
            input_tokens: 0,
            output_tokens: 0,
        })
    }

    fn request(multiple_rows: bool) -> ExtractionRequest {
        ExtractionRequest {
            columns: vec!["a".to_string()],
            instructions: String::new(),
            multiple_rows,
        }
    }

    /// A budget that leaves `text_tokens` of room after the static prompt,
    /// measured with [`CharTokenizer`].
    fn budget_with_room(req: &ExtractionRequest, text_tokens: usize) -> BudgetParams {
        let overhead = CharTokenizer
            .encode(&render_prompt(&req.columns, &req.instructions, ""))
            .len();

        BudgetParams {
            model_max_tokens: overhead + 100 + text_tokens,
            reserved_response_tokens: 100,
        }
    }

    #[test]
    fn test_recover_record_from_prose() {
        let records = recover_records("Here is the data: {\"a\": 1} and more text");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("a"), Some(&json!(1)));
    }

    #[test]
    fn test_recover_records_from_fenced_list() {
        let response = "```json\n[{\"a\": 1},\n {\"a\": 2}]\n```";
        let records = recover_records(response);

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("a"), Some(&json!(2)));
    }

    #[test]
    fn test_recover_nothing_from_plain_prose() {
        assert!(recover_records("I could not find any data.").is_empty());
    }

    #[test]
    fn test_unparsable_candidates_are_dropped() {
        // The non-greedy scan truncates the nested object to an unparsable
        // candidate; it is discarded rather than failing the response.
        assert!(recover_records("{\"a\": {\"b\": 1}}").is_empty());

        let records = recover_records("{oops} {\"a\": \"x, y\"}");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("a"), Some(&json!("x, y")));
    }

    #[tokio::test]
    async fn test_empty_text_returns_no_records() {
        let client = ScriptedClient::new(vec![]);
        let req = request(true);
        let budget = budget_with_room(&req, 10);

        for text in ["", "   ", "\n\n"] {
            let records = extract_records(&client, &CharTokenizer, text, &req, &budget)
                .await
                .unwrap();
            assert!(records.is_empty());
        }
    }

    #[tokio::test]
    async fn test_prompt_too_long_aborts_before_any_request() {
        let client = ScriptedClient::new(vec![]);
        let req = request(true);
        let budget = BudgetParams {
            model_max_tokens: 10,
            reserved_response_tokens: 100,
        };

        let result = extract_records(&client, &CharTokenizer, "some text", &req, &budget).await;
        assert!(matches!(result, Err(ExtractError::PromptTooLong)));
    }

    #[tokio::test]
    async fn test_records_merge_across_chunks_in_order() {
        let client = ScriptedClient::new(vec![
            ok_response("{\"a\": 1}"),
            ok_response("{\"a\": 2} trailing prose"),
        ]);
        let req = request(true);
        // Room for 5 text tokens forces "aaaaa\nbbbbb" into two chunks.
        let budget = budget_with_room(&req, 5);

        let records = extract_records(&client, &CharTokenizer, "aaaaa\nbbbbb", &req, &budget)
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("a"), Some(&json!(1)));
        assert_eq!(records[1].get("a"), Some(&json!(2)));
    }

    #[tokio::test]
    async fn test_failed_chunk_does_not_block_later_chunks() {
        let client = ScriptedClient::new(vec![
            Err(LLMError::Network),
            ok_response("{\"a\": 2}"),
        ]);
        let req = request(true);
        let budget = budget_with_room(&req, 5);

        let records = extract_records(&client, &CharTokenizer, "aaaaa\nbbbbb", &req, &budget)
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("a"), Some(&json!(2)));
    }

    #[tokio::test]
    async fn test_single_row_mode_keeps_first_record_only() {
        let client = ScriptedClient::new(vec![
            ok_response("{\"a\": 1} {\"a\": 2}"),
            ok_response("{\"a\": 3}"),
        ]);
        let req = request(false);
        let budget = budget_with_room(&req, 5);

        let records = extract_records(&client, &CharTokenizer, "aaaaa\nbbbbb", &req, &budget)
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("a"), Some(&json!(1)));
    }

    #[tokio::test]
    async fn test_single_row_mode_falls_through_empty_chunks() {
        // The first chunk produces nothing; the kept record comes from the
        // first chunk that yields data.
        let client = ScriptedClient::new(vec![
            ok_response("no data here"),
            ok_response("{\"a\": 3}"),
        ]);
        let req = request(false);
        let budget = budget_with_room(&req, 5);

        let records = extract_records(&client, &CharTokenizer, "aaaaa\nbbbbb", &req, &budget)
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("a"), Some(&json!(3)));
    }
}
