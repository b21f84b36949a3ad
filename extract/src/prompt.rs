//! Prompt rendering and the token budget calculation.

use crate::errors::ExtractError;
use crate::token::Tokenizer;

/// Render the extraction prompt, substituting the column list, the free-text
/// instructions, and the document text into the fixed template.
#[must_use]
pub fn render_prompt(columns: &[String], instructions: &str, text: &str) -> String {
    let columns = columns.join(", ");

    format!(
        "Extract structured data from the following text. Follow these requirements:\n\
         1. Output only JSON format with a list of objects\n\
         2. Use exactly these column names: {columns}\n\
         3. {instructions}\n\
         4. Maintain data types (string, number, date)\n\
         5. Return empty string if information not available\n\
         \n\
         Text content:\n\
         {text}\n\
         \n\
         JSON output:"
    )
}

/// Compute how many tokens remain available for document text once the
/// static prompt and the reserved response allowance are accounted for.
///
/// The static portion is the fully rendered prompt with an empty text slot,
/// tokenized with the same tokenizer used for chunking so the budget stays
/// consistent with what the completion request will actually contain.
///
/// # Errors
///
/// `ExtractError::PromptTooLong` if no budget remains; the caller must
/// shorten the columns or instructions before any chunking is attempted.
pub fn text_token_budget(
    columns: &[String],
    instructions: &str,
    tokenizer: &impl Tokenizer,
    model_max_tokens: usize,
    reserved_response_tokens: usize,
) -> Result<usize, ExtractError> {
    let static_prompt = render_prompt(columns, instructions, "");
    let static_tokens = tokenizer.encode(&static_prompt).len();

    let available = model_max_tokens
        .checked_sub(static_tokens)
        .and_then(|rest| rest.checked_sub(reserved_response_tokens))
        .unwrap_or(0);

    if available == 0 {
        return Err(ExtractError::PromptTooLong);
    }

    Ok(available)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::testing::CharTokenizer;

    fn static_tokens(columns: &[String], instructions: &str) -> usize {
        CharTokenizer.encode(&render_prompt(columns, instructions, "")).len()
    }

    #[test]
    fn test_prompt_contains_columns_and_instructions() {
        let columns = vec!["name".to_string(), "amount".to_string()];
        let prompt = render_prompt(&columns, "Dates in ISO format.", "some text");

        assert!(prompt.contains("name, amount"));
        assert!(prompt.contains("Dates in ISO format."));
        assert!(prompt.contains("some text"));
    }

    #[test]
    fn test_budget_is_what_remains() {
        let columns = vec!["a".to_string()];
        let overhead = static_tokens(&columns, "");

        let budget = text_token_budget(&columns, "", &CharTokenizer, overhead + 2_005, 2_000);
        assert_eq!(budget.unwrap(), 5);
    }

    #[test]
    fn test_no_room_for_text_is_prompt_too_long() {
        let columns = vec!["a".to_string()];
        let overhead = static_tokens(&columns, "");

        // Exactly consumed, and over-consumed, both fail before chunking.
        for model_max in [overhead + 2_000, overhead + 1_999, overhead, 0] {
            let result = text_token_budget(&columns, "", &CharTokenizer, model_max, 2_000);
            assert!(matches!(result, Err(ExtractError::PromptTooLong)));
        }
    }

    #[test]
    fn test_longer_instructions_shrink_the_budget() {
        let columns = vec!["a".to_string()];
        let model_max = 10_000;

        let short = text_token_budget(&columns, "x", &CharTokenizer, model_max, 100).unwrap();
        let long = text_token_budget(&columns, &"x".repeat(50), &CharTokenizer, model_max, 100)
            .unwrap();

        assert_eq!(short - long, 49);
    }
}
