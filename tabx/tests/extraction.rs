//! End-to-end extraction against the real completion API. Gated on
//! `INTEGRATION_TESTS` so regular test runs stay offline.

use std::env;

use dotenv::dotenv;

use extract::llm::openai::OpenAIClient;
use extract::records::{extract_records, BudgetParams, ExtractionRequest};
use extract::token::TiktokenTokenizer;

#[tokio::test]
async fn test_end_to_end_extraction() {
    dotenv().ok();

    if env::var("INTEGRATION_TESTS").is_err() {
        return;
    }
    env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set for this test");

    let client: OpenAIClient = OpenAIClient::new();
    let tokenizer = TiktokenTokenizer::new();

    let request = ExtractionRequest {
        columns: vec!["item".to_string(), "amount".to_string()],
        instructions: "Extract each invoice line item.".to_string(),
        multiple_rows: true,
    };

    let text = "Invoice #1042\nWidget A: $10.00\nWidget B: $20.00\nTotal: $30.00";
    let records = extract_records(
        &client,
        &tokenizer,
        text,
        &request,
        &BudgetParams::default(),
    )
    .await
    .expect("extraction failed");

    assert!(!records.is_empty(), "expected at least one record");
    for record in &records {
        assert!(record.contains_key("item"));
        assert!(record.contains_key("amount"));
    }
}
