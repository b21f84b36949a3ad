//! The CLI run loop: files are processed sequentially in argument order, and
//! a failure in one document never aborts its siblings. Only a budget
//! failure (`PromptTooLong`) ends the whole run, since no document could be
//! processed with it.

use std::path::Path;
use std::str::FromStr;

use clap::Parser;
use log::LevelFilter;
use serde_json::Value;

use extract::config::OpenAIConfig;
use extract::errors::ExtractError;
use extract::llm::openai::OpenAIClient;
use extract::pages::parse_page_range;
use extract::records::{extract_records, BudgetParams, ExtractionRequest, Record};
use extract::token::TiktokenTokenizer;

use crate::common::{setup_logger, Args};
use crate::config::{get_config_dir, Config};
use crate::document::PdfDocument;
use crate::errors::CLIError;
use crate::output;

/// Run the extraction pipeline over the command-line arguments.
///
/// # Errors
///
/// `CLIError` on invalid arguments, configuration failures, a prompt that
/// leaves no token budget, or output IO failures.
pub async fn run() -> Result<(), CLIError> {
    let args = Args::parse();

    let level = LevelFilter::from_str(&args.log_level)
        .map_err(|_| CLIError::InvalidLogLevel(args.log_level.clone()))?;
    let _ = setup_logger(level);

    let columns = validated_columns(&args.columns)?;

    let mut config = load_config(args.config.as_deref())?;
    config.read_env()?;

    let client: OpenAIClient = match &config.api_key {
        Some(api_key) => OpenAIClient::with_config(OpenAIConfig {
            api_key: api_key.clone(),
            model: config.model.clone(),
        }),
        // Falls back to OPENAI_API_KEY at request time.
        None => OpenAIClient::new(),
    };
    let tokenizer = TiktokenTokenizer::new();

    let request = ExtractionRequest {
        columns: columns.clone(),
        instructions: args.instructions.clone(),
        multiple_rows: args.multiple_rows,
    };
    let budget = BudgetParams {
        model_max_tokens: config.model_max_tokens,
        reserved_response_tokens: config.reserved_response_tokens,
    };

    let mut all_records: Vec<Record> = Vec::new();

    for path in &args.files {
        let document = match PdfDocument::load(path) {
            Ok(document) => document,
            Err(e) => {
                log::error!("skipping {}: {e}", path.display());
                continue;
            }
        };

        let page_indices = parse_page_range(&args.pages, document.page_count());
        if page_indices.is_empty() && !args.pages.trim().is_empty() {
            let e = ExtractError::InvalidPageRange(args.pages.clone());
            log::error!("skipping {}: {e}", path.display());
            continue;
        }

        let text = match document.text_for_pages(&page_indices) {
            Ok(text) => text,
            Err(e) => {
                log::error!("skipping {}: {e}", path.display());
                continue;
            }
        };

        let records = match extract_records(&client, &tokenizer, &text, &request, &budget).await {
            Ok(records) => records,
            // No document can fit any text; end the whole run.
            Err(e @ ExtractError::PromptTooLong) => return Err(e.into()),
            Err(e) => {
                log::error!("skipping {}: {e}", path.display());
                continue;
            }
        };

        log::info!("{}: {} records", path.display(), records.len());

        let file_tag = Value::String(path.display().to_string());
        for mut record in records {
            record.insert(output::SOURCE_FILE_FIELD.to_string(), file_tag.clone());
            all_records.push(record);
        }
    }

    if all_records.is_empty() {
        println!("No data extracted from the documents.");
        return Ok(());
    }

    output::print_preview(&mut std::io::stdout(), &columns, &all_records, 5)?;

    let file = std::fs::File::create(&args.output)?;
    output::write_csv(file, &columns, &all_records)?;
    println!(
        "Extracted {} records to {}",
        all_records.len(),
        args.output.display()
    );

    Ok(())
}

/// Validate the column specification: at least one column, exact-name
/// duplicates rejected, order preserved.
fn validated_columns(columns: &[String]) -> Result<Vec<String>, CLIError> {
    if columns.is_empty() {
        return Err(CLIError::NoColumns);
    }

    let mut seen: Vec<String> = Vec::with_capacity(columns.len());
    for column in columns {
        if seen.contains(column) {
            return Err(CLIError::DuplicateColumn(column.clone()));
        }
        seen.push(column.clone());
    }

    Ok(seen)
}

fn load_config(path: Option<&Path>) -> Result<Config, CLIError> {
    if let Some(path) = path {
        return Ok(Config::from_file(path)?);
    }

    if let Ok(dir) = get_config_dir() {
        let default_path = dir.join("config.toml");
        if default_path.exists() {
            return Ok(Config::from_file(default_path)?);
        }
    }

    Ok(Config::default())
}
