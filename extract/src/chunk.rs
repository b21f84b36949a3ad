//! Token-budgeted, paragraph-aware chunk splitting.
//!
//! A chunk is a contiguous run of decoded text reconstructed from a bounded
//! token sequence, representing one unit of work sent to the completion
//! capability. Chunks are produced in document order and never overlap.

use crate::token::{Tokenizer, TokenizerError};

/// Split `text` into chunks of at most `max_tokens` tokens each.
///
/// Paragraphs (newline-separated lines) are packed greedily into the current
/// chunk. When a paragraph does not fit, the current chunk is flushed and the
/// paragraph starts a new one; a paragraph that cannot fit in any chunk on
/// its own is sliced into consecutive runs of exactly `max_tokens` tokens
/// (the last run may be shorter), so no chunk ever exceeds the budget. A
/// slice boundary may land inside a multi-byte character; decoding replaces
/// the partial fragment, so slicing never fails on valid input. The
/// paragraph separator's token cost is charged when packing, which keeps the
/// budget invariant exact.
///
/// Whitespace-only paragraphs are skipped, so an input of only whitespace
/// yields zero chunks; callers treat that as "nothing to extract", not an
/// error.
///
/// # Errors
///
/// `TokenizerError` if a token slice fails to decode back to text.
pub fn split_into_chunks(
    text: &str,
    max_tokens: usize,
    tokenizer: &impl Tokenizer,
) -> Result<Vec<String>, TokenizerError> {
    if max_tokens == 0 {
        return Ok(Vec::new());
    }

    let separator = tokenizer.encode("\n");

    let mut chunks = Vec::new();
    let mut current: Vec<u32> = Vec::new();

    for para in text.split('\n') {
        if para.trim().is_empty() {
            continue;
        }

        let para_tokens = tokenizer.encode(para);
        let sep_cost = if current.is_empty() { 0 } else { separator.len() };

        if current.len() + sep_cost + para_tokens.len() > max_tokens {
            if !current.is_empty() {
                chunks.push(tokenizer.decode(&current)?);
                current.clear();
            }

            if para_tokens.len() > max_tokens {
                // The paragraph cannot fit in any chunk as a unit: slice its
                // token stream directly.
                for slice in para_tokens.chunks(max_tokens) {
                    chunks.push(tokenizer.decode(slice)?);
                }
            } else {
                current = para_tokens;
            }
        } else {
            if !current.is_empty() {
                current.extend_from_slice(&separator);
            }
            current.extend_from_slice(&para_tokens);
        }
    }

    if !current.is_empty() {
        chunks.push(tokenizer.decode(&current)?);
    }

    Ok(chunks)
}
