//! Page range parsing.

use std::collections::BTreeSet;

/// Parse a user-facing page range expression into a sorted, deduplicated set
/// of zero-based page indices.
///
/// The expression is a comma-separated list of terms, each either a single
/// 1-based page number or a 1-based inclusive range like `2-5`. Range bounds
/// are clamped to the document (`start` floored to 1, `end` capped to
/// `total_pages`); a range that is empty after clamping is silently skipped,
/// as is a single page number outside the document. An empty or
/// whitespace-only expression selects every page.
///
/// Any term that does not parse as a number or range invalidates the whole
/// expression and yields an empty result. Callers must treat an empty result
/// for a non-empty expression as an invalid range.
#[must_use]
pub fn parse_page_range(expr: &str, total_pages: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }

    if expr.trim().is_empty() {
        return (0..total_pages).collect();
    }

    let mut pages = BTreeSet::new();

    for term in expr.split(',') {
        let term = term.trim();

        if let Some((start, end)) = term.split_once('-') {
            let (Ok(start), Ok(end)) = (start.trim().parse::<u64>(), end.trim().parse::<u64>())
            else {
                return Vec::new();
            };

            let start = start.max(1);
            let end = end.min(total_pages as u64);

            // An empty clamped range (start > end) contributes nothing.
            for page in start..=end {
                pages.insert((page - 1) as usize);
            }
        } else {
            let Ok(page) = term.parse::<u64>() else {
                return Vec::new();
            };

            if page >= 1 && page <= total_pages as u64 {
                pages.insert((page - 1) as usize);
            }
        }
    }

    pages.into_iter().collect()
}
