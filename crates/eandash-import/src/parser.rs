//! Extraction of EAN code lists from raw multi-line text.
//!
//! Used for both uploaded files and pasted input. Deliberately does NOT
//! apply the 13-digit format check — the bulk path accepts whatever lines
//! survive trimming and deduplication, mirroring the lenient upload flow;
//! only the single-lookup path validates with [`eandash_core::EanCode`].

use std::collections::HashSet;

/// Codes shown in the preview table are capped at this many rows.
pub const PREVIEW_LIMIT: usize = 1000;

/// The outcome of parsing raw input: an ordered, deduplicated code list
/// plus the counts the preview screen displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCodes {
    pub codes: Vec<String>,
    /// Number of unique codes (equals `codes.len()`).
    pub total: usize,
    /// Number of codes shown in the preview, capped at [`PREVIEW_LIMIT`].
    pub preview: usize,
}

/// Splits raw text on line breaks, trims each line, drops empties, and
/// deduplicates while preserving first-seen order.
#[must_use]
pub fn parse_codes(input: &str) -> ParsedCodes {
    let mut seen = HashSet::new();
    let codes: Vec<String> = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(line.to_string()))
        .map(ToString::to_string)
        .collect();

    let total = codes.len();
    ParsedCodes {
        codes,
        total,
        preview: total.min(PREVIEW_LIMIT),
    }
}
