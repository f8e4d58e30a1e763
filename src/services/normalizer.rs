//! Row normalization rules
//!
//! Turns one raw sheet row into a canonical contact record. An invalid
//! row is a per-row outcome, not an error: the pipeline counts it as
//! blank and moves on.

use crate::types::{ContactRecord, SchemaPattern};

/// Standardization tag present exactly once on every output record.
pub const DEFAULT_TAG: &str = "NomeConfirmado";

/// Hard cap from the downstream messaging platform. Longer numbers carry
/// extra carrier-prefix digits at positions 4 and 5, which get dropped.
const MAX_PHONE_DIGITS: usize = 13;

/// Normalize one raw row against the job's layout.
///
/// Returns `None` when the row is invalid: all cells blank, no usable
/// first name, or a phone with fewer than `min_phone_digits` digits after
/// cleanup.
pub fn normalize(
    row: &[String],
    pattern: SchemaPattern,
    min_phone_digits: usize,
) -> Option<ContactRecord> {
    if row.iter().all(|c| c.trim().is_empty()) {
        return None;
    }

    let (first_name, last_name) = match pattern {
        SchemaPattern::ThreeColumn => split_full_name(cell(row, 1)),
        SchemaPattern::FourColumn => combine_names(cell(row, 0), cell(row, 1)),
    };
    if first_name.is_empty() {
        return None;
    }

    let phone_col = match pattern {
        SchemaPattern::ThreeColumn => 0,
        SchemaPattern::FourColumn => 2,
    };
    let phone = clean_phone(cell(row, phone_col));
    if phone.len() < min_phone_digits {
        return None;
    }

    let tags_col = pattern.column_count() - 1;
    let tags = standardize_tags(cell(row, tags_col));

    Some(ContactRecord {
        first_name,
        last_name,
        phone,
        tags,
    })
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// Strip every non-digit; a result longer than 13 digits loses the digits
/// at 1-indexed positions 4 and 5, repeatedly if still too long.
pub fn clean_phone(raw: &str) -> String {
    let mut digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    while digits.len() > MAX_PHONE_DIGITS {
        digits.replace_range(3..5, "");
    }
    digits
}

/// First whitespace token becomes the first name; the rest, joined, the
/// last name. Single-token names leave the last name empty.
fn split_full_name(full: &str) -> (String, String) {
    let mut parts = full.split_whitespace();
    let first = parts.next().map(title_case_word).unwrap_or_default();
    let last = parts.map(title_case_word).collect::<Vec<_>>().join(" ");
    (first, last)
}

/// Four-column layout: extra tokens in the first-name cell migrate to the
/// front of the surname.
fn combine_names(first_raw: &str, last_raw: &str) -> (String, String) {
    let (first, overflow) = split_full_name(first_raw);
    let surname = title_case(last_raw);
    let last = match (overflow.is_empty(), surname.is_empty()) {
        (true, _) => surname,
        (_, true) => overflow,
        (false, false) => format!("{} {}", overflow, surname),
    };
    (first, last)
}

/// Title Case every whitespace-separated word, independent of input casing.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Split a raw tags field on commas, trim, drop empties, Title Case,
/// dedup case-insensitively, and append the default tag exactly once.
/// The literal "nan" (a spreadsheet-export artifact) counts as empty.
pub fn standardize_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut seen: Vec<String> = Vec::new();
    let default_key = DEFAULT_TAG.to_lowercase();

    let field = raw.trim();
    if !field.eq_ignore_ascii_case("nan") {
        for part in field.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            // Any casing/spacing variant of the default tag is re-added
            // canonically below.
            if part.to_lowercase().replace(' ', "") == default_key {
                continue;
            }
            let tag = title_case(part);
            let key = tag.to_lowercase();
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            tags.push(tag);
        }
    }

    tags.push(DEFAULT_TAG.to_string());
    tags
}
